pub mod list;
pub mod settings;
pub mod show;

pub use list::token_list;
pub use settings::{settings_put, settings_show};
pub use show::token_show;
