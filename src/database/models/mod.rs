pub mod plan;
pub mod token;
pub mod token_settings;
pub mod user;

pub use plan::Plan;
pub use token::{Network, Token};
pub use token_settings::{SettingsDocument, TokenSettings};
pub use user::User;
