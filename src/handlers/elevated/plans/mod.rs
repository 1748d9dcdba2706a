pub mod list;
pub mod reorder;

pub use list::plan_list;
pub use reorder::plan_reorder;
