pub mod plan_service;
pub mod settings_patch;
pub mod token_service;

pub use plan_service::PlanService;
pub use settings_patch::{SettingsError, SettingsPatch};
pub use token_service::{TokenDetail, TokenService};
