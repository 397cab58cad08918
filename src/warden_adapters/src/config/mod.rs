pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AuthenticationSettings, CacheSettings, LoggingSettings, PasswordSettings, Settings,
    SettingsError, StrategyKind, build_strategy,
};
