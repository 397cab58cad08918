use std::num::NonZeroUsize;

use ::config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;
use warden_application::{
    AllRealmsSuccessfulStrategy, AtLeastRealmsSuccessfulStrategy, FirstRealmSuccessfulStrategy,
};
use warden_core::AuthenticationStrategy;

use crate::config::constants::{defaults, env, files};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub ttl_seconds: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_seconds: defaults::CACHE_TTL_SECONDS,
        }
    }
}

/// Argon2id cost parameters used when hashing new passwords.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PasswordSettings {
    pub memory_cost_kib: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for PasswordSettings {
    fn default() -> Self {
        Self {
            memory_cost_kib: defaults::ARGON2_MEMORY_COST_KIB,
            time_cost: defaults::ARGON2_TIME_COST,
            parallelism: defaults::ARGON2_PARALLELISM,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    FirstSuccessful,
    AllSuccessful,
    AtLeast,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthenticationSettings {
    pub strategy: StrategyKind,
    /// Only read by [`StrategyKind::AtLeast`].
    pub minimum_successes: usize,
}

impl Default for AuthenticationSettings {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            minimum_successes: defaults::MINIMUM_SUCCESSES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: defaults::LOG_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cache: CacheSettings,
    pub password: PasswordSettings,
    pub authentication: AuthenticationSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings from `.env`, the optional JSON settings files and
    /// `WARDEN__*` environment variables, later sources winning.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let settings: Settings = Config::builder()
            .add_source(File::new(files::SETTINGS_FILE, FileFormat::Json).required(false))
            .add_source(File::new(files::SETTINGS_DIR_FILE, FileFormat::Json).required(false))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .prefix_separator(env::ENV_SEPARATOR)
                    .separator(env::ENV_SEPARATOR),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(json, FileFormat::Json))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.password.parallelism == 0 {
            return Err(SettingsError::Invalid {
                key: "password.parallelism",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.authentication.strategy == StrategyKind::AtLeast
            && self.authentication.minimum_successes == 0
        {
            return Err(SettingsError::Invalid {
                key: "authentication.minimum_successes",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Build the configured authentication strategy.
pub fn build_strategy(
    settings: &AuthenticationSettings,
) -> Result<Box<dyn AuthenticationStrategy>, SettingsError> {
    let strategy: Box<dyn AuthenticationStrategy> = match settings.strategy {
        StrategyKind::FirstSuccessful => Box::new(FirstRealmSuccessfulStrategy::new()),
        StrategyKind::AllSuccessful => Box::new(AllRealmsSuccessfulStrategy::new()),
        StrategyKind::AtLeast => {
            let minimum = NonZeroUsize::new(settings.minimum_successes).ok_or_else(|| {
                SettingsError::Invalid {
                    key: "authentication.minimum_successes",
                    reason: "must be at least 1".to_string(),
                }
            })?;
            Box::new(AtLeastRealmsSuccessfulStrategy::new(minimum))
        }
    };

    tracing::debug!(strategy = ?settings.strategy, "Built authentication strategy");
    Ok(strategy)
}
