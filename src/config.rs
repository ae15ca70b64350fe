use crate::constants::*;
use crate::error::ConfigError;
use std::env;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub ledger_path: String,
    pub current_participant: Option<String>,
    pub include_completed: bool,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ledger_path = lookup(ENV_LEDGER_PATH)
            .filter(|path| !path.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LEDGER_PATH.to_string());
        let log_level = lookup(ENV_LOG_LEVEL)
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let current_participant = match lookup(ENV_CURRENT_PARTICIPANT) {
            Some(id) if id.trim().is_empty() => {
                return Err(ConfigError::BlankValue(ENV_CURRENT_PARTICIPANT.to_string()));
            }
            Some(id) => Some(id.trim().to_string()),
            None => None,
        };

        let include_completed = match lookup(ENV_INCLUDE_COMPLETED) {
            Some(value) => parse_flag(ENV_INCLUDE_COMPLETED, &value)?,
            None => false,
        };

        Ok(Config {
            ledger_path,
            current_participant,
            include_completed,
            log_level,
        })
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
