use crate::calendar::DEFAULT_EPOCH;
use chrono::NaiveDate;
use std::{env, path::PathBuf};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a port number (got '{0}')")]
    Port(String),
    #[error("APP_EPOCH must be a YYYY-MM-DD date (got '{raw}'): {source}")]
    Epoch {
        raw: String,
        source: chrono::ParseError,
    },
}

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    /// Calendar date of day 1.
    pub epoch: NaiveDate,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Port(raw))?,
            None => DEFAULT_PORT,
        };

        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let raw_epoch = lookup("APP_EPOCH").unwrap_or_else(|| DEFAULT_EPOCH.to_string());
        let epoch = raw_epoch
            .trim()
            .parse()
            .map_err(|source| ConfigError::Epoch {
                raw: raw_epoch.clone(),
                source,
            })?;

        Ok(Self {
            port,
            data_path,
            epoch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("data/state.json"));
        assert_eq!(config.epoch, NaiveDate::from_ymd_opt(2025, 11, 12).unwrap());
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("PORT", "3000"),
            ("APP_DATA_PATH", "/tmp/workout.json"),
            ("APP_EPOCH", "2026-01-01"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.data_path, PathBuf::from("/tmp/workout.json"));
        assert_eq!(config.epoch, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::Port(_))
        ));
        assert!(matches!(
            config_from(&[("APP_EPOCH", "12.11.2025")]),
            Err(ConfigError::Epoch { .. })
        ));
    }
}
