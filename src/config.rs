use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::submitter::ChangeSettings;
use crate::watcher::WatchSettings;

/// What to do when a delete targets a record the provider does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingRecordPolicy {
    #[default]
    Fail,
    Ignore,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub watch: WatchSettings,
    pub change: ChangeSettings,
    pub wait_for_sync: bool,
    pub missing_record: MissingRecordPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the config from any variable source; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(value) = lookup("ROUTE53_WATCH_INTERVAL") {
            config.watch.interval = parse_seconds("ROUTE53_WATCH_INTERVAL", value)?;
        }
        if let Some(value) = lookup("ROUTE53_WATCH_TIMEOUT") {
            config.watch.timeout = parse_seconds("ROUTE53_WATCH_TIMEOUT", value)?;
        }
        if let Some(value) = lookup("ROUTE53_RECORD_TTL") {
            config.change.ttl = match value.trim().parse::<i64>() {
                Ok(ttl) if ttl >= 0 => ttl,
                _ => return Err(invalid("ROUTE53_RECORD_TTL", value)),
            };
        }
        if let Some(value) = lookup("ROUTE53_CHANGE_COMMENT") {
            config.change.comment = value;
        }
        if let Some(value) = lookup("ROUTE53_WAIT_FOR_SYNC") {
            config.wait_for_sync = match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => return Err(invalid("ROUTE53_WAIT_FOR_SYNC", value)),
            };
        }
        if let Some(value) = lookup("ROUTE53_DELETE_MISSING") {
            config.missing_record = match value.trim().to_ascii_lowercase().as_str() {
                "fail" => MissingRecordPolicy::Fail,
                "ignore" => MissingRecordPolicy::Ignore,
                _ => return Err(invalid("ROUTE53_DELETE_MISSING", value)),
            };
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            watch: WatchSettings::default(),
            change: ChangeSettings::default(),
            wait_for_sync: true,
            missing_record: MissingRecordPolicy::default(),
        }
    }
}

fn invalid(var: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid { var, value }
}

fn parse_seconds(var: &'static str, value: String) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(invalid(var, value)),
    }
}
