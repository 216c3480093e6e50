//! CLI configuration from environment variables.

use std::env;
use thiserror::Error;

/// Log filter used when neither `RUST_LOG` nor `BREWLOG_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?} (expected true, false, 1 or 0)")]
    InvalidBool { name: String, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `BREWLOG_PRETTY`: Pretty-print JSON output (default: true)
    /// - `BREWLOG_LOG`: Log filter when `RUST_LOG` is unset (default: "info")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let pretty = match lookup("BREWLOG_PRETTY") {
            Some(value) => parse_bool("BREWLOG_PRETTY", &value)?,
            None => true,
        };

        let log_filter = lookup("BREWLOG_LOG")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self { pretty, log_filter })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}
