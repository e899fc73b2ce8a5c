/*!
 * Simulator Configuration
 * Machine shape and scheduling knobs, loaded from the environment or a JSON file
 *
 * Environment variables:
 * - SMP_CORES: number of cores (default: 4)
 * - SMP_QUANTUM: instructions per dispatch (default: 3)
 * - SMP_DEFAULT_BURST: burst time for demo processes (default: 10)
 * - SMP_TRACE_JSON: JSON log output (default: false)
 */

use super::errors::ConfigError;
use super::limits::{DEFAULT_BURST_TIME, DEFAULT_CORE_COUNT, DEFAULT_QUANTUM, MAX_CORE_COUNT};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

pub const ENV_CORES: &str = "SMP_CORES";
pub const ENV_QUANTUM: &str = "SMP_QUANTUM";
pub const ENV_DEFAULT_BURST: &str = "SMP_DEFAULT_BURST";
pub const ENV_TRACE_JSON: &str = "SMP_TRACE_JSON";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SimConfig {
    pub cores: usize,
    pub quantum: u32,
    pub default_burst: u32,
    pub trace_json: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cores: DEFAULT_CORE_COUNT,
            quantum: DEFAULT_QUANTUM,
            default_burst: DEFAULT_BURST_TIME,
            trace_json: false,
        }
    }
}

impl SimConfig {
    /// Build from process environment, falling back to defaults for unset keys
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            cores: parse_or(&lookup, ENV_CORES, defaults.cores)?,
            quantum: parse_or(&lookup, ENV_QUANTUM, defaults.quantum)?,
            default_burst: parse_or(&lookup, ENV_DEFAULT_BURST, defaults.default_burst)?,
            trace_json: lookup(ENV_TRACE_JSON)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.trace_json),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON object; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cores == 0 || self.cores > MAX_CORE_COUNT {
            return Err(ConfigError::Invalid(format!(
                "cores must be between 1 and {}, got {}",
                MAX_CORE_COUNT, self.cores
            )));
        }
        if self.quantum == 0 {
            return Err(ConfigError::Invalid("quantum must be at least 1".into()));
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}
