//! Core runtime configuration.
//!
//! Configuration is resolved once at startup and handed to the controller.
//! Nothing in the core reads environment variables while handling actions.

use thiserror::Error;

/// Environment variable controlling whether the sample encounters are loaded.
pub const SEED_SAMPLE_DATA_ENV: &str = "HEALTHSTAT_SEED_SAMPLE_DATA";
/// Environment variable controlling how many conditions the dashboard lists.
pub const TOP_CONDITIONS_LIMIT_ENV: &str = "HEALTHSTAT_TOP_CONDITIONS_LIMIT";

pub const DEFAULT_TOP_CONDITIONS_LIMIT: usize = 10;

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("top_conditions_limit must be greater than zero")]
    ZeroLimit,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Core configuration resolved at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreConfig {
    seed_sample_data: bool,
    top_conditions_limit: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
            top_conditions_limit: DEFAULT_TOP_CONDITIONS_LIMIT,
        }
    }
}

impl CoreConfig {
    pub fn new(seed_sample_data: bool, top_conditions_limit: usize) -> ConfigResult<Self> {
        if top_conditions_limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }
        Ok(Self {
            seed_sample_data,
            top_conditions_limit,
        })
    }

    /// Resolve configuration from the process environment, falling back to defaults.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let seed_sample_data = match lookup(SEED_SAMPLE_DATA_ENV) {
            Some(raw) => parse_bool(SEED_SAMPLE_DATA_ENV, &raw)?,
            None => defaults.seed_sample_data,
        };

        let top_conditions_limit = match lookup(TOP_CONDITIONS_LIMIT_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: TOP_CONDITIONS_LIMIT_ENV,
                    value: raw.clone(),
                })?,
            None => defaults.top_conditions_limit,
        };

        Self::new(seed_sample_data, top_conditions_limit)
    }

    pub fn seed_sample_data(&self) -> bool {
        self.seed_sample_data
    }

    pub fn top_conditions_limit(&self) -> usize {
        self.top_conditions_limit
    }

    pub fn with_seed_sample_data(mut self, seed: bool) -> Self {
        self.seed_sample_data = seed;
        self
    }
}

fn parse_bool(name: &'static str, raw: &str) -> ConfigResult<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: raw.to_string(),
        }),
    }
}
