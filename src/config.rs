use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::clock::{FixedHeight, HeightSource, ManualHeight, SystemHeight};
use crate::error::ConfigError;

/// Where the registry reads the external clock value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    /// Seconds since the Unix epoch.
    System,
    /// A constant height.
    Fixed(u64),
    /// A caller-driven height starting at the given value.
    Manual(u64),
}

impl ClockSource {
    /// Parse `system`, `fixed:<height>` or `manual[:<start>]`.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let value = value.trim();
        let (kind, arg) = match value.split_once(':') {
            Some((kind, arg)) => (kind, Some(arg.trim())),
            None => (value, None),
        };

        let height = |arg: &str| {
            arg.parse::<u64>().map_err(|_| {
                ConfigError::Invalid("MAINTRACK_CLOCK", "height must be a valid u64")
            })
        };

        match (kind, arg) {
            ("system", None) => Ok(ClockSource::System),
            ("fixed", Some(arg)) => Ok(ClockSource::Fixed(height(arg)?)),
            ("manual", None) => Ok(ClockSource::Manual(0)),
            ("manual", Some(arg)) => Ok(ClockSource::Manual(height(arg)?)),
            _ => Err(ConfigError::Invalid(
                "MAINTRACK_CLOCK",
                "expected system, fixed:<height> or manual[:<start>]",
            )),
        }
    }

    pub fn build(self) -> Arc<dyn HeightSource> {
        match self {
            ClockSource::System => Arc::new(SystemHeight),
            ClockSource::Fixed(height) => Arc::new(FixedHeight(height)),
            ClockSource::Manual(start) => Arc::new(ManualHeight::new(start)),
        }
    }
}

/// Registry configuration, loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub clock: ClockSource,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// MAINTRACK_CLOCK defaults to "system", MAINTRACK_LOG to "info".
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let clock = match lookup("MAINTRACK_CLOCK") {
            Some(value) if !value.trim().is_empty() => ClockSource::parse(&value)?,
            _ => ClockSource::System,
        };

        let log_filter = lookup("MAINTRACK_LOG")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());
        EnvFilter::try_new(&log_filter).map_err(|_| {
            ConfigError::Invalid("MAINTRACK_LOG", "must be a valid tracing filter directive")
        })?;

        Ok(Config { clock, log_filter })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock: ClockSource::System,
            log_filter: "info".to_string(),
        }
    }
}
