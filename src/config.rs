use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::lifecycle::{DEFAULT_ASSIGNMENT_THRESHOLD, SUPPORTED_CAPACITIES};
use crate::core::schedule::DEFAULT_RESERVED_FLAT_RATE;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub schedule: ScheduleSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            lifecycle: LifecycleConfig::default(),
            notifications: NotificationSettings::default(),
            schedule: ScheduleSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

/// Tunables for the match lifecycle state machine.
#[derive(Debug, Clone, Deserialize)]
pub struct LifecycleConfig {
    /// Occupancy at which the owner is prompted to assign a court.
    /// Fixed regardless of capacity; flagged as a configuration point.
    #[serde(default = "default_assignment_threshold")]
    pub assignment_threshold: u8,
    #[serde(default = "default_supported_capacities")]
    pub supported_capacities: Vec<u8>,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            assignment_threshold: default_assignment_threshold(),
            supported_capacities: default_supported_capacities(),
        }
    }
}

fn default_assignment_threshold() -> u8 {
    DEFAULT_ASSIGNMENT_THRESHOLD
}
fn default_supported_capacities() -> Vec<u8> {
    SUPPORTED_CAPACITIES.to_vec()
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    /// Seconds before a notification auto-expires.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    3
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleSettings {
    /// Flat revenue per reserved slot in the day summary.
    #[serde(default = "default_reserved_flat_rate")]
    pub reserved_flat_rate: i64,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            reserved_flat_rate: default_reserved_flat_rate(),
        }
    }
}

fn default_reserved_flat_rate() -> i64 {
    DEFAULT_RESERVED_FLAT_RATE
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with CANCHA_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with CANCHA_)
            // e.g., CANCHA_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CANCHA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CANCHA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
