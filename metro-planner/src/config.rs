//! Application configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::alerts::{AlertCacheConfig, AlertClientConfig};
use crate::planner::PlannerConfig;

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to an unusable value
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Everything needed to start the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// JSON file holding the station table.
    pub stations_path: PathBuf,

    pub alerts: AlertClientConfig,

    pub alert_cache: AlertCacheConfig,

    pub planner: PlannerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            stations_path: PathBuf::from("stations.json"),
            alerts: AlertClientConfig::default(),
            alert_cache: AlertCacheConfig::default(),
            planner: PlannerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from `METRO_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// anything unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("METRO_BIND_ADDR") {
            config.bind_addr = value.parse().map_err(|_| ConfigError::Invalid {
                key: "METRO_BIND_ADDR",
                value: value.clone(),
                reason: "expected host:port",
            })?;
        }

        if let Some(value) = lookup("METRO_STATIONS_PATH") {
            config.stations_path = PathBuf::from(value);
        }

        if let Some(value) = lookup("METRO_ALERTS_URL") {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    key: "METRO_ALERTS_URL",
                    value,
                    reason: "must not be empty",
                });
            }
            config.alerts = config.alerts.with_base_url(value);
        }

        if let Some(value) = lookup("METRO_ALERTS_TTL_SECS") {
            let secs: u64 = value.parse().map_err(|_| ConfigError::Invalid {
                key: "METRO_ALERTS_TTL_SECS",
                value: value.clone(),
                reason: "expected whole seconds",
            })?;
            config.alert_cache = config.alert_cache.with_ttl(Duration::from_secs(secs));
        }

        if let Some(value) = lookup("METRO_MINUTES_PER_HOP") {
            config.planner.minutes_per_hop = value.parse().map_err(|_| ConfigError::Invalid {
                key: "METRO_MINUTES_PER_HOP",
                value: value.clone(),
                reason: "expected whole minutes",
            })?;
        }

        if let Some(value) = lookup("METRO_REQUIRE_SAME_LINE") {
            let require = parse_bool(&value).ok_or_else(|| ConfigError::Invalid {
                key: "METRO_REQUIRE_SAME_LINE",
                value: value.clone(),
                reason: "expected true or false",
            })?;
            config.planner = config.planner.with_same_line(require);
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
