use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::error::DemotrackError;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DemotrackConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServiceConfig {
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HttpConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: 8767,
        }
    }
}

/// Knobs for the aggregation engine. Defaults reproduce the dashboard's
/// numbers exactly; change them only for what-if reporting.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Minutes assumed for a session with no recorded duration.
    pub default_duration_minutes: u32,
    /// Lowest rating that counts a session as converted.
    pub success_rating: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: 60,
            success_rating: 4.0,
        }
    }
}

impl DemotrackConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path))
            .build()?;
        s.try_deserialize()
    }

    /// Load from `path` when given, otherwise fall back to built-in defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self, DemotrackError> {
        match path {
            Some(p) => Ok(Self::load(p)?),
            None => Ok(Self::default()),
        }
    }
}
