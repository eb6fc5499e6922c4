use crate::domain::ports::ConfigProvider;
use crate::utils::error::{MathApiError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;
pub const LOG_FORMATS: &[&str] = &["compact", "json"];
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = MathApiError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(MathApiError::InvalidConfigValueError {
                field: "logging.format".to_string(),
                value: value.to_string(),
                reason: format!("Unsupported log format. Valid formats: {}", LOG_FORMATS.join(", ")),
            }),
        }
    }
}

/// Effective server configuration after all layers have been applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors: bool,
    pub log_format: LogFormat,
    pub log_level: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors: false,
            log_format: LogFormat::Compact,
            log_level: None,
        }
    }
}

impl ServerSettings {
    /// Applies `layers` over the defaults, later layers winning, then validates.
    pub fn resolve(layers: &[&dyn ConfigProvider]) -> Result<Self> {
        let mut settings = Self::default();

        for layer in layers {
            if let Some(host) = layer.host() {
                settings.host = host.to_string();
            }
            if let Some(port) = layer.port() {
                settings.port = port;
            }
            if let Some(cors) = layer.cors() {
                settings.cors = cors;
            }
            if let Some(format) = layer.log_format() {
                settings.log_format = format.parse()?;
            }
            if let Some(level) = layer.log_level() {
                settings.log_level = Some(level.to_string());
            }
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for ServerSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_host("server.host", &self.host)?;
        validation::validate_range("server.port", self.port, 1, u16::MAX)?;
        if let Some(level) = &self.log_level {
            validation::validate_one_of("logging.level", level, LOG_LEVELS)?;
        }
        Ok(())
    }
}
