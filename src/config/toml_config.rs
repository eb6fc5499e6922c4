use crate::config::settings::{LOG_FORMATS, LOG_LEVELS};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{MathApiError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub cors: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub format: Option<String>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MathApiError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MathApiError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PORT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(host) = &self.server.host {
            crate::utils::validation::validate_host("server.host", host)?;
        }

        if let Some(port) = self.server.port {
            crate::utils::validation::validate_range("server.port", port, 1, u16::MAX)?;
        }

        if let Some(format) = &self.logging.format {
            crate::utils::validation::validate_one_of("logging.format", format, LOG_FORMATS)?;
        }

        if let Some(level) = &self.logging.level {
            crate::utils::validation::validate_one_of("logging.level", level, LOG_LEVELS)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn host(&self) -> Option<&str> {
        self.server.host.as_deref()
    }

    fn port(&self) -> Option<u16> {
        self.server.port
    }

    fn cors(&self) -> Option<bool> {
        self.server.cors
    }

    fn log_format(&self) -> Option<&str> {
        self.logging.format.as_deref()
    }

    fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
