pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{settings::ServerSettings, toml_config::TomlConfig};
pub use crate::core::{dispatcher::FormulaDispatcher, server::build_router};
pub use crate::utils::error::{MathApiError, Result};
