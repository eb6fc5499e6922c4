use anyhow::Context;
use clap::Parser;
use math_api::core::server;
use math_api::domain::ports::ConfigProvider;
use math_api::utils::logger;
use math_api::utils::validation::Validate;
use math_api::{CliConfig, ServerSettings, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入 TOML 配置（可選）
    let file_config = match &cli.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))?,
        ),
        None => None,
    };

    if let Some(file_config) = &file_config {
        if let Err(e) = file_config.validate() {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    // 命令列參數優先於設定檔
    let mut layers: Vec<&dyn ConfigProvider> = Vec::new();
    if let Some(file_config) = &file_config {
        layers.push(file_config);
    }
    layers.push(&cli);

    let settings = match ServerSettings::resolve(&layers) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    logger::init_logger(settings.log_format, cli.verbose, settings.log_level.as_deref());

    tracing::info!("🚀 Starting math-api v{}", env!("CARGO_PKG_VERSION"));
    if cli.verbose {
        tracing::debug!("Resolved settings: {:?}", settings);
    }

    if let Err(e) = server::serve(settings).await {
        tracing::error!(
            "❌ Server failed: {} (Category: {:?})",
            e,
            e.category()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    Ok(())
}
