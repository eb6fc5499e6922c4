pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use crate::domain::ports::ConfigProvider;
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
    #[command(name = "math-api")]
    #[command(about = "HTTP API for geometry and algebra formulas", version)]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Address to bind (default 127.0.0.1)
        #[arg(long)]
        pub host: Option<String>,

        /// Port to listen on (default 3001)
        #[arg(short, long)]
        pub port: Option<u16>,

        /// Enable permissive CORS headers
        #[arg(long)]
        pub cors: Option<bool>,

        /// Log output format: compact or json
        #[arg(long)]
        pub log_format: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ConfigProvider for CliConfig {
        fn host(&self) -> Option<&str> {
            self.host.as_deref()
        }

        fn port(&self) -> Option<u16> {
            self.port
        }

        fn cors(&self) -> Option<bool> {
            self.cors
        }

        fn log_format(&self) -> Option<&str> {
            self.log_format.as_deref()
        }

        fn log_level(&self) -> Option<&str> {
            None
        }
    }

}
