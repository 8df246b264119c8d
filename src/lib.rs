pub mod cli;
pub mod core;
pub mod providers;
pub mod store;
pub mod updater;

use anyhow::Result;
use crate::core::config::AppConfig;
use tracing::{debug, info};

/// Per-run overrides for the update command, taking precedence over the
/// config file.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    pub output: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

pub enum AppCommand {
    Update(UpdateOptions),
    Status { output: Option<String> },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("xrate starting...");

    let mut config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    match command {
        AppCommand::Update(options) => {
            if options.output.is_some() {
                config.output_path = options.output;
            }
            if options.api_key.is_some() {
                config.api_key = options.api_key;
            }
            if let Some(base_url) = options.base_url {
                config.provider.base_url = base_url;
            }
            debug!("Effective config: {config:#?}");
            cli::update::run(&config).await
        }
        AppCommand::Status { output } => {
            if output.is_some() {
                config.output_path = output;
            }
            debug!("Effective config: {config:#?}");
            cli::status::run(&config)
        }
    }
}
