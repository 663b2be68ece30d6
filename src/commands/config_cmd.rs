use clap::{Args, Subcommand};

use super::meal::OutputFormat;
use crate::config::Config;
use crate::store::LogStore;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

fn status(set: bool) -> &'static str {
    if set {
        "set"
    } else {
        "not set"
    }
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                let log_file = LogStore::new(config.data_dir.value.clone()).path();

                match format {
                    OutputFormat::Json => {
                        let view = serde_json::json!({
                            "config_file": config.config_file,
                            "data_dir": config.data_dir,
                            "log_file": log_file,
                            "vision": {
                                "endpoint": config.vision.endpoint,
                                "api_key": status(config.vision.api_key.is_some()),
                            },
                            "edamam": {
                                "endpoint": config.edamam.endpoint,
                                "app_id": status(config.edamam.app_id.is_some()),
                                "app_key": status(config.edamam.app_key.is_some()),
                            },
                        });
                        println!("{}", serde_json::to_string_pretty(&view)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("data_dir: {}", config.data_dir.value.display());
                        println!("  source: {}", config.data_dir.source);
                        println!("  log file: {}", log_file.display());
                        println!();

                        println!("vision.endpoint: {}", config.vision.endpoint);
                        println!(
                            "vision.api_key: {}",
                            status(config.vision.api_key.is_some())
                        );
                        println!();

                        println!("edamam.endpoint: {}", config.edamam.endpoint);
                        println!(
                            "edamam credentials: {}",
                            status(config.edamam.is_configured())
                        );
                    }
                }
                Ok(())
            }
        }
    }
}
