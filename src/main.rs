use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mealsnap::commands::{
    run_interactive, ConfigCommand, EditCommand, HistoryCommand, LogCommand, MealContext,
};
use mealsnap::{Config, LogStore, MealAnalyzer};

#[derive(Parser)]
#[command(name = "mealsnap")]
#[command(version)]
#[command(about = "Log meals from a photo and a description", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a new meal
    Log(LogCommand),

    /// Edit an existing meal
    Edit(EditCommand),

    /// List logged meals and their edit history
    History(HistoryCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mealsnap=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Credentials may live in a .env file next to where the tool is run
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!("Failed to load .env file: {}", e);
        }
    }

    let cli = Cli::parse();
    let config = Config::load(cli.config)?;

    let store = LogStore::new(config.data_dir.value.clone());
    if uses_meal_log(&cli.command) {
        store.ensure_ready()?;
    }

    let analyzer = MealAnalyzer::from_config(&config);
    let ctx = MealContext {
        store: &store,
        analyzer: &analyzer,
    };

    match &cli.command {
        Some(Commands::Log(cmd)) => cmd.run(&ctx).await?,
        Some(Commands::Edit(cmd)) => cmd.run(&ctx).await?,
        Some(Commands::History(cmd)) => cmd.run(&ctx)?,
        Some(Commands::Config(cmd)) => cmd.run(&config)?,
        None => run_interactive(&ctx).await?,
    }

    Ok(())
}

/// Returns true if the command reads or writes the meal log.
fn uses_meal_log(cmd: &Option<Commands>) -> bool {
    !matches!(cmd, Some(Commands::Config(_)))
}
