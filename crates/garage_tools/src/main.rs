//! Garage Sim - Development Tools

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "garage-tools")]
#[command(about = "Development tools for Garage Sim")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate catalog data files
    Validate {
        /// Path to catalog directory
        #[arg(default_value = "assets/catalog")]
        path: String,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => {
            tracing::info!("Validating catalog files in: {path}");
            match garage_tools::validate::validate_catalog_dir(std::path::Path::new(&path)) {
                Ok(()) => tracing::info!("Validation passed"),
                Err(e) => {
                    tracing::error!("Validation failed: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
