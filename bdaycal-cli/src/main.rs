mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bdaycal")]
#[command(about = "Sync contact birthdays and anniversaries into your calendar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what a sync would do, without touching the calendar
    Status,
    /// Reconcile the calendar against the contacts directory
    Sync {
        /// Skip the emailed report even if a recipient is configured
        #[arg(long)]
        no_report: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Status => commands::status::run().await,
        Commands::Sync { no_report } => commands::sync::run(no_report).await,
    }
}
