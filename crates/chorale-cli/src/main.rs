//! Chorale CLI - live quad-voice chorus from the terminal.

mod commands;
mod preset;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chorale")]
#[command(author, version, about = "Quad-voice dimension chorus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the chorus live between an input and an output device
    Run(commands::run::RunArgs),

    /// List and inspect audio devices
    Devices(commands::devices::DevicesArgs),

    /// Show the mode table and voice layout
    Modes(commands::modes::ModesArgs),
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Modes(args) => commands::modes::run(args),
    }
}
