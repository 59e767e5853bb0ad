//! `zkw` command line.

mod cli;
mod commands;

use clap::Parser as _;
use cli::{Cli, Commands, KeyCommands, ValidateCommands};

fn init_tracing() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_target(false)
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize tracing: {:?}", e))
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> eyre::Result<()> {
    // Load .env file (fails silently if not found)
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let cli = Cli::parse();

    let res = match cli.command {
        Commands::Key { command } => match command {
            KeyCommands::Import { args } => {
                commands::key_import(args.store.store, args.input.source()).await
            }
            KeyCommands::Status { args } => {
                commands::key_status(&args.store);
                Ok(())
            }
            KeyCommands::Clear { args } => commands::key_clear(args.store),
        },
        Commands::Validate { command } => match command {
            ValidateCommands::Address { address } => commands::validate_address(&address),
            ValidateCommands::Amount { amount } => commands::validate_amount(&amount),
            ValidateCommands::Key { args } => commands::validate_key(args.source()).await,
        },
        #[cfg(feature = "native")]
        Commands::Prove { args } => commands::prove(args).await,
    };

    if let Err(e) = res {
        tracing::error!("Error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
