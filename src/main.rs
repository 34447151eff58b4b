//! Main entry point for the quote resolver CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quote_resolver::cli::commands::{self, Commands};
use quote_resolver::ResolverConfig;

/// Fetch quotes from several public sources and show them in Russian
#[derive(Parser, Debug)]
#[command(name = "quote-resolver", version, about, long_about = None)]
struct Args {
    /// Configuration file (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Per-source timeout in milliseconds
    #[arg(long)]
    source_timeout_ms: Option<u64>,

    /// Translation timeout in milliseconds
    #[arg(long)]
    translation_timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("quote_resolver={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = ResolverConfig::load(args.config.as_deref())?;

    // Override config with CLI args if provided
    config.apply_overrides(args.source_timeout_ms, args.translation_timeout_ms)?;

    // Execute command
    match args.command {
        Some(Commands::Quote { json }) => {
            commands::handle_quote(config, json).await?;
        }
        Some(Commands::Carousel { authors }) => {
            commands::handle_carousel(config, authors).await?;
        }
        Some(Commands::Sources) => {
            commands::handle_sources(&config)?;
        }
        Some(Commands::Theme { action }) => {
            commands::handle_theme(&config, action)?;
        }
        Some(Commands::Server { host, port }) => {
            commands::handle_server(config, host, port).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
