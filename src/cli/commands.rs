//! CLI command definitions and handlers

use clap::Subcommand;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;
use tracing::info;

use crate::app::carousel::Carousel;
use crate::app::state::AppState;
use crate::app::theme::{FileThemeStore, Theme};
use crate::core::config::ResolverConfig;
use crate::core::models::QuoteOrigin;
use crate::core::resolver::QuoteResolver;

/// Commands for the quote resolver
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one quote in Russian
    Quote {
        /// Print the quote with its origin as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fill the testimonial carousel and print every card
    Carousel {
        /// Card authors (default: built-in authors)
        #[arg(short, long = "author")]
        authors: Vec<String>,
    },

    /// List configured quote sources
    Sources,

    /// Show or change the persisted theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Start HTTP API server
    Server {
        /// Bind address (default: 127.0.0.1)
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Listen port (default: 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

/// Theme subcommands
#[derive(Subcommand, Debug)]
pub enum ThemeAction {
    /// Print the current theme
    Get,
    /// Switch between light and dark
    Toggle,
    /// Set a specific theme
    Set {
        /// light or dark
        theme: Theme,
    },
}

/// Handle quote command
pub async fn handle_quote(config: ResolverConfig, json: bool) -> anyhow::Result<()> {
    let resolver = QuoteResolver::new(config)?;

    let start_time = Instant::now();
    let quote = resolver.fetch_quote().await;
    info!(origin = ?quote.origin, elapsed = ?start_time.elapsed(), "Quote resolved");

    if json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        println!("{}", quote);
    }

    Ok(())
}

/// Handle carousel command
pub async fn handle_carousel(config: ResolverConfig, authors: Vec<String>) -> anyhow::Result<()> {
    let store = FileThemeStore::new(config.theme_path.clone());
    let resolver = QuoteResolver::new(config)?;

    let carousel = if authors.is_empty() {
        Carousel::with_default_authors()
    } else {
        Carousel::new(authors)
    };
    let mut state = AppState::new(Box::new(store), carousel);

    let start_time = Instant::now();
    let pb = ProgressBar::new(state.carousel().len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let mut fallbacks = 0;
    for index in 0..state.carousel().len() {
        if let Some(card) = state.carousel_mut().fill_card(index, &resolver).await {
            pb.set_message(card.author.clone());
            if card.quote.as_ref().map_or(true, |q| q.origin.is_fallback()) {
                fallbacks += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        "Carousel filled: {} cards, {} fallbacks in {:?}",
        state.carousel().len(),
        fallbacks,
        start_time.elapsed()
    );

    println!("Theme: {}", state.theme());
    for (i, card) in state.carousel().cards().iter().enumerate() {
        let (text, origin) = card
            .quote
            .as_ref()
            .map(|q| (q.text.as_str(), describe_origin(&q.origin)))
            .unwrap_or(("", String::new()));
        println!("\n{}. {}", i + 1, card.author);
        println!("   «{}»", text);
        println!("   ({})", origin);
    }

    Ok(())
}

fn describe_origin(origin: &QuoteOrigin) -> String {
    match origin {
        QuoteOrigin::Source { name, translated: true } => format!("{}, translated", name),
        QuoteOrigin::Source { name, translated: false } => name.clone(),
        QuoteOrigin::Fallback => "fallback".to_string(),
    }
}

/// Handle sources command
pub fn handle_sources(config: &ResolverConfig) -> anyhow::Result<()> {
    if config.sources.is_empty() {
        println!("No quote sources configured, fallback quotes only.");
        return Ok(());
    }

    for (i, source) in config.sources.iter().enumerate() {
        println!("{}. {} [{}] {}", i + 1, source.name, source.shape, source.url);
    }
    println!(
        "\nSource timeout: {}ms, translation timeout: {}ms ({})",
        config.source_timeout_ms, config.translation_timeout_ms, config.langpair
    );

    Ok(())
}

/// Handle theme command
pub fn handle_theme(config: &ResolverConfig, action: ThemeAction) -> anyhow::Result<()> {
    let store = FileThemeStore::new(config.theme_path.clone());
    let mut state = AppState::new(Box::new(store), Carousel::default());

    let theme = match action {
        ThemeAction::Get => state.theme(),
        ThemeAction::Toggle => state.toggle_theme(),
        ThemeAction::Set { theme } => {
            state.set_theme(theme);
            state.theme()
        }
    };

    info!(path = %config.theme_path.display(), "Theme store");
    println!("{}", theme);

    Ok(())
}

/// Handle server command
pub async fn handle_server(config: ResolverConfig, host: String, port: u16) -> anyhow::Result<()> {
    use crate::server::api::run_server;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("Server starting on http://{}:{}", host, port);
    println!("Quote endpoint: http://{}:{}/v1/quote", host, port);

    run_server(host, port, config).await?;

    Ok(())
}
