//! Quote Resolver - resilient multi-source quote fetching
//!
//! Races several public quote services, normalizes the winner to Russian
//! (detecting Cyrillic or translating) and falls back to a static list, so a
//! caller always gets a displayable quote. Also ships the caller-side state
//! of the testimonial carousel, a CLI and an HTTP API.

#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod core;
pub mod server;

// Re-export key types for convenience
pub use crate::core::{
    config::ResolverConfig,
    errors::QuoteError,
    fallback::{FallbackQuotes, FALLBACK_QUOTES},
    language::{decode_html_entities, is_russian},
    models::{QuoteOrigin, ResolvedQuote, ResponseShape, SourceSpec},
    resolver::QuoteResolver,
    source::{HttpQuoteSource, QuoteSource},
};

pub use crate::app::{
    carousel::Carousel,
    state::{AppState, UiMode},
    theme::{FileThemeStore, Theme, ThemeStore},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
