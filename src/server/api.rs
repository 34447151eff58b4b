//! HTTP API server implementation

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::app::carousel::{Carousel, DEFAULT_AUTHORS};
use crate::core::config::ResolverConfig;
use crate::core::models::{QuoteOrigin, ResolvedQuote};
use crate::core::resolver::QuoteResolver;

/// Largest carousel the API will fill in one request
pub const MAX_CAROUSEL_CARDS: usize = 10;

/// Server state
#[derive(Clone)]
pub struct ApiState {
    resolver: Arc<QuoteResolver>,
}

impl ApiState {
    pub fn new(resolver: QuoteResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// Sources list response
#[derive(Serialize)]
struct SourcesResponse {
    object: String,
    data: Vec<SourceInfo>,
}

#[derive(Serialize)]
struct SourceInfo {
    id: String,
    object: String,
    position: usize,
}

/// Quote response
#[derive(Serialize)]
pub struct QuoteResponse {
    pub text: String,
    pub source: Option<String>,
    pub translated: bool,
    pub fallback: bool,
    pub resolved_at: String,
}

impl From<ResolvedQuote> for QuoteResponse {
    fn from(quote: ResolvedQuote) -> Self {
        let (source, translated) = match &quote.origin {
            QuoteOrigin::Source { name, translated } => (Some(name.clone()), *translated),
            QuoteOrigin::Fallback => (None, false),
        };

        Self {
            fallback: quote.origin.is_fallback(),
            source,
            translated,
            resolved_at: quote.resolved_at.to_rfc3339(),
            text: quote.text,
        }
    }
}

/// Carousel query
#[derive(Deserialize)]
pub struct CarouselQuery {
    pub cards: Option<usize>,
}

/// Carousel response
#[derive(Serialize)]
pub struct CarouselResponse {
    pub cards: Vec<CardItem>,
}

#[derive(Serialize)]
pub struct CardItem {
    pub author: String,
    pub quote: QuoteResponse,
}

/// Health check handler
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List sources in race order
async fn get_sources(State(state): State<Arc<ApiState>>) -> Json<SourcesResponse> {
    let data = state
        .resolver
        .sources()
        .enumerate()
        .map(|(position, source)| SourceInfo {
            id: source.id().to_string(),
            object: "quote_source".to_string(),
            position,
        })
        .collect();

    Json(SourcesResponse {
        object: "list".to_string(),
        data,
    })
}

/// Resolve one quote; always succeeds
async fn get_quote(State(state): State<Arc<ApiState>>) -> Json<QuoteResponse> {
    let quote = state.resolver.fetch_quote().await;
    info!(origin = ?quote.origin, "Quote served");
    Json(quote.into())
}

/// Fill a carousel with `cards` testimonials
async fn get_carousel(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<CarouselQuery>,
) -> Json<CarouselResponse> {
    let count = query
        .cards
        .unwrap_or(DEFAULT_AUTHORS.len())
        .clamp(1, MAX_CAROUSEL_CARDS);

    let authors = (0..count).map(|i| {
        DEFAULT_AUTHORS
            .get(i)
            .map(|a| a.to_string())
            .unwrap_or_else(|| format!("Гость {}", i + 1))
    });
    let mut carousel = Carousel::new(authors);
    carousel.populate(&state.resolver).await;

    let cards = carousel
        .cards()
        .iter()
        .filter_map(|card| {
            card.quote.clone().map(|quote| CardItem {
                author: card.author.clone(),
                quote: quote.into(),
            })
        })
        .collect();

    Json(CarouselResponse { cards })
}

/// Build the router
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/v1/sources", get(get_sources))
        .route("/v1/quote", get(get_quote))
        .route("/v1/carousel", get(get_carousel))
        .with_state(Arc::new(state))
}

/// Run the HTTP server
pub async fn run_server(host: String, port: u16, config: ResolverConfig) -> anyhow::Result<()> {
    let resolver = QuoteResolver::new(config)?;
    let app = router(ApiState::new(resolver));

    // Bind address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
