//! Quote sources and single-source fetching

use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::core::errors::{QuoteError, Result};
use crate::core::models::{ResponseBody, ResponseShape, SourceSpec};

/// A provider of a single random quotation.
///
/// Implementations describe how to ask for a quote and how to read one out of
/// the answer; fetching, timeouts and racing are handled by the resolver.
pub trait QuoteSource: fmt::Debug + Send + Sync {
    /// Stable identifier used in logs and results
    fn id(&self) -> &str;

    /// Build the GET request for this source
    fn build_request(&self, client: &reqwest::Client) -> reqwest::RequestBuilder;

    /// Extract quote text from the response body
    fn extract(&self, body: &ResponseBody) -> Option<String>;
}

/// Source driven entirely by configuration
#[derive(Debug, Clone)]
pub struct HttpQuoteSource {
    spec: SourceSpec,
}

impl HttpQuoteSource {
    pub fn new(spec: SourceSpec) -> Self {
        Self { spec }
    }

    pub fn url(&self) -> &str {
        &self.spec.url
    }

    pub fn shape(&self) -> &ResponseShape {
        &self.spec.shape
    }
}

impl From<SourceSpec> for HttpQuoteSource {
    fn from(spec: SourceSpec) -> Self {
        Self::new(spec)
    }
}

impl QuoteSource for HttpQuoteSource {
    fn id(&self) -> &str {
        &self.spec.name
    }

    fn build_request(&self, client: &reqwest::Client) -> reqwest::RequestBuilder {
        client
            .get(&self.spec.url)
            .header("Accept", "application/json, text/plain;q=0.9, */*;q=0.5")
    }

    fn extract(&self, body: &ResponseBody) -> Option<String> {
        self.spec.shape.extract(body)
    }
}

/// Fetch one quote from one source, bounded by `timeout`.
///
/// Dropping the request future on expiry cancels the underlying request.
pub async fn fetch_from_source(
    client: &reqwest::Client,
    source: &dyn QuoteSource,
    timeout: Duration,
) -> Result<String> {
    let attempt = async {
        let response = source
            .build_request(client)
            .send()
            .await
            .map_err(|e| QuoteError::NetworkError {
                message: format!("{}: {}", source.id(), e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::SourceUnavailable {
                source_id: source.id().to_string(),
                status: status.as_u16(),
            });
        }

        let raw = response.text().await.map_err(|e| QuoteError::NetworkError {
            message: format!("{}: {}", source.id(), e),
        })?;

        debug!(source = %source.id(), bytes = raw.len(), "Quote source responded");

        source
            .extract(&ResponseBody::parse(raw))
            .ok_or_else(|| QuoteError::SourceEmptyResult {
                source_id: source.id().to_string(),
            })
    };

    match tokio::time::timeout(timeout, attempt).await {
        Ok(result) => result,
        Err(_) => Err(QuoteError::SourceTimeout {
            source_id: source.id().to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }),
    }
}
