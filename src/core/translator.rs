//! Client for the public translation endpoint

use std::time::Duration;
use tracing::debug;

use crate::core::errors::{QuoteError, Result};
use crate::core::language::decode_html_entities;

/// Translates quotes into Russian through a MyMemory-style GET endpoint
#[derive(Debug, Clone)]
pub struct Translator {
    client: reqwest::Client,
    endpoint: String,
    langpair: String,
    timeout: Duration,
}

impl Translator {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        langpair: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            langpair: langpair.into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Translate `text`, returning the decoded translation.
    ///
    /// Every failure mode maps to [`QuoteError::TranslationUnavailable`].
    pub async fn translate(&self, text: &str) -> Result<String> {
        match tokio::time::timeout(self.timeout, self.send_request(text)).await {
            Ok(result) => result,
            Err(_) => Err(unavailable(format!(
                "timed out after {}ms",
                self.timeout.as_millis()
            ))),
        }
    }

    async fn send_request(&self, text: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", text), ("langpair", self.langpair.as_str())])
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("HTTP {}", status.as_u16())));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| unavailable(format!("malformed response: {}", e)))?;

        // The endpoint reports quota and validation errors with HTTP 200,
        // sometimes with the status as a string
        let status_in_body = &json["responseStatus"];
        let code = status_in_body
            .as_u64()
            .or_else(|| status_in_body.as_str().and_then(|s| s.trim().parse().ok()));
        if let Some(code) = code {
            if code != 200 {
                return Err(unavailable(format!("responseStatus {}", code)));
            }
        }

        let translated = json["responseData"]["translatedText"]
            .as_str()
            .map(decode_html_entities)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| unavailable("empty translatedText".to_string()))?;

        debug!(chars = translated.chars().count(), "Translation received");
        Ok(translated)
    }
}

fn unavailable(reason: String) -> QuoteError {
    QuoteError::TranslationUnavailable { reason }
}
