//! Quote resolver: source race, Russian normalization and static fallback

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::core::config::ResolverConfig;
use crate::core::errors::Result;
use crate::core::fallback::FallbackQuotes;
use crate::core::language::is_russian;
use crate::core::models::{QuoteOrigin, RawQuote, ResolvedQuote};
use crate::core::source::{fetch_from_source, HttpQuoteSource, QuoteSource};
use crate::core::translator::Translator;

/// Resolves a displayable Russian quote from several unreliable sources.
///
/// Degrades in three tiers, each absorbing every failure of the tier below:
/// race across sources, detect-or-translate, static fallback list.
#[derive(Debug, Clone)]
pub struct QuoteResolver {
    client: reqwest::Client,
    sources: Arc<Vec<Arc<dyn QuoteSource>>>,
    source_timeout: Duration,
    translator: Translator,
    fallback: Arc<FallbackQuotes>,
}

impl QuoteResolver {
    /// Create a resolver with the sources listed in the configuration
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let sources = config
            .sources
            .iter()
            .cloned()
            .map(|spec| Arc::new(HttpQuoteSource::new(spec)) as Arc<dyn QuoteSource>)
            .collect();
        Self::with_sources(config, sources)
    }

    /// Create a resolver with custom source implementations
    pub fn with_sources(
        config: ResolverConfig,
        sources: Vec<Arc<dyn QuoteSource>>,
    ) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(4)
            .build()?;

        let translator = Translator::new(
            client.clone(),
            config.translation_endpoint.as_str(),
            config.langpair.as_str(),
            config.translation_timeout(),
        );

        info!(
            sources = sources.len(),
            source_timeout_ms = config.source_timeout_ms,
            translation_timeout_ms = config.translation_timeout_ms,
            "Quote resolver ready"
        );

        Ok(Self {
            client,
            sources: Arc::new(sources),
            source_timeout: config.source_timeout(),
            translator,
            fallback: Arc::new(FallbackQuotes::new(&config.fallback_quotes)),
        })
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = ResolverConfig::from_env()?;
        Self::new(config)
    }

    /// Resolve one quote. Never fails and never returns empty text.
    pub async fn fetch_quote(&self) -> ResolvedQuote {
        let Some(raw) = self.race_sources().await else {
            warn!("All quote sources failed, using fallback quote");
            return ResolvedQuote::new(self.fallback.pick(), QuoteOrigin::Fallback);
        };

        let (text, origin) = self.normalize(raw).await;
        ResolvedQuote::new(text, origin)
    }

    /// Make sure `text` is Russian, translating or falling back as needed
    pub async fn ensure_russian_quote(&self, text: &str) -> String {
        let raw = RawQuote {
            source: "caller".to_string(),
            text: text.to_string(),
        };
        self.normalize(raw).await.0
    }

    /// Sources in race order
    pub fn sources(&self) -> impl Iterator<Item = &Arc<dyn QuoteSource>> {
        self.sources.iter()
    }

    pub fn fallback(&self) -> &FallbackQuotes {
        &self.fallback
    }

    /// Launch every source at once and take the first success.
    ///
    /// Returning drops the `JoinSet`, which aborts attempts still in flight;
    /// their outcome is never observed.
    async fn race_sources(&self) -> Option<RawQuote> {
        let mut attempts = JoinSet::new();

        for source in self.sources.iter() {
            let client = self.client.clone();
            let source = Arc::clone(source);
            let timeout = self.source_timeout;
            attempts.spawn(async move {
                let result = fetch_from_source(&client, source.as_ref(), timeout).await;
                (source.id().to_string(), result)
            });
        }

        while let Some(joined) = attempts.join_next().await {
            match joined {
                Ok((source, Ok(text))) => {
                    info!(source = %source, pending = attempts.len(), "Quote source won the race");
                    return Some(RawQuote { source, text });
                }
                Ok((source, Err(e))) => {
                    warn!(source = %source, error = %e, "Quote source failed");
                }
                Err(e) => {
                    warn!(error = %e, "Quote source task did not complete");
                }
            }
        }

        None
    }

    async fn normalize(&self, raw: RawQuote) -> (String, QuoteOrigin) {
        if raw.text.trim().is_empty() {
            debug!(source = %raw.source, "Empty quote, using fallback");
            return (self.fallback.pick(), QuoteOrigin::Fallback);
        }

        if is_russian(&raw.text) {
            let origin = QuoteOrigin::Source {
                name: raw.source,
                translated: false,
            };
            return (raw.text, origin);
        }

        match self.translator.translate(&raw.text).await {
            Ok(translated) => {
                debug!(source = %raw.source, "Quote translated");
                let origin = QuoteOrigin::Source {
                    name: raw.source,
                    translated: true,
                };
                (translated, origin)
            }
            Err(e) => {
                warn!(source = %raw.source, error = %e, "Translation failed, using fallback quote");
                (self.fallback.pick(), QuoteOrigin::Fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fallback::FALLBACK_QUOTES;
    use crate::core::models::{ResponseShape, SourceSpec};
    use httpmock::prelude::*;
    use serde_json::json;

    fn config(server: &MockServer) -> ResolverConfig {
        ResolverConfig {
            sources: vec![
                SourceSpec::new(
                    "dummyjson",
                    server.url("/dummyjson"),
                    ResponseShape::Field {
                        path: "quote".to_string(),
                    },
                ),
                SourceSpec::new(
                    "typefit",
                    server.url("/typefit"),
                    ResponseShape::ArrayField {
                        field: "text".to_string(),
                    },
                ),
                SourceSpec::new("quotable", server.url("/quotable"), ResponseShape::PlainText),
            ],
            source_timeout_ms: 1000,
            translation_endpoint: server.url("/translate"),
            translation_timeout_ms: 1000,
            ..Default::default()
        }
    }

    fn resolver(server: &MockServer) -> QuoteResolver {
        QuoteResolver::new(config(server)).unwrap()
    }

    fn fail(server: &MockServer, path: &str) {
        server.mock(|when, then| {
            when.method(GET).path(path.to_string());
            then.status(500);
        });
    }

    #[tokio::test]
    async fn all_sources_failing_yields_fallback() {
        let server = MockServer::start_async().await;
        fail(&server, "/dummyjson");
        fail(&server, "/typefit");
        fail(&server, "/quotable");
        let translate_mock = server.mock(|when, then| {
            when.method(GET).path("/translate");
            then.status(200);
        });

        let quote = resolver(&server).fetch_quote().await;

        assert!(FALLBACK_QUOTES.contains(&quote.as_str()));
        assert!(quote.origin.is_fallback());
        translate_mock.assert_calls(0);
    }

    #[tokio::test]
    async fn russian_winner_is_returned_without_translation() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/dummyjson");
            then.status(200)
                .json_body(json!({ "id": 1, "quote": "Привет", "author": "Автор" }));
        });
        fail(&server, "/typefit");
        fail(&server, "/quotable");
        let translate_mock = server.mock(|when, then| {
            when.method(GET).path("/translate");
            then.status(200);
        });

        let quote = resolver(&server).fetch_quote().await;

        assert_eq!(quote.text, "Привет");
        assert_eq!(
            quote.origin,
            QuoteOrigin::Source {
                name: "dummyjson".to_string(),
                translated: false
            }
        );
        translate_mock.assert_calls(0);
    }

    #[tokio::test]
    async fn english_winner_is_translated() {
        let server = MockServer::start_async().await;
        fail(&server, "/dummyjson");
        server.mock(|when, then| {
            when.method(GET).path("/typefit");
            then.status(200)
                .json_body(json!([{ "text": "Hello" }, { "text": "Hello" }]));
        });
        fail(&server, "/quotable");
        let translate_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/translate")
                .query_param("q", "Hello")
                .query_param("langpair", "en|ru");
            then.status(200).json_body(json!({
                "responseData": { "translatedText": "Привет &amp; добро пожаловать" },
                "responseStatus": 200
            }));
        });

        let quote = resolver(&server).fetch_quote().await;

        assert_eq!(quote.text, "Привет & добро пожаловать");
        assert_eq!(
            quote.origin,
            QuoteOrigin::Source {
                name: "typefit".to_string(),
                translated: true
            }
        );
        translate_mock.assert_calls(1);
    }

    #[tokio::test]
    async fn translation_failure_yields_fallback() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/quotable");
            then.status(200).body("Stay hungry, stay foolish.");
        });
        fail(&server, "/dummyjson");
        fail(&server, "/typefit");
        fail(&server, "/translate");

        let quote = resolver(&server).fetch_quote().await;

        assert!(FALLBACK_QUOTES.contains(&quote.as_str()));
        assert!(quote.origin.is_fallback());
    }

    #[tokio::test]
    async fn translation_error_banner_is_not_served() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/dummyjson");
            then.status(200).json_body(json!({ "quote": "Hello" }));
        });
        fail(&server, "/typefit");
        fail(&server, "/quotable");
        server.mock(|when, then| {
            when.method(GET).path("/translate");
            then.status(200).json_body(json!({
                "responseData": { "translatedText": "'AUTO' IS AN INVALID SOURCE LANGUAGE" },
                "responseStatus": "403"
            }));
        });

        let quote = resolver(&server).fetch_quote().await;

        assert!(FALLBACK_QUOTES.contains(&quote.as_str()));
        assert!(quote.origin.is_fallback());
    }

    #[tokio::test]
    async fn late_response_never_wins() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/dummyjson");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .json_body(json!({ "quote": "Опоздавшая цитата" }));
        });
        fail(&server, "/typefit");
        fail(&server, "/quotable");

        let mut config = config(&server);
        config.source_timeout_ms = 200;
        let quote = QuoteResolver::new(config).unwrap().fetch_quote().await;

        assert_ne!(quote.text, "Опоздавшая цитата");
        assert!(FALLBACK_QUOTES.contains(&quote.as_str()));
    }

    #[tokio::test]
    async fn fastest_success_wins_over_slower_success() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/dummyjson");
            then.status(200)
                .delay(Duration::from_millis(600))
                .json_body(json!({ "quote": "Медленная цитата" }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/quotable");
            then.status(200).body("Быстрая цитата");
        });
        fail(&server, "/typefit");

        let quote = resolver(&server).fetch_quote().await;

        assert_eq!(quote.text, "Быстрая цитата");
    }

    #[tokio::test]
    async fn ensure_russian_quote_keeps_cyrillic_text() {
        let server = MockServer::start_async().await;
        let translate_mock = server.mock(|when, then| {
            when.method(GET).path("/translate");
            then.status(200);
        });

        let text = resolver(&server)
            .ensure_russian_quote("Всё будет хорошо!")
            .await;

        assert_eq!(text, "Всё будет хорошо!");
        translate_mock.assert_calls(0);
    }

    #[tokio::test]
    async fn ensure_russian_quote_replaces_empty_text() {
        let server = MockServer::start_async().await;

        let text = resolver(&server).ensure_russian_quote("   ").await;

        assert!(FALLBACK_QUOTES.contains(&text.as_str()));
    }

    #[tokio::test]
    async fn ensure_russian_quote_survives_translation_timeout() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/translate");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .json_body(json!({ "responseData": { "translatedText": "Поздно" } }));
        });

        let mut config = config(&server);
        config.translation_timeout_ms = 200;
        let text = QuoteResolver::new(config)
            .unwrap()
            .ensure_russian_quote("Too late")
            .await;

        assert!(FALLBACK_QUOTES.contains(&text.as_str()));
    }

    #[test]
    fn resolver_without_sources_serves_fallback() {
        let config = ResolverConfig {
            sources: vec![],
            ..Default::default()
        };
        let resolver = QuoteResolver::new(config).unwrap();

        let quote = tokio_test::block_on(resolver.fetch_quote());

        assert!(resolver.fallback().contains(quote.as_str()));
        assert_eq!(resolver.sources().count(), 0);
    }
}
