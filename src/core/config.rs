//! Configuration management

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::fallback::FALLBACK_QUOTES;
use crate::core::models::{ResponseShape, SourceSpec};

/// Prefix for environment overrides, e.g. `QUOTE_SOURCE_TIMEOUT_MS`
pub const ENV_PREFIX: &str = "QUOTE";

/// Configuration for the quote resolver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub sources: Vec<SourceSpec>,
    pub source_timeout_ms: u64,
    pub translation_endpoint: String,
    pub translation_timeout_ms: u64,
    pub langpair: String,
    pub fallback_quotes: Vec<String>,
    pub theme_path: PathBuf,
    pub user_agent: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            source_timeout_ms: 6000,
            translation_endpoint: "https://api.mymemory.translated.net/get".to_string(),
            translation_timeout_ms: 8000,
            langpair: "en|ru".to_string(),
            fallback_quotes: FALLBACK_QUOTES.iter().map(|q| q.to_string()).collect(),
            theme_path: PathBuf::from(".quote-resolver/theme.json"),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Default sources, in order
const DEFAULT_SOURCES: &[(&str, &str)] = &[
    ("dummyjson", "https://dummyjson.com/quotes/random"),
    ("typefit", "https://type.fit/api/quotes"),
    ("quotable", "https://api.quotable.io/random"),
    (
        "forismatic",
        "https://api.forismatic.com/api/1.0/?method=getQuote&format=text&lang=ru",
    ),
];

fn default_sources() -> Vec<SourceSpec> {
    DEFAULT_SOURCES
        .iter()
        .map(|(name, url)| {
            let shape = match *name {
                "dummyjson" => ResponseShape::Field {
                    path: "quote".to_string(),
                },
                "typefit" => ResponseShape::ArrayField {
                    field: "text".to_string(),
                },
                "quotable" => ResponseShape::Field {
                    path: "content".to_string(),
                },
                _ => ResponseShape::PlainText,
            };
            SourceSpec::new(*name, *url, shape)
        })
        .collect()
}

impl ResolverConfig {
    /// Load configuration: defaults, then an optional file, then `QUOTE_*`
    /// environment variables.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment only
    pub fn from_env() -> anyhow::Result<Self> {
        Self::load(None)
    }

    /// Save configuration as pretty JSON
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply command-line timeout overrides on top of the loaded values
    pub fn apply_overrides(
        &mut self,
        source_timeout_ms: Option<u64>,
        translation_timeout_ms: Option<u64>,
    ) -> anyhow::Result<()> {
        if let Some(timeout) = source_timeout_ms {
            self.source_timeout_ms = timeout;
        }
        if let Some(timeout) = translation_timeout_ms {
            self.translation_timeout_ms = timeout;
        }
        self.validate()
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.source_timeout_ms == 0 {
            return Err(anyhow::anyhow!("source_timeout_ms must be greater than 0"));
        }

        if self.translation_timeout_ms == 0 {
            return Err(anyhow::anyhow!(
                "translation_timeout_ms must be greater than 0"
            ));
        }

        if self.translation_endpoint.is_empty() {
            return Err(anyhow::anyhow!("translation_endpoint is required"));
        }

        if self.sources.is_empty() {
            warn!("No quote sources configured, only fallback quotes will be served");
        }

        let mut seen = HashSet::new();
        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(anyhow::anyhow!("Source name must not be empty"));
            }
            if source.url.trim().is_empty() {
                return Err(anyhow::anyhow!("Source {} has no url", source.name));
            }
            if !seen.insert(source.name.as_str()) {
                return Err(anyhow::anyhow!("Duplicate source name: {}", source.name));
            }
        }

        Ok(())
    }

    pub fn source_timeout(&self) -> Duration {
        Duration::from_millis(self.source_timeout_ms)
    }

    pub fn translation_timeout(&self) -> Duration {
        Duration::from_millis(self.translation_timeout_ms)
    }

    /// Find source by name
    pub fn find_source(&self, name: &str) -> Option<&SourceSpec> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Get all source names
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    // `load` reads process-wide QUOTE_* variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ResolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.source_timeout(), Duration::from_secs(6));
        assert_eq!(config.translation_timeout(), Duration::from_secs(8));
        assert_eq!(
            config.source_names(),
            vec!["dummyjson", "typefit", "quotable", "forismatic"]
        );
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let config = ResolverConfig {
            source_timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_duplicate_source() {
        let mut config = ResolverConfig::default();
        config.sources.push(SourceSpec::new(
            "dummyjson",
            "https://example.com",
            ResponseShape::PlainText,
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_without_sources_is_valid() {
        let config = ResolverConfig {
            sources: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_toml_file() {
        let _guard = env_lock();
        let file = toml_file(
            r#"
source_timeout_ms = 1500
langpair = "de|ru"

[[sources]]
name = "local"
url = "http://localhost:9000/quote"
shape = { kind = "field", path = "data.text" }
"#,
        );

        let config = ResolverConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.source_timeout_ms, 1500);
        assert_eq!(config.langpair, "de|ru");
        assert_eq!(config.translation_timeout_ms, 8000);
        assert_eq!(config.sources.len(), 1);
        assert_eq!(
            config.find_source("local").map(|s| &s.shape),
            Some(&ResponseShape::Field {
                path: "data.text".to_string()
            })
        );
    }

    #[test]
    fn test_save_and_reload_json() {
        let _guard = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resolver.json");

        let config = ResolverConfig {
            source_timeout_ms: 2500,
            ..Default::default()
        };
        config.to_file(&path).unwrap();

        let loaded = ResolverConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.source_timeout_ms, 2500);
        assert_eq!(loaded.sources, config.sources);
    }

    #[test]
    fn test_env_overrides_file() {
        let _guard = env_lock();
        let file = toml_file("source_timeout_ms = 1500\ntranslation_timeout_ms = 3000\n");

        std::env::set_var("QUOTE_SOURCE_TIMEOUT_MS", "1234");
        let loaded = ResolverConfig::load(Some(file.path()));
        std::env::remove_var("QUOTE_SOURCE_TIMEOUT_MS");

        let config = loaded.unwrap();
        assert_eq!(config.source_timeout_ms, 1234);
        assert_eq!(config.translation_timeout_ms, 3000);
    }

    #[test]
    fn test_env_without_file() {
        let _guard = env_lock();

        std::env::set_var("QUOTE_TRANSLATION_TIMEOUT_MS", "4321");
        let loaded = ResolverConfig::from_env();
        std::env::remove_var("QUOTE_TRANSLATION_TIMEOUT_MS");

        let config = loaded.unwrap();
        assert_eq!(config.translation_timeout_ms, 4321);
        assert_eq!(config.source_timeout_ms, 6000);
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = ResolverConfig::default();
        config.apply_overrides(Some(250), None).unwrap();
        assert_eq!(config.source_timeout_ms, 250);
        assert_eq!(config.translation_timeout_ms, 8000);

        config.apply_overrides(None, Some(900)).unwrap();
        assert_eq!(config.source_timeout_ms, 250);
        assert_eq!(config.translation_timeout_ms, 900);
    }

    #[test]
    fn test_apply_overrides_rejects_zero() {
        let mut config = ResolverConfig::default();
        assert!(config.apply_overrides(None, Some(0)).is_err());
    }
}
