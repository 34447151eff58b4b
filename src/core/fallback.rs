//! Static fallback quotes used when no source or translation succeeds

use rand::seq::SliceRandom;

/// Built-in fallback list
pub const FALLBACK_QUOTES: &[&str] = &[
    "Лучший способ предсказать будущее — создать его.",
    "Дорогу осилит идущий.",
    "Успех — это способность идти от неудачи к неудаче, не теряя энтузиазма.",
    "Не ошибается тот, кто ничего не делает.",
    "Терпение и труд всё перетрут.",
    "Единственный способ делать великие дела — любить то, что вы делаете.",
    "Век живи — век учись.",
    "Начинать всегда стоит с того, что сеет сомнения.",
];

/// Non-empty quote list with uniform random selection
#[derive(Debug, Clone)]
pub struct FallbackQuotes {
    quotes: Vec<String>,
}

impl Default for FallbackQuotes {
    fn default() -> Self {
        Self {
            quotes: FALLBACK_QUOTES.iter().map(|q| q.to_string()).collect(),
        }
    }
}

impl FallbackQuotes {
    /// Build from configured quotes; blank entries are dropped and an empty
    /// list falls back to [`FALLBACK_QUOTES`].
    pub fn new(quotes: &[String]) -> Self {
        let quotes: Vec<String> = quotes
            .iter()
            .map(|q| q.trim())
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .collect();

        if quotes.is_empty() {
            Self::default()
        } else {
            Self { quotes }
        }
    }

    pub fn pick(&self) -> String {
        self.quotes
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| FALLBACK_QUOTES[0].to_string())
    }

    pub fn contains(&self, text: &str) -> bool {
        self.quotes.iter().any(|q| q == text)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::language::is_russian;

    #[test]
    fn test_builtin_quotes_are_russian() {
        assert!(FALLBACK_QUOTES.iter().all(|q| is_russian(q)));
    }

    #[test]
    fn test_pick_returns_member() {
        let fallback = FallbackQuotes::default();
        for _ in 0..50 {
            let quote = fallback.pick();
            assert!(FALLBACK_QUOTES.contains(&quote.as_str()));
        }
    }

    #[test]
    fn test_empty_override_uses_builtin() {
        let fallback = FallbackQuotes::new(&["  ".to_string()]);
        assert_eq!(fallback.len(), FALLBACK_QUOTES.len());
    }

    #[test]
    fn test_custom_quotes() {
        let fallback = FallbackQuotes::new(&["Своя цитата".to_string()]);
        assert_eq!(fallback.pick(), "Своя цитата");
        assert!(fallback.contains("Своя цитата"));
        assert!(!fallback.contains(FALLBACK_QUOTES[0]));
    }
}
