//! Testimonial carousel filled with resolved quotes

use serde::Serialize;
use tracing::debug;

use crate::core::models::ResolvedQuote;
use crate::core::resolver::QuoteResolver;

/// Authors shown when none are given
pub const DEFAULT_AUTHORS: &[&str] = &["Анна К.", "Игорь П.", "Мария С."];

/// One card of the carousel
#[derive(Debug, Clone, Serialize)]
pub struct TestimonialCard {
    pub author: String,
    pub quote: Option<ResolvedQuote>,
}

impl TestimonialCard {
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            quote: None,
        }
    }
}

/// Cards plus the index of the visible one
#[derive(Debug, Clone, Default, Serialize)]
pub struct Carousel {
    cards: Vec<TestimonialCard>,
    current_index: usize,
}

impl Carousel {
    pub fn new<I, S>(authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cards: authors.into_iter().map(TestimonialCard::new).collect(),
            current_index: 0,
        }
    }

    pub fn with_default_authors() -> Self {
        Self::new(DEFAULT_AUTHORS.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[TestimonialCard] {
        &self.cards
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&TestimonialCard> {
        self.cards.get(self.current_index)
    }

    /// Advance, wrapping to the first card
    pub fn show_next(&mut self) -> Option<&TestimonialCard> {
        if self.cards.is_empty() {
            return None;
        }
        self.current_index = (self.current_index + 1) % self.cards.len();
        self.current()
    }

    /// Step back, wrapping to the last card
    pub fn show_prev(&mut self) -> Option<&TestimonialCard> {
        if self.cards.is_empty() {
            return None;
        }
        self.current_index = (self.current_index + self.cards.len() - 1) % self.cards.len();
        self.current()
    }

    /// Jump to `index`; out-of-range indices leave the carousel unchanged
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.cards.len() {
            return false;
        }
        self.current_index = index;
        true
    }

    /// Fetch a quote for one card
    pub async fn fill_card(
        &mut self,
        index: usize,
        resolver: &QuoteResolver,
    ) -> Option<&TestimonialCard> {
        if index >= self.cards.len() {
            return None;
        }

        let quote = resolver.fetch_quote().await;
        debug!(index, origin = ?quote.origin, "Card filled");

        let card = &mut self.cards[index];
        card.quote = Some(quote);
        Some(&*card)
    }

    /// Fill every card, one after another
    pub async fn populate(&mut self, resolver: &QuoteResolver) {
        for index in 0..self.cards.len() {
            self.fill_card(index, resolver).await;
        }
    }
}
