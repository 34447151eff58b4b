//! Application state shared by the demo surfaces

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::app::carousel::Carousel;
use crate::app::theme::{Theme, ThemeStore};

/// Which implementation drives the interactive widgets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiMode {
    #[default]
    JQuery,
    Vanilla,
}

impl fmt::Display for UiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiMode::JQuery => write!(f, "jquery"),
            UiMode::Vanilla => write!(f, "vanilla"),
        }
    }
}

impl FromStr for UiMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jquery" => Ok(UiMode::JQuery),
            "vanilla" => Ok(UiMode::Vanilla),
            other => Err(format!("unknown mode: {}", other)),
        }
    }
}

/// Mode, widget flag, theme and carousel in one place
pub struct AppState {
    mode: UiMode,
    widgets_initialized: bool,
    theme: Theme,
    store: Box<dyn ThemeStore>,
    carousel: Carousel,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("mode", &self.mode)
            .field("widgets_initialized", &self.widgets_initialized)
            .field("theme", &self.theme)
            .field("carousel", &self.carousel)
            .finish()
    }
}

impl AppState {
    /// Restore the theme from `store`; an unreadable store means the default theme
    pub fn new(store: Box<dyn ThemeStore>, carousel: Carousel) -> Self {
        let theme = match store.load() {
            Ok(theme) => theme.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Theme storage unavailable, using default theme");
                Theme::default()
            }
        };

        let mut state = Self {
            mode: UiMode::default(),
            widgets_initialized: false,
            theme,
            store,
            carousel,
        };
        state.apply_mode();
        state
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn is_mode(&self, mode: UiMode) -> bool {
        self.mode == mode
    }

    pub fn widgets_initialized(&self) -> bool {
        self.widgets_initialized
    }

    /// Switch mode. Returns `false` when `mode` is already active.
    pub fn set_active_mode(&mut self, mode: UiMode) -> bool {
        if mode == self.mode {
            return false;
        }
        self.mode = mode;
        self.apply_mode();
        true
    }

    fn apply_mode(&mut self) {
        self.widgets_initialized = self.mode == UiMode::JQuery;
        info!(mode = %self.mode, "Mode activated");
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Set and persist the theme; storage failures only get logged
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Err(e) = self.store.save(theme) {
            warn!(error = %e, theme = %theme, "Failed to persist theme");
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }
}
