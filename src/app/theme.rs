//! Theme preference and its persistence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use crate::core::errors::{QuoteError, Result};

/// Key the theme is stored under
pub const THEME_KEY: &str = "carousel-theme";

/// Color theme of the testimonial carousel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

/// Storage for the single theme value
pub trait ThemeStore: Send + Sync {
    /// Stored theme, `None` when nothing was saved yet
    fn load(&self) -> Result<Option<Theme>>;

    fn save(&self, theme: Theme) -> Result<()>;
}

/// JSON file holding a key/value object; only [`THEME_KEY`] is touched
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, message: impl fmt::Display) -> QuoteError {
        QuoteError::StorageError {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }

    fn read_entries(&self) -> Result<serde_json::Map<String, serde_json::Value>> {
        if !self.path.exists() {
            return Ok(serde_json::Map::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| self.storage_error(e))?;
        if content.trim().is_empty() {
            return Ok(serde_json::Map::new());
        }

        match serde_json::from_str::<serde_json::Value>(&content).map_err(|e| self.storage_error(e))? {
            serde_json::Value::Object(entries) => Ok(entries),
            _ => Err(self.storage_error("expected a JSON object")),
        }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<Theme>> {
        let entries = self.read_entries()?;
        match entries.get(THEME_KEY).and_then(|v| v.as_str()) {
            Some(value) => value.parse().map(Some).map_err(|e| self.storage_error(e)),
            None => Ok(None),
        }
    }

    fn save(&self, theme: Theme) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(THEME_KEY.to_string(), theme.as_str().into());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| self.storage_error(e))?;
            }
        }

        let content = serde_json::to_string_pretty(&serde_json::Value::Object(entries))?;
        std::fs::write(&self.path, content).map_err(|e| self.storage_error(e))
    }
}

/// In-process store, nothing survives a restart
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    value: Mutex<Option<Theme>>,
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<Theme>> {
        let value = self
            .value
            .lock()
            .map_err(|e| QuoteError::InternalError(e.to_string()))?;
        Ok(*value)
    }

    fn save(&self, theme: Theme) -> Result<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|e| QuoteError::InternalError(e.to_string()))?;
        *value = Some(theme);
        Ok(())
    }
}
