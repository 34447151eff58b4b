//! Core data models for quote resolution

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// How a source lays out its quote in the response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseShape {
    /// JSON object; `path` is a dotted path to a string field, e.g. `data.quote`
    Field { path: String },
    /// JSON array of objects; a random entry with a non-empty `field` is used
    ArrayField { field: String },
    /// The body itself is the quote
    PlainText,
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseShape::Field { path } => write!(f, "field:{}", path),
            ResponseShape::ArrayField { field } => write!(f, "array:{}", field),
            ResponseShape::PlainText => write!(f, "text"),
        }
    }
}

impl ResponseShape {
    /// Pull a quote out of a response body, if this shape can find one.
    ///
    /// The returned text is trimmed; a whitespace-only value counts as no quote.
    pub fn extract(&self, body: &ResponseBody) -> Option<String> {
        match (self, body) {
            (ResponseShape::Field { path }, ResponseBody::Json(json)) => {
                let value = path
                    .split('.')
                    .filter(|segment| !segment.is_empty())
                    .try_fold(json, |node, segment| node.get(segment))?;
                non_empty(value.as_str())
            }
            (ResponseShape::ArrayField { field }, ResponseBody::Json(Value::Array(items))) => {
                let candidates: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get(field).and_then(Value::as_str))
                    .filter(|text| !text.trim().is_empty())
                    .collect();
                non_empty(candidates.choose(&mut rand::thread_rng()).copied())
            }
            (ResponseShape::PlainText, ResponseBody::Text(text)) => non_empty(Some(text.as_str())),
            (ResponseShape::PlainText, ResponseBody::Json(Value::String(text))) => {
                non_empty(Some(text.as_str()))
            }
            _ => None,
        }
    }
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Configured quote source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub name: String,
    pub url: String,
    pub shape: ResponseShape,
}

impl SourceSpec {
    pub fn new(name: impl Into<String>, url: impl Into<String>, shape: ResponseShape) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            shape,
        }
    }
}

/// Response body, parsed as JSON when possible
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn parse(raw: String) -> Self {
        match serde_json::from_str::<Value>(&raw) {
            Ok(json) => ResponseBody::Json(json),
            Err(_) => ResponseBody::Text(raw),
        }
    }
}

/// Quote as returned by the winning source, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuote {
    pub source: String,
    pub text: String,
}

/// Where a resolved quote came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuoteOrigin {
    Source { name: String, translated: bool },
    Fallback,
}

impl QuoteOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, QuoteOrigin::Fallback)
    }
}

/// Displayable quote: non-empty, Russian where possible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedQuote {
    pub text: String,
    pub origin: QuoteOrigin,
    pub resolved_at: DateTime<Utc>,
}

impl ResolvedQuote {
    pub fn new(text: String, origin: QuoteOrigin) -> Self {
        Self {
            text,
            origin,
            resolved_at: Utc::now(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ResolvedQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
