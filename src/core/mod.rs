//! Core quote resolution engine

pub mod config;
pub mod errors;
pub mod fallback;
pub mod language;
pub mod models;
pub mod resolver;
pub mod source;
pub mod translator;
