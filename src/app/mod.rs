//! Caller-side state: UI mode, theme persistence and the testimonial carousel

pub mod carousel;
pub mod state;
pub mod theme;
