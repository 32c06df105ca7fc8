//! Common types for the luma Lua analyzer.
//!
//! This crate provides foundational types used across all luma crates:
//! - Source spans (`Span`) as byte offsets
//! - Source element classification (`SourceElement`, `ElementKind`) for
//!   editor highlighting

pub mod element;
pub mod span;

pub use element::{ElementKind, Elements, SourceElement};
pub use span::Span;
