//! Source element classification for editor tooling.
//!
//! While parsing, the parser records a flat list of classified spans
//! (keywords, variables, literal strings, numerals). Editors consume this
//! list for syntax highlighting; the analysis crates ignore it.

use crate::span::Span;
use serde::Serialize;

/// Classification of a highlighted source range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ElementKind {
    Keyword,
    Variable,
    LiteralString,
    Numeral,
}

/// One classified source range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SourceElement {
    pub kind: ElementKind,
    pub span: Span,
}

impl SourceElement {
    #[must_use]
    pub const fn new(kind: ElementKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Elements in source order, as collected during one parse.
pub type Elements = Vec<SourceElement>;
