//! Parse failure reporting.

use luma_common::Span;
use serde::Serialize;
use std::fmt;

/// A syntax error with the byte span it was detected at.
#[derive(Clone, Debug, Serialize)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at bytes {}..{}",
            self.message, self.span.begin, self.span.end
        )
    }
}

impl std::error::Error for ParseError {}
