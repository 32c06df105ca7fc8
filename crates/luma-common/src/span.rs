//! Source location tracking (byte offsets).

use serde::Serialize;

/// A half-open byte range `[begin, end)` into the analyzed source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub begin: u32,
    pub end: u32,
}

impl Span {
    #[must_use]
    pub const fn new(begin: u32, end: u32) -> Self {
        Self { begin, end }
    }

    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end - self.begin
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// The smallest span covering both `self` and `other`.
    #[must_use]
    pub fn cover(self, other: Span) -> Span {
        Span::new(self.begin.min(other.begin), self.end.max(other.end))
    }

    /// True when `offset` falls inside the span.
    #[must_use]
    pub const fn contains(&self, offset: u32) -> bool {
        self.begin <= offset && offset < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_extends_in_both_directions() {
        let a = Span::new(4, 7);
        let b = Span::new(10, 12);
        assert_eq!(a.cover(b), Span::new(4, 12));
        assert_eq!(b.cover(a), Span::new(4, 12));
    }

    #[test]
    fn contains_is_end_exclusive() {
        let span = Span::new(2, 5);
        assert!(span.contains(2));
        assert!(span.contains(4));
        assert!(!span.contains(5));
    }
}
