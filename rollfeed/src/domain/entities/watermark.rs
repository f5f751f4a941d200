//! Delivery watermark
//!
//! Marks the newest item already delivered in a daily digest. The
//! watermark only ever moves forward.

use chrono::{DateTime, FixedOffset};

/// Last delivered timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Watermark {
    /// No digest has ever been delivered
    #[default]
    Absent,
    Set(DateTime<FixedOffset>),
}

impl Watermark {
    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Watermark::Absent => None,
            Watermark::Set(t) => Some(*t),
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Watermark::Set(_))
    }

    /// Whether an item published at `published_at` is newer than the mark.
    /// Everything is newer than an absent watermark.
    pub fn is_before(&self, published_at: &DateTime<FixedOffset>) -> bool {
        match self {
            Watermark::Absent => true,
            Watermark::Set(t) => published_at > t,
        }
    }

    /// Move the watermark to `candidate` unless it would go backwards.
    pub fn advance(self, candidate: DateTime<FixedOffset>) -> Self {
        match self {
            Watermark::Set(t) if t >= candidate => self,
            _ => Watermark::Set(candidate),
        }
    }
}

impl From<Option<DateTime<FixedOffset>>> for Watermark {
    fn from(value: Option<DateTime<FixedOffset>>) -> Self {
        value.map(Watermark::Set).unwrap_or_default()
    }
}
