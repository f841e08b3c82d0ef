//! Pagination utilities for service layer
//!
//! Provides an offset/limit `Pagination` and helpers to normalize raw query inputs.

use std::ops::Range;

/// Offset/limit pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// maximum number of items to return
    pub limit: u64,
    /// number of items to skip
    pub offset: u64,
}

impl Pagination {
    pub fn new(limit: u64, offset: u64) -> Self { Self { limit, offset } }

    /// Parse raw query values leniently.
    ///
    /// A missing, unparseable or non-positive `limit` becomes `default_limit`;
    /// a missing, unparseable or negative `offset` becomes 0.
    pub fn from_query(limit: Option<&str>, offset: Option<&str>, default_limit: u64) -> Self {
        let limit = limit
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v > 0)
            .map_or(default_limit, |v| v as u64);
        let offset = offset
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v >= 0)
            .map_or(0, |v| v as u64);
        Self { limit, offset }
    }

    /// Index range of this page within a list of `total` items, clamped so it
    /// never goes out of bounds. An offset past the end yields an empty range.
    pub fn window(self, total: usize) -> Range<usize> {
        let start = usize::try_from(self.offset).unwrap_or(usize::MAX).min(total);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        let end = start.saturating_add(limit).min(total);
        start..end
    }
}
