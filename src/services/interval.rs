use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::error::{AppError, AppResult};

/// Half-open time interval `[start, end)`.
///
/// Two predicates live here on purpose: `overlaps` (half-open, used for
/// conflict checks) and `covers_inclusive` (closed, used by the occupancy
/// display). They intentionally disagree at the end instant; keep them
/// separate until the product decides otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl Interval {
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Self {
        Self { start, end }
    }

    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// Strict overlap: touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Inclusive membership test `[start, end]`, matching the occupancy grid.
    pub fn covers_inclusive(&self, t: OffsetDateTime) -> bool {
        self.start <= t && t <= self.end
    }
}

/// Parse an RFC 3339 timestamp into a UTC instant.
///
/// Bookings are minute-granular; sub-second precision is dropped so that
/// stored text timestamps compare consistently.
pub fn parse_instant(field: &str, value: &str) -> AppResult<OffsetDateTime> {
    let parsed = OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|_| AppError::Validation(format!("{field} must be an RFC 3339 timestamp")))?;
    let utc = parsed.to_offset(UtcOffset::UTC);
    utc.replace_nanosecond(0)
        .map_err(|e| AppError::Internal(e.to_string()))
}
