//! Calendar windows used by reporting queries.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Half-open calendar window: `start` inclusive, `end` exclusive.
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if end <= start {
            return Err(DateRangeError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Window covering `days` full days ending on `last` inclusive.
    pub fn trailing_days(last: NaiveDate, days: u32) -> Self {
        let span = days.max(1) as i64;
        Self {
            start: last - Duration::days(span - 1),
            end: last + Duration::days(1),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Number of days the window spans.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Iterates every day in the window in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.len_days().max(0)).map(move |offset| start + Duration::days(offset))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`DateRange`] values.
pub enum DateRangeError {
    InvalidRange,
}

impl fmt::Display for DateRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRangeError::InvalidRange => f.write_str("date range end must be after start"),
        }
    }
}

impl std::error::Error for DateRangeError {}
