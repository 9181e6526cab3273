//! Consecutive dated page titles.
//!
//! Titles look like `2024-Apr-08 - Monday`: ISO-ordered year, three-letter
//! month, zero-padded day, then the full weekday name.

use chrono::{Days, Local, NaiveDate};
use thiserror::Error;

/// Format accepted for start dates, e.g. `2024-Apr-08`
pub const START_DATE_FORMAT: &str = "%Y-%b-%d";

/// Format of every generated title
pub const TITLE_FORMAT: &str = "%Y-%b-%d - %A";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateSequenceError {
    #[error("Number of days must be nonnegative, got {0}")]
    NegativeCount(i64),

    #[error("Invalid number of days '{0}', please provide an integer")]
    InvalidCount(String),

    #[error("Invalid start date '{0}', expected YYYY-Mon-DD")]
    InvalidStartDate(String),

    #[error("Date range overflow, please use a smaller number of days")]
    Overflow,
}

/// Build `num_days` consecutive titles starting at `start` (today when `None`).
pub fn consecutive_days(
    start: Option<NaiveDate>,
    num_days: i64,
) -> Result<Vec<String>, DateSequenceError> {
    if num_days < 0 {
        return Err(DateSequenceError::NegativeCount(num_days));
    }
    if num_days == 0 {
        return Ok(Vec::new());
    }

    let start = start.unwrap_or_else(|| Local::now().date_naive());
    let count = num_days.unsigned_abs();

    // Reject ranges running past chrono's last representable day up front
    start
        .checked_add_days(Days::new(count - 1))
        .ok_or(DateSequenceError::Overflow)?;

    (0..count)
        .map(|offset| {
            start
                .checked_add_days(Days::new(offset))
                .map(|day| day.format(TITLE_FORMAT).to_string())
                .ok_or(DateSequenceError::Overflow)
        })
        .collect()
}

/// An empty string means "today" and yields `None`.
pub fn parse_start_date(input: &str) -> Result<Option<NaiveDate>, DateSequenceError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, START_DATE_FORMAT)
        .map(Some)
        .map_err(|_| DateSequenceError::InvalidStartDate(trimmed.to_string()))
}

pub fn parse_day_count(input: &str) -> Result<i64, DateSequenceError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| DateSequenceError::InvalidCount(input.to_string()))
}

/// Untyped entry point: any bad input is logged and produces no titles.
pub fn consecutive_days_lenient(start: &str, num_days: &str) -> Vec<String> {
    let result = parse_day_count(num_days).and_then(|count| {
        let start = parse_start_date(start)?;
        consecutive_days(start, count)
    });

    match result {
        Ok(days) => days,
        Err(e) => {
            tracing::error!("Error: {}", e);
            Vec::new()
        }
    }
}
