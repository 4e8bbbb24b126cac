use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use thiserror::Error;

/// Default abandonment window, in years of 365 days.
pub const DEFAULT_ABANDONED_YEARS: f64 = 2.0;
/// Days without an update after which a popular package counts as dormant.
pub const DEFAULT_REVIVAL_INACTIVE_DAYS: i64 = 730;
/// Downloads a dormant package must exceed to be flagged as revived.
pub const DEFAULT_REVIVAL_DOWNLOADS: u64 = 10_000;

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

#[derive(Debug, Error, PartialEq)]
pub enum DateParseError {
    #[error("expected YYYY-MM-DD, got {0:?}")]
    Shape(String),
    #[error("{0:?} is not a calendar date")]
    Calendar(String),
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DateParseError> {
    if !DATE_SHAPE.is_match(raw) {
        return Err(DateParseError::Shape(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| DateParseError::Calendar(raw.to_string()))
}

/// Whole days between midnight of `date` and `now`, floored.
pub fn days_since(date: NaiveDate, now: NaiveDateTime) -> i64 {
    let elapsed = now - date.and_time(chrono::NaiveTime::MIN);
    elapsed.num_seconds().div_euclid(86_400)
}

/// Dormancy window and download floor for [`is_revived`].
///
/// Kept apart from the abandonment window: the two are tuned separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevivalRule {
    pub inactive_days: i64,
    pub download_threshold: u64,
}

impl Default for RevivalRule {
    fn default() -> Self {
        Self {
            inactive_days: DEFAULT_REVIVAL_INACTIVE_DAYS,
            download_threshold: DEFAULT_REVIVAL_DOWNLOADS,
        }
    }
}

/// True when more than `years * 365` days have passed since `last_updated`.
///
/// An unparseable date is never abandoned.
pub fn is_abandoned(last_updated: &str, years: f64, now: NaiveDateTime) -> bool {
    match parse_date(last_updated) {
        Ok(date) => days_since(date, now) as f64 > years * 365.0,
        Err(_) => false,
    }
}

/// True when the package has been dormant for the default 730 days and still
/// draws more than `threshold` downloads.
pub fn is_revived(last_updated: &str, downloads: u64, threshold: u64, now: NaiveDateTime) -> bool {
    let rule = RevivalRule {
        download_threshold: threshold,
        ..RevivalRule::default()
    };
    is_revived_with(last_updated, downloads, &rule, now)
}

/// [`is_revived`] with an explicit dormancy window.
pub fn is_revived_with(
    last_updated: &str,
    downloads: u64,
    rule: &RevivalRule,
    now: NaiveDateTime,
) -> bool {
    match parse_date(last_updated) {
        Ok(date) => days_since(date, now) > rule.inactive_days && downloads > rule.download_threshold,
        Err(_) => false,
    }
}
