//! Date window parsing for history queries
//!
//! Accepts the date spellings people usually hand to `git log --since`:
//! absolute dates and datetimes, `@<unix>` timestamps, `now`/`today`/`yesterday`,
//! `<N> <unit> ago` (also `<N>.<unit>.ago`) and `last <unit>`. Naive values are
//! interpreted in local time.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use thiserror::Error;

/// Naive datetime layouts, tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts, tried in order
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%b %d %Y",
    "%b %d, %Y",
    "%d %b %Y",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("unrecognized date '{0}' (try 2024-01-31, \"2 weeks ago\" or @1700000000)")]
    Unrecognized(String),

    #[error("'{0}' does not exist in the local time zone")]
    NonexistentLocalTime(String),
}

/// Which end of the window a date-only value lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Start of the day
    Start,
    /// Last second of the day
    End,
}

/// Inclusive commit-time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(since: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        Self { since, until }
    }

    /// Window covering all of history
    pub fn unbounded() -> Self {
        Self::new(DateTime::<Utc>::MIN_UTC, DateTime::<Utc>::MAX_UTC)
    }

    /// Parse both bounds relative to the current local time.
    pub fn parse(since: &str, until: &str) -> Result<Self, DateParseError> {
        let now = Local::now();
        Ok(Self::new(
            parse_date_at(since, Bound::Start, now)?,
            parse_date_at(until, Bound::End, now)?,
        ))
    }

    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.since <= time && time <= self.until
    }

    /// Check a unix timestamp (seconds) against the window.
    pub fn contains_seconds(&self, seconds: i64) -> bool {
        Utc.timestamp_opt(seconds, 0)
            .single()
            .is_some_and(|t| self.contains(t))
    }
}

/// Parse a `--since` value. Used as a clap value parser.
pub fn parse_since(input: &str) -> Result<String, String> {
    validate(input, Bound::Start)
}

/// Parse an `--until` value. Used as a clap value parser.
pub fn parse_until(input: &str) -> Result<String, String> {
    validate(input, Bound::End)
}

fn validate(input: &str, bound: Bound) -> Result<String, String> {
    parse_date_at(input, bound, Local::now())
        .map(|_| input.to_string())
        .map_err(|e| e.to_string())
}

/// Parse a date relative to `now`.
pub fn parse_date_at(
    input: &str,
    bound: Bound,
    now: DateTime<Local>,
) -> Result<DateTime<Utc>, DateParseError> {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();

    match lower.as_str() {
        "now" => return Ok(now.with_timezone(&Utc)),
        "today" => return day_bound(now.date_naive(), bound, trimmed),
        "yesterday" => {
            let yesterday = now
                .date_naive()
                .pred_opt()
                .ok_or_else(|| DateParseError::Unrecognized(trimmed.to_string()))?;
            return day_bound(yesterday, bound, trimmed);
        }
        _ => {}
    }

    if let Some(secs) = lower.strip_prefix('@') {
        return secs
            .parse::<i64>()
            .ok()
            .and_then(|s| Utc.timestamp_opt(s, 0).single())
            .ok_or_else(|| DateParseError::Unrecognized(trimmed.to_string()));
    }

    if let Some(ago) = parse_relative(&lower) {
        return now
            .checked_sub_signed(ago)
            .map(|t| t.with_timezone(&Utc))
            .ok_or_else(|| DateParseError::Unrecognized(trimmed.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S %z") {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return local_to_utc(naive, trimmed);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return day_bound(date, bound, trimmed);
        }
    }

    Err(DateParseError::Unrecognized(trimmed.to_string()))
}

/// `<N> <unit>[s] ago`, `<N>.<unit>.ago` or `last <unit>`
fn parse_relative(lower: &str) -> Option<TimeDelta> {
    let spaced = lower.replace('.', " ");
    let parts: Vec<&str> = spaced.split_whitespace().collect();
    let (count, unit) = match parts.as_slice() {
        [count, unit, "ago"] => (count.parse::<i64>().ok()?, *unit),
        ["last", unit] => (1, *unit),
        _ => return None,
    };
    let unit_seconds: i64 = match unit.trim_end_matches('s') {
        "second" | "sec" => 1,
        "minute" | "min" => 60,
        "hour" => 3_600,
        "day" => 86_400,
        "week" => 7 * 86_400,
        "month" => 30 * 86_400,
        "year" => 365 * 86_400,
        _ => return None,
    };
    TimeDelta::try_seconds(count.checked_mul(unit_seconds)?)
}

fn day_bound(date: NaiveDate, bound: Bound, input: &str) -> Result<DateTime<Utc>, DateParseError> {
    let time = match bound {
        Bound::Start => NaiveTime::from_hms_opt(0, 0, 0),
        Bound::End => NaiveTime::from_hms_opt(23, 59, 59),
    }
    .ok_or_else(|| DateParseError::Unrecognized(input.to_string()))?;
    local_to_utc(date.and_time(time), input)
}

fn local_to_utc(naive: NaiveDateTime, input: &str) -> Result<DateTime<Utc>, DateParseError> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| DateParseError::NonexistentLocalTime(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<Local> {
        Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2024, 6, 15)
                    .and_then(|d| d.and_hms_opt(12, 0, 0))
                    .expect("valid date"),
            )
            .earliest()
            .expect("local time")
    }

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        let naive = NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_opt(h, min, s))
            .expect("valid date");
        Local
            .from_local_datetime(&naive)
            .earliest()
            .expect("local time")
            .with_timezone(&Utc)
    }

    #[test]
    fn test_date_only_bounds_cover_whole_day() {
        let now = fixed_now();
        assert_eq!(
            parse_date_at("2024-01-01", Bound::Start, now).unwrap(),
            local(2024, 1, 1, 0, 0, 0)
        );
        assert_eq!(
            parse_date_at("2024-01-01", Bound::End, now).unwrap(),
            local(2024, 1, 1, 23, 59, 59)
        );
        assert_eq!(
            parse_date_at("12/31/2024", Bound::End, now).unwrap(),
            local(2024, 12, 31, 23, 59, 59)
        );
        assert_eq!(
            parse_date_at("2024/03/05", Bound::Start, now).unwrap(),
            local(2024, 3, 5, 0, 0, 0)
        );
    }

    #[test]
    fn test_absolute_datetimes() {
        let now = fixed_now();
        let expected = Utc.with_ymd_and_hms(2024, 2, 1, 8, 30, 0).unwrap();
        assert_eq!(
            parse_date_at("2024-02-01T10:30:00+02:00", Bound::Start, now).unwrap(),
            expected
        );
        assert_eq!(
            parse_date_at("2024-02-01 10:30:00 +0200", Bound::Start, now).unwrap(),
            expected
        );
        assert_eq!(
            parse_date_at("2024-02-01 10:30:00", Bound::Start, now).unwrap(),
            local(2024, 2, 1, 10, 30, 0)
        );
        assert_eq!(
            parse_date_at("@1700000000", Bound::End, now).unwrap(),
            Utc.timestamp_opt(1_700_000_000, 0).unwrap()
        );
    }

    #[test]
    fn test_relative_dates() {
        let now = fixed_now();
        assert_eq!(
            parse_date_at("now", Bound::End, now).unwrap(),
            now.with_timezone(&Utc)
        );
        assert_eq!(
            parse_date_at("2 weeks ago", Bound::Start, now).unwrap(),
            local(2024, 6, 1, 12, 0, 0)
        );
        assert_eq!(
            parse_date_at("1 day ago", Bound::Start, now).unwrap(),
            local(2024, 6, 14, 12, 0, 0)
        );
        assert_eq!(
            parse_date_at("yesterday", Bound::Start, now).unwrap(),
            local(2024, 6, 14, 0, 0, 0)
        );
        assert_eq!(
            parse_date_at("Today", Bound::End, now).unwrap(),
            local(2024, 6, 15, 23, 59, 59)
        );
    }

    #[test]
    fn test_git_style_spellings() {
        let now = fixed_now();
        assert_eq!(
            parse_date_at("1.week.ago", Bound::Start, now).unwrap(),
            local(2024, 6, 8, 12, 0, 0)
        );
        assert_eq!(
            parse_date_at("last week", Bound::Start, now).unwrap(),
            local(2024, 6, 8, 12, 0, 0)
        );
        assert_eq!(
            parse_date_at("Jan 1 2024", Bound::Start, now).unwrap(),
            local(2024, 1, 1, 0, 0, 0)
        );
        assert_eq!(
            parse_date_at("Mar 5, 2024", Bound::End, now).unwrap(),
            local(2024, 3, 5, 23, 59, 59)
        );
        assert_eq!(
            parse_date_at("5 mar 2024", Bound::Start, now).unwrap(),
            local(2024, 3, 5, 0, 0, 0)
        );
    }

    #[test]
    fn test_unrecognized_dates() {
        let now = fixed_now();
        for input in ["", "last tuesday", "2024-13-45", "@abc", "3 fortnights ago", "1.5.weeks.ago"] {
            assert!(
                parse_date_at(input, Bound::Start, now).is_err(),
                "{input:?} should not parse"
            );
        }
        assert!(parse_since("soon").is_err());
        assert_eq!(parse_until("2024-01-01").as_deref(), Ok("2024-01-01"));
    }

    #[test]
    fn test_window_contains_inclusive() {
        let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let until = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let window = DateWindow::new(since, until);
        assert!(window.contains(since));
        assert!(window.contains(until));
        assert!(!window.contains_seconds(since.timestamp() - 1));
        assert!(!window.contains_seconds(until.timestamp() + 1));
        assert!(DateWindow::unbounded().contains_seconds(0));
    }
}
