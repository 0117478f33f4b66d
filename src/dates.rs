use chrono::{Datelike, Local, NaiveDate};

/// Canonical `YYYY-MM-DD` key for a calendar day, local time zone. Every
/// place that needs a date key goes through here.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a canonical date key back into a date. Conversion happens once at
/// the API boundary; the engine only ever sees key strings or `NaiveDate`.
/// Only the zero-padded form is accepted; chrono's `%m`/`%d` would also take
/// single digits, so the result is checked against the canonical formatter.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .ok()
        .filter(|date| date_key(*date) == key)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn today_key() -> String {
    date_key(today())
}

/// Number of calendar days in a month, 1-based. Returns 0 for a month
/// outside 1..=12 instead of panicking.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next {
        Some(next) => (next - first).num_days() as u32,
        None => 0,
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full English month name, 1-based. Out of range yields an empty string;
/// callers are expected to pass a valid month.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

pub fn is_today(date: NaiveDate) -> bool {
    date == today()
}

pub fn is_past(date: NaiveDate) -> bool {
    date < today()
}

pub fn is_future(date: NaiveDate) -> bool {
    date > today()
}

/// Empty cells before day 1 in a Monday-first calendar grid.
pub fn leading_blanks(year: i32, month: u32) -> u32 {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => first.weekday().num_days_from_monday(),
        None => 0,
    }
}
