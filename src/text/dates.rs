//! Date extraction from free text
//!
//! Recognizes `YYYY-M-D`, `YYYY/M/D` and `YYYYMMDD` and normalizes them to
//! `YYYY-MM-DD`. Only when no valid full date is present does it fall back
//! to year-month forms (`YYYY-M`, `YYYY/M`, `YYYYMM` as `YYYY-MM`). A match
//! must be preceded by a non-digit character, so a date at the very start
//! of the text is not recognized.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Dates before this year are discarded
pub const MIN_YEAR: i32 = 1949;

static FULL_DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\D([12]\d{3})-(\d{1,2})-(\d{1,2})",
        r"\D([12]\d{3})/(\d{1,2})/(\d{1,2})",
        r"\D([12]\d{3})(\d{2})(\d{2})",
    ])
});

static YEAR_MONTH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\D([12]\d{3})-(\d{1,2})",
        r"\D([12]\d{3})/(\d{1,2})",
        r"\D([12]\d{3})(\d{2})",
    ])
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                log::error!("Invalid date pattern '{}': {}", p, e);
                None
            }
        })
        .collect()
}

fn number<T: std::str::FromStr>(caps: &Captures<'_>, group: usize) -> Option<T> {
    caps.get(group)?.as_str().parse().ok()
}

fn full_date(caps: &Captures<'_>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(number(caps, 1)?, number(caps, 2)?, number(caps, 3)?)
}

fn year_month(caps: &Captures<'_>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(number(caps, 1)?, number(caps, 2)?, 1)
}

fn collect(
    text: &str,
    patterns: &[Regex],
    build: fn(&Captures<'_>) -> Option<NaiveDate>,
) -> Vec<NaiveDate> {
    patterns
        .iter()
        .flat_map(|re| re.captures_iter(text))
        .filter_map(|caps| build(&caps))
        .collect()
}

/// Extract normalized dates from `text`, in pattern order then text order
///
/// ```
/// use utilkit::text::find_dates;
///
/// assert_eq!(find_dates("released 2023-5-6, patched 2023/12/25"), vec!["2023-05-06", "2023-12-25"]);
/// assert_eq!(find_dates("since 2021/7"), vec!["2021-07"]);
/// ```
pub fn find_dates(text: &str) -> Vec<String> {
    let dates = collect(text, &FULL_DATE_PATTERNS, full_date);
    let (dates, layout) = if dates.is_empty() {
        (collect(text, &YEAR_MONTH_PATTERNS, year_month), "%Y-%m")
    } else {
        (dates, "%Y-%m-%d")
    };

    dates
        .into_iter()
        .filter(|date| date.year() >= MIN_YEAR)
        .map(|date| date.format(layout).to_string())
        .collect()
}
