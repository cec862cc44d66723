//! Free-form travel date parsing.
//!
//! Callers say things like "tomorrow", "18th Dec 2025" or "2025-12-18". The
//! relative words are checked first, then a fixed list of explicit formats.
//! Anything else falls back to a random date within the next 30 days: a
//! booking with a guessed date is preferred over a failed booking.

use chrono::{Days, NaiveDate};
use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Explicit formats tried in order, after normalization.
pub const DATE_FORMATS: &[&str] = &[
    "%d %b %Y", // 18 dec 2025
    "%b %d %Y", // dec 18 2025
    "%d %B %Y", // 18 december 2025
    "%B %d %Y", // december 18 2025
    "%Y-%m-%d", // 2025-12-18
    "%m/%d/%Y", // 12/18/2025
    "%d/%m/%Y", // 18/12/2025
];

/// Upper bound, in days, of the fallback window.
pub const FALLBACK_WINDOW_DAYS: u64 = 30;

static ORDINAL_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_ordinal_regex() -> &'static Regex {
    ORDINAL_REGEX.get_or_init(|| Regex::new(r"(\d+)(?:st|nd|rd|th)\b").expect("Invalid regex pattern"))
}

/// Lowercase, drop ordinal suffixes and commas, collapse whitespace.
fn normalize(input: &str) -> String {
    let lowered = input.to_lowercase();
    let stripped = get_ordinal_regex().replace_all(&lowered, "$1");
    stripped.replace(',', " ").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse relative words and explicit formats only. Returns `None` when
/// nothing matches.
pub fn parse_travel_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lowered = input.to_lowercase();
    if lowered.contains("tomorrow") {
        return today.checked_add_days(Days::new(1));
    }
    if lowered.contains("today") {
        return Some(today);
    }
    if lowered.contains("next week") {
        return today.checked_add_days(Days::new(7));
    }

    let normalized = normalize(input);
    DATE_FORMATS.iter().find_map(|fmt| NaiveDate::parse_from_str(&normalized, fmt).ok())
}

/// Parse `input`, falling back to a random date 1 to 30 days after `today`.
///
/// Never fails.
pub fn resolve_travel_date<R: Rng + ?Sized>(input: &str, today: NaiveDate, rng: &mut R) -> NaiveDate {
    if let Some(date) = parse_travel_date(input, today) {
        return date;
    }
    let offset = rng.gen_range(1..=FALLBACK_WINDOW_DAYS);
    let fallback = today.checked_add_days(Days::new(offset)).unwrap_or(today);
    debug!(input = %input, fallback = %fallback, "Unrecognized travel date, using fallback");
    fallback
}
