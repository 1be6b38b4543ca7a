//! Date helper functions

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;

/// Fallback when a configured format cannot be used
const DEFAULT_FORMAT: &str = "%Y-%m-%d";

/// Format a date using a Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_naive_date(&date, "YYYY-MM-DD") // -> "2024-01-15"
/// format_naive_date(&date, "MMMM DD, YYYY") // -> "January 15, 2024"
/// ```
pub fn format_naive_date(date: &NaiveDateTime, format: &str) -> String {
    let chrono_format = moment_to_chrono_format(format);

    // chrono panics while displaying a malformed specifier, so validate first
    if StrftimeItems::new(&chrono_format).any(|item| matches!(item, Item::Error)) {
        tracing::warn!("Invalid date format {:?}, using {}", format, DEFAULT_FORMAT);
        return date.format(DEFAULT_FORMAT).to_string();
    }

    date.format(&chrono_format).to_string()
}

/// Moment.js tokens and their chrono specifiers, longest first
const TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("MMMM", "%B"),
    ("DDDD", "%j"),
    ("dddd", "%A"),
    ("MMM", "%b"),
    ("ddd", "%a"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("HH", "%H"),
    ("hh", "%I"),
    ("mm", "%M"),
    ("ss", "%S"),
    ("M", "%-m"),
    ("D", "%-d"),
];

/// Convert Moment.js format to chrono format
///
/// The format is scanned once, so a specifier already emitted is never
/// rewritten by a shorter token.
fn moment_to_chrono_format(format: &str) -> String {
    let mut result = String::with_capacity(format.len() * 2);
    let mut rest = format;

    'scan: while let Some(c) = rest.chars().next() {
        for (token, specifier) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                result.push_str(specifier);
                rest = tail;
                continue 'scan;
            }
        }
        result.push(c);
        rest = &rest[c.len_utf8()..];
    }

    result
}
