use chrono::{Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// ISO-like: `2025-03-15`, optionally followed by a time component
/// (`2025-03-15 23:10:05 UTC`, `2025-03-15T23:10`). Hour/minute are kept when
/// present so hour-based heuristics can read them.
static RE_ISO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})(?:[T ](\d{2}):(\d{2})(?::(\d{2}))?)?").unwrap()
});

/// US slash format: `3/15/2025` or `03/15/2025` (month first).
static RE_SLASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})").unwrap());

/// Written: `Mar 15, 2025`, `March 15 2025`.
static RE_WRITTEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)\s+(\d{1,2}),?\s+(\d{4})").unwrap());

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

fn month_from_name(s: &str) -> Option<u32> {
    let lower = s.to_lowercase();
    // `sept` is a common export quirk alongside the standard abbreviation.
    if lower == "sept" {
        return Some(9);
    }
    for (idx, name) in MONTH_NAMES.iter().enumerate() {
        let abbr = &name.to_lowercase()[..3];
        let full = name.to_lowercase();
        if lower == abbr || lower == full {
            return Some(idx as u32 + 1);
        }
    }
    None
}

/// Parse one of the heterogeneous date-string formats seen in export tables
/// into a single normalized representation. Formats are tried in a fixed
/// order, first match wins; anything unparseable (including empty input)
/// yields `None`, never an error.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = RE_ISO.captures(trimmed) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        let hour: u32 = caps.get(4).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
        let minute: u32 = caps.get(5).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
        let second: u32 = caps.get(6).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
        return NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second));
    }

    if let Some(caps) = RE_SLASH.captures(trimmed) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day).and_then(|d| d.and_hms_opt(0, 0, 0));
    }

    if let Some(caps) = RE_WRITTEN.captures(trimmed) {
        if let Some(month) = month_from_name(&caps[1]) {
            let day: u32 = caps[2].parse().ok()?;
            let year: i32 = caps[3].parse().ok()?;
            return NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|d| d.and_hms_opt(0, 0, 0));
        }
    }

    parse_fallback(trimmed)
}

/// Generic fallback ladder for strings the fast paths don't capture.
fn parse_fallback(s: &str) -> Option<NaiveDateTime> {
    let fmts = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%d %b %Y",
        "%d %B %Y",
        "%b %d %Y %H:%M",
        "%Y%m%d",
    ];
    for f in fmts.iter() {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, f) {
            return Some(ndt);
        }
        if let Ok(nd) = NaiveDate::parse_from_str(s, f) {
            return nd.and_hms_opt(0, 0, 0);
        }
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    None
}

/// `false` for absent dates, never an error.
pub fn is_in_year(date: Option<NaiveDateTime>, year: i32) -> bool {
    match date {
        Some(d) => d.year() == year,
        None => false,
    }
}

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.saturating_sub(1) as usize).min(11)]
}

/// Human month-and-year label, e.g. `March 2025`.
pub fn format_month(date: NaiveDateTime) -> String {
    format!("{} {}", month_name(date.month()), date.year())
}
