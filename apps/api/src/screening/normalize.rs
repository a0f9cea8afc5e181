//! Field normalization — turns noisy submission fields into typed values.
//!
//! Nothing here returns an error for malformed content: unparseable salaries
//! become `None`, unparseable dates contribute zero years, and missing fields
//! coerce to empty collections. Only the surrounding handlers reject inputs,
//! and only for shape violations (a non-array upload, a non-JSON body).

use chrono::{Month, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static NON_NUMERIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.]").unwrap());

static YEARS_MENTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:years|yrs|year)").unwrap());

static YEAR_MONTH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})[-/](\d{1,2})$").unwrap());
static MONTH_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2})[-/](\d{4})$").unwrap());
static MONTH_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]{3,9})\.?,?\s+(\d{4})$").unwrap());
static YEAR_ONLY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").unwrap());

/// Day-precision formats tried in order before the coarser month/year forms.
const DAY_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Rounds to two decimal places, the precision used for years and scores.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parses a salary value that may be a JSON integer, a real number, or a
/// string carrying currency symbols, commas, or stray letters
/// (`"$117,548"`, `"USD 117,548"`, `117548`). Returns whole USD, truncated.
pub fn parse_salary(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let cleaned = NON_NUMERIC_RE.replace_all(s, "");
            if cleaned.is_empty() {
                return None;
            }
            cleaned
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }
        _ => None,
    }
}

/// Parses a date-like string in any of the forms candidates actually submit:
/// RFC 3339 timestamps, `YYYY-MM-DD`, `YYYY/MM/DD`, `MM/DD/YYYY`, `YYYY-MM`,
/// `MM/YYYY`, `Jan 2020` / `January 2020`, or a bare year. Month-precision
/// forms anchor to the first of the month, a bare year to January 1.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.date());
        }
    }
    for format in DAY_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    if let Some(caps) = YEAR_MONTH_RE.captures(trimmed) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }
    if let Some(caps) = MONTH_YEAR_RE.captures(trimmed) {
        let month: u32 = caps[1].parse().ok()?;
        let year: i32 = caps[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }
    if let Some(caps) = MONTH_NAME_RE.captures(trimmed) {
        let month: Month = caps[1].parse().ok()?;
        let year: i32 = caps[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month.number_from_month(), 1);
    }
    if YEAR_ONLY_RE.is_match(trimmed) {
        let year: i32 = trimmed.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    None
}

/// Calendar years between two date-like strings, `max(0, round(days/365, 2))`.
/// A missing or empty end means "today"; any parse failure yields 0.0.
pub fn years_between(start: &str, end: Option<&str>) -> f64 {
    years_between_at(start, end, Utc::now().date_naive())
}

fn years_between_at(start: &str, end: Option<&str>, today: NaiveDate) -> f64 {
    let Some(start_date) = parse_flexible_date(start) else {
        return 0.0;
    };
    let end_date = match end.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => match parse_flexible_date(raw) {
            Some(date) => date,
            None => return 0.0,
        },
        None => today,
    };
    let days = (end_date - start_date).num_days();
    round2((days as f64 / 365.0).max(0.0))
}

/// Total experience years across a list of work-experience entries.
///
/// Per entry, in order: a positive span from the date fields (aliases
/// `startDate`/`start`/`from` and `endDate`/`end`/`to`), else a
/// "`N years`" mention in the role name or description, else exactly 1.0 —
/// an entry always contributes something. Empty list yields 0.0.
pub fn extract_experience_years(entries: &[Value]) -> f64 {
    extract_experience_years_at(entries, Utc::now().date_naive())
}

fn extract_experience_years_at(entries: &[Value], today: NaiveDate) -> f64 {
    let total: f64 = entries
        .iter()
        .map(|entry| entry_years_at(entry, today))
        .sum();
    round2(total)
}

fn entry_years_at(entry: &Value, today: NaiveDate) -> f64 {
    let Some(obj) = entry.as_object() else {
        return 1.0;
    };

    let start = first_string(obj, &["startDate", "start", "from"]);
    let end = first_string(obj, &["endDate", "end", "to"]);
    if let Some(start) = start {
        let years = years_between_at(start, end, today);
        if years > 0.0 {
            return years;
        }
    }

    let text = format!(
        "{} {}",
        string_field(obj, "roleName"),
        string_field(obj, "description")
    );
    if let Some(caps) = YEARS_MENTION_RE.captures(&text) {
        if let Ok(years) = caps[1].parse::<f64>() {
            return years;
        }
    }

    1.0
}

fn first_string<'a>(
    obj: &'a serde_json::Map<String, Value>,
    keys: &[&str],
) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

fn string_field<'a>(obj: &'a serde_json::Map<String, Value>, key: &str) -> &'a str {
    obj.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Coerces a field that may be a JSON list or a comma-delimited string into a
/// list of trimmed, non-empty tokens. Case is preserved; callers that need a
/// comparison form lower-case separately.
pub fn coerce_token_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}
