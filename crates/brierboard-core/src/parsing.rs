//! Lenient parsing of values read back from published leaderboards.
//!
//! Published tables are human-facing: scores are rounded, sample sizes may carry
//! thousands separators, CIs are bracketed strings, and missing values show up as
//! blanks or dashes. Anything that does not parse cleanly is `None`, never an error.

use chrono::NaiveDate;

const MISSING_MARKERS: &[&str] = &["", "-", "—", "–", "n/a", "na", "nan", "none", "null"];

fn is_missing(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    MISSING_MARKERS.contains(&lower.as_str())
}

/// A finite score, or `None`.
pub fn parse_score(s: &str) -> Option<f64> {
    if is_missing(s) {
        return None;
    }
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A non-negative sample size. Accepts `1,234` and `1234.0`.
pub fn parse_count(s: &str) -> Option<u64> {
    if is_missing(s) {
        return None;
    }
    let cleaned: String = s.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
    if let Ok(n) = cleaned.parse::<u64>() {
        return Some(n);
    }
    let f = cleaned.parse::<f64>().ok()?;
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64).then_some(f as u64)
}

/// A confidence interval written as `[lo, hi]` or `(lo, hi)`.
pub fn parse_ci(s: &str) -> Option<(f64, f64)> {
    if is_missing(s) {
        return None;
    }
    let inner = s
        .trim()
        .trim_start_matches(['[', '('])
        .trim_end_matches([']', ')']);
    let (lo, hi) = inner.split_once(',')?;
    let lo = parse_score(lo)?;
    let hi = parse_score(hi)?;
    (lo <= hi).then_some((lo, hi))
}

/// A p-value. Threshold strings such as `<0.001` parse to the threshold.
pub fn parse_p_value(s: &str) -> Option<f64> {
    let v = parse_score(s.trim().trim_start_matches('<'))?;
    (0.0..=1.0).contains(&v).then_some(v)
}

/// An ISO date, tolerating a trailing time component.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let date_part = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Split one CSV line, honoring double quotes and `""` escapes.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            '\r' if !in_quotes && chars.peek().is_none() => {}
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}
