//! `Server-Timing` response header parsing

use regex::Regex;
use reqwest::header::HeaderMap;
use std::sync::OnceLock;

pub const SERVER_TIMING: &str = "server-timing";

fn duration_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r";\s*dur=([^;,\s]*)").ok())
        .as_ref()
}

/// Server processing duration from the first `;dur=` parameter.
///
/// Returns 0 when the parameter is absent or its value is not a finite number.
pub fn parse(value: &str) -> f64 {
    duration_pattern()
        .and_then(|pattern| pattern.captures(value))
        .and_then(|captures| captures.get(1))
        .and_then(|dur| dur.as_str().parse::<f64>().ok())
        .filter(|dur| dur.is_finite())
        .unwrap_or(0.0)
}

/// Server processing duration from a response's headers, 0 when missing
pub fn from_headers(headers: &HeaderMap) -> f64 {
    headers
        .get(SERVER_TIMING)
        .and_then(|value| value.to_str().ok())
        .map(parse)
        .unwrap_or(0.0)
}
