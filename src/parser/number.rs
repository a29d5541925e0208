//! Lenient number parsing for SVG attribute values.

use std::sync::LazyLock;

use regex::Regex;

/// Floating point grammar shared by the attribute parsers.
pub(crate) const NUMBER: &str = r"(?:[-+]?(?:\d+|\d*\.\d+)(?:[eE][-+]?\d+)?)";

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").expect("static regex")
});

/// Parse the longest numeric prefix of `s` after leading whitespace.
///
/// `"10px"` yields `10.0`, `"abc"` yields `None`. Mirrors how browsers read
/// presentation attributes that carry units.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let m = LEADING_NUMBER.find(s)?;
    m.as_str().parse::<f64>().ok()
}

/// Parse a length with an optional absolute unit into user units (96 dpi).
///
/// `em` is resolved against `font_size`; unknown suffixes, `%` included, keep the bare number.
pub fn parse_unit(s: &str, font_size: f64) -> Option<f64> {
    let s = s.trim();
    let value = parse_float_prefix(s)?;
    let mult = match s.get(s.len().saturating_sub(2)..) {
        Some("mm") => 96.0 / 25.4,
        Some("cm") => 96.0 / 2.54,
        Some("in") => 96.0,
        Some("pt") => 96.0 / 72.0,
        Some("pc") => 16.0,
        Some("em") => font_size,
        _ => 1.0,
    };
    Some(value * mult)
}

/// Parse a SMIL clock value into seconds.
///
/// Accepts `12`, `1.5s`, `250ms`, `2min`, `1h`, `mm:ss(.frac)` and `hh:mm:ss(.frac)`.
/// Returns `None` for anything else, including `indefinite`.
pub fn parse_clock_value(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if s.contains(':') {
        let parts: Vec<&str> = s.split(':').collect();
        let nums: Option<Vec<f64>> = parts.iter().map(|p| p.trim().parse::<f64>().ok()).collect();
        let nums = nums?;
        return match nums.as_slice() {
            [m, sec] => Some(m * 60.0 + sec),
            [h, m, sec] => Some(h * 3600.0 + m * 60.0 + sec),
            _ => None,
        };
    }

    let (num, mult) = if let Some(v) = s.strip_suffix("ms") {
        (v, 0.001)
    } else if let Some(v) = s.strip_suffix("min") {
        (v, 60.0)
    } else if let Some(v) = s.strip_suffix('h') {
        (v, 3600.0)
    } else if let Some(v) = s.strip_suffix('s') {
        (v, 1.0)
    } else {
        (s, 1.0)
    };
    let v = num.trim().parse::<f64>().ok()?;
    v.is_finite().then_some(v * mult)
}

#[cfg(test)]
#[path = "../../tests/unit/parser/number.rs"]
mod tests;
