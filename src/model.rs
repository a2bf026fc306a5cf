use std::sync::OnceLock;

use regex::Regex;

// Model identifiers look like FR-D720S-5.5K or FR-A840-H75K-1:
// family prefix "FR-", a series letter (or the HEL series), a capacity in kW
// before a literal "K", and an optional variant suffix.

static CAPACITY_RE: OnceLock<Regex> = OnceLock::new();
static SERIES_RE: OnceLock<Regex> = OnceLock::new();
static HEL_RE: OnceLock<Regex> = OnceLock::new();

fn capacity_re() -> &'static Regex {
    CAPACITY_RE.get_or_init(|| Regex::new(r"(?i)-(?:H)?([0-9.]+)K").unwrap())
}

fn series_re() -> &'static Regex {
    SERIES_RE.get_or_init(|| Regex::new(r"(?i)^FR-([A-Z])").unwrap())
}

fn hel_re() -> &'static Regex {
    HEL_RE.get_or_init(|| Regex::new(r"(?i)FR-HEL").unwrap())
}

/// Canonical decomposition of a model identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedModel {
    /// `D`/`E`/`F`/`A`, `H` for the HEL series, `None` when the identifier
    /// does not match the family pattern at all.
    pub series: Option<char>,
    /// kW rating; `0.0` when no capacity token exists (sorts first).
    pub capacity: f64,
    /// Whether the identifier carries a trailing `-1` variant marker. A
    /// substring test would misread capacity tokens like `-11K` or `-1.5K`.
    pub has_variant_suffix: bool,
}

pub fn parse_model(model: &str) -> ParsedModel {
    ParsedModel {
        series: extract_series_tag(model),
        capacity: extract_capacity(model),
        has_variant_suffix: model.ends_with("-1"),
    }
}

/// Numeric token before the `K` marker, tolerating a leading `H` on
/// high-capacity variants (`-H75K` reads as 75). Zero when absent.
pub fn extract_capacity(model: &str) -> f64 {
    capacity_re()
        .captures(model)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

/// `H` for the HEL series, otherwise the letter after the `FR-` prefix.
pub fn extract_series_tag(model: &str) -> Option<char> {
    if hel_re().is_match(model) {
        return Some('H');
    }
    series_re()
        .captures(model)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().chars().next())
        .map(|c| c.to_ascii_uppercase())
}

/// Sort rank for a series tag: D < E < F < A < H, anything else last.
pub fn series_rank(series: Option<char>) -> u8 {
    match series {
        Some('D') => 0,
        Some('E') => 1,
        Some('F') => 2,
        Some('A') => 3,
        Some('H') => 4,
        _ => 99,
    }
}

/// Rewrite `FR-<from>...` as `FR-<to>...` when the model starts with that
/// series/sub-series prefix. Returns `None` when the prefix does not match.
pub fn swap_prefix(model: &str, from: &str, to: &str) -> Option<String> {
    let full = format!("FR-{from}");
    match model.get(..full.len()) {
        Some(head) if head.eq_ignore_ascii_case(&full) => {
            Some(format!("FR-{to}{}", &model[full.len()..]))
        }
        _ => None,
    }
}

/// Substitute only the series letter, preserving everything after it.
/// `FR-D720S-5.5K` with series `F` becomes `FR-F720S-5.5K`.
pub fn with_series(model: &str, series: char) -> Option<String> {
    let m = series_re().find(model)?;
    Some(format!("FR-{series}{}", &model[m.end()..]))
}
