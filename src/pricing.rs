use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::{parse_model, swap_prefix, with_series};

/// Exact-string model -> price mapping, as produced by the loader.
pub type PriceTable = HashMap<String, f64>;

/// Series pairs declared price-equivalent for lookup purposes. 720-class
/// D/E models share catalog entries with A820, 740-class with A840, and the
/// A-series direction maps back so the equivalence is symmetric.
pub struct SwapRule {
    pub from: &'static str,
    pub to: &'static str,
}

pub const SWAP_RULES: &[SwapRule] = &[
    SwapRule { from: "D720", to: "A820" },
    SwapRule { from: "E720", to: "A820" },
    SwapRule { from: "D740", to: "A840" },
    SwapRule { from: "E740", to: "A840" },
    SwapRule { from: "A820", to: "D720" },
    SwapRule { from: "A840", to: "D740" },
];

/// Cross-series fallback tries these in order; first hit wins.
pub const FALLBACK_SERIES: [char; 4] = ['D', 'E', 'F', 'A'];

static SECONDARY_720_RE: OnceLock<Regex> = OnceLock::new();
static SECONDARY_740_RE: OnceLock<Regex> = OnceLock::new();

fn secondary_720_re() -> &'static Regex {
    SECONDARY_720_RE.get_or_init(|| Regex::new(r"(?i)^FR-[A-Z]+?720").unwrap())
}

fn secondary_740_re() -> &'static Regex {
    SECONDARY_740_RE.get_or_init(|| Regex::new(r"(?i)^FR-[A-Z]+?740").unwrap())
}

/// A-series catalog entries carry a `-1` variant marker; candidates built by
/// series swaps need it appended before lookup.
fn with_a_series_suffix(mut alt: String) -> String {
    let upper = alt.to_ascii_uppercase();
    if upper.starts_with("FR-A8") && !parse_model(&alt).has_variant_suffix {
        alt.push_str("-1");
    }
    alt
}

/// All alternate identifiers to try when an exact list-price entry is absent,
/// in resolution order: swap-rule candidates first, then the other series of
/// `FALLBACK_SERIES` with only the series letter substituted. Deduplicated,
/// order preserved.
pub fn alternate_models(model: &str) -> Vec<String> {
    fn push_unique(alts: &mut Vec<String>, alt: String) {
        if !alts.contains(&alt) {
            alts.push(alt);
        }
    }

    let mut alts: Vec<String> = Vec::new();
    for rule in SWAP_RULES {
        if let Some(alt) = swap_prefix(model, rule.from, rule.to) {
            push_unique(&mut alts, with_a_series_suffix(alt.clone()));
            // A single-phase marker on the source model (FR-D720S-...) has no
            // counterpart in the A-series catalog; try without it as well.
            let prefix_len = "FR-".len() + rule.to.len();
            if let Some(rest) = alt.get(prefix_len..) {
                if rest.starts_with('S') || rest.starts_with('s') {
                    let stripped = format!("{}{}", &alt[..prefix_len], &rest[1..]);
                    push_unique(&mut alts, with_a_series_suffix(stripped));
                }
            }
        }
    }
    let own = parse_model(model).series;
    for s in FALLBACK_SERIES {
        if own == Some(s) {
            continue;
        }
        if let Some(alt) = with_series(model, s) {
            push_unique(&mut alts, alt);
        }
    }
    alts
}

/// List-price lookup cascade: exact match, then the alternates. Absence is a
/// legitimate result (incomplete catalog), not an error.
pub fn resolve_list_price(model: &str, table: &PriceTable) -> Option<f64> {
    if let Some(&price) = table.get(model) {
        return Some(price);
    }
    alternate_models(model)
        .iter()
        .find_map(|alt| table.get(alt).copied())
}

/// Secondary-tier ("1.27") lookup: exact match, then the E-series 8xx
/// equivalent with the `-1` variant marker for 720/740-class models.
pub fn resolve_secondary_price(model: &str, table: &PriceTable) -> Option<f64> {
    if let Some(&price) = table.get(model) {
        return Some(price);
    }
    let alt = if secondary_720_re().is_match(model) {
        secondary_720_re().replace(model, "FR-E820").into_owned()
    } else if secondary_740_re().is_match(model) {
        secondary_740_re().replace(model, "FR-E840").into_owned()
    } else {
        return None;
    };
    let alt = if parse_model(&alt).has_variant_suffix {
        alt
    } else {
        format!("{alt}-1")
    };
    table.get(&alt).copied()
}

/// Half-away-from-zero to two decimals; the one rounding rule used everywhere.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn discount(list_price: f64, pct: u32) -> f64 {
    list_price * (1.0 - pct as f64 / 100.0)
}

/// (list - cost) / list as a percentage, two decimals. Absent unless both
/// values are present and nonzero.
pub fn gross_profit_pct(list_price: Option<f64>, unit_cost: f64) -> Option<f64> {
    match list_price {
        Some(lp) if lp != 0.0 && unit_cost != 0.0 => {
            Some(round2((lp - unit_cost) / lp * 100.0))
        }
        _ => None,
    }
}
