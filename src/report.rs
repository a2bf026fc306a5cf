use crate::fmt::{money, money_opt, pct_opt};
use crate::model::{parse_model, series_rank, ParsedModel};
use crate::pricing::{
    discount, gross_profit_pct, resolve_list_price, resolve_secondary_price, PriceTable,
};

/// One owned stock line as loaded from the inventory file.
#[derive(Debug, Clone)]
pub struct InventoryRecord {
    pub model: String,
    pub quantity: u32,
    pub total_cost: f64,
}

/// Fully priced output row. Absent prices stay absent through every derived
/// field and render as blanks.
#[derive(Debug, Clone)]
pub struct PricedRecord {
    /// 1-based serial position after sorting.
    pub rank: usize,
    pub model: String,
    pub quantity: u32,
    pub unit_cost: f64,
    pub unit_cost_x175: f64,
    pub list_price: Option<f64>,
    pub discount20: Option<f64>,
    pub discount25: Option<f64>,
    pub discount30: Option<f64>,
    pub gross_profit_pct: Option<f64>,
    pub secondary_price: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct PricingPolicy {
    /// Whether HEL-series models receive a list price at all.
    pub price_hel_series: bool,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            price_hel_series: true,
        }
    }
}

/// Report column order, shared by the PDF table and the terminal preview.
pub const COLUMN_HEADERS: [&str; 11] = [
    "SL",
    "Model",
    "Qty",
    "ListPrice",
    "20%",
    "25%",
    "30%",
    "GP%",
    "COGS",
    "COGSx1.75",
    "1.27",
];

/// Display cells for one record, in `COLUMN_HEADERS` order. Absent prices
/// become blank cells.
pub fn row_cells(r: &PricedRecord) -> Vec<String> {
    vec![
        r.rank.to_string(),
        r.model.clone(),
        r.quantity.to_string(),
        money_opt(r.list_price),
        money_opt(r.discount20),
        money_opt(r.discount25),
        money_opt(r.discount30),
        pct_opt(r.gross_profit_pct),
        money(r.unit_cost),
        money(r.unit_cost_x175),
        money_opt(r.secondary_price),
    ]
}

const MODEL_SKIP: &str = "FR-S520SE-0.2K-19";

/// Records dropped before resolution: zero quantity, the one literal skip
/// model, and anything containing "PEC".
pub fn is_excluded(model: &str, quantity: u32) -> bool {
    quantity == 0
        || model.eq_ignore_ascii_case(MODEL_SKIP)
        || model.to_ascii_uppercase().contains("PEC")
}

fn price_record(
    rec: &InventoryRecord,
    parsed: &ParsedModel,
    list_prices: &PriceTable,
    secondary_prices: &PriceTable,
    policy: &PricingPolicy,
) -> PricedRecord {
    let unit_cost = rec.total_cost / rec.quantity as f64;
    let hel = parsed.series == Some('H');
    let list_price = if hel && !policy.price_hel_series {
        None
    } else {
        resolve_list_price(&rec.model, list_prices)
    };
    PricedRecord {
        rank: 0,
        model: rec.model.clone(),
        quantity: rec.quantity,
        unit_cost,
        unit_cost_x175: unit_cost * 1.75,
        list_price,
        discount20: list_price.map(|lp| discount(lp, 20)),
        discount25: list_price.map(|lp| discount(lp, 25)),
        discount30: list_price.map(|lp| discount(lp, 30)),
        gross_profit_pct: gross_profit_pct(list_price, unit_cost),
        secondary_price: resolve_secondary_price(&rec.model, secondary_prices),
    }
}

/// The full pipeline: exclusion filter, per-record price resolution, stable
/// sort by capacity then series rank, 1-based serials. Pure — identical
/// inputs always give identical output.
pub fn build_report(
    inventory: &[InventoryRecord],
    list_prices: &PriceTable,
    secondary_prices: &PriceTable,
    policy: &PricingPolicy,
) -> Vec<PricedRecord> {
    let mut keyed: Vec<(f64, u8, PricedRecord)> = inventory
        .iter()
        .filter(|rec| !is_excluded(&rec.model, rec.quantity))
        .map(|rec| {
            let parsed = parse_model(&rec.model);
            (
                parsed.capacity,
                series_rank(parsed.series),
                price_record(rec, &parsed, list_prices, secondary_prices, policy),
            )
        })
        .collect();

    // Vec::sort_by is stable, so equal keys keep their input order.
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    keyed
        .into_iter()
        .enumerate()
        .map(|(i, (_, _, mut row))| {
            row.rank = i + 1;
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::round2;

    fn inv(model: &str, quantity: u32, total_cost: f64) -> InventoryRecord {
        InventoryRecord {
            model: model.to_string(),
            quantity,
            total_cost,
        }
    }

    fn table(entries: &[(&str, f64)]) -> PriceTable {
        entries.iter().map(|(m, p)| (m.to_string(), *p)).collect()
    }

    #[test]
    fn test_exclusion_filter() {
        assert!(is_excluded("FR-D720S-5.5K", 0));
        assert!(is_excluded("FR-S520SE-0.2K-19", 3));
        assert!(is_excluded("fr-s520se-0.2k-19", 3));
        assert!(is_excluded("FR-D720S-5.5K-pec", 3));
        assert!(!is_excluded("FR-D720S-5.5K", 3));
    }

    #[test]
    fn test_excluded_records_never_reach_output() {
        let inventory = vec![
            inv("FR-D720S-5.5K", 0, 1000.0),
            inv("FR-S520SE-0.2K-19", 2, 1000.0),
            inv("FR-A820-PEC-5.5K", 2, 1000.0),
            inv("FR-E720-0.4K", 1, 8000.0),
        ];
        let rows = build_report(&inventory, &table(&[]), &table(&[]), &PricingPolicy::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].model, "FR-E720-0.4K");
    }

    #[test]
    fn test_absent_price_propagates_as_absent() {
        let inventory = vec![inv("FR-F840-37K", 2, 40000.0)];
        let rows = build_report(&inventory, &table(&[]), &table(&[]), &PricingPolicy::default());
        let r = &rows[0];
        assert_eq!(r.list_price, None);
        assert_eq!(r.discount20, None);
        assert_eq!(r.discount25, None);
        assert_eq!(r.discount30, None);
        assert_eq!(r.gross_profit_pct, None);
        assert_eq!(r.unit_cost, 20000.0);
        assert_eq!(r.unit_cost_x175, 35000.0);
    }

    #[test]
    fn test_spec_pricing_example() {
        // FR-F840-37K, unit cost 20000, list 28000 -> GP 28.57.
        let inventory = vec![inv("FR-F840-37K", 2, 40000.0)];
        let list = table(&[("FR-F840-37K", 28000.0)]);
        let rows = build_report(&inventory, &list, &table(&[]), &PricingPolicy::default());
        assert_eq!(rows[0].gross_profit_pct, Some(28.57));
        assert_eq!(rows[0].discount20, Some(round2(22400.0)));
    }

    #[test]
    fn test_sort_by_capacity_then_series() {
        let inventory = vec![
            inv("FR-A820-5.5K-1", 1, 100.0),
            inv("FR-F840-37K", 1, 100.0),
            inv("FR-D720S-5.5K", 1, 100.0),
            inv("FR-E720-0.4K", 1, 100.0),
        ];
        let rows = build_report(&inventory, &table(&[]), &table(&[]), &PricingPolicy::default());
        let models: Vec<&str> = rows.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(
            models,
            vec![
                "FR-E720-0.4K",
                "FR-D720S-5.5K",
                "FR-A820-5.5K-1",
                "FR-F840-37K",
            ]
        );
        let ranks: Vec<usize> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_unrecognized_model_sorts_last_in_capacity_group() {
        // No K token -> capacity 0, unknown series -> after every known series
        // of the same capacity.
        let inventory = vec![
            inv("UNKNOWN-MODEL-X", 1, 100.0),
            inv("FR-D720S-5.5K", 1, 100.0),
            inv("FR-HEL-0.0K", 1, 100.0),
        ];
        let rows = build_report(&inventory, &table(&[]), &table(&[]), &PricingPolicy::default());
        let models: Vec<&str> = rows.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(
            models,
            vec!["FR-HEL-0.0K", "UNKNOWN-MODEL-X", "FR-D720S-5.5K"]
        );
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let inventory = vec![
            inv("FR-D720-5.5K", 1, 100.0),
            inv("FR-D720S-5.5K", 1, 100.0),
        ];
        let rows = build_report(&inventory, &table(&[]), &table(&[]), &PricingPolicy::default());
        assert_eq!(rows[0].model, "FR-D720-5.5K");
        assert_eq!(rows[1].model, "FR-D720S-5.5K");
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let inventory = vec![
            inv("FR-D720S-5.5K", 2, 50000.0),
            inv("FR-F840-37K", 1, 20000.0),
        ];
        let list = table(&[("FR-A820-5.5K-1", 50000.0), ("FR-F840-37K", 28000.0)]);
        let secondary = table(&[("FR-E820S-5.5K-1", 31000.0)]);
        let policy = PricingPolicy::default();
        let a = build_report(&inventory, &list, &secondary, &policy);
        let b = build_report(&inventory, &list, &secondary, &policy);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.model, y.model);
            assert_eq!(x.rank, y.rank);
            assert_eq!(x.list_price, y.list_price);
            assert_eq!(x.secondary_price, y.secondary_price);
        }
    }

    #[test]
    fn test_row_cells_blank_for_absent_prices() {
        let inventory = vec![inv("FR-F840-37K", 2, 50000.0)];
        let rows = build_report(&inventory, &table(&[]), &table(&[]), &PricingPolicy::default());
        let cells = row_cells(&rows[0]);
        assert_eq!(cells.len(), COLUMN_HEADERS.len());
        assert_eq!(cells[0], "1");
        assert_eq!(cells[3], "");
        assert_eq!(cells[4], "");
        assert_eq!(cells[7], "");
        assert_eq!(cells[8], "25,000");
    }

    #[test]
    fn test_hel_policy_flag() {
        let inventory = vec![inv("FR-HEL-H75K", 1, 10000.0)];
        let list = table(&[("FR-HEL-H75K", 90000.0)]);
        let priced = build_report(&inventory, &list, &table(&[]), &PricingPolicy::default());
        assert_eq!(priced[0].list_price, Some(90000.0));

        let policy = PricingPolicy {
            price_hel_series: false,
        };
        let unpriced = build_report(&inventory, &list, &table(&[]), &policy);
        assert_eq!(unpriced[0].list_price, None);
        assert_eq!(unpriced[0].gross_profit_pct, None);
    }
}
