/// Format a price with thousands separators and no decimals: 1,234,568.
/// Values are rounded to the nearest whole unit for display only.
pub fn money(val: f64) -> String {
    let negative = val < 0.0;
    let rounded = val.abs().round() as i64;
    let digits = rounded.to_string();

    let mut with_commas = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-{with_commas}")
    } else {
        with_commas
    }
}

/// Absent prices render as blank cells, never as zero.
pub fn money_opt(val: Option<f64>) -> String {
    val.map(money).unwrap_or_default()
}

/// Gross-profit percentage with two decimals: 28.57%.
pub fn pct_opt(val: Option<f64>) -> String {
    val.map(|v| format!("{v:.2}%")).unwrap_or_default()
}
