use std::io::BufReader;
use std::path::Path;

use crate::error::{Result, StocklistError};
use crate::pricing::PriceTable;
use crate::report::InventoryRecord;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.replace(',', "").replace('"', "").replace('$', "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return inner.trim().parse::<f64>().ok().map(|v| -v);
    }
    s.parse().ok()
}

// Source files come from several vendors and label their columns differently
// ("Model", "Material Name", "Item"...). Columns are located by header text,
// not position.

const MODEL_HEADERS: &[&str] = &[
    "model",
    "model name",
    "material name",
    "item",
    "item name",
    "material",
];

fn is_model_header(h: &str) -> bool {
    MODEL_HEADERS.contains(&h.trim().to_lowercase().as_str())
}

fn is_list_price_header(h: &str) -> bool {
    let l = h.trim().to_lowercase();
    (l.contains("list") && l.contains("price")) || l == "price" || l == "price (bdt)"
}

fn is_secondary_header(h: &str) -> bool {
    h.contains("1.27")
}

fn is_qty_header(h: &str) -> bool {
    let l = h.to_lowercase();
    l.contains("qty") || l.contains("quantity")
}

fn is_cost_header(h: &str) -> bool {
    h.to_lowercase().contains("cost")
}

fn find_col(header: &[String], pred: fn(&str) -> bool) -> Option<usize> {
    header.iter().position(|h| pred(h))
}

/// First row with a recognizable model column is the header; anything above
/// it is preamble.
fn find_header(rows: &[Vec<String>]) -> Option<(usize, usize)> {
    rows.iter()
        .enumerate()
        .find_map(|(i, row)| find_col(row, is_model_header).map(|col| (i, col)))
}

fn file_label(path: &Path) -> String {
    path.display().to_string()
}

// ---------------------------------------------------------------------------
// Raw table reading — CSV or XLSX by extension
// ---------------------------------------------------------------------------

fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xls") {
        #[cfg(feature = "xlsx")]
        return read_workbook(path);
        #[cfg(not(feature = "xlsx"))]
        return Err(StocklistError::Workbook(format!(
            "{}: XLSX support not compiled in",
            file_label(path)
        )));
    }
    read_csv(path)
}

fn read_csv(path: &Path) -> Result<Vec<Vec<String>>> {
    let file = std::fs::File::open(path)
        .map_err(|e| StocklistError::Other(format!("{}: {e}", file_label(path))))?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|f| f.trim().to_string()).collect());
    }
    Ok(rows)
}

#[cfg(feature = "xlsx")]
fn read_workbook(path: &Path) -> Result<Vec<Vec<String>>> {
    use calamine::{Data, Reader};

    let label = file_label(path);
    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| StocklistError::Workbook(format!("{label}: {e}")))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| StocklistError::Workbook(format!("{label}: workbook has no sheets")))?
        .map_err(|e| StocklistError::Workbook(format!("{label}: {e}")))?;

    fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::String(s) => s.trim().to_string(),
            Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
            Data::Float(f) => f.to_string(),
            Data::Int(i) => i.to_string(),
            Data::Empty => String::new(),
            other => other.to_string(),
        }
    }

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

pub fn load_inventory(path: &Path) -> Result<Vec<InventoryRecord>> {
    let rows = read_rows(path)?;
    let label = file_label(path);
    let (hdr_idx, model_col) = find_header(&rows).ok_or_else(|| StocklistError::MissingColumn {
        file: label.clone(),
        what: "model",
    })?;
    let header = &rows[hdr_idx];
    let qty_col = find_col(header, is_qty_header).ok_or_else(|| StocklistError::MissingColumn {
        file: label.clone(),
        what: "quantity",
    })?;
    // Prefer an explicit "total cost" column over any other cost-ish header.
    let cost_col = find_col(header, |h| {
        let l = h.to_lowercase();
        l.contains("total") && l.contains("cost")
    })
    .or_else(|| find_col(header, is_cost_header))
    .ok_or_else(|| StocklistError::MissingColumn {
        file: label.clone(),
        what: "total cost",
    })?;

    let mut records = Vec::new();
    for (i, row) in rows.iter().enumerate().skip(hdr_idx + 1) {
        let model = row.get(model_col).map(String::as_str).unwrap_or("");
        if model.is_empty() {
            continue;
        }
        let qty_raw = row.get(qty_col).map(String::as_str).unwrap_or("");
        let qty_val = parse_number(qty_raw)
            // Quantities are counts; reject negatives and fractions rather
            // than letting a cast fold them into a plausible-looking value.
            .filter(|q| *q >= 0.0 && q.fract() == 0.0 && *q <= u32::MAX as f64)
            .ok_or_else(|| StocklistError::BadNumber {
                file: label.clone(),
                row: i + 1,
                field: "quantity",
                value: qty_raw.to_string(),
            })?;
        let quantity = qty_val as u32;
        let cost_raw = row.get(cost_col).map(String::as_str).unwrap_or("");
        let total_cost = parse_number(cost_raw).ok_or_else(|| StocklistError::BadNumber {
            file: label.clone(),
            row: i + 1,
            field: "total cost",
            value: cost_raw.to_string(),
        })?;
        records.push(InventoryRecord {
            model: model.to_string(),
            quantity,
            total_cost,
        });
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Price tables
// ---------------------------------------------------------------------------

fn load_price_table(
    path: &Path,
    what: &'static str,
    pred: fn(&str) -> bool,
) -> Result<PriceTable> {
    let rows = read_rows(path)?;
    let label = file_label(path);
    let (hdr_idx, model_col) = find_header(&rows).ok_or_else(|| StocklistError::MissingColumn {
        file: label.clone(),
        what: "model",
    })?;
    let price_col =
        find_col(&rows[hdr_idx], pred).ok_or_else(|| StocklistError::MissingColumn {
            file: label.clone(),
            what,
        })?;

    let mut table = PriceTable::new();
    for (i, row) in rows.iter().enumerate().skip(hdr_idx + 1) {
        let model = row.get(model_col).map(String::as_str).unwrap_or("");
        if model.is_empty() {
            continue;
        }
        let raw = row.get(price_col).map(String::as_str).unwrap_or("");
        if raw.is_empty() {
            // No catalog price for this model; lookups fall through.
            continue;
        }
        let price = parse_number(raw).ok_or_else(|| StocklistError::BadNumber {
            file: label.clone(),
            row: i + 1,
            field: what,
            value: raw.to_string(),
        })?;
        table.insert(model.to_string(), price);
    }
    Ok(table)
}

pub fn load_list_prices(path: &Path) -> Result<PriceTable> {
    load_price_table(path, "list price", is_list_price_header)
}

pub fn load_secondary_prices(path: &Path) -> Result<PriceTable> {
    load_price_table(path, "1.27 price", is_secondary_header)
}
