use comfy_table::{Cell, Table};

use crate::cli::InputFiles;
use crate::error::Result;
use crate::loader;
use crate::report::{build_report, row_cells, PricingPolicy, COLUMN_HEADERS};
use crate::settings::load_settings;

pub fn run(files: &InputFiles, limit: Option<usize>) -> Result<()> {
    let (inventory_path, prices_path, secondary_path) = files.resolve();
    let inventory = loader::load_inventory(&inventory_path)?;
    let list_prices = loader::load_list_prices(&prices_path)?;
    let secondary_prices = loader::load_secondary_prices(&secondary_path)?;

    let settings = load_settings();
    let policy = PricingPolicy {
        price_hel_series: settings.price_hel_series,
    };
    let records = build_report(&inventory, &list_prices, &secondary_prices, &policy);
    let shown = limit.unwrap_or(records.len()).min(records.len());

    let mut table = Table::new();
    table.set_header(COLUMN_HEADERS.to_vec());
    for r in &records[..shown] {
        table.add_row(row_cells(r).into_iter().map(Cell::new).collect::<Vec<_>>());
    }
    println!("VFD Stock List\n{table}");
    if shown < records.len() {
        println!("({} of {} rows)", shown, records.len());
    }
    Ok(())
}
