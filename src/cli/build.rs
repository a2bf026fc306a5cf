use std::path::PathBuf;

use crate::cli::InputFiles;
use crate::error::Result;
use crate::loader;
use crate::pdf;
use crate::report::{build_report, PricingPolicy};
use crate::settings::load_settings;

pub fn run(files: &InputFiles, output: Option<String>, no_hel_pricing: bool) -> Result<()> {
    let settings = load_settings();
    let (inventory_path, prices_path, secondary_path) = files.resolve();

    let inventory = loader::load_inventory(&inventory_path)?;
    let list_prices = loader::load_list_prices(&prices_path)?;
    let secondary_prices = loader::load_secondary_prices(&secondary_path)?;

    let policy = PricingPolicy {
        price_hel_series: settings.price_hel_series && !no_hel_pricing,
    };
    let records = build_report(&inventory, &list_prices, &secondary_prices, &policy);

    let date_label = chrono::Local::now().format("%d %b %Y").to_string();
    let bytes = pdf::render_stock_list(&records, &settings.company_name, &date_label)?;

    let path = match output {
        Some(p) => PathBuf::from(p),
        None => {
            let date_tag = chrono::Local::now().format("%y%m%d").to_string();
            pdf::versioned_pdf_path(
                &PathBuf::from(&settings.out_dir),
                &settings.report_prefix,
                &date_tag,
            )?
        }
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&path, &bytes)?;
    println!("Wrote {} ({} rows)", path.display(), records.len());
    Ok(())
}
