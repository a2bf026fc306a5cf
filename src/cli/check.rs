use colored::Colorize;

use crate::cli::InputFiles;
use crate::error::Result;
use crate::loader;
use crate::pricing::resolve_list_price;
use crate::report::is_excluded;

/// Load all three files and report what the pipeline would see. Any fatal
/// loader problem (missing file, undetectable column, bad number) surfaces
/// here before a report is attempted.
pub fn run(files: &InputFiles) -> Result<()> {
    let (inventory_path, prices_path, secondary_path) = files.resolve();

    let inventory = loader::load_inventory(&inventory_path)?;
    println!(
        "{} {} — {} rows",
        "ok".green(),
        inventory_path.display(),
        inventory.len()
    );

    let list_prices = loader::load_list_prices(&prices_path)?;
    println!(
        "{} {} — {} price entries",
        "ok".green(),
        prices_path.display(),
        list_prices.len()
    );

    let secondary_prices = loader::load_secondary_prices(&secondary_path)?;
    println!(
        "{} {} — {} price entries",
        "ok".green(),
        secondary_path.display(),
        secondary_prices.len()
    );

    let excluded = inventory
        .iter()
        .filter(|r| is_excluded(&r.model, r.quantity))
        .count();
    let unpriced: Vec<&str> = inventory
        .iter()
        .filter(|r| !is_excluded(&r.model, r.quantity))
        .filter(|r| resolve_list_price(&r.model, &list_prices).is_none())
        .map(|r| r.model.as_str())
        .collect();

    println!(
        "{} records excluded, {} without a resolvable list price",
        excluded,
        unpriced.len()
    );
    for model in &unpriced {
        println!("  {} {model}", "no list price:".yellow());
    }
    Ok(())
}
