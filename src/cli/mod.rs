#[cfg(feature = "pdf")]
pub mod build;
pub mod check;
pub mod init;
pub mod preview;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::settings::get_data_dir;

#[derive(Parser)]
#[command(name = "stocklist", about = "Priced VFD stock list report generator.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// The three input files; unset paths fall back to conventional names under
/// the configured data directory.
#[derive(Args)]
pub struct InputFiles {
    /// Inventory file: model, quantity owned, total cost
    #[arg(long)]
    pub inventory: Option<String>,
    /// Master list-price file
    #[arg(long)]
    pub prices: Option<String>,
    /// Secondary-tier ("1.27") price file
    #[arg(long)]
    pub secondary: Option<String>,
}

impl InputFiles {
    pub fn resolve(&self) -> (PathBuf, PathBuf, PathBuf) {
        let data_dir = get_data_dir();
        let pick = |arg: &Option<String>, name: &str| {
            arg.as_ref()
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join(name))
        };
        (
            pick(&self.inventory, "inventory.csv"),
            pick(&self.prices, "list_prices.csv"),
            pick(&self.secondary, "secondary_prices.csv"),
        )
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up stocklist: data directory, output directory, company name.
    Init {
        /// Directory holding the input files (default: data)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Directory for generated PDFs (default: pdf_reports)
        #[arg(long = "out-dir")]
        out_dir: Option<String>,
        /// Company name printed on the report header
        #[arg(long)]
        company: Option<String>,
    },
    /// Validate the input files: detected columns, row counts, coverage.
    Check {
        #[command(flatten)]
        files: InputFiles,
    },
    /// Print the priced stock list as a terminal table.
    Preview {
        #[command(flatten)]
        files: InputFiles,
        /// Show at most this many rows
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Build the stock list PDF (versioned filename unless --output is set).
    #[cfg(feature = "pdf")]
    Build {
        #[command(flatten)]
        files: InputFiles,
        /// Explicit output path (skips filename versioning)
        #[arg(long)]
        output: Option<String>,
        /// Leave HEL-series models unpriced
        #[arg(long = "no-hel-pricing")]
        no_hel_pricing: bool,
    },
}
