mod cli;
mod error;
mod fmt;
mod loader;
mod model;
#[cfg(feature = "pdf")]
mod pdf;
mod pricing;
mod report;
mod settings;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init {
            data_dir,
            out_dir,
            company,
        } => cli::init::run(data_dir, out_dir, company),
        Commands::Check { files } => cli::check::run(&files),
        Commands::Preview { files, limit } => cli::preview::run(&files, limit),
        #[cfg(feature = "pdf")]
        Commands::Build {
            files,
            output,
            no_hel_pricing,
        } => cli::build::run(&files, output, no_hel_pricing),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
