//! Command-line interface for the parks tracker.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod load;

pub use error::CliError;

use load::LoadArgs;

pub(crate) const ARG_DATA_DIR: &str = "data-dir";
pub(crate) const ARG_BOUNDARIES: &str = "boundaries";
pub(crate) const ARG_SIGNS: &str = "signs";
pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const ARG_CLEAR: &str = "clear";

pub(crate) const DEFAULT_DATA_DIR: &str = "data";
pub(crate) const DEFAULT_BOUNDARIES_FILE: &str = "Park_Boundaries_8590650033188940041.geojson";
pub(crate) const DEFAULT_SIGNS_FILE: &str = "Park_Signs_-5626504497805504009.geojson";
pub(crate) const DEFAULT_DATABASE_FILE: &str = "parks.db";

/// Run the parks CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Load(args) => load::run_load(args).map(|_| ()),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "parks",
    about = "Load municipal park boundaries and rainbow signs into the park database",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Import park boundaries and rainbow sign locations.
    Load(LoadArgs),
}

#[cfg(test)]
mod tests;
