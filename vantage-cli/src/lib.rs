//! Command-line interface for running Vantage recommendation sessions.
//!
//! Three subcommands are available:
//!
//! - `recommend` runs one session and prints its `SessionOutcome`.
//! - `compare` runs one visitor under two conditions and prints both
//!   outcomes with their overlap.
//! - `assign` picks the next condition from a history of assignments.
//!
//! Every option can also come from a configuration file or a `VANTAGE_*`
//! environment variable via `ortho_config`.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod assign;
mod compare;
mod error;
mod fs;
mod inputs;
mod recommend;

pub use error::CliError;

use assign::{AssignArgs, run_assign};
use compare::{CompareArgs, run_compare};
use recommend::{RecommendArgs, run_recommend};

pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_CATALOG: &str = "catalog";
pub(crate) const ARG_CONDITION: &str = "condition";
pub(crate) const ARG_FIRST: &str = "first";
pub(crate) const ARG_SECOND: &str = "second";
pub(crate) const ARG_HISTORY: &str = "history";
pub(crate) const ARG_CANDIDATES: &str = "candidates";
pub(crate) const ARG_SEED: &str = "seed";
pub(crate) const ENV_RECOMMEND_REQUEST: &str = "VANTAGE_CMDS_RECOMMEND_REQUEST_PATH";
pub(crate) const ENV_RECOMMEND_CATALOG: &str = "VANTAGE_CMDS_RECOMMEND_CATALOG";
pub(crate) const ENV_COMPARE_REQUEST: &str = "VANTAGE_CMDS_COMPARE_REQUEST_PATH";
pub(crate) const ENV_COMPARE_CATALOG: &str = "VANTAGE_CMDS_COMPARE_CATALOG";
pub(crate) const ENV_COMPARE_FIRST: &str = "VANTAGE_CMDS_COMPARE_FIRST";
pub(crate) const ENV_COMPARE_SECOND: &str = "VANTAGE_CMDS_COMPARE_SECOND";
pub(crate) const ENV_ASSIGN_HISTORY: &str = "VANTAGE_CMDS_ASSIGN_HISTORY";

/// Run the Vantage CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration merging, input
/// loading or the requested operation fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
        Command::Compare(args) => run_compare(args),
        Command::Assign(args) => run_assign(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "vantage",
    about = "Aspect-based destination recommendation sessions",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate a visitor's preference and recommend destinations.
    Recommend(RecommendArgs),
    /// Run one visitor under two conditions side by side.
    Compare(CompareArgs),
    /// Assign the next visitor to the least-used condition.
    Assign(AssignArgs),
}

#[cfg(test)]
mod tests;
