//! Assign command implementation for the Vantage CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use vantage_core::Condition;
use vantage_scorer::{ConditionBalancer, LeastUsedBalancer};

use crate::fs::open_utf8_file;
use crate::inputs::{require_existing, write_json};
use crate::{ARG_CANDIDATES, ARG_HISTORY, ARG_SEED, CliError, ENV_ASSIGN_HISTORY};

/// CLI arguments for the `assign` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Read a JSON array of previously assigned condition labels \
                 and print the condition the next visitor should receive. \
                 The least-used candidate wins; ties are broken at random. \
                 Labels outside the candidate list are ignored.",
    about = "Assign the next visitor's condition"
)]
#[ortho_config(prefix = "VANTAGE")]
pub(crate) struct AssignArgs {
    /// Path to a JSON array of prior condition labels.
    #[arg(long = ARG_HISTORY, value_name = "path")]
    #[serde(default)]
    pub(crate) history: Option<Utf8PathBuf>,
    /// Comma-separated candidate conditions (defaults to the canonical four).
    #[arg(long = ARG_CANDIDATES, value_name = "labels", value_delimiter = ',')]
    #[serde(default)]
    pub(crate) candidates: Option<Vec<Condition>>,
    /// Seed for reproducible tie-breaking.
    #[arg(long = ARG_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl AssignArgs {
    pub(crate) fn into_config(self) -> Result<AssignConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AssignConfig::try_from(merged)
    }
}

/// Resolved `assign` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AssignConfig {
    /// Path to the assignment history.
    pub(crate) history: Utf8PathBuf,
    /// Conditions eligible for assignment.
    pub(crate) candidates: Vec<Condition>,
    /// Tie-breaking seed; entropy is used when absent.
    pub(crate) seed: Option<u64>,
}

impl TryFrom<AssignArgs> for AssignConfig {
    type Error = CliError;

    fn try_from(args: AssignArgs) -> Result<Self, Self::Error> {
        let history = args.history.ok_or(CliError::MissingArgument {
            field: ARG_HISTORY,
            env: ENV_ASSIGN_HISTORY,
        })?;
        Ok(Self {
            history,
            candidates: args
                .candidates
                .unwrap_or_else(|| Condition::CANONICAL.to_vec()),
            seed: args.seed,
        })
    }
}

/// Printed result of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct AssignmentReport {
    /// Condition for the next visitor.
    pub(crate) condition: Condition,
    /// Prior assignments per candidate, in candidate order.
    pub(crate) counts: Vec<ConditionCount>,
}

/// Prior assignment count for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ConditionCount {
    /// Candidate condition.
    pub(crate) condition: Condition,
    /// Number of prior assignments.
    pub(crate) assignments: usize,
}

pub(crate) fn run_assign(args: AssignArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_assign_with(args, &mut stdout)
}

pub(crate) fn run_assign_with(args: AssignArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.history, ARG_HISTORY)?;
    let report = execute_assign(&config)?;
    write_json(writer, &report)
}

fn execute_assign(config: &AssignConfig) -> Result<AssignmentReport, CliError> {
    let history = load_history(&config.history)?;
    let rng = config
        .seed
        .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
    let mut balancer = LeastUsedBalancer::new(config.candidates.iter().copied(), rng);
    let counts = balancer
        .counts(&history)
        .into_iter()
        .map(|(condition, assignments)| ConditionCount {
            condition,
            assignments,
        })
        .collect();
    let condition = balancer.assign(&history)?;
    Ok(AssignmentReport { condition, counts })
}

/// Read prior assignments, skipping labels that do not name a condition.
fn load_history(path: &Utf8Path) -> Result<Vec<Condition>, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenHistory {
        path: path.to_path_buf(),
        source,
    })?;
    let labels: Vec<String> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseHistory {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(labels
        .iter()
        .filter_map(|label| match label.parse::<Condition>() {
            Ok(condition) => Some(condition),
            Err(err) => {
                log::warn!("ignoring history entry: {err}");
                None
            }
        })
        .collect())
}
