//! Compare command implementation for the Vantage CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use vantage_core::{Condition, Recommender, SessionRequest};
use vantage_scorer::{AspectRecommender, Comparison, ConditionPair, compare};

use crate::inputs::{
    load_catalog, load_session_request, require_existing, validate_session, write_json,
};
use crate::{
    ARG_CATALOG, ARG_FIRST, ARG_REQUEST, ARG_SECOND, CliError, ENV_COMPARE_CATALOG,
    ENV_COMPARE_FIRST, ENV_COMPARE_REQUEST, ENV_COMPARE_SECOND,
};

/// CLI arguments for the `compare` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Run the visitor described by a SessionRequest under two \
                 conditions over the same catalog and print both outcomes \
                 together with the destinations they share. The request's \
                 own condition is ignored.",
    about = "Compare two conditions for one visitor"
)]
#[ortho_config(prefix = "VANTAGE")]
pub(crate) struct CompareArgs {
    /// Path to a JSON file containing a `SessionRequest`.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to the destination catalog.
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Condition evaluated first.
    #[arg(long = ARG_FIRST, value_name = "label")]
    #[serde(default)]
    pub(crate) first: Option<Condition>,
    /// Condition evaluated second.
    #[arg(long = ARG_SECOND, value_name = "label")]
    #[serde(default)]
    pub(crate) second: Option<Condition>,
}

impl CompareArgs {
    pub(crate) fn into_config(self) -> Result<CompareConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CompareConfig::try_from(merged)
    }
}

/// Resolved `compare` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompareConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the catalog.
    pub(crate) catalog: Utf8PathBuf,
    /// Conditions to compare.
    pub(crate) pair: ConditionPair,
}

impl CompareConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_REQUEST)?;
        require_existing(&self.catalog, ARG_CATALOG)?;
        Ok(())
    }
}

impl TryFrom<CompareArgs> for CompareConfig {
    type Error = CliError;

    fn try_from(args: CompareArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_COMPARE_REQUEST,
        })?;
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: ENV_COMPARE_CATALOG,
        })?;
        let first = args.first.ok_or(CliError::MissingArgument {
            field: ARG_FIRST,
            env: ENV_COMPARE_FIRST,
        })?;
        let second = args.second.ok_or(CliError::MissingArgument {
            field: ARG_SECOND,
            env: ENV_COMPARE_SECOND,
        })?;
        Ok(Self {
            request_path,
            catalog,
            pair: ConditionPair::new(first, second)?,
        })
    }
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_compare_with(args, &AspectRecommender::default(), &mut stdout)
}

pub(crate) fn run_compare_with(
    args: CompareArgs,
    recommender: &dyn Recommender,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let comparison = execute_compare(&config, recommender)?;
    write_json(writer, &comparison)
}

fn execute_compare(
    config: &CompareConfig,
    recommender: &dyn Recommender,
) -> Result<Comparison, CliError> {
    let catalog = load_catalog(&config.catalog)?;
    let request = load_session_request(&config.request_path)?;
    // Feedback requirements depend on the condition, so check both sides.
    for condition in [config.pair.first(), config.pair.second()] {
        let session = SessionRequest {
            condition,
            ..request.clone()
        };
        validate_session(&session, &catalog, &config.request_path)?;
    }
    Ok(compare(
        recommender,
        &catalog,
        &request.visited,
        &request.interest,
        config.pair,
    )?)
}
