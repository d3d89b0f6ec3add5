//! Recommend command implementation for the Vantage CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use vantage_core::{Condition, Recommender, SessionOutcome};
use vantage_scorer::AspectRecommender;

use crate::inputs::{
    load_catalog, load_session_request, require_existing, validate_session, write_json,
};
use crate::{
    ARG_CATALOG, ARG_CONDITION, ARG_REQUEST, CliError, ENV_RECOMMEND_CATALOG,
    ENV_RECOMMEND_REQUEST,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Run one recommendation session. The request is a JSON \
                 SessionRequest listing five visited destinations, their \
                 reported good aspects, declared interests and the \
                 experimental condition. The catalog is read from SQLite \
                 (.db, .sqlite) or JSON (any other extension).",
    about = "Recommend destinations for one visitor"
)]
#[ortho_config(prefix = "VANTAGE")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON file containing a `SessionRequest`.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to the destination catalog.
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Override the condition recorded in the request.
    #[arg(long = ARG_CONDITION, value_name = "label")]
    #[serde(default)]
    pub(crate) condition: Option<Condition>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the catalog.
    pub(crate) catalog: Utf8PathBuf,
    /// Condition overriding the request's own.
    pub(crate) condition: Option<Condition>,
}

impl RecommendConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_REQUEST)?;
        require_existing(&self.catalog, ARG_CATALOG)?;
        Ok(())
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_RECOMMEND_REQUEST,
        })?;
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: ENV_RECOMMEND_CATALOG,
        })?;
        Ok(Self {
            request_path,
            catalog,
            condition: args.condition,
        })
    }
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &AspectRecommender::default(), &mut stdout)
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    recommender: &dyn Recommender,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let outcome = execute_recommend(&config, recommender)?;
    write_json(writer, &outcome)
}

fn execute_recommend(
    config: &RecommendConfig,
    recommender: &dyn Recommender,
) -> Result<SessionOutcome, CliError> {
    let catalog = load_catalog(&config.catalog)?;
    let mut request = load_session_request(&config.request_path)?;
    if let Some(condition) = config.condition {
        log::info!(
            "overriding request condition {} with {condition}",
            request.condition
        );
        request.condition = condition;
    }
    validate_session(&request, &catalog, &config.request_path)?;
    Ok(recommender.recommend(&catalog, &request)?)
}
