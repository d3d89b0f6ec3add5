//! Behaviour-driven step definitions driving the compare CLI scenarios.

use super::helpers::Workspace;
use super::*;
use crate::compare::run_compare_with;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::RefCell;
use vantage_core::{Condition, SessionOutcome, SessionRequestError};
use vantage_scorer::{AspectRecommender, ComparisonError};

#[derive(Debug)]
struct CompareWorld {
    workspace: Workspace,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CompareWorld {
    fn new() -> Self {
        Self {
            workspace: Workspace::new(),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn select(&self, first: Condition, second: Condition) {
        self.cli_args.borrow_mut().extend([
            format!("--{ARG_FIRST}"),
            first.to_string(),
            format!("--{ARG_SECOND}"),
            second.to_string(),
        ]);
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }

    /// Decode the printed comparison into its two outcomes and overlap.
    fn comparison(&self) -> (SessionOutcome, SessionOutcome, Vec<String>) {
        let borrowed = self.result.borrow();
        borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect("expected success");
        let mut value: Value =
            serde_json::from_slice(&self.stdout.borrow()).expect("output should be JSON");
        let mut take = |key: &str| value.get_mut(key).map(Value::take).expect(key);
        let first = serde_json::from_value(take("first")).expect("first outcome");
        let second = serde_json::from_value(take("second")).expect("second outcome");
        let shared = serde_json::from_value(take("shared")).expect("shared destinations");
        (first, second, shared)
    }
}

#[fixture]
fn world() -> CompareWorld {
    CompareWorld::new()
}

#[given("a JSON catalog is configured for comparison")]
fn json_catalog_exists(#[from(world)] world: &CompareWorld) {
    let catalog = world.workspace.json_catalog();
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_CATALOG}"), catalog.into_string()]);
}

#[given("a request with feedback exists on disk")]
fn request_with_feedback_exists(#[from(world)] world: &CompareWorld) {
    world.workspace.request(Condition::NoAspectAll, true);
}

#[given("a request without feedback exists on disk")]
fn request_without_feedback_exists(#[from(world)] world: &CompareWorld) {
    world.workspace.request(Condition::NoAspectAll, false);
}

#[given("I compare noaspect_all with aspect_all")]
fn compare_baseline_with_all(#[from(world)] world: &CompareWorld) {
    world.select(Condition::NoAspectAll, Condition::AspectAll);
}

#[given("I compare aspect_all with aspect_all")]
fn compare_identical(#[from(world)] world: &CompareWorld) {
    world.select(Condition::AspectAll, Condition::AspectAll);
}

#[given("I compare noaspect_all with aspect_top5")]
fn compare_baseline_with_top(#[from(world)] world: &CompareWorld) {
    world.select(Condition::NoAspectAll, Condition::AspectTop { top_k: 5 });
}

#[when("I run the compare command")]
fn run_compare_command(#[from(world)] world: &CompareWorld) {
    let mut invocation = vec![
        "vantage".to_owned(),
        "compare".to_owned(),
        world.workspace.path("request.json").into_string(),
    ];
    invocation.extend(world.cli_args.borrow().iter().cloned());
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Compare(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_compare_with(args, &AspectRecommender::default(), &mut *buffer)
        }
        other => panic!("expected compare command, found {other:?}"),
    });
    world.result.replace(Some(outcome));
}

#[then("both outcomes list 10 recommendations")]
fn both_outcomes_list_recommendations(#[from(world)] world: &CompareWorld) {
    let (first, second, _) = world.comparison();
    assert_eq!(first.estimate.condition, Condition::NoAspectAll);
    assert_eq!(second.estimate.condition, Condition::AspectAll);
    assert_eq!(first.recommendations.entries.len(), 10);
    assert_eq!(second.recommendations.entries.len(), 10);
}

#[then("the shared destinations appear in both outcomes")]
fn shared_destinations_appear_in_both(#[from(world)] world: &CompareWorld) {
    let (first, second, shared) = world.comparison();
    let first_names: Vec<&str> = first.recommendations.destinations().collect();
    let second_names: Vec<&str> = second.recommendations.destinations().collect();
    let expected: Vec<&str> = first_names
        .iter()
        .copied()
        .filter(|name| second_names.contains(name))
        .collect();
    assert_eq!(shared, expected);
}

#[then("the command fails because the conditions are identical")]
fn command_fails_identical_conditions(#[from(world)] world: &CompareWorld) {
    match &*world.error() {
        CliError::Compare(ComparisonError::IdenticalConditions { condition }) => {
            assert_eq!(*condition, Condition::AspectAll);
        }
        other => panic!("expected IdenticalConditions, found {other:?}"),
    }
}

#[then("the comparison fails because feedback is missing")]
fn command_fails_missing_feedback(#[from(world)] world: &CompareWorld) {
    match &*world.error() {
        CliError::InvalidSessionRequest { source, .. } => assert!(matches!(
            source,
            SessionRequestError::MissingFeedback {
                condition: Condition::AspectTop { top_k: 5 },
                ..
            }
        )),
        other => panic!("expected InvalidSessionRequest, found {other:?}"),
    }
}

macro_rules! register_compare_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/compare_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CompareWorld) {
            let _ = world;
        }
    };
}

register_compare_scenario!(
    compare_happy_path,
    "comparing the baseline with an aspect-aware condition"
);
register_compare_scenario!(compare_identical_conditions, "rejecting identical conditions");
register_compare_scenario!(compare_missing_feedback, "rejecting missing feedback for either side");
