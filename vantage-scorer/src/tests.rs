//! Unit coverage for normalisation, rank weighting and both scoring passes.
#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use rstest::{fixture, rstest};
use vantage_core::test_support::sample_catalog;
use vantage_core::{
    Catalog, Condition, DestinationRecord, InterestSet, RecommendError, Recommender,
    SessionRequest, Taxonomy, VisitedDestination, VisitedFeedback,
};

use crate::{
    AspectRecommender, ComparisonError, ConditionPair, DEGENERATE_FILL, NormalisedCatalog,
    ScoringParams, compare, estimate, normalise_column, rank_positions, rank_weights, recommend,
};

const TOLERANCE: f64 = 1e-9;

#[expect(
    clippy::float_arithmetic,
    reason = "test compares floating point scores"
)]
fn approx(left: f64, right: f64) -> bool {
    (left - right).abs() < TOLERANCE
}

/// Three aspects, three destinations. `Z` is flat, `X` and `Y` mirror each
/// other, and aspect `B` is constant across the catalog.
#[fixture]
fn mirrored() -> Catalog {
    let taxonomy = Taxonomy::from_names(["A", "B", "C"]).expect("taxonomy");
    let records = [
        ("X", [1.0, 2.0, 3.0]),
        ("Y", [3.0, 2.0, 1.0]),
        ("Z", [2.0, 2.0, 2.0]),
    ]
    .into_iter()
    .map(|(name, scores)| DestinationRecord {
        name: name.to_owned(),
        region: "Test".to_owned(),
        scores: ["A", "B", "C"]
            .into_iter()
            .map(str::to_owned)
            .zip(scores)
            .collect(),
        url: None,
    })
    .collect();
    Catalog::new(taxonomy, records).expect("catalog")
}

/// Twenty aspects over ten destinations. The visited destinations `V0..V4`
/// lead the catalog on `a00..a04` and trail it on every other aspect, so the
/// local top five of each visited row is exactly `a00..a04`.
#[fixture]
fn twenty_aspects() -> Catalog {
    let names: Vec<String> = (0..20).map(|aspect| format!("a{aspect:02}")).collect();
    let taxonomy = Taxonomy::from_names(names.iter().cloned()).expect("taxonomy");
    let records = (0_u32..10)
        .map(|destination| {
            let is_visited = destination < 5;
            let scores = (0_u32..20)
                .zip(&names)
                .map(|(aspect, name)| {
                    let score = match (is_visited, aspect < 5) {
                        (true, true) => 9.0,
                        (false, true) => 0.0,
                        (true, false) => f64::from(destination + aspect),
                        (false, false) => 100.0,
                    };
                    (name.clone(), score)
                })
                .collect();
            let prefix = if is_visited { "V" } else { "O" };
            DestinationRecord {
                name: format!("{prefix}{destination}"),
                region: "Test".to_owned(),
                scores,
                url: None,
            }
        })
        .collect();
    Catalog::new(taxonomy, records).expect("catalog")
}

fn visited(entries: &[(&str, &[&str])]) -> VisitedFeedback {
    entries
        .iter()
        .map(|(name, good)| VisitedDestination::new(*name, good.iter().copied()))
        .collect()
}

fn run(
    catalog: &Catalog,
    feedback: &VisitedFeedback,
    interest: &InterestSet,
    condition: Condition,
    params: &ScoringParams,
) -> Vec<String> {
    let preference = estimate(catalog, feedback, interest, condition, params);
    recommend(catalog, &preference, condition, feedback, params)
        .expect("recommend")
        .destinations()
        .map(str::to_owned)
        .collect()
}

#[rstest]
fn normalises_to_unit_range() {
    assert_eq!(normalise_column(&[1.0, 3.0, 2.0]), vec![0.0, 1.0, 0.5]);
}

#[rstest]
#[case::constant(vec![4.0, 4.0, 4.0])]
#[case::single(vec![2.5])]
fn constant_columns_take_the_degenerate_fill(#[case] column: Vec<f64>) {
    let normalised = normalise_column(&column);
    assert_eq!(normalised.len(), column.len());
    assert!(normalised.iter().all(|&value| approx(value, DEGENERATE_FILL)));
}

#[rstest]
fn empty_column_stays_empty() {
    assert!(normalise_column(&[]).is_empty());
}

#[rstest]
fn normalised_catalog_is_row_major(mirrored: Catalog) {
    let normalised = NormalisedCatalog::from_catalog(&mirrored);
    assert_eq!(normalised.row(0), Some([0.0, 0.5, 1.0].as_slice()));
    assert_eq!(normalised.row(1), Some([1.0, 0.5, 0.0].as_slice()));
    assert_eq!(normalised.row(2), Some([0.5, 0.5, 0.5].as_slice()));
    assert_eq!(normalised.row(3), None);
}

#[rstest]
#[case::descending(vec![0.9, 0.5, 0.1], vec![1, 2, 3])]
#[case::ascending(vec![0.0, 0.5, 1.0], vec![3, 2, 1])]
#[case::ties_keep_taxonomy_order(vec![0.5, 0.5, 0.5], vec![1, 2, 3])]
#[case::partial_tie(vec![0.2, 0.9, 0.2], vec![2, 1, 3])]
fn ranks_by_descending_score(#[case] row: Vec<f64>, #[case] expected: Vec<usize>) {
    assert_eq!(rank_positions(&row), expected);
}

#[rstest]
#[expect(
    clippy::float_arithmetic,
    reason = "expected weights are written as fractions"
)]
fn rank_weights_are_reciprocal_ranks() {
    let weights = rank_weights(&[0.0, 0.5, 1.0]);
    let expected = [1.0 / 3.0, 0.5, 1.0];
    assert!(weights.iter().zip(expected).all(|(&got, want)| approx(got, want)));
}

#[rstest]
fn baseline_estimate_ignores_feedback(mirrored: Catalog) {
    let feedback = visited(&[("X", &["C"])]);
    let preference = estimate(
        &mirrored,
        &feedback,
        &InterestSet::new(),
        Condition::NoAspectAll,
        &ScoringParams::default(),
    );

    let order: Vec<_> = preference
        .profile
        .entries()
        .iter()
        .map(|entry| entry.aspect.as_str())
        .collect();
    assert_eq!(order, vec!["C", "B", "A"]);
    assert!(approx(preference.profile.score("C").expect("C"), 1.0));
    assert!(approx(preference.profile.score("B").expect("B"), 0.25));
    assert!(preference.active_aspects.is_empty());
}

#[rstest]
fn aspect_all_boosts_reported_aspects(mirrored: Catalog) {
    let feedback = visited(&[("X", &["C"])]);
    let preference = estimate(
        &mirrored,
        &feedback,
        &InterestSet::new(),
        Condition::AspectAll,
        &ScoringParams::default(),
    );

    assert!(approx(preference.profile.score("C").expect("C"), 1.2));
    assert_eq!(preference.active_aspects, vec!["A", "B", "C"]);
}

#[rstest]
fn local_top_admits_reported_aspects_outside_it(mirrored: Catalog) {
    let params = ScoringParams {
        local_top: 1,
        ..ScoringParams::default()
    };
    let feedback = visited(&[("Y", &["C"])]);
    let preference = estimate(
        &mirrored,
        &feedback,
        &InterestSet::new(),
        Condition::AspectTop { top_k: 3 },
        &params,
    );

    // Y ranks A first; C is reported good but normalises to zero, and B is
    // neither salient nor reported.
    assert!(approx(preference.profile.score("A").expect("A"), 1.0));
    assert!(approx(preference.profile.score("B").expect("B"), 0.0));
    assert!(approx(preference.profile.score("C").expect("C"), 0.0));
    assert_eq!(preference.active_aspects, vec!["A", "B", "C"]);
}

#[rstest]
fn exclude_interest_drops_declared_aspects(mirrored: Catalog) {
    let interest: InterestSet = ["C"].into_iter().collect();
    let feedback = visited(&[("X", &[])]);
    let preference = estimate(
        &mirrored,
        &feedback,
        &interest,
        Condition::AspectExcludeInterestTop { top_k: 2 },
        &ScoringParams::default(),
    );

    assert!(approx(preference.profile.score("C").expect("C"), 0.0));
    assert_eq!(preference.active_aspects, vec!["B", "A"]);
    assert!(
        preference
            .profile
            .entries()
            .iter()
            .any(|entry| entry.aspect == "C" && entry.interested)
    );
}

#[rstest]
fn top_k_larger_than_taxonomy_returns_everything(mirrored: Catalog) {
    let preference = estimate(
        &mirrored,
        &visited(&[("X", &[])]),
        &InterestSet::new(),
        Condition::AspectTop { top_k: 10 },
        &ScoringParams::default(),
    );
    assert_eq!(preference.active_aspects.len(), 3);
}

#[rstest]
fn unknown_visited_destinations_contribute_nothing(mirrored: Catalog) {
    let feedback = visited(&[("Atlantis", &["A"])]);
    let preference = estimate(
        &mirrored,
        &feedback,
        &InterestSet::new(),
        Condition::AspectAll,
        &ScoringParams::default(),
    );
    assert!(
        preference
            .profile
            .entries()
            .iter()
            .all(|entry| approx(entry.score, 0.0))
    );

    let result = recommend(
        &mirrored,
        &preference,
        Condition::AspectAll,
        &feedback,
        &ScoringParams::default(),
    )
    .expect("recommend");
    assert!(result.exclusions.is_empty());
    assert_eq!(result.entries.len(), 3);
}

#[rstest]
#[expect(
    clippy::float_arithmetic,
    reason = "expected score is written as a sum of terms"
)]
fn baseline_ranking_keeps_catalog_order_on_ties(mirrored: Catalog) {
    let feedback = visited(&[("X", &[])]);
    let preference = estimate(
        &mirrored,
        &feedback,
        &InterestSet::new(),
        Condition::NoAspectAll,
        &ScoringParams::default(),
    );
    let result = recommend(
        &mirrored,
        &preference,
        Condition::NoAspectAll,
        &feedback,
        &ScoringParams::default(),
    )
    .expect("recommend");

    assert_eq!(result.exclusions.rank_of("X"), Some(1));
    let names: Vec<_> = result.destinations().collect();
    assert_eq!(names, vec!["Y", "Z"]);
    let scores: Vec<_> = result.entries.iter().map(|entry| entry.score).collect();
    assert!(approx(scores.first().copied().expect("Y"), 1.25));
    assert!(approx(scores.get(1).copied().expect("Z"), 0.5 + 0.25 + 0.5 / 3.0));
}

#[rstest]
fn aspect_all_ranking_follows_the_profile(mirrored: Catalog) {
    let feedback = visited(&[("X", &["C"])]);
    let names = run(
        &mirrored,
        &feedback,
        &InterestSet::new(),
        Condition::AspectAll,
        &ScoringParams::default(),
    );
    assert_eq!(names, vec!["Z", "Y"]);
}

#[rstest]
fn exclude_interest_ranking_ties_fall_back_to_catalog_order(mirrored: Catalog) {
    let interest: InterestSet = ["C"].into_iter().collect();
    let names = run(
        &mirrored,
        &visited(&[("X", &[])]),
        &interest,
        Condition::AspectExcludeInterestTop { top_k: 2 },
        &ScoringParams::default(),
    );
    assert_eq!(names, vec!["Y", "Z"]);
}

#[rstest]
fn limit_caps_the_result(mirrored: Catalog) {
    let params = ScoringParams {
        limit: 1,
        ..ScoringParams::default()
    };
    let names = run(
        &mirrored,
        &visited(&[("X", &[])]),
        &InterestSet::new(),
        Condition::NoAspectAll,
        &params,
    );
    assert_eq!(names, vec!["Y"]);
}

#[rstest]
fn ranking_rejects_an_estimate_from_another_condition(mirrored: Catalog) {
    let feedback = visited(&[("X", &[])]);
    let preference = estimate(
        &mirrored,
        &feedback,
        &InterestSet::new(),
        Condition::AspectAll,
        &ScoringParams::default(),
    );
    let err = recommend(
        &mirrored,
        &preference,
        Condition::NoAspectAll,
        &feedback,
        &ScoringParams::default(),
    )
    .expect_err("mismatch");
    assert_eq!(
        err,
        RecommendError::ConditionMismatch {
            estimated: Condition::AspectAll,
            requested: Condition::NoAspectAll,
        }
    );
}

#[rstest]
fn ranking_rejects_invalid_parameters(mirrored: Catalog) {
    let feedback = visited(&[("X", &[])]);
    let preference = estimate(
        &mirrored,
        &feedback,
        &InterestSet::new(),
        Condition::NoAspectAll,
        &ScoringParams::default(),
    );
    let params = ScoringParams {
        limit: 0,
        ..ScoringParams::default()
    };
    let err = recommend(&mirrored, &preference, Condition::NoAspectAll, &feedback, &params)
        .expect_err("invalid limit");
    assert!(matches!(err, RecommendError::InvalidParameters { .. }));
}

#[fixture]
fn sample_request() -> SessionRequest {
    SessionRequest {
        visited: visited(&[
            ("Nikko", &["shrine", "history"]),
            ("Hakone", &["hot spring"]),
            ("Kamakura", &["shrine"]),
            ("Kusatsu", &["hot spring"]),
            ("Kamikochi", &["nature"]),
        ]),
        interest: ["food"].into_iter().collect(),
        condition: Condition::AspectTop { top_k: 5 },
    }
}

#[rstest]
#[case(Condition::NoAspectAll)]
#[case(Condition::AspectAll)]
#[case(Condition::AspectTop { top_k: 5 })]
#[case(Condition::AspectExcludeInterestTop { top_k: 5 })]
fn engine_returns_ten_unvisited_destinations(
    #[case] condition: Condition,
    sample_request: SessionRequest,
) {
    let catalog = sample_catalog();
    let request = SessionRequest {
        condition,
        ..sample_request
    };
    let outcome = AspectRecommender::default()
        .recommend(&catalog, &request)
        .expect("recommend");

    assert_eq!(outcome.estimate.condition, condition);
    assert_eq!(outcome.recommendations.entries.len(), 10);
    assert_eq!(outcome.recommendations.exclusions.len(), 5);
    assert!(
        outcome
            .recommendations
            .destinations()
            .all(|name| !request.visited.contains(name))
    );
}

#[rstest]
fn engine_is_deterministic(sample_request: SessionRequest) {
    let catalog = sample_catalog();
    let engine = AspectRecommender::default();
    let first = engine.recommend(&catalog, &sample_request).expect("first");
    let second = engine.recommend(&catalog, &sample_request).expect("second");
    assert_eq!(first, second);
}

#[rstest]
fn engine_rejects_invalid_parameters() {
    let params = ScoringParams {
        boost: f64::NAN,
        ..ScoringParams::default()
    };
    assert!(AspectRecommender::with_params(params).is_err());
}

#[rstest]
fn comparison_reports_shared_destinations(sample_request: SessionRequest) {
    let catalog = sample_catalog();
    let pair = ConditionPair::new(Condition::NoAspectAll, Condition::AspectTop { top_k: 5 })
        .expect("pair");
    let comparison = compare(
        &AspectRecommender::default(),
        &catalog,
        &sample_request.visited,
        &sample_request.interest,
        pair,
    )
    .expect("compare");

    assert_eq!(comparison.first.estimate.condition, Condition::NoAspectAll);
    assert_eq!(
        comparison.second.estimate.condition,
        Condition::AspectTop { top_k: 5 }
    );
    let second: Vec<_> = comparison.second.recommendations.destinations().collect();
    let first: Vec<_> = comparison.first.recommendations.destinations().collect();
    for name in &comparison.shared {
        assert!(first.contains(&name.as_str()));
        assert!(second.contains(&name.as_str()));
    }
    let expected: Vec<_> = first
        .iter()
        .filter(|name| second.contains(*name))
        .map(|name| (*name).to_owned())
        .collect();
    assert_eq!(comparison.shared, expected);
}

#[rstest]
fn comparison_rejects_identical_conditions() {
    let err = ConditionPair::new(Condition::AspectAll, Condition::AspectAll).expect_err("same");
    assert_eq!(
        err,
        ComparisonError::IdenticalConditions {
            condition: Condition::AspectAll
        }
    );
}

#[rstest]
fn aspect_top5_over_twenty_aspects_keeps_salient_or_reported_aspects(twenty_aspects: Catalog) {
    let feedback = visited(&[
        ("V0", &[]),
        ("V1", &["a12"]),
        ("V2", &[]),
        ("V3", &[]),
        ("V4", &[]),
    ]);
    let params = ScoringParams::default();
    let preference = estimate(
        &twenty_aspects,
        &feedback,
        &InterestSet::new(),
        Condition::AspectTop { top_k: 5 },
        &params,
    );

    let normalised = NormalisedCatalog::from_catalog(&twenty_aspects);
    let taxonomy = twenty_aspects.taxonomy();
    let mut eligible: BTreeSet<&str> = BTreeSet::new();
    for entry in feedback.entries() {
        let row = twenty_aspects
            .position(&entry.name)
            .and_then(|position| normalised.row(position))
            .expect("visited row");
        for (rank, aspect) in rank_positions(row).into_iter().zip(taxonomy.names()) {
            if rank <= params.local_top || entry.is_good(aspect) {
                eligible.insert(aspect);
            }
        }
    }
    let expected: BTreeSet<&str> = ["a00", "a01", "a02", "a03", "a04", "a12"]
        .into_iter()
        .collect();
    assert_eq!(eligible, expected);

    assert_eq!(
        preference.active_aspects,
        vec!["a00", "a01", "a02", "a03", "a04"]
    );
    assert!(
        preference
            .active_aspects
            .iter()
            .all(|aspect| eligible.contains(aspect.as_str()))
    );
    assert!(preference.profile.score("a12").is_some_and(|score| score > 0.0));
    // a13 scores above the column minimum at V1 but sits outside its top five.
    assert_eq!(preference.profile.score("a13"), Some(0.0));
    for entry in preference.profile.entries() {
        if !eligible.contains(entry.aspect.as_str()) {
            assert!(approx(entry.score, 0.0), "{} leaked into the profile", entry.aspect);
        }
    }
}

#[rstest]
fn earlier_baseline_labels_rank_like_the_baseline(mirrored: Catalog) {
    let feedback = visited(&[("X", &["C"])]);
    let interest = InterestSet::new();
    let params = ScoringParams::default();
    let baseline = run(&mirrored, &feedback, &interest, Condition::NoAspectAll, &params);
    let earlier = run(
        &mirrored,
        &feedback,
        &interest,
        Condition::NoAspectTop { top_k: 10 },
        &params,
    );
    assert_eq!(earlier, vec!["Y", "Z"]);
    assert_eq!(earlier, baseline);
}
