//! Preference estimation from visited-destination feedback.
//!
//! Each visited destination contributes, per aspect, its normalised score
//! weighted by the reciprocal of the aspect's rank within that destination.
//! Which aspects contribute, and whether reported good aspects are boosted,
//! depends on the experimental condition. The rule is resolved once per
//! estimate rather than re-checked per aspect.
#![forbid(unsafe_code)]

use log::{debug, warn};
use vantage_core::{
    Catalog, Condition, InterestSet, PreferenceEstimate, PreferenceProfile, Taxonomy,
    VisitedDestination, VisitedFeedback,
};

use crate::normalise::NormalisedCatalog;
use crate::params::ScoringParams;
use crate::rank::{rank_positions, reciprocal_rank};

/// Which of a visited destination's aspects feed the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InclusionRule {
    /// Every aspect contributes; reported good aspects are boosted when
    /// `boost_feedback` is set.
    Everything { boost_feedback: bool },
    /// Locally salient aspects plus reported good aspects contribute, with
    /// the boost applied to the latter. Declared interests are skipped when
    /// `exclude_interest` is set.
    SalientOrReported { exclude_interest: bool },
}

impl InclusionRule {
    const fn for_condition(condition: Condition) -> Self {
        match condition {
            Condition::NoAspectAll | Condition::NoAspectTop { .. } => Self::Everything {
                boost_feedback: false,
            },
            Condition::AspectAll => Self::Everything {
                boost_feedback: true,
            },
            Condition::AspectTop { .. } => Self::SalientOrReported {
                exclude_interest: false,
            },
            Condition::AspectExcludeInterestTop { .. } => Self::SalientOrReported {
                exclude_interest: true,
            },
        }
    }

    const fn boosts_feedback(self) -> bool {
        match self {
            Self::Everything { boost_feedback } => boost_feedback,
            Self::SalientOrReported { .. } => true,
        }
    }

    const fn includes(self, rank: usize, good: bool, interested: bool, local_top: usize) -> bool {
        match self {
            Self::Everything { .. } => true,
            Self::SalientOrReported { exclude_interest } => {
                !(exclude_interest && interested) && (rank <= local_top || good)
            }
        }
    }
}

/// Estimate a visitor's preference profile and active aspect set.
///
/// Visited destinations missing from the catalog are skipped with a warning;
/// they contribute nothing. The returned profile always has one entry per
/// taxonomy aspect, sorted by descending score with ties in taxonomy order.
///
/// # Examples
/// ```
/// use vantage_core::{Condition, InterestSet, VisitedDestination, VisitedFeedback};
/// use vantage_core::test_support::sample_catalog;
/// use vantage_scorer::{ScoringParams, estimate};
///
/// let catalog = sample_catalog();
/// let visited: VisitedFeedback = ["Nikko", "Kamakura", "Nara", "Kyoto", "Dazaifu"]
///     .into_iter()
///     .map(|name| VisitedDestination::new(name, ["shrine"]))
///     .collect();
/// let estimate = estimate(
///     &catalog,
///     &visited,
///     &InterestSet::new(),
///     Condition::AspectTop { top_k: 2 },
///     &ScoringParams::default(),
/// );
/// assert_eq!(estimate.active_aspects.first().map(String::as_str), Some("shrine"));
/// assert_eq!(estimate.active_aspects.len(), 2);
/// ```
#[must_use]
pub fn estimate(
    catalog: &Catalog,
    visited: &VisitedFeedback,
    interest: &InterestSet,
    condition: Condition,
    params: &ScoringParams,
) -> PreferenceEstimate {
    let normalised = NormalisedCatalog::from_catalog(catalog);
    let taxonomy = catalog.taxonomy();
    let rule = InclusionRule::for_condition(condition);
    let mut totals = vec![0.0; taxonomy.len()];

    for entry in visited.entries() {
        let Some(row) = catalog
            .position(&entry.name)
            .and_then(|position| normalised.row(position))
        else {
            warn!("visited destination {} is not in the catalog", entry.name);
            continue;
        };
        accumulate(
            &mut totals,
            &Contribution {
                row,
                entry,
                taxonomy,
                interest,
                rule,
                params,
            },
        );
    }

    let profile = PreferenceProfile::from_totals(taxonomy, &totals, interest);
    let active_aspects = resolve_active_aspects(&profile, condition, interest, taxonomy);
    debug!("estimated preference under {condition}: active aspects {active_aspects:?}");
    PreferenceEstimate {
        condition,
        profile,
        active_aspects,
    }
}

struct Contribution<'a> {
    row: &'a [f64],
    entry: &'a VisitedDestination,
    taxonomy: &'a Taxonomy,
    interest: &'a InterestSet,
    rule: InclusionRule,
    params: &'a ScoringParams,
}

#[expect(
    clippy::float_arithmetic,
    reason = "profile totals accumulate weighted scores"
)]
fn accumulate(totals: &mut [f64], contribution: &Contribution<'_>) {
    let Contribution {
        row,
        entry,
        taxonomy,
        interest,
        rule,
        params,
    } = *contribution;
    let ranks = rank_positions(row);
    let cells = totals.iter_mut().zip(row).zip(ranks).zip(taxonomy.names());
    for (((total, &score), rank), aspect) in cells {
        let good = entry.is_good(aspect);
        if !rule.includes(rank, good, interest.contains(aspect), params.local_top) {
            continue;
        }
        let boost = if good && rule.boosts_feedback() {
            params.boost
        } else {
            1.0
        };
        *total += score * reciprocal_rank(rank) * boost;
    }
}

/// Select the aspects the ranker weights under `condition`.
///
/// - `noaspect_all` and `noaspect_top<k>` have no active aspects; their
///   ranker ignores the profile.
/// - `aspect_all` activates the whole taxonomy in taxonomy order.
/// - `aspect_top<k>` takes the first `k` profile entries.
/// - `aspect_exclude_interest_top<k>` skips declared interests, then takes
///   the first `k` remaining entries.
///
/// Fewer than `k` aspects are returned when fewer are available. Profile
/// order breaks ties, so a zero-valued profile yields taxonomy order.
#[must_use]
pub fn resolve_active_aspects(
    profile: &PreferenceProfile,
    condition: Condition,
    interest: &InterestSet,
    taxonomy: &Taxonomy,
) -> Vec<String> {
    let ranked = profile.entries().iter();
    match condition {
        Condition::NoAspectAll | Condition::NoAspectTop { .. } => Vec::new(),
        Condition::AspectAll => taxonomy.names().map(str::to_owned).collect(),
        Condition::AspectTop { top_k } => ranked
            .take(top_k)
            .map(|entry| entry.aspect.clone())
            .collect(),
        Condition::AspectExcludeInterestTop { top_k } => ranked
            .filter(|entry| !interest.contains(&entry.aspect))
            .take(top_k)
            .map(|entry| entry.aspect.clone())
            .collect(),
    }
}
