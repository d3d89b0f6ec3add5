//! Catalog ranking against an estimated preference.
#![forbid(unsafe_code)]

use std::collections::HashSet;

use log::{debug, warn};
use vantage_core::{
    Catalog, Condition, ExclusionEntry, ExclusionLog, PreferenceEstimate, RecommendError,
    RecommendationEntry, RecommendationResult, ScoringFamily, VisitedFeedback,
};

use crate::normalise::NormalisedCatalog;
use crate::params::ScoringParams;
use crate::rank::rank_weights;

/// Rank the catalog under `condition` and drop already-visited destinations.
///
/// Aspect-aware conditions score each destination as the sum, over the
/// estimate's active aspects, of profile weight × normalised score ×
/// reciprocal rank. The baseline ignores the profile and sums normalised
/// score × reciprocal rank over every aspect. Equal scores keep catalog
/// order.
///
/// The exclusion log records where each visited destination would have
/// ranked before filtering. Visited names missing from the catalog are left
/// out of the log.
///
/// # Errors
/// Returns [`RecommendError::ConditionMismatch`] when `estimate` was produced
/// under a different condition, and [`RecommendError::InvalidParameters`]
/// when `params` fail validation.
pub fn recommend(
    catalog: &Catalog,
    estimate: &PreferenceEstimate,
    condition: Condition,
    visited: &VisitedFeedback,
    params: &ScoringParams,
) -> Result<RecommendationResult, RecommendError> {
    let limit = params.validate()?.limit;
    if estimate.condition != condition {
        return Err(RecommendError::ConditionMismatch {
            estimated: estimate.condition,
            requested: condition,
        });
    }

    let weights = aspect_weights(catalog, estimate, condition);
    let normalised = NormalisedCatalog::from_catalog(catalog);
    let mut ranked: Vec<(usize, f64)> = normalised
        .rows()
        .map(|row| score_row(row, &weights))
        .enumerate()
        .collect();
    ranked.sort_by(|left, right| right.1.total_cmp(&left.1));

    let exclusions = exclusion_log(catalog, &ranked, visited);
    let excluded: HashSet<&str> = visited.names().collect();
    let entries: Vec<RecommendationEntry> = ranked
        .iter()
        .filter_map(|&(position, score)| {
            let destination = catalog.destinations().get(position)?;
            (!excluded.contains(destination.name())).then(|| RecommendationEntry {
                destination: destination.name().to_owned(),
                region: destination.region().to_owned(),
                score,
                url: destination.url().map(str::to_owned),
            })
        })
        .take(limit)
        .collect();

    debug!(
        "ranked {} destinations under {condition}, returning {}",
        ranked.len(),
        entries.len()
    );
    Ok(RecommendationResult {
        entries,
        exclusions,
    })
}

/// Per-aspect multiplier aligned with the taxonomy.
fn aspect_weights(
    catalog: &Catalog,
    estimate: &PreferenceEstimate,
    condition: Condition,
) -> Vec<f64> {
    let taxonomy = catalog.taxonomy();
    match condition.family() {
        ScoringFamily::UnweightedBaseline => vec![1.0; taxonomy.len()],
        ScoringFamily::WeightedSubset => {
            let mut weights = vec![0.0; taxonomy.len()];
            for aspect in &estimate.active_aspects {
                let slot = taxonomy
                    .position(aspect)
                    .and_then(|position| weights.get_mut(position));
                if let Some(slot) = slot {
                    *slot = estimate.profile.score(aspect).unwrap_or(0.0);
                }
            }
            weights
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "destination scores are weighted sums"
)]
fn score_row(row: &[f64], weights: &[f64]) -> f64 {
    row.iter()
        .zip(rank_weights(row))
        .zip(weights)
        .map(|((score, rank_weight), weight)| weight * score * rank_weight)
        .sum()
}

fn exclusion_log(
    catalog: &Catalog,
    ranked: &[(usize, f64)],
    visited: &VisitedFeedback,
) -> ExclusionLog {
    let entries = visited
        .names()
        .filter_map(|name| {
            let Some(position) = catalog.position(name) else {
                warn!("visited destination {name} is not in the catalog; omitted from exclusions");
                return None;
            };
            let index = ranked
                .iter()
                .position(|&(ranked_position, _)| ranked_position == position)?;
            Some(ExclusionEntry {
                destination: name.to_owned(),
                rank: index + 1,
            })
        })
        .collect();
    ExclusionLog::new(entries)
}
