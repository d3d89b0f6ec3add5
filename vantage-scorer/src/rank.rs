//! Reciprocal-rank weighting of a score row.
//!
//! Ranking a destination's own aspects and weighting each by `1 / rank`
//! suppresses aspects that are not salient for that destination, even when
//! their normalised score is non-trivial.
#![forbid(unsafe_code)]

/// Assign ranks `1..=K` by descending score.
///
/// Ties keep taxonomy order: the earlier aspect gets the better rank, so
/// identical rows always rank identically.
///
/// # Examples
/// ```
/// use vantage_scorer::rank_positions;
///
/// assert_eq!(rank_positions(&[0.2, 0.9, 0.2]), vec![2, 1, 3]);
/// ```
#[must_use]
pub fn rank_positions(row: &[f64]) -> Vec<usize> {
    let score = |position: usize| row.get(position).copied().unwrap_or(f64::NEG_INFINITY);
    let mut order: Vec<usize> = (0..row.len()).collect();
    order.sort_by(|&left, &right| score(right).total_cmp(&score(left)));

    let mut ranks = vec![0; row.len()];
    for (rank, position) in (1..).zip(order) {
        if let Some(slot) = ranks.get_mut(position) {
            *slot = rank;
        }
    }
    ranks
}

/// Reciprocal of a one-based rank. Rank zero carries no weight.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "ranks are bounded by the taxonomy size"
)]
pub const fn reciprocal_rank(rank: usize) -> f64 {
    if rank == 0 {
        return 0.0;
    }
    1.0 / rank as f64
}

/// Reciprocal-rank weight for every entry of `row`.
///
/// # Examples
/// ```
/// use vantage_scorer::rank_weights;
///
/// assert_eq!(rank_weights(&[0.0, 0.5, 1.0]), vec![1.0 / 3.0, 0.5, 1.0]);
/// ```
#[must_use]
pub fn rank_weights(row: &[f64]) -> Vec<f64> {
    rank_positions(row)
        .into_iter()
        .map(reciprocal_rank)
        .collect()
}
