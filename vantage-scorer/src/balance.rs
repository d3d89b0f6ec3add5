//! Balanced assignment of visitors to experimental conditions.
//!
//! Each new visitor is assigned the candidate condition with the fewest
//! prior assignments. Ties are broken uniformly at random so that no
//! condition is systematically favoured by its position in the list.
#![forbid(unsafe_code)]

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;
use vantage_core::Condition;

/// Errors raised while assigning a condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// The balancer has no conditions to choose from.
    #[error("no candidate conditions to assign")]
    NoCandidates,
}

/// Choose the next visitor's condition from the assignment history.
pub trait ConditionBalancer {
    /// Pick a condition given every prior assignment.
    ///
    /// # Errors
    /// Returns [`BalanceError::NoCandidates`] when nothing can be assigned.
    fn assign(&mut self, history: &[Condition]) -> Result<Condition, BalanceError>;
}

/// Assign the least-used candidate, breaking ties with `R`.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use vantage_core::Condition;
/// use vantage_scorer::{ConditionBalancer, LeastUsedBalancer};
///
/// let mut balancer = LeastUsedBalancer::new(
///     [Condition::NoAspectAll, Condition::AspectAll],
///     ChaCha8Rng::seed_from_u64(7),
/// );
/// let next = balancer.assign(&[Condition::NoAspectAll]).expect("assign");
/// assert_eq!(next, Condition::AspectAll);
/// ```
#[derive(Debug, Clone)]
pub struct LeastUsedBalancer<R> {
    candidates: Vec<Condition>,
    rng: R,
}

impl<R: Rng> LeastUsedBalancer<R> {
    /// Balance over `candidates`, dropping repeats while keeping first-seen
    /// order.
    #[must_use]
    pub fn new(candidates: impl IntoIterator<Item = Condition>, rng: R) -> Self {
        let mut unique = Vec::new();
        for condition in candidates {
            if !unique.contains(&condition) {
                unique.push(condition);
            }
        }
        Self {
            candidates: unique,
            rng,
        }
    }

    /// Balance over the four canonical conditions.
    #[must_use]
    pub fn canonical(rng: R) -> Self {
        Self::new(Condition::CANONICAL, rng)
    }

    /// Candidate conditions in balancing order.
    #[must_use]
    pub const fn candidates(&self) -> &[Condition] {
        self.candidates.as_slice()
    }

    /// Prior assignment count per candidate. History entries outside the
    /// candidate list are ignored.
    #[must_use]
    pub fn counts(&self, history: &[Condition]) -> Vec<(Condition, usize)> {
        self.candidates
            .iter()
            .map(|&candidate| {
                let uses = history.iter().filter(|&&past| past == candidate).count();
                (candidate, uses)
            })
            .collect()
    }
}

impl<R: Rng> ConditionBalancer for LeastUsedBalancer<R> {
    fn assign(&mut self, history: &[Condition]) -> Result<Condition, BalanceError> {
        let counts = self.counts(history);
        let fewest = counts
            .iter()
            .map(|&(_, uses)| uses)
            .min()
            .ok_or(BalanceError::NoCandidates)?;
        let least_used: Vec<Condition> = counts
            .iter()
            .filter(|&&(_, uses)| uses == fewest)
            .map(|&(condition, _)| condition)
            .collect();
        let chosen = least_used
            .choose(&mut self.rng)
            .copied()
            .ok_or(BalanceError::NoCandidates)?;
        debug!(
            "assigned {chosen} from {} least-used candidates at {fewest} prior uses",
            least_used.len()
        );
        Ok(chosen)
    }
}
