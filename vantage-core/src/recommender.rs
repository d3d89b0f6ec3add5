//! Run a visitor session through a recommendation engine.
//!
//! The `Recommender` trait is the seam between callers (CLI, experiment
//! harness) and a concrete engine.

use thiserror::Error;

use crate::{Catalog, Condition, SessionOutcome, SessionRequest};

/// Errors returned by [`Recommender::recommend`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// The ranker was handed an estimate made under another condition.
    #[error("estimate was produced under {estimated} but ranking was requested under {requested}")]
    ConditionMismatch {
        /// Condition recorded on the estimate.
        estimated: Condition,
        /// Condition requested for ranking.
        requested: Condition,
    },
    /// Engine parameters were unusable.
    #[error("invalid scoring parameters: {reason}")]
    InvalidParameters {
        /// Human-readable description of the problem.
        reason: &'static str,
    },
}

/// Estimate a visitor's preference and rank the catalog against it.
///
/// Implementations must be pure with respect to the catalog: it is shared
/// read-only between concurrent sessions. They are `Send + Sync` so a single
/// engine can serve many sessions.
///
/// # Examples
///
/// ```rust
/// use vantage_core::{
///     Catalog, PreferenceEstimate, PreferenceProfile, RecommendError, RecommendationResult,
///     Recommender, SessionOutcome, SessionRequest,
/// };
///
/// struct EmptyRecommender;
///
/// impl Recommender for EmptyRecommender {
///     fn recommend(
///         &self,
///         _catalog: &Catalog,
///         request: &SessionRequest,
///     ) -> Result<SessionOutcome, RecommendError> {
///         Ok(SessionOutcome {
///             estimate: PreferenceEstimate {
///                 condition: request.condition,
///                 profile: PreferenceProfile::default(),
///                 active_aspects: Vec::new(),
///             },
///             recommendations: RecommendationResult::default(),
///         })
///     }
/// }
/// ```
pub trait Recommender: Send + Sync {
    /// Produce the preference estimate and ranked recommendations for `request`.
    ///
    /// # Errors
    /// Returns [`RecommendError`] when the engine cannot honour the request.
    fn recommend(
        &self,
        catalog: &Catalog,
        request: &SessionRequest,
    ) -> Result<SessionOutcome, RecommendError>;
}
