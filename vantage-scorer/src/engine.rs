//! The default `Recommender`: estimate, then rank.
#![forbid(unsafe_code)]

use vantage_core::{Catalog, RecommendError, Recommender, SessionOutcome, SessionRequest};

use crate::estimator::estimate;
use crate::params::ScoringParams;
use crate::ranker::recommend;

/// Aspect-based recommender over a shared read-only catalog.
///
/// The recommender holds only its parameters, so one instance can serve any
/// number of concurrent sessions.
///
/// # Examples
/// ```
/// use vantage_core::{Condition, Recommender, SessionRequest, VisitedDestination};
/// use vantage_core::test_support::sample_catalog;
/// use vantage_scorer::AspectRecommender;
///
/// let catalog = sample_catalog();
/// let request = SessionRequest {
///     visited: ["Nikko", "Hakone", "Kamakura", "Kusatsu", "Kamikochi"]
///         .into_iter()
///         .map(|name| VisitedDestination::new(name, Vec::<String>::new()))
///         .collect(),
///     interest: Default::default(),
///     condition: Condition::NoAspectAll,
/// };
/// let outcome = AspectRecommender::default()
///     .recommend(&catalog, &request)
///     .expect("recommend");
/// assert_eq!(outcome.recommendations.entries.len(), 10);
/// assert_eq!(outcome.recommendations.exclusions.len(), 5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AspectRecommender {
    params: ScoringParams,
}

impl AspectRecommender {
    /// Build a recommender with custom parameters.
    ///
    /// # Errors
    /// Returns [`RecommendError::InvalidParameters`] when `params` fail
    /// validation.
    pub fn with_params(params: ScoringParams) -> Result<Self, RecommendError> {
        Ok(Self {
            params: params.validate()?,
        })
    }

    /// Parameters used for every session.
    #[must_use]
    pub const fn params(&self) -> &ScoringParams {
        &self.params
    }
}

impl Recommender for AspectRecommender {
    fn recommend(
        &self,
        catalog: &Catalog,
        request: &SessionRequest,
    ) -> Result<SessionOutcome, RecommendError> {
        let preference = estimate(
            catalog,
            &request.visited,
            &request.interest,
            request.condition,
            &self.params,
        );
        let recommendations = recommend(
            catalog,
            &preference,
            request.condition,
            &request.visited,
            &self.params,
        )?;
        Ok(SessionOutcome {
            estimate: preference,
            recommendations,
        })
    }
}
