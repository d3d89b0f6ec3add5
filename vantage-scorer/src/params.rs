//! Tunable constants of the estimator and ranker.
#![forbid(unsafe_code)]

use vantage_core::RecommendError;

/// Engine parameters.
///
/// The defaults reproduce the experiment: a ×1.2 boost, a local top-5 and a
/// top-10 recommendation list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringParams {
    /// Multiplier applied to aspects the visitor reported as good.
    pub boost: f64,
    /// How many of a destination's strongest aspects count as locally salient.
    pub local_top: usize,
    /// Maximum number of recommendations returned.
    pub limit: usize,
}

impl ScoringParams {
    /// Validate the parameters and return a copy.
    ///
    /// # Errors
    /// Returns [`RecommendError::InvalidParameters`] when the boost is not a
    /// finite positive number, or when `local_top` or `limit` is zero.
    pub const fn validate(self) -> Result<Self, RecommendError> {
        if !self.has_usable_boost() {
            return Err(RecommendError::InvalidParameters {
                reason: "boost must be finite and positive",
            });
        }
        if self.local_top == 0 {
            return Err(RecommendError::InvalidParameters {
                reason: "local top must select at least one aspect",
            });
        }
        if self.limit == 0 {
            return Err(RecommendError::InvalidParameters {
                reason: "recommendation limit must be at least one",
            });
        }
        Ok(self)
    }

    const fn has_usable_boost(self) -> bool {
        self.boost.is_finite() && self.boost > 0.0
    }
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            boost: 1.2,
            local_top: 5,
            limit: 10,
        }
    }
}
