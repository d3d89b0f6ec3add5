//! Run one session under two conditions for side-by-side evaluation.
#![forbid(unsafe_code)]

use std::collections::HashSet;

use thiserror::Error;
use vantage_core::{
    Catalog, Condition, InterestSet, RecommendError, Recommender, SessionOutcome,
    SessionRequest, VisitedFeedback,
};

/// Errors raised while comparing two conditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComparisonError {
    /// Both sides of the pair name the same condition.
    #[error("cannot compare {condition} with itself")]
    IdenticalConditions {
        /// The repeated condition.
        condition: Condition,
    },
    /// One of the sessions failed.
    #[error("recommendation under {condition} failed")]
    Recommend {
        /// Condition whose session failed.
        condition: Condition,
        /// Underlying engine error.
        #[source]
        source: RecommendError,
    },
}

/// Two distinct conditions to evaluate against the same visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionPair {
    first: Condition,
    second: Condition,
}

impl ConditionPair {
    /// Pair two conditions.
    ///
    /// # Errors
    /// Returns [`ComparisonError::IdenticalConditions`] when both are equal.
    pub fn new(first: Condition, second: Condition) -> Result<Self, ComparisonError> {
        if first == second {
            return Err(ComparisonError::IdenticalConditions { condition: first });
        }
        Ok(Self { first, second })
    }

    /// Condition evaluated first.
    #[must_use]
    pub const fn first(&self) -> Condition {
        self.first
    }

    /// Condition evaluated second.
    #[must_use]
    pub const fn second(&self) -> Condition {
        self.second
    }
}

/// Outcomes of both sessions plus their overlap.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Comparison {
    /// Outcome under the pair's first condition.
    pub first: SessionOutcome,
    /// Outcome under the pair's second condition.
    pub second: SessionOutcome,
    /// Destinations recommended under both conditions, in first-list order.
    pub shared: Vec<String>,
}

/// Evaluate `pair` against one visitor over the same catalog.
///
/// # Errors
/// Returns [`ComparisonError::Recommend`] when either session fails.
pub fn compare(
    recommender: &dyn Recommender,
    catalog: &Catalog,
    visited: &VisitedFeedback,
    interest: &InterestSet,
    pair: ConditionPair,
) -> Result<Comparison, ComparisonError> {
    let run = |condition: Condition| {
        let request = SessionRequest {
            visited: visited.clone(),
            interest: interest.clone(),
            condition,
        };
        recommender
            .recommend(catalog, &request)
            .map_err(|source| ComparisonError::Recommend { condition, source })
    };
    let first = run(pair.first)?;
    let second = run(pair.second)?;

    let later: HashSet<&str> = second.recommendations.destinations().collect();
    let shared = first
        .recommendations
        .destinations()
        .filter(|name| later.contains(name))
        .map(str::to_owned)
        .collect();
    Ok(Comparison {
        first,
        second,
        shared,
    })
}
