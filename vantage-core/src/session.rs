//! Session requests and their caller-side validation.
//!
//! The scoring engine tolerates imperfect input (an unknown destination
//! simply contributes nothing). Callers that collect input from visitors use
//! [`SessionRequest::validate_against`] to reject malformed sessions before
//! they reach the engine.

use std::collections::HashSet;

use thiserror::Error;

use crate::{Catalog, Condition, InterestSet, PreferenceEstimate, RecommendationResult, VisitedFeedback};

/// Number of destinations a visitor must choose.
pub const VISITED_DESTINATION_COUNT: usize = 5;

/// Everything the engine needs for one visitor session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionRequest {
    /// Visited destinations with their good-aspect feedback.
    pub visited: VisitedFeedback,
    /// Aspects declared interesting before any destination was shown.
    #[cfg_attr(feature = "serde", serde(default))]
    pub interest: InterestSet,
    /// Scoring condition assigned to the session.
    pub condition: Condition,
}

/// Reasons a [`SessionRequest`] is rejected before scoring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionRequestError {
    /// The visitor chose the wrong number of destinations.
    #[error("exactly {expected} visited destinations are required, found {found}")]
    WrongVisitedCount {
        /// Required count.
        expected: usize,
        /// Supplied count.
        found: usize,
    },
    /// A destination was chosen twice.
    #[error("visited destination {name:?} is listed more than once")]
    DuplicateVisited {
        /// Repeated destination.
        name: String,
    },
    /// A destination is not in the catalog.
    #[error("visited destination {name:?} is not in the catalog")]
    UnknownDestination {
        /// Unknown destination.
        name: String,
    },
    /// An aspect-aware condition received a destination without feedback.
    #[error("condition {condition} requires at least one good aspect for {name:?}")]
    MissingFeedback {
        /// Destination lacking feedback.
        name: String,
        /// Condition that requires feedback.
        condition: Condition,
    },
    /// Feedback or interest named an aspect outside the taxonomy.
    #[error("aspect {aspect:?} is not part of the taxonomy")]
    UnknownAspect {
        /// Unknown aspect.
        aspect: String,
    },
}

impl SessionRequest {
    /// Check the request against `catalog`.
    ///
    /// Rules are applied in a fixed order and the first failure is returned:
    /// visited count, duplicates, catalog membership, required feedback, then
    /// aspect names.
    ///
    /// # Errors
    /// Returns the first [`SessionRequestError`] encountered.
    pub fn validate_against(&self, catalog: &Catalog) -> Result<(), SessionRequestError> {
        let found = self.visited.len();
        if found != VISITED_DESTINATION_COUNT {
            return Err(SessionRequestError::WrongVisitedCount {
                expected: VISITED_DESTINATION_COUNT,
                found,
            });
        }
        self.ensure_distinct()?;
        if let Some(name) = self
            .visited
            .names()
            .find(|name| catalog.destination(name).is_none())
        {
            return Err(SessionRequestError::UnknownDestination {
                name: name.to_owned(),
            });
        }
        if self.condition.is_aspect_aware()
            && let Some(entry) = self
                .visited
                .entries()
                .iter()
                .find(|entry| entry.good_aspects.is_empty())
        {
            return Err(SessionRequestError::MissingFeedback {
                name: entry.name.clone(),
                condition: self.condition,
            });
        }
        self.ensure_known_aspects(catalog)
    }

    fn ensure_distinct(&self) -> Result<(), SessionRequestError> {
        let mut seen = HashSet::with_capacity(self.visited.len());
        for name in self.visited.names() {
            if !seen.insert(name) {
                return Err(SessionRequestError::DuplicateVisited {
                    name: name.to_owned(),
                });
            }
        }
        Ok(())
    }

    fn ensure_known_aspects(&self, catalog: &Catalog) -> Result<(), SessionRequestError> {
        let taxonomy = catalog.taxonomy();
        let feedback = self
            .visited
            .entries()
            .iter()
            .flat_map(|entry| entry.good_aspects.iter().map(String::as_str));
        match feedback
            .chain(self.interest.iter())
            .find(|aspect| !taxonomy.contains(aspect))
        {
            Some(aspect) => Err(SessionRequestError::UnknownAspect {
                aspect: aspect.to_owned(),
            }),
            None => Ok(()),
        }
    }
}

/// Engine output for one session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionOutcome {
    /// Estimated preference and the aspects the ranker used.
    pub estimate: PreferenceEstimate,
    /// Ranked recommendations and exclusion log.
    pub recommendations: RecommendationResult,
}
