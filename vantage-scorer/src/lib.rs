//! Aspect-based preference estimation and destination ranking.
//!
//! The engine works in two passes over a shared, read-only
//! [`Catalog`](vantage_core::Catalog):
//!
//! - [`estimate`] turns a visitor's five visited destinations (and, under
//!   aspect-aware conditions, the aspects they reported as good) into a
//!   [`PreferenceProfile`](vantage_core::PreferenceProfile) plus the set of
//!   active aspects for the session's condition.
//! - [`recommend`] ranks every destination against that estimate, records
//!   where the visited destinations would have ranked, and returns the top
//!   unvisited destinations.
//!
//! Both passes min-max normalise each aspect column ([`normalise_column`])
//! and weight a destination's aspects by the reciprocal of their rank within
//! that destination ([`rank_weights`]). [`AspectRecommender`] wires the two
//! passes behind the [`Recommender`](vantage_core::Recommender) trait.
//!
//! Two experiment helpers sit alongside the engine: [`compare`] evaluates one
//! visitor under a pair of conditions, and [`LeastUsedBalancer`] assigns
//! conditions so that each receives a similar number of visitors.
//!
//! # Examples
//!
//! ```
//! use vantage_core::{Condition, Recommender, SessionRequest, VisitedDestination};
//! use vantage_core::test_support::sample_catalog;
//! use vantage_scorer::AspectRecommender;
//!
//! let catalog = sample_catalog();
//! let request = SessionRequest {
//!     visited: [
//!         VisitedDestination::new("Hakone", ["hot spring"]),
//!         VisitedDestination::new("Kusatsu", ["hot spring"]),
//!         VisitedDestination::new("Nikko", ["shrine"]),
//!         VisitedDestination::new("Kamikochi", ["nature"]),
//!         VisitedDestination::new("Kamakura", ["shrine"]),
//!     ]
//!     .into_iter()
//!     .collect(),
//!     interest: Default::default(),
//!     condition: Condition::AspectTop { top_k: 5 },
//! };
//! let outcome = AspectRecommender::default()
//!     .recommend(&catalog, &request)
//!     .expect("recommend");
//! assert!(outcome.recommendations.destinations().all(|name| name != "Hakone"));
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod balance;
mod compare;
mod engine;
mod estimator;
mod normalise;
mod params;
mod rank;
mod ranker;

pub use balance::{BalanceError, ConditionBalancer, LeastUsedBalancer};
pub use compare::{Comparison, ComparisonError, ConditionPair, compare};
pub use engine::AspectRecommender;
pub use estimator::{estimate, resolve_active_aspects};
pub use normalise::{DEGENERATE_FILL, NormalisedCatalog, normalise_column};
pub use params::ScoringParams;
pub use rank::{rank_positions, rank_weights, reciprocal_rank};
pub use ranker::recommend;

#[cfg(test)]
mod tests;
