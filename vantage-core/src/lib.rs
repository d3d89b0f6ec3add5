//! Core domain types for the Vantage recommendation engine.
//!
//! The crate models the aspect taxonomy, the destination catalog, a
//! visitor's self-report and the engine's outputs. Constructors validate
//! their input and return `Result`, so the scoring code downstream can rely
//! on dense, finite, non-negative score rows.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod aspect;
pub mod catalog;
pub mod condition;
pub mod feedback;
pub mod profile;
pub mod recommendation;
pub mod recommender;
pub mod session;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use aspect::{Aspect, Taxonomy, TaxonomyError};
pub use catalog::{Catalog, CatalogError, Destination, DestinationRecord};
pub use condition::{Condition, ConditionError, ScoringFamily};
pub use feedback::{InterestSet, VisitedDestination, VisitedFeedback};
pub use profile::{PreferenceEstimate, PreferenceProfile, ProfileEntry};
pub use recommendation::{ExclusionEntry, ExclusionLog, RecommendationEntry, RecommendationResult};
pub use recommender::{RecommendError, Recommender};
pub use session::{SessionOutcome, SessionRequest, SessionRequestError, VISITED_DESTINATION_COUNT};
pub use store::{CatalogStore, CatalogStoreError};
#[cfg(feature = "serde")]
pub use store::{CatalogDocument, JsonCatalogStore};
#[cfg(feature = "store-sqlite")]
pub use store::SqliteCatalogStore;
