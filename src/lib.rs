//! Facade crate for the Vantage recommendation engine.
//!
//! This crate re-exports the core domain types alongside the aspect-based
//! engine, and exposes the `SQLite` catalog store behind a feature flag.

#![forbid(unsafe_code)]

pub use vantage_core::{
    Aspect, Catalog, CatalogError, CatalogStore, CatalogStoreError, Condition, ConditionError,
    Destination, DestinationRecord, ExclusionEntry, ExclusionLog, InterestSet, PreferenceEstimate,
    PreferenceProfile, ProfileEntry, RecommendError, RecommendationEntry, RecommendationResult,
    Recommender, ScoringFamily, SessionOutcome, SessionRequest, SessionRequestError, Taxonomy,
    TaxonomyError, VISITED_DESTINATION_COUNT, VisitedDestination, VisitedFeedback,
};

#[cfg(feature = "serde")]
pub use vantage_core::{CatalogDocument, JsonCatalogStore};

#[cfg(feature = "store-sqlite")]
pub use vantage_core::SqliteCatalogStore;

pub use vantage_scorer::{
    AspectRecommender, BalanceError, Comparison, ComparisonError, ConditionBalancer, ConditionPair,
    LeastUsedBalancer, ScoringParams, compare, estimate, recommend,
};
