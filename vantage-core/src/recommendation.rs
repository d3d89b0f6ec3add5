//! Ranked recommendation output and exclusion bookkeeping.

/// A recommended destination and its score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecommendationEntry {
    /// Destination name.
    pub destination: String,
    /// Region the destination belongs to.
    pub region: String,
    /// Ranking score; higher is better.
    pub score: f64,
    /// Optional reference URL carried over from the catalog.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub url: Option<String>,
}

/// Rank a visited destination would have held had it not been excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExclusionEntry {
    /// Visited destination name.
    pub destination: String,
    /// One-based position in the full ranking.
    pub rank: usize,
}

/// Diagnostic record of where each visited destination would have ranked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ExclusionLog {
    entries: Vec<ExclusionEntry>,
}

impl ExclusionLog {
    /// Wrap entries in visited order.
    #[must_use]
    pub const fn new(entries: Vec<ExclusionEntry>) -> Self {
        Self { entries }
    }

    /// Entries in visited order.
    #[must_use]
    pub fn entries(&self) -> &[ExclusionEntry] {
        &self.entries
    }

    /// Would-be rank of the named destination.
    #[must_use]
    pub fn rank_of(&self, destination: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.destination == destination)
            .map(|entry| entry.rank)
    }

    /// Number of excluded destinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether nothing was excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Top-N unvisited destinations plus the exclusion log.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecommendationResult {
    /// Recommended destinations, highest score first.
    pub entries: Vec<RecommendationEntry>,
    /// Would-be ranks of the excluded visited destinations.
    pub exclusions: ExclusionLog,
}

impl RecommendationResult {
    /// Recommended destination names, highest score first.
    pub fn destinations(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.destination.as_str())
    }
}
