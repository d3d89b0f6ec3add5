//! Estimated visitor preference over the aspect taxonomy.

use crate::{Condition, InterestSet, Taxonomy};

/// One aspect's estimated weight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileEntry {
    /// Aspect name.
    pub aspect: String,
    /// Accumulated, non-negative preference score.
    pub score: f64,
    /// Whether the visitor declared this aspect interesting up front.
    pub interested: bool,
}

/// Per-aspect preference, one entry per taxonomy aspect, highest first.
///
/// Scores are left unnormalised; they need not sum to one.
///
/// # Examples
/// ```
/// use vantage_core::{InterestSet, PreferenceProfile, Taxonomy};
///
/// let taxonomy = Taxonomy::from_names(["a", "b", "c"]).expect("taxonomy");
/// let interest: InterestSet = ["c"].into_iter().collect();
/// let profile = PreferenceProfile::from_totals(&taxonomy, &[0.2, 0.9, 0.2], &interest);
///
/// let order: Vec<_> = profile.entries().iter().map(|e| e.aspect.as_str()).collect();
/// assert_eq!(order, vec!["b", "a", "c"]);
/// assert_eq!(profile.score("c"), Some(0.2));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PreferenceProfile {
    entries: Vec<ProfileEntry>,
}

impl PreferenceProfile {
    /// Build a profile from per-aspect totals aligned with `taxonomy`.
    ///
    /// Entries are sorted by descending score; equal scores keep taxonomy
    /// order. Missing totals (a short slice) count as zero.
    #[must_use]
    pub fn from_totals(taxonomy: &Taxonomy, totals: &[f64], interest: &InterestSet) -> Self {
        let mut entries: Vec<ProfileEntry> = taxonomy
            .names()
            .enumerate()
            .map(|(position, aspect)| ProfileEntry {
                aspect: aspect.to_owned(),
                score: totals.get(position).copied().unwrap_or(0.0),
                interested: interest.contains(aspect),
            })
            .collect();
        entries.sort_by(|left, right| right.score.total_cmp(&left.score));
        Self { entries }
    }

    /// Entries sorted by descending score.
    #[must_use]
    pub fn entries(&self) -> &[ProfileEntry] {
        &self.entries
    }

    /// Score for the named aspect.
    #[must_use]
    pub fn score(&self, aspect: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.aspect == aspect)
            .map(|entry| entry.score)
    }

    /// Number of entries; equals the taxonomy size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether the profile has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Output of the preference estimator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreferenceEstimate {
    /// Condition the estimate was produced under.
    pub condition: Condition,
    /// Per-aspect preference, highest first.
    pub profile: PreferenceProfile,
    /// Aspects the ranker weighs. Empty under the unweighted baseline.
    pub active_aspects: Vec<String>,
}
