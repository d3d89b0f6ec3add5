//! Visitor self-report: visited destinations and declared interests.

use std::collections::BTreeSet;

/// One destination the visitor chose, with the aspects they liked there.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisitedDestination {
    /// Destination name as listed in the catalog.
    pub name: String,
    /// Aspects the visitor reported as good for this destination.
    #[cfg_attr(feature = "serde", serde(default))]
    pub good_aspects: BTreeSet<String>,
}

impl VisitedDestination {
    /// Construct an entry from a name and its good aspects.
    pub fn new<I, S>(name: impl Into<String>, good_aspects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            good_aspects: good_aspects.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the visitor reported `aspect` as good here.
    #[must_use]
    pub fn is_good(&self, aspect: &str) -> bool {
        self.good_aspects.contains(aspect)
    }
}

/// Ordered feedback for every destination the visitor chose.
///
/// # Examples
/// ```
/// use vantage_core::{VisitedDestination, VisitedFeedback};
///
/// let feedback = VisitedFeedback::new(vec![
///     VisitedDestination::new("Nikko", ["shrine"]),
///     VisitedDestination::new("Hakone", Vec::<String>::new()),
/// ]);
/// assert_eq!(feedback.len(), 2);
/// assert!(feedback.contains("Hakone"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct VisitedFeedback {
    entries: Vec<VisitedDestination>,
}

impl VisitedFeedback {
    /// Wrap visited entries, preserving order.
    #[must_use]
    pub const fn new(entries: Vec<VisitedDestination>) -> Self {
        Self { entries }
    }

    /// Visited entries in the order the visitor chose them.
    #[must_use]
    pub fn entries(&self) -> &[VisitedDestination] {
        &self.entries
    }

    /// Number of visited destinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether no destinations were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the named destination was visited.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Visited destination names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.name.as_str())
    }
}

impl FromIterator<VisitedDestination> for VisitedFeedback {
    fn from_iter<T: IntoIterator<Item = VisitedDestination>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Aspects the visitor marked as interesting before seeing any destination.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct InterestSet {
    aspects: BTreeSet<String>,
}

impl InterestSet {
    /// Construct an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            aspects: BTreeSet::new(),
        }
    }

    /// Whether `aspect` was declared interesting.
    #[must_use]
    pub fn contains(&self, aspect: &str) -> bool {
        self.aspects.contains(aspect)
    }

    /// Declared aspects in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.aspects.iter().map(String::as_str)
    }

    /// Number of declared aspects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aspects.len()
    }

    /// Report whether nothing was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aspects.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for InterestSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            aspects: iter.into_iter().map(Into::into).collect(),
        }
    }
}
