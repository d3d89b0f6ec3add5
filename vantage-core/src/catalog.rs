//! Destination catalog: a dense destination × aspect score table.
//!
//! Rows are destinations in catalog order and columns are aspects in
//! taxonomy order. [`Catalog::new`] is the single gate that turns raw
//! [`DestinationRecord`] values into validated, immutable [`Destination`]s.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::Taxonomy;

/// Raw destination input as supplied by a catalog store.
///
/// Scores are keyed by aspect name; [`Catalog::new`] checks that the map is
/// dense against the taxonomy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DestinationRecord {
    /// Unique destination name.
    pub name: String,
    /// Region the destination is grouped under.
    pub region: String,
    /// Affinity score per aspect name.
    pub scores: BTreeMap<String, f64>,
    /// Optional reference URL.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub url: Option<String>,
}

/// A validated catalog entry whose scores follow taxonomy order.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    name: String,
    region: String,
    scores: Vec<f64>,
    url: Option<String>,
}

impl Destination {
    /// Unique destination name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Region grouping.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Affinity scores aligned with the catalog taxonomy.
    #[must_use]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Optional reference URL.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// Errors returned by [`Catalog::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// No destinations were supplied.
    #[error("catalog must contain at least one destination")]
    Empty,
    /// A destination name was blank.
    #[error("destination name must not be empty")]
    EmptyName,
    /// Two destinations shared a name.
    #[error("destination {name:?} appears more than once in the catalog")]
    DuplicateDestination {
        /// The repeated destination name.
        name: String,
    },
    /// A destination lacked a score for a taxonomy aspect.
    #[error("destination {destination:?} has no score for aspect {aspect:?}")]
    MissingScore {
        /// Destination with the gap.
        destination: String,
        /// Aspect without a score.
        aspect: String,
    },
    /// A destination scored an aspect outside the taxonomy.
    #[error("destination {destination:?} scores unknown aspect {aspect:?}")]
    UnknownAspect {
        /// Destination carrying the stray score.
        destination: String,
        /// Aspect name not found in the taxonomy.
        aspect: String,
    },
    /// A score was negative, infinite or NaN.
    #[error("destination {destination:?} has invalid score {score} for aspect {aspect:?}")]
    InvalidScore {
        /// Destination carrying the score.
        destination: String,
        /// Aspect being scored.
        aspect: String,
        /// Offending value.
        score: f64,
    },
}

/// Read-only destination catalog shared by every scoring run in a session.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use vantage_core::{Catalog, DestinationRecord, Taxonomy};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let taxonomy = Taxonomy::from_names(["nature", "food"])?;
/// let record = DestinationRecord {
///     name: "Kamikochi".into(),
///     region: "Chubu".into(),
///     scores: BTreeMap::from([("nature".into(), 0.9), ("food".into(), 0.2)]),
///     url: None,
/// };
/// let catalog = Catalog::new(taxonomy, vec![record])?;
/// assert_eq!(catalog.len(), 1);
/// assert_eq!(catalog.column(0), vec![0.9]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    taxonomy: Taxonomy,
    destinations: Vec<Destination>,
    positions: HashMap<String, usize>,
}

impl Catalog {
    /// Validate records against `taxonomy` and build the catalog.
    ///
    /// Record order becomes catalog order, which is the tie-break used when
    /// destinations score equally.
    ///
    /// # Errors
    /// Returns a [`CatalogError`] describing the first invalid record.
    pub fn new(taxonomy: Taxonomy, records: Vec<DestinationRecord>) -> Result<Self, CatalogError> {
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut positions = HashMap::with_capacity(records.len());
        let mut destinations = Vec::with_capacity(records.len());
        for (position, record) in records.into_iter().enumerate() {
            let destination = densify(&taxonomy, record)?;
            if positions
                .insert(destination.name.clone(), position)
                .is_some()
            {
                return Err(CatalogError::DuplicateDestination {
                    name: destination.name,
                });
            }
            destinations.push(destination);
        }
        Ok(Self {
            taxonomy,
            destinations,
            positions,
        })
    }

    /// The taxonomy every score row is aligned with.
    #[must_use]
    pub const fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Destinations in catalog order.
    #[must_use]
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Number of destinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    /// Always `false` for a validated catalog; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Look up a destination by name.
    #[must_use]
    pub fn destination(&self, name: &str) -> Option<&Destination> {
        self.position(name)
            .and_then(|position| self.destinations.get(position))
    }

    /// Catalog position of the named destination.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// One aspect's scores across the whole catalog, in catalog order.
    ///
    /// Returns an empty column when `aspect` is out of range.
    #[must_use]
    pub fn column(&self, aspect: usize) -> Vec<f64> {
        if aspect >= self.taxonomy.len() {
            return Vec::new();
        }
        self.destinations
            .iter()
            .filter_map(|destination| destination.scores.get(aspect).copied())
            .collect()
    }

    /// Destinations grouped by region.
    ///
    /// Regions appear in first-seen order and destinations keep catalog order
    /// within each region.
    #[must_use]
    pub fn regions(&self) -> Vec<(&str, Vec<&Destination>)> {
        let mut groups: Vec<(&str, Vec<&Destination>)> = Vec::new();
        for destination in &self.destinations {
            let region = destination.region.as_str();
            if let Some((_, members)) = groups.iter_mut().find(|(name, _)| *name == region) {
                members.push(destination);
            } else {
                groups.push((region, vec![destination]));
            }
        }
        groups
    }

    /// A destination's raw aspect scores, highest first.
    ///
    /// Equal scores keep taxonomy order. Returns `None` for unknown
    /// destinations.
    #[must_use]
    pub fn breakdown(&self, name: &str) -> Option<Vec<(&str, f64)>> {
        let destination = self.destination(name)?;
        let mut pairs: Vec<(&str, f64)> = self
            .taxonomy
            .names()
            .zip(destination.scores.iter().copied())
            .collect();
        pairs.sort_by(|left, right| right.1.total_cmp(&left.1));
        Some(pairs)
    }
}

fn densify(taxonomy: &Taxonomy, record: DestinationRecord) -> Result<Destination, CatalogError> {
    let DestinationRecord {
        name,
        region,
        scores,
        url,
    } = record;
    if name.trim().is_empty() {
        return Err(CatalogError::EmptyName);
    }
    if let Some(stray) = scores.keys().find(|aspect| !taxonomy.contains(aspect)) {
        return Err(CatalogError::UnknownAspect {
            destination: name,
            aspect: stray.clone(),
        });
    }
    let mut dense = Vec::with_capacity(taxonomy.len());
    for aspect in taxonomy.names() {
        let Some(&score) = scores.get(aspect) else {
            return Err(CatalogError::MissingScore {
                destination: name,
                aspect: aspect.to_owned(),
            });
        };
        if !score.is_finite() || score < 0.0 {
            return Err(CatalogError::InvalidScore {
                destination: name,
                aspect: aspect.to_owned(),
                score,
            });
        }
        dense.push(score);
    }
    Ok(Destination {
        name,
        region,
        scores: dense,
        url,
    })
}
