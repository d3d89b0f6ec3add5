//! Aspects and the ordered taxonomy they belong to.
//!
//! An aspect is one thematic facet of a destination ("shrine/temple",
//! "hot spring"). The taxonomy fixes the set of aspects for a deployment and,
//! crucially, their order: every score row in the catalog is aligned with it
//! and rank ties are broken by it.

use std::borrow::Cow;
use std::collections::HashMap;

use thiserror::Error;

/// A named thematic facet of a destination.
///
/// # Examples
/// ```
/// use vantage_core::Aspect;
///
/// let aspect = Aspect::new("hot spring", None).expect("valid aspect");
/// assert_eq!(aspect.name(), "hot spring");
/// assert_eq!(aspect.describe(), "no description available for hot spring");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aspect {
    name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    description: Option<String>,
}

impl Aspect {
    /// Validate and construct an [`Aspect`].
    ///
    /// # Errors
    /// Returns [`TaxonomyError::EmptyName`] when the name is blank.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, TaxonomyError> {
        let aspect = Self {
            name: name.into(),
            description,
        };
        if aspect.name.trim().is_empty() {
            return Err(TaxonomyError::EmptyName);
        }
        Ok(aspect)
    }

    /// Unique aspect identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description text, if the catalog supplied one.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Description text, falling back to a placeholder when none was supplied.
    #[must_use]
    pub fn describe(&self) -> Cow<'_, str> {
        self.description.as_deref().map_or_else(
            || Cow::Owned(format!("no description available for {}", self.name)),
            Cow::Borrowed,
        )
    }
}

/// Errors returned while building a [`Taxonomy`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxonomyError {
    /// No aspects were supplied.
    #[error("taxonomy must contain at least one aspect")]
    Empty,
    /// An aspect name was blank.
    #[error("aspect name must not be empty")]
    EmptyName,
    /// Two aspects shared a name.
    #[error("aspect {name:?} appears more than once in the taxonomy")]
    DuplicateAspect {
        /// The repeated aspect name.
        name: String,
    },
}

/// The fixed, ordered set of aspects for a deployment.
///
/// # Examples
/// ```
/// use vantage_core::{Aspect, Taxonomy};
///
/// let taxonomy = Taxonomy::from_names(["nature", "food"]).expect("valid taxonomy");
/// assert_eq!(taxonomy.len(), 2);
/// assert_eq!(taxonomy.position("food"), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Aspect>", into = "Vec<Aspect>")
)]
pub struct Taxonomy {
    aspects: Vec<Aspect>,
    positions: HashMap<String, usize>,
}

impl Taxonomy {
    /// Validate and construct a taxonomy, preserving the supplied order.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::Empty`] for an empty list and
    /// [`TaxonomyError::DuplicateAspect`] when a name repeats.
    pub fn new(aspects: Vec<Aspect>) -> Result<Self, TaxonomyError> {
        if aspects.is_empty() {
            return Err(TaxonomyError::Empty);
        }
        let mut positions = HashMap::with_capacity(aspects.len());
        for (position, aspect) in aspects.iter().enumerate() {
            if positions.insert(aspect.name.clone(), position).is_some() {
                return Err(TaxonomyError::DuplicateAspect {
                    name: aspect.name.clone(),
                });
            }
        }
        Ok(Self { aspects, positions })
    }

    /// Build a taxonomy of undescribed aspects from bare names.
    ///
    /// # Errors
    /// Propagates the validation failures of [`Aspect::new`] and
    /// [`Taxonomy::new`].
    pub fn from_names<I, S>(names: I) -> Result<Self, TaxonomyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let aspects = names
            .into_iter()
            .map(|name| Aspect::new(name, None))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(aspects)
    }

    /// Number of aspects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aspects.len()
    }

    /// Always `false` for a validated taxonomy; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aspects.is_empty()
    }

    /// Aspects in taxonomy order.
    #[must_use]
    pub fn aspects(&self) -> &[Aspect] {
        &self.aspects
    }

    /// Aspect names in taxonomy order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.aspects.iter().map(Aspect::name)
    }

    /// Aspect at `position`, if in range.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Aspect> {
        self.aspects.get(position)
    }

    /// Position of the named aspect in taxonomy order.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Report whether the named aspect belongs to the taxonomy.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }
}

impl TryFrom<Vec<Aspect>> for Taxonomy {
    type Error = TaxonomyError;

    fn try_from(aspects: Vec<Aspect>) -> Result<Self, Self::Error> {
        Self::new(aspects)
    }
}

impl From<Taxonomy> for Vec<Aspect> {
    fn from(taxonomy: Taxonomy) -> Self {
        taxonomy.aspects
    }
}
