//! Scoring conditions selecting which estimation and ranking variant runs.
//!
//! Conditions arrive as labels such as `aspect_top5`. Parsing happens once,
//! at the boundary, so the scoring code dispatches on a closed enum and an
//! unknown label can never fall through to a default.
//!
//! # Examples
//! ```
//! use vantage_core::{Condition, ScoringFamily};
//!
//! let condition: Condition = "aspect_top5".parse().expect("known label");
//! assert_eq!(condition, Condition::AspectTop { top_k: 5 });
//! assert_eq!(condition.family(), ScoringFamily::WeightedSubset);
//! assert!("aspect_sometimes".parse::<Condition>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const NOASPECT_ALL: &str = "noaspect_all";
const ASPECT_ALL: &str = "aspect_all";
const ASPECT_TOP_PREFIX: &str = "aspect_top";
const ASPECT_EXCLUDE_INTEREST_TOP_PREFIX: &str = "aspect_exclude_interest_top";
const NOASPECT_TOP_PREFIX: &str = "noaspect_top";

/// The experiment's scoring-variant selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum Condition {
    /// Preference-blind baseline: every aspect counts, feedback is ignored.
    NoAspectAll,
    /// Every aspect counts; reported good aspects are boosted.
    AspectAll,
    /// Only locally salient or reported aspects count; ranking uses the
    /// `top_k` strongest aspects.
    AspectTop {
        /// Number of aspects handed to the ranker.
        top_k: usize,
    },
    /// As [`Condition::AspectTop`], but aspects the visitor already declared
    /// an interest in are excluded outright.
    AspectExcludeInterestTop {
        /// Number of aspects handed to the ranker.
        top_k: usize,
    },
    /// Earlier experiment label `noaspect_top<k>`. Scores exactly like
    /// [`Condition::NoAspectAll`] but stays a distinct condition, so
    /// assignment balancing and logs keep `noaspect_top5` apart from
    /// `noaspect_top10`.
    NoAspectTop {
        /// Count carried by the label.
        top_k: usize,
    },
}

/// The two structurally different ranking algorithms a condition maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoringFamily {
    /// Destinations are scored over a preference-weighted aspect subset.
    WeightedSubset,
    /// Destinations are scored by an unweighted sum over every aspect.
    UnweightedBaseline,
}

/// Errors raised while parsing a [`Condition`] label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    /// The label matched no known condition.
    #[error("unknown condition {label:?}")]
    Unknown {
        /// Label as supplied.
        label: String,
    },
    /// A top-k label asked for zero aspects.
    #[error("condition {label:?} must select at least one aspect")]
    ZeroTopK {
        /// Label as supplied.
        label: String,
    },
}

impl Condition {
    /// The four canonical conditions, in label order of the experiment.
    pub const CANONICAL: [Self; 4] = [
        Self::NoAspectAll,
        Self::AspectAll,
        Self::AspectTop { top_k: 5 },
        Self::AspectExcludeInterestTop { top_k: 5 },
    ];

    /// Scoring family this condition dispatches to.
    #[must_use]
    pub const fn family(self) -> ScoringFamily {
        match self {
            Self::NoAspectAll | Self::NoAspectTop { .. } => ScoringFamily::UnweightedBaseline,
            Self::AspectAll | Self::AspectTop { .. } | Self::AspectExcludeInterestTop { .. } => {
                ScoringFamily::WeightedSubset
            }
        }
    }

    /// Whether visitors must report good aspects for each visited destination.
    #[must_use]
    pub const fn is_aspect_aware(self) -> bool {
        !matches!(self, Self::NoAspectAll | Self::NoAspectTop { .. })
    }

    /// Count carried by a top-k label. Only the aspect-aware variants hand
    /// it to the ranker.
    #[must_use]
    pub const fn top_k(self) -> Option<usize> {
        match self {
            Self::AspectTop { top_k }
            | Self::AspectExcludeInterestTop { top_k }
            | Self::NoAspectTop { top_k } => Some(top_k),
            Self::NoAspectAll | Self::AspectAll => None,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAspectAll => f.write_str(NOASPECT_ALL),
            Self::AspectAll => f.write_str(ASPECT_ALL),
            Self::AspectTop { top_k } => write!(f, "{ASPECT_TOP_PREFIX}{top_k}"),
            Self::AspectExcludeInterestTop { top_k } => {
                write!(f, "{ASPECT_EXCLUDE_INTEREST_TOP_PREFIX}{top_k}")
            }
            Self::NoAspectTop { top_k } => write!(f, "{NOASPECT_TOP_PREFIX}{top_k}"),
        }
    }
}

impl FromStr for Condition {
    type Err = ConditionError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            NOASPECT_ALL => return Ok(Self::NoAspectAll),
            ASPECT_ALL => return Ok(Self::AspectAll),
            _ => {}
        }
        // The exclude prefix is checked before the shorter `aspect_top` one.
        if let Some(suffix) = label.strip_prefix(ASPECT_EXCLUDE_INTEREST_TOP_PREFIX) {
            let top_k = parse_top_k(label, suffix)?;
            return Ok(Self::AspectExcludeInterestTop { top_k });
        }
        if let Some(suffix) = label.strip_prefix(ASPECT_TOP_PREFIX) {
            let top_k = parse_top_k(label, suffix)?;
            return Ok(Self::AspectTop { top_k });
        }
        if let Some(suffix) = label.strip_prefix(NOASPECT_TOP_PREFIX) {
            let top_k = parse_top_k(label, suffix)?;
            return Ok(Self::NoAspectTop { top_k });
        }
        Err(ConditionError::Unknown {
            label: label.to_owned(),
        })
    }
}

fn parse_top_k(label: &str, suffix: &str) -> Result<usize, ConditionError> {
    if suffix.is_empty() || !suffix.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ConditionError::Unknown {
            label: label.to_owned(),
        });
    }
    match suffix.parse::<usize>() {
        Ok(0) => Err(ConditionError::ZeroTopK {
            label: label.to_owned(),
        }),
        Ok(top_k) => Ok(top_k),
        Err(_) => Err(ConditionError::Unknown {
            label: label.to_owned(),
        }),
    }
}

impl TryFrom<String> for Condition {
    type Error = ConditionError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("noaspect_all", Condition::NoAspectAll)]
    #[case("aspect_all", Condition::AspectAll)]
    #[case("aspect_top5", Condition::AspectTop { top_k: 5 })]
    #[case("aspect_top10", Condition::AspectTop { top_k: 10 })]
    #[case(
        "aspect_exclude_interest_top5",
        Condition::AspectExcludeInterestTop { top_k: 5 }
    )]
    #[case("noaspect_top5", Condition::NoAspectTop { top_k: 5 })]
    #[case("noaspect_top10", Condition::NoAspectTop { top_k: 10 })]
    fn parses_known_labels(#[case] label: &str, #[case] expected: Condition) {
        assert_eq!(label.parse::<Condition>(), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("aspect")]
    #[case("aspect_top")]
    #[case("aspect_top-1")]
    #[case("aspect_top5x")]
    #[case("ASPECT_ALL")]
    #[case("pairwise")]
    fn rejects_unknown_labels(#[case] label: &str) {
        assert!(matches!(
            label.parse::<Condition>(),
            Err(ConditionError::Unknown { .. })
        ));
    }

    #[rstest]
    #[case("aspect_top0")]
    #[case("aspect_exclude_interest_top0")]
    #[case("noaspect_top0")]
    fn rejects_zero_top_k(#[case] label: &str) {
        assert!(matches!(
            label.parse::<Condition>(),
            Err(ConditionError::ZeroTopK { .. })
        ));
    }

    #[rstest]
    fn canonical_labels_round_trip() {
        for condition in Condition::CANONICAL {
            let label = condition.to_string();
            assert_eq!(label.parse::<Condition>(), Ok(condition));
        }
    }

    #[rstest]
    #[case("noaspect_top5")]
    #[case("noaspect_top10")]
    #[case("aspect_top10")]
    fn earlier_experiment_labels_round_trip(#[case] label: &str) {
        let condition: Condition = label.parse().expect("known label");
        assert_eq!(condition.to_string(), label);
    }

    #[rstest]
    fn earlier_baseline_labels_stay_distinct() {
        let five: Condition = "noaspect_top5".parse().expect("label");
        let ten: Condition = "noaspect_top10".parse().expect("label");
        assert_ne!(five, ten);
        assert_ne!(five, Condition::NoAspectAll);
        for condition in [five, ten] {
            assert_eq!(condition.family(), ScoringFamily::UnweightedBaseline);
            assert!(!condition.is_aspect_aware());
        }
    }

    #[rstest]
    fn families_split_baseline_from_weighted() {
        assert_eq!(
            Condition::NoAspectAll.family(),
            ScoringFamily::UnweightedBaseline
        );
        assert!(
            Condition::CANONICAL
                .iter()
                .skip(1)
                .all(|condition| condition.family() == ScoringFamily::WeightedSubset)
        );
        assert!(!Condition::NoAspectAll.is_aspect_aware());
        assert_eq!(Condition::AspectAll.top_k(), None);
    }
}
