//! Per-aspect min-max normalisation of the catalog.
#![forbid(unsafe_code)]

use vantage_core::Catalog;

/// Value assigned to every entry of a constant column.
///
/// Destinations are indistinguishable on such an aspect, so each sits at the
/// midpoint of the unit range.
pub const DEGENERATE_FILL: f64 = 0.5;

/// Rescale a column to `0.0..=1.0` via `(x - min) / (max - min)`.
///
/// A constant column maps every entry to [`DEGENERATE_FILL`]; an empty
/// column is returned unchanged.
///
/// # Examples
/// ```
/// use vantage_scorer::normalise_column;
///
/// assert_eq!(normalise_column(&[1.0, 3.0, 2.0]), vec![0.0, 1.0, 0.5]);
/// assert_eq!(normalise_column(&[2.0, 2.0]), vec![0.5, 0.5]);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "min-max scaling subtracts and divides scores"
)]
pub fn normalise_column(column: &[f64]) -> Vec<f64> {
    let Some((min, max)) = bounds(column) else {
        return Vec::new();
    };
    let span = max - min;
    if span <= 0.0 || !span.is_finite() {
        return vec![DEGENERATE_FILL; column.len()];
    }
    column
        .iter()
        .map(|value| ((value - min) / span).clamp(0.0, 1.0))
        .collect()
}

fn bounds(column: &[f64]) -> Option<(f64, f64)> {
    let (first, rest) = column.split_first()?;
    Some(rest.iter().fold((*first, *first), |(min, max), &value| {
        (min.min(value), max.max(value))
    }))
}

/// The catalog with every aspect column min-max normalised.
///
/// Rows follow catalog order and columns follow taxonomy order. Each scoring
/// pass builds its own instance; the source catalog is never touched.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalisedCatalog {
    rows: Vec<Vec<f64>>,
}

impl NormalisedCatalog {
    /// Normalise each aspect column of `catalog` independently.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let columns: Vec<Vec<f64>> = (0..catalog.taxonomy().len())
            .map(|aspect| normalise_column(&catalog.column(aspect)))
            .collect();
        let rows = (0..catalog.len())
            .map(|destination| {
                columns
                    .iter()
                    .filter_map(|column| column.get(destination).copied())
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Normalised row of the destination at catalog `position`.
    #[must_use]
    pub fn row(&self, position: usize) -> Option<&[f64]> {
        self.rows.get(position).map(Vec::as_slice)
    }

    /// Rows in catalog order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }
}
