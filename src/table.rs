//! Keyed indicator tables, as handed over by the spreadsheet reader

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2};
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How empty cells are filled before standardization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MissingValuePolicy {
    /// Replace missing cells with 0.0.
    ///
    /// A true zero and a missing value become indistinguishable; kept as the
    /// default so results match the existing dashboard.
    #[default]
    Zero,
    /// Replace missing cells with the mean of the present values in the column
    /// (0.0 if the whole column is missing)
    ColumnMean,
}

/// Indicator table: one row per region, one numeric column per indicator
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndicatorTable {
    keys: Vec<String>,
    columns: Vec<String>,
    values: Array2<f64>,
}

impl IndicatorTable {
    /// Build a table from complete rows
    pub fn new(keys: Vec<String>, columns: Vec<String>, values: Array2<f64>) -> Result<Self> {
        if keys.len() != values.nrows() {
            return Err(Error::invalid_data(format!(
                "{} region keys for {} rows",
                keys.len(),
                values.nrows()
            )));
        }
        if columns.len() != values.ncols() {
            return Err(Error::invalid_data(format!(
                "{} column names for {} columns",
                columns.len(),
                values.ncols()
            )));
        }

        let mut seen = HashSet::with_capacity(keys.len());
        for key in &keys {
            if !seen.insert(key.as_str()) {
                return Err(Error::invalid_data(format!("Duplicate region key '{}'", key)));
            }
        }

        Ok(Self { keys, columns, values })
    }

    /// Build a table from rows that may contain missing cells
    pub fn from_rows<K: Into<String>>(
        columns: Vec<String>,
        rows: Vec<(K, Vec<Option<f64>>)>,
        policy: MissingValuePolicy,
    ) -> Result<Self> {
        let n_cols = columns.len();
        let mut keys = Vec::with_capacity(rows.len());
        let mut cells = Vec::with_capacity(rows.len() * n_cols);

        for (key, row) in rows {
            let key = key.into();
            if row.len() != n_cols {
                return Err(Error::invalid_data(format!(
                    "Row '{}' has {} values, expected {}",
                    key,
                    row.len(),
                    n_cols
                )));
            }
            keys.push(key);
            cells.extend(row);
        }

        let fill = column_fill_values(&cells, n_cols, policy);
        let filled: Vec<f64> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| cell.unwrap_or(fill[i % n_cols.max(1)]))
            .collect();

        let values = Array2::from_shape_vec((keys.len(), n_cols), filled)
            .map_err(|e| Error::invalid_data(e.to_string()))?;

        Self::new(keys, columns, values)
    }

    /// Region keys in row order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Indicator column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Numeric block (`n_regions x n_indicators`)
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Number of regions
    pub fn n_regions(&self) -> usize {
        self.keys.len()
    }
}

fn column_fill_values(cells: &[Option<f64>], n_cols: usize, policy: MissingValuePolicy) -> Vec<f64> {
    match policy {
        MissingValuePolicy::Zero => vec![0.0; n_cols],
        MissingValuePolicy::ColumnMean => {
            let mut sums = vec![0.0; n_cols];
            let mut counts = vec![0usize; n_cols];
            for (i, cell) in cells.iter().enumerate() {
                if let Some(v) = cell {
                    sums[i % n_cols] += v;
                    counts[i % n_cols] += 1;
                }
            }
            sums.iter()
                .zip(counts.iter())
                .map(|(&s, &c)| if c == 0 { 0.0 } else { s / c as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols() -> Vec<String> {
        vec!["padi".to_string(), "jagung".to_string()]
    }

    #[test]
    fn test_missing_as_zero() {
        let table = IndicatorTable::from_rows(
            cols(),
            vec![("Kendari", vec![Some(4.0), None]), ("Muna", vec![Some(2.0), Some(6.0)])],
            MissingValuePolicy::Zero,
        )
        .unwrap();

        assert_eq!(table.values()[[0, 1]], 0.0);
        assert_eq!(table.keys(), &["Kendari".to_string(), "Muna".to_string()]);
    }

    #[test]
    fn test_missing_as_column_mean() {
        let table = IndicatorTable::from_rows(
            cols(),
            vec![
                ("a", vec![Some(1.0), None]),
                ("b", vec![Some(3.0), Some(4.0)]),
                ("c", vec![None, Some(8.0)]),
            ],
            MissingValuePolicy::ColumnMean,
        )
        .unwrap();

        assert_eq!(table.values()[[0, 1]], 6.0);
        assert_eq!(table.values()[[2, 0]], 2.0);
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let result = IndicatorTable::from_rows(
            cols(),
            vec![("a", vec![Some(1.0), Some(2.0)]), ("a", vec![Some(3.0), Some(4.0)])],
            MissingValuePolicy::Zero,
        );
        assert!(matches!(result, Err(Error::InvalidData { .. })));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let result = IndicatorTable::from_rows(
            cols(),
            vec![("a", vec![Some(1.0)])],
            MissingValuePolicy::Zero,
        );
        assert!(result.is_err());
    }
}
