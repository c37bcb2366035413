use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("row count {rows} does not match timestamp count {timestamps}")]
    RowCount { rows: usize, timestamps: usize },
    #[error("row {row} has {cells} cells, expected {columns}")]
    RowWidth {
        row: usize,
        cells: usize,
        columns: usize,
    },
    #[error("timestamp index is not in ascending order at row {row}")]
    UnsortedIndex { row: usize },
}

/// Time-ordered table of one value column per generation source.
/// Cells are `None` where the upstream data has no value.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesTable {
    timestamps: Vec<DateTime<Utc>>,
    columns: Vec<String>,
    rows: Vec<Vec<Option<f64>>>,
}

impl SeriesTable {
    pub fn from_parts(
        timestamps: Vec<DateTime<Utc>>,
        columns: Vec<String>,
        rows: Vec<Vec<Option<f64>>>,
    ) -> Result<Self, SeriesError> {
        if rows.len() != timestamps.len() {
            return Err(SeriesError::RowCount {
                rows: rows.len(),
                timestamps: timestamps.len(),
            });
        }
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(SeriesError::RowWidth {
                    row: index,
                    cells: row.len(),
                    columns: columns.len(),
                });
            }
        }
        for (index, pair) in timestamps.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(SeriesError::UnsortedIndex { row: index + 1 });
            }
        }

        Ok(Self {
            timestamps,
            columns,
            rows,
        })
    }

    pub fn from_unsorted(
        timestamps: Vec<DateTime<Utc>>,
        columns: Vec<String>,
        rows: Vec<Vec<Option<f64>>>,
    ) -> Result<Self, SeriesError> {
        if rows.len() != timestamps.len() {
            return Err(SeriesError::RowCount {
                rows: rows.len(),
                timestamps: timestamps.len(),
            });
        }

        let mut paired: Vec<(DateTime<Utc>, Vec<Option<f64>>)> =
            timestamps.into_iter().zip(rows).collect();
        paired.sort_by_key(|(timestamp, _)| *timestamp);

        let (timestamps, rows): (Vec<_>, Vec<_>) = paired.into_iter().unzip();
        Self::from_parts(timestamps, columns, rows)
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Sum of the defined cells in one row; 0.0 when every cell is missing.
    pub fn row_sum_defined(&self, row: usize) -> f64 {
        self.rows
            .get(row)
            .map(|cells| cells.iter().flatten().sum())
            .unwrap_or(0.0)
    }
}
