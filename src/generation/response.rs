use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::series::{SeriesError, SeriesTable};

const AGGREGATED_LEVEL: &str = "Actual Aggregated";

/// Tabular document returned by the market-data service. `aggregation` is the
/// second header level; it is only present when the service also reports
/// consumption columns.
#[derive(Debug, Deserialize)]
pub(super) struct GenerationDocument {
    #[allow(dead_code)]
    pub(super) country: String,
    pub(super) series: Vec<SourceSeries>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SourceSeries {
    pub(super) source: String,
    #[serde(default)]
    pub(super) aggregation: Option<String>,
    pub(super) points: Vec<SeriesPoint>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SeriesPoint {
    pub(super) timestamp: DateTime<Utc>,
    pub(super) mw: Option<f64>,
}

/// Drops consumption columns when the document carries the second header
/// level, then pivots the remaining per-source series into one table over the
/// sorted union of timestamps.
pub(super) fn table_from_document(document: GenerationDocument) -> Result<SeriesTable, SeriesError> {
    let two_level = document
        .series
        .iter()
        .any(|series| series.aggregation.is_some());

    let kept: Vec<&SourceSeries> = document
        .series
        .iter()
        .filter(|series| {
            !two_level || series.aggregation.as_deref() == Some(AGGREGATED_LEVEL)
        })
        .collect();

    let mut columns: Vec<String> = Vec::new();
    let mut column_index: HashMap<&str, usize> = HashMap::new();
    for series in &kept {
        if !column_index.contains_key(series.source.as_str()) {
            column_index.insert(series.source.as_str(), columns.len());
            columns.push(series.source.clone());
        }
    }

    let mut stamp_set: BTreeSet<DateTime<Utc>> = BTreeSet::new();
    for series in &kept {
        for point in &series.points {
            stamp_set.insert(point.timestamp);
        }
    }
    let timestamps: Vec<DateTime<Utc>> = stamp_set.into_iter().collect();
    let row_index: HashMap<DateTime<Utc>, usize> = timestamps
        .iter()
        .enumerate()
        .map(|(row, timestamp)| (*timestamp, row))
        .collect();

    let mut rows: Vec<Vec<Option<f64>>> = vec![vec![None; columns.len()]; timestamps.len()];
    for series in &kept {
        let column = column_index[series.source.as_str()];
        for point in &series.points {
            let row = row_index[&point.timestamp];
            rows[row][column] = point.mw;
        }
    }

    SeriesTable::from_parts(timestamps, columns, rows)
}
