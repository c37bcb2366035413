use std::path::Path;

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::model::{SeriesError, SeriesTable};

const TIMESTAMP_HEADER: &str = "timestamp";

#[derive(Debug, Error)]
pub enum SeriesCsvError {
    #[error("csv file error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{path}: missing timestamp column")]
    MissingTimestampColumn { path: String },
    #[error("{path}: invalid timestamp '{value}' at row {row}: {source}")]
    Timestamp {
        path: String,
        row: usize,
        value: String,
        source: chrono::ParseError,
    },
    #[error("{path}: invalid value '{value}' at row {row}: {source}")]
    Value {
        path: String,
        row: usize,
        value: String,
        source: std::num::ParseFloatError,
    },
    #[error("{path}: inconsistent table: {source}")]
    Shape { path: String, source: SeriesError },
}

pub fn write_series(path: impl AsRef<Path>, table: &SeriesTable) -> Result<(), SeriesCsvError> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;

    let mut header = Vec::with_capacity(table.columns().len() + 1);
    header.push(TIMESTAMP_HEADER.to_string());
    header.extend(table.columns().iter().cloned());
    writer.write_record(&header)?;

    for (timestamp, row) in table.timestamps().iter().zip(table.rows()) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(timestamp.to_rfc3339());
        for cell in row {
            record.push(match cell {
                Some(value) => value.to_string(),
                None => String::new(),
            });
        }
        writer.write_record(&record)?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn read_series(path: impl AsRef<Path>) -> Result<SeriesTable, SeriesCsvError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(SeriesCsvError::MissingTimestampColumn { path: path_str });
    }

    let columns: Vec<String> = headers.iter().skip(1).map(|name| name.to_string()).collect();

    let mut timestamps: Vec<DateTime<Utc>> = Vec::new();
    let mut rows: Vec<Vec<Option<f64>>> = Vec::new();

    for (row_index, record) in reader.records().enumerate() {
        let record = record?;
        let raw_timestamp = record.get(0).unwrap_or("");
        let timestamp = DateTime::parse_from_rfc3339(raw_timestamp.trim())
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|source| SeriesCsvError::Timestamp {
                path: path_str.clone(),
                row: row_index,
                value: raw_timestamp.to_string(),
                source,
            })?;

        let mut cells = Vec::with_capacity(columns.len());
        for column_index in 0..columns.len() {
            let raw = record.get(column_index + 1).unwrap_or("").trim();
            if raw.is_empty() {
                cells.push(None);
            } else {
                let value = raw.parse::<f64>().map_err(|source| SeriesCsvError::Value {
                    path: path_str.clone(),
                    row: row_index,
                    value: raw.to_string(),
                    source,
                })?;
                cells.push(Some(value));
            }
        }

        timestamps.push(timestamp);
        rows.push(cells);
    }

    SeriesTable::from_parts(timestamps, columns, rows).map_err(|source| SeriesCsvError::Shape {
        path: path_str,
        source,
    })
}
