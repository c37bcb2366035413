use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::pipeline::Window;
use crate::series::SeriesTable;

use super::paths::SeriesKind;
use super::read::{entry_exists, read_entry};
use super::write::write_entry;
use super::CacheError;

/// Rebuilds the yearly cache entry of one (country, kind) from whatever
/// monthly entries exist. Returns `None` when no monthly entry was found.
pub fn merge_monthly_into_yearly(
    dir: &Path,
    year: i32,
    country: &str,
    kind: SeriesKind,
) -> Result<Option<PathBuf>, CacheError> {
    let Some(yearly) = Window::yearly(year) else {
        return Ok(None);
    };

    let mut monthly_tables = Vec::new();
    for month in 1..=12 {
        let Some(window) = Window::monthly(year, month) else {
            continue;
        };
        if !entry_exists(dir, &window, country, kind) {
            continue;
        }
        monthly_tables.push(read_entry(dir, &window, country, kind)?);
    }

    if monthly_tables.is_empty() {
        log::info!(
            "cache_merge_skipped country={} year={} kind={} reason=no_monthly_entries",
            country,
            year,
            kind.as_str()
        );
        return Ok(None);
    }

    let months = monthly_tables.len();
    let merged = concat_tables(&monthly_tables)?;
    let path = write_entry(dir, &yearly, country, kind, &merged)?;

    log::info!(
        "cache_merge_done country={} year={} kind={} months={} rows={}",
        country,
        year,
        kind.as_str(),
        months,
        merged.len()
    );

    Ok(Some(path))
}

/// Concatenates tables over the union of their columns, sorted by timestamp.
/// Cells of columns a table does not carry are missing in its rows.
fn concat_tables(tables: &[SeriesTable]) -> Result<SeriesTable, CacheError> {
    let mut columns: Vec<String> = Vec::new();
    let mut column_index: HashMap<String, usize> = HashMap::new();
    for table in tables {
        for column in table.columns() {
            if !column_index.contains_key(column) {
                column_index.insert(column.clone(), columns.len());
                columns.push(column.clone());
            }
        }
    }

    let mut timestamps: Vec<DateTime<Utc>> = Vec::new();
    let mut rows: Vec<Vec<Option<f64>>> = Vec::new();
    for table in tables {
        let mapping: Vec<usize> = table
            .columns()
            .iter()
            .map(|column| column_index[column.as_str()])
            .collect();

        for (timestamp, row) in table.timestamps().iter().zip(table.rows()) {
            let mut cells = vec![None; columns.len()];
            for (source_index, cell) in row.iter().enumerate() {
                cells[mapping[source_index]] = *cell;
            }
            timestamps.push(*timestamp);
            rows.push(cells);
        }
    }

    let merged = SeriesTable::from_unsorted(timestamps, columns, rows)?;
    Ok(merged)
}
