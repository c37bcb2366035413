use std::path::Path;

use crate::pipeline::Window;
use crate::series::{read_series, SeriesTable};

use super::paths::{entry_path, SeriesKind};
use super::CacheError;

pub fn entry_exists(dir: &Path, window: &Window, country: &str, kind: SeriesKind) -> bool {
    entry_path(dir, window, country, kind).is_file()
}

pub fn read_entry(
    dir: &Path,
    window: &Window,
    country: &str,
    kind: SeriesKind,
) -> Result<SeriesTable, CacheError> {
    let path = entry_path(dir, window, country, kind);
    let table = read_series(&path)?;
    Ok(table)
}
