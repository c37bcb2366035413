use std::path::{Path, PathBuf};

use crate::pipeline::Window;
use crate::series::{write_series, SeriesTable};

use super::paths::{ensure_dir, entry_path, SeriesKind};
use super::CacheError;

pub fn write_entry(
    dir: &Path,
    window: &Window,
    country: &str,
    kind: SeriesKind,
    table: &SeriesTable,
) -> Result<PathBuf, CacheError> {
    ensure_dir(dir).map_err(|source| CacheError::Dir {
        path: dir.display().to_string(),
        source,
    })?;

    let path = entry_path(dir, window, country, kind);
    write_series(&path, table)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::write_entry;
    use crate::cache::read::{entry_exists, read_entry};
    use crate::cache::SeriesKind;
    use crate::pipeline::Window;
    use crate::series::SeriesTable;

    fn sample_table() -> SeriesTable {
        let start = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
        SeriesTable::from_parts(
            vec![start, start + Duration::hours(1)],
            vec!["Nuclear".to_string()],
            vec![vec![Some(60000.0)], vec![None]],
        )
        .expect("valid table")
    }

    #[test]
    fn written_entries_can_be_found_and_read_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let window = Window::yearly(2017).expect("valid year");
        let table = sample_table();

        assert!(!entry_exists(dir.path(), &window, "FR", SeriesKind::Production));

        let path = write_entry(dir.path(), &window, "FR", SeriesKind::Production, &table)
            .expect("write should succeed");
        assert!(path.ends_with("20170101-20171231_FR_production.csv"));
        assert!(entry_exists(dir.path(), &window, "FR", SeriesKind::Production));

        let read_back = read_entry(dir.path(), &window, "FR", SeriesKind::Production)
            .expect("read should succeed");
        assert_eq!(read_back, table);
    }

    #[test]
    fn creates_the_cache_directory_on_first_write() {
        let dir = tempfile::tempdir().expect("temp dir");
        let nested = dir.path().join("cache").join("series");
        let window = Window::yearly(2017).expect("valid year");

        write_entry(&nested, &window, "DE", SeriesKind::Emission, &sample_table())
            .expect("write should create directories");
        assert!(entry_exists(&nested, &window, "DE", SeriesKind::Emission));
    }

    #[test]
    fn missing_entry_read_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let window = Window::yearly(2017).expect("valid year");

        assert!(read_entry(dir.path(), &window, "FR", SeriesKind::Production).is_err());
    }
}
