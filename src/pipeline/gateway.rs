use std::path::Path;

use thiserror::Error;

use crate::cache::{self, CacheError, SeriesKind};
use crate::generation::{FetchError, GenerationProvider};
use crate::series::SeriesTable;

use super::windows::Window;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Cache-first lookup of one (window, country) generation table. A present
/// cache entry is trusted as-is; only a miss goes to the remote provider, and
/// the fetched table is persisted before it is returned.
pub async fn generation_for_window<P: GenerationProvider>(
    cache_dir: &Path,
    provider: &mut P,
    window: &Window,
    country: &str,
) -> Result<SeriesTable, GatewayError> {
    if cache::entry_exists(cache_dir, window, country, SeriesKind::Production) {
        log::info!(
            "cache_hit country={} window={}",
            country,
            window.timespan()
        );
        let table = cache::read_entry(cache_dir, window, country, SeriesKind::Production)?;
        return Ok(table);
    }

    log::info!(
        "cache_miss country={} window={}",
        country,
        window.timespan()
    );
    let table = provider.fetch_generation(country, window).await?;
    let path = cache::write_entry(cache_dir, window, country, SeriesKind::Production, &table)?;
    log::info!(
        "cache_entry_written country={} window={} rows={} path={}",
        country,
        window.timespan(),
        table.len(),
        path.display()
    );

    Ok(table)
}
