mod maintenance;
mod paths;
mod read;
mod write;

use thiserror::Error;

use crate::series::{SeriesCsvError, SeriesError};

pub use maintenance::merge_monthly_into_yearly;
pub use paths::SeriesKind;
pub use read::{entry_exists, read_entry};
pub use write::write_entry;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache directory {path}: {source}")]
    Dir {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] SeriesCsvError),
    #[error("inconsistent merged table: {0}")]
    Shape(#[from] SeriesError),
}
