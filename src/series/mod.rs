mod csv;
mod model;

pub use csv::{read_series, write_series, SeriesCsvError};
pub use model::{SeriesError, SeriesTable};
