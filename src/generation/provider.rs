use thiserror::Error;

use crate::pipeline::Window;
use crate::series::{SeriesError, SeriesTable};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generation service returned status {status} for {country}")]
    Status { status: u16, country: String },
    #[error("malformed generation document for {country}: {source}")]
    Document {
        country: String,
        source: SeriesError,
    },
    #[cfg(test)]
    #[error("mock responses exhausted")]
    MockExhausted,
}

pub trait GenerationProvider {
    async fn fetch_generation(
        &mut self,
        country: &str,
        window: &Window,
    ) -> Result<SeriesTable, FetchError>;
}

#[cfg(test)]
pub(crate) struct MockGenerationProvider {
    responses: Vec<SeriesTable>,
    pub(crate) calls: usize,
}

#[cfg(test)]
impl MockGenerationProvider {
    pub(crate) fn new(responses: Vec<SeriesTable>) -> Self {
        Self {
            responses,
            calls: 0,
        }
    }
}

#[cfg(test)]
impl GenerationProvider for MockGenerationProvider {
    async fn fetch_generation(
        &mut self,
        _country: &str,
        _window: &Window,
    ) -> Result<SeriesTable, FetchError> {
        self.calls += 1;
        if self.responses.is_empty() {
            return Err(FetchError::MockExhausted);
        }

        Ok(self.responses.remove(0))
    }
}
