use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartRenderError {
    #[error("not enough points to render")]
    NotEnoughPoints,
    #[error("render backend failure: {0}")]
    Backend(String),
    #[error("png encoding failure: {0}")]
    PngEncoding(String),
    #[error("render task join failure: {0}")]
    Join(String),
    #[error("render task panic: {0}")]
    Panic(String),
    #[error("failed to write chart {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}
