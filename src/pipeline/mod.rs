mod gateway;
mod run;
mod windows;

pub use gateway::{generation_for_window, GatewayError};
pub use run::{run, PipelineError, RunSummary};
pub use windows::Window;
