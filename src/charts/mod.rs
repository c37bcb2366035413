mod error;
mod executor;
mod panels;
mod render;
mod scatter;
mod stats;
mod trend;

pub use error::ChartRenderError;
pub use render::parse_hex_color;

pub(crate) use executor::run_render_task;
pub(crate) use panels::{render_monthly_panels_png, MonthPanel};
pub(crate) use render::{country_color, AxisBounds};
pub(crate) use scatter::{render_scatter_png, CountryScatter};
pub(crate) use stats::{country_summary, intensity_points};
pub(crate) use trend::{render_average_png, render_evolution_png, CountryTrend};

pub(crate) fn scatter_file_name(timespan: &str, codes: &str) -> String {
    format!("{}_{}_emission_vs_production.png", timespan, codes)
}

pub(crate) fn monthly_file_name(timespan: &str, codes: &str) -> String {
    format!("{}_{}_monthly_emission_vs_production.png", timespan, codes)
}

pub(crate) fn average_file_name(codes: &str) -> String {
    format!("{}_average_emission.png", codes)
}

pub(crate) fn evolution_file_name(codes: &str) -> String {
    format!("{}_average_evolution.png", codes)
}
