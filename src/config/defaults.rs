use super::schema::{CacheConfig, ChartsConfig, OutputConfig};

pub(super) fn default_api_base_url() -> String {
    "https://energy-market-data.example.org".to_string()
}

pub(super) fn default_cache_dir() -> String {
    "data".to_string()
}

pub(super) fn default_output_csv_dir() -> String {
    "data".to_string()
}

pub(super) fn default_output_png_dir() -> String {
    "charts".to_string()
}

pub(super) fn default_monthly_charts() -> bool {
    true
}

pub(super) fn default_charts_enabled() -> bool {
    true
}

pub(super) fn default_production_axis_max_mwh() -> f64 {
    100_000.0
}

pub(super) fn default_intensity_axis_max() -> f64 {
    800.0
}

pub(super) fn default_steps_per_hour() -> u32 {
    1
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_dir: default_output_csv_dir(),
            png_dir: default_output_png_dir(),
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            enabled: default_charts_enabled(),
            production_axis_max_mwh: default_production_axis_max_mwh(),
            intensity_axis_max_g_per_kwh: default_intensity_axis_max(),
        }
    }
}
