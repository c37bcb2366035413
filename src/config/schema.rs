use std::collections::HashMap;

use serde::Deserialize;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub run: RunConfig,
    #[serde(default)]
    pub charts: ChartsConfig,
    pub countries: Vec<CountryConfig>,
    #[serde(default)]
    pub factors: HashMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_dir")]
    pub dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_csv_dir")]
    pub csv_dir: String,
    #[serde(default = "default_output_png_dir")]
    pub png_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub year_start: i32,
    pub year_end: i32,
    #[serde(default = "default_monthly_charts")]
    pub monthly_charts: bool,
    #[serde(default)]
    pub merge_monthly_caches: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartsConfig {
    #[serde(default = "default_charts_enabled")]
    pub enabled: bool,
    #[serde(default = "default_production_axis_max_mwh")]
    pub production_axis_max_mwh: f64,
    #[serde(default = "default_intensity_axis_max")]
    pub intensity_axis_max_g_per_kwh: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryConfig {
    pub code: String,
    #[serde(default = "default_steps_per_hour")]
    pub steps_per_hour: u32,
    #[serde(default)]
    pub color: Option<String>,
}

impl CountryConfig {
    pub fn time_step_hours(&self) -> f64 {
        1.0 / self.steps_per_hour as f64
    }
}
