use thiserror::Error;

use crate::charts::parse_hex_color;

use super::schema::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "api.base_url must not be empty".to_string(),
            ));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(
                "api.base_url must start with http:// or https://".to_string(),
            ));
        }
        if self.api.token.trim().is_empty() {
            return Err(ConfigError::Validation(
                "api.token must not be empty".to_string(),
            ));
        }
        if self.cache.dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "cache.dir must not be empty".to_string(),
            ));
        }
        if self.output.csv_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output.csv_dir must not be empty".to_string(),
            ));
        }
        if self.output.png_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output.png_dir must not be empty".to_string(),
            ));
        }
        if !(1900..=2100).contains(&self.run.year_start) {
            return Err(ConfigError::Validation(
                "run.year_start must be between 1900 and 2100".to_string(),
            ));
        }
        if !(1900..=2100).contains(&self.run.year_end) {
            return Err(ConfigError::Validation(
                "run.year_end must be between 1900 and 2100".to_string(),
            ));
        }
        if self.run.year_end < self.run.year_start {
            return Err(ConfigError::Validation(
                "run.year_end must not be before run.year_start".to_string(),
            ));
        }
        if self.charts.production_axis_max_mwh <= 0.0
            || !self.charts.production_axis_max_mwh.is_finite()
        {
            return Err(ConfigError::Validation(
                "charts.production_axis_max_mwh must be a positive number".to_string(),
            ));
        }
        if self.charts.intensity_axis_max_g_per_kwh <= 0.0
            || !self.charts.intensity_axis_max_g_per_kwh.is_finite()
        {
            return Err(ConfigError::Validation(
                "charts.intensity_axis_max_g_per_kwh must be a positive number".to_string(),
            ));
        }
        if self.countries.is_empty() {
            return Err(ConfigError::Validation(
                "countries must list at least one country".to_string(),
            ));
        }
        for country in &self.countries {
            if country.code.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "countries.code must not be empty".to_string(),
                ));
            }
            if !(1..=12).contains(&country.steps_per_hour) {
                return Err(ConfigError::Validation(format!(
                    "countries.steps_per_hour for {} must be between 1 and 12",
                    country.code
                )));
            }
            if let Some(color) = &country.color {
                if parse_hex_color(color).is_none() {
                    return Err(ConfigError::Validation(format!(
                        "countries.color for {} must look like #RRGGBB",
                        country.code
                    )));
                }
            }
        }
        for (source, factor) in &self.factors {
            if !factor.is_finite() || *factor < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "factors.{} must be a non-negative number",
                    source
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::schema::{
        ApiConfig, CacheConfig, ChartsConfig, Config, CountryConfig, OutputConfig, RunConfig,
    };

    pub(crate) fn test_config() -> Config {
        Config {
            api: ApiConfig {
                base_url: "https://market-data.test".to_string(),
                token: "token".to_string(),
            },
            cache: CacheConfig::default(),
            output: OutputConfig::default(),
            run: RunConfig {
                year_start: 2015,
                year_end: 2020,
                monthly_charts: true,
                merge_monthly_caches: false,
            },
            charts: ChartsConfig::default(),
            countries: vec![
                CountryConfig {
                    code: "DE".to_string(),
                    steps_per_hour: 4,
                    color: None,
                },
                CountryConfig {
                    code: "FR".to_string(),
                    steps_per_hour: 1,
                    color: Some("#87ceeb".to_string()),
                },
            ],
            factors: Default::default(),
        }
    }

    #[test]
    fn accepts_valid_config() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn rejects_empty_token() {
        let mut config = test_config();
        config.api.token = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_reversed_year_range() {
        let mut config = test_config();
        config.run.year_start = 2020;
        config.run.year_end = 2015;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_country_list() {
        let mut config = test_config();
        config.countries.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_country_color() {
        let mut config = test_config();
        config.countries[0].color = Some("sky blue".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_factor_override() {
        let mut config = test_config();
        config.factors.insert("Solar".to_string(), -1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_steps_per_hour() {
        let mut config = test_config();
        config.countries[0].steps_per_hour = 0;
        assert!(config.validate().is_err());
    }
}
