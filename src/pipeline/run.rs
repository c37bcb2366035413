use std::path::Path;

use chrono::Utc;
use thiserror::Error;

use crate::cache::{self, CacheError, SeriesKind};
use crate::charts::{
    self, AxisBounds, ChartRenderError, CountryScatter, CountryTrend, MonthPanel,
};
use crate::config::{Config, CountryConfig};
use crate::emissions::{emissions_from_generation, unit_conversion, EmissionFactors};
use crate::generation::GenerationProvider;
use crate::series::SeriesTable;

use super::gateway::{generation_for_window, GatewayError};
use super::windows::Window;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Chart(#[from] ChartRenderError),
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub windows_processed: usize,
    pub emission_files_written: usize,
    pub charts_written: usize,
}

struct ConvertedWindow {
    production: SeriesTable,
    emission: SeriesTable,
}

/// Fetch-or-cache, convert, and persist one (window, country) pair.
async fn process_window<P: GenerationProvider>(
    cache_dir: &Path,
    csv_dir: &Path,
    provider: &mut P,
    factors: &EmissionFactors,
    window: &Window,
    country: &CountryConfig,
) -> Result<ConvertedWindow, PipelineError> {
    let production = generation_for_window(cache_dir, provider, window, &country.code).await?;
    let emission = emissions_from_generation(
        &production,
        factors,
        unit_conversion(country.steps_per_hour),
    );
    cache::write_entry(csv_dir, window, &country.code, SeriesKind::Emission, &emission)?;

    Ok(ConvertedWindow {
        production,
        emission,
    })
}

fn write_chart(png_dir: &Path, file_name: &str, png_bytes: &[u8]) -> Result<(), ChartRenderError> {
    std::fs::create_dir_all(png_dir).map_err(|source| ChartRenderError::Io {
        path: png_dir.display().to_string(),
        source,
    })?;

    let path = png_dir.join(file_name);
    std::fs::write(&path, png_bytes).map_err(|source| ChartRenderError::Io {
        path: path.display().to_string(),
        source,
    })?;

    log::info!("chart_written path={}", path.display());
    Ok(())
}

/// The whole run: every configured year per country through the gateway and
/// converter, emission CSVs alongside, charts when enabled, and the two
/// cross-year trend charts at the end.
pub async fn run<P: GenerationProvider>(
    config: &Config,
    provider: &mut P,
) -> Result<RunSummary, PipelineError> {
    let factors = EmissionFactors::with_overrides(&config.factors);
    let cache_dir = Path::new(&config.cache.dir);
    let csv_dir = Path::new(&config.output.csv_dir);
    let png_dir = Path::new(&config.output.png_dir);
    let codes: String = config
        .countries
        .iter()
        .map(|country| country.code.as_str())
        .collect();
    let bounds = AxisBounds {
        production_max_mwh: config.charts.production_axis_max_mwh,
        intensity_max_g_per_kwh: config.charts.intensity_axis_max_g_per_kwh,
    };

    let mut summary = RunSummary::default();
    let mut trends: Vec<CountryTrend> = config
        .countries
        .iter()
        .enumerate()
        .map(|(index, country)| CountryTrend {
            code: country.code.clone(),
            color: charts::country_color(country.color.as_deref(), index),
            averages: Vec::new(),
        })
        .collect();

    for year in config.run.year_start..=config.run.year_end {
        let Some(window) = Window::yearly(year) else {
            log::warn!("window_skipped year={} reason=invalid_date", year);
            continue;
        };

        if config.run.merge_monthly_caches {
            for country in &config.countries {
                cache::merge_monthly_into_yearly(
                    cache_dir,
                    year,
                    &country.code,
                    SeriesKind::Production,
                )?;
            }
        }

        let mut scatters = Vec::with_capacity(config.countries.len());
        for (index, country) in config.countries.iter().enumerate() {
            let converted =
                process_window(cache_dir, csv_dir, provider, &factors, &window, country).await?;
            summary.emission_files_written += 1;

            let step_hours = country.time_step_hours();
            let points =
                charts::intensity_points(&converted.production, &converted.emission, step_hours);
            let window_summary =
                charts::country_summary(&converted.production, &converted.emission, step_hours);

            trends[index].averages.push((
                year,
                window_summary.map(|value| value.average_intensity_g_per_kwh),
            ));
            scatters.push(CountryScatter {
                code: country.code.clone(),
                color: charts::country_color(country.color.as_deref(), index),
                points,
                summary: window_summary,
            });
        }
        summary.windows_processed += 1;

        if config.charts.enabled {
            let title = window.year().to_string();
            let render_result =
                charts::run_render_task(move || charts::render_scatter_png(&title, &scatters, bounds))
                    .await;
            match render_result {
                Ok(png_bytes) => {
                    write_chart(png_dir, &charts::scatter_file_name(&window.timespan(), &codes), &png_bytes)?;
                    summary.charts_written += 1;
                }
                Err(ChartRenderError::NotEnoughPoints) => {
                    log::warn!(
                        "chart_skipped kind=scatter year={} reason=not_enough_points",
                        year
                    );
                }
                Err(error) => return Err(error.into()),
            }
        }

        if config.run.monthly_charts {
            let now = Utc::now();
            let mut month_panels = Vec::new();

            for month in 1..=12u32 {
                let Some(month_window) = Window::monthly(year, month) else {
                    continue;
                };
                // no data exists yet for windows that have not started
                if month_window.start() > now {
                    continue;
                }

                let mut month_scatters = Vec::with_capacity(config.countries.len());
                for (index, country) in config.countries.iter().enumerate() {
                    let converted = process_window(
                        cache_dir,
                        csv_dir,
                        provider,
                        &factors,
                        &month_window,
                        country,
                    )
                    .await?;
                    summary.emission_files_written += 1;

                    let step_hours = country.time_step_hours();
                    month_scatters.push(CountryScatter {
                        code: country.code.clone(),
                        color: charts::country_color(country.color.as_deref(), index),
                        points: charts::intensity_points(
                            &converted.production,
                            &converted.emission,
                            step_hours,
                        ),
                        summary: None,
                    });
                }

                month_panels.push(MonthPanel {
                    month,
                    countries: month_scatters,
                });
            }

            if config.charts.enabled && !month_panels.is_empty() {
                let render_result = charts::run_render_task(move || {
                    charts::render_monthly_panels_png(year, &month_panels, bounds)
                })
                .await;
                match render_result {
                    Ok(png_bytes) => {
                        write_chart(
                            png_dir,
                            &charts::monthly_file_name(&window.timespan(), &codes),
                            &png_bytes,
                        )?;
                        summary.charts_written += 1;
                    }
                    Err(ChartRenderError::NotEnoughPoints) => {
                        log::warn!(
                            "chart_skipped kind=monthly_panels year={} reason=not_enough_points",
                            year
                        );
                    }
                    Err(error) => return Err(error.into()),
                }
            }
        }
    }

    if config.charts.enabled {
        let average_trends = trends.clone();
        let render_result =
            charts::run_render_task(move || charts::render_average_png(&average_trends)).await;
        match render_result {
            Ok(png_bytes) => {
                write_chart(png_dir, &charts::average_file_name(&codes), &png_bytes)?;
                summary.charts_written += 1;
            }
            Err(ChartRenderError::NotEnoughPoints) => {
                log::warn!("chart_skipped kind=average reason=not_enough_points");
            }
            Err(error) => return Err(error.into()),
        }

        let render_result =
            charts::run_render_task(move || charts::render_evolution_png(&trends)).await;
        match render_result {
            Ok(png_bytes) => {
                write_chart(png_dir, &charts::evolution_file_name(&codes), &png_bytes)?;
                summary.charts_written += 1;
            }
            Err(ChartRenderError::NotEnoughPoints) => {
                log::warn!("chart_skipped kind=evolution reason=not_enough_points");
            }
            Err(error) => return Err(error.into()),
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::run;
    use crate::cache::{entry_exists, SeriesKind};
    use crate::config::{
        ApiConfig, CacheConfig, ChartsConfig, Config, CountryConfig, OutputConfig, RunConfig,
    };
    use crate::generation::MockGenerationProvider;
    use crate::pipeline::Window;
    use crate::series::SeriesTable;

    fn year_table(year: i32) -> SeriesTable {
        let start = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap();
        SeriesTable::from_parts(
            vec![start, start + Duration::hours(1)],
            vec!["Nuclear".to_string(), "Other renewable".to_string()],
            vec![
                vec![Some(40000.0), Some(100.0)],
                vec![Some(39000.0), Some(90.0)],
            ],
        )
        .expect("valid table")
    }

    fn batch_config(cache_dir: &std::path::Path, csv_dir: &std::path::Path) -> Config {
        Config {
            api: ApiConfig {
                base_url: "https://market-data.test".to_string(),
                token: "token".to_string(),
            },
            cache: CacheConfig {
                dir: cache_dir.display().to_string(),
            },
            output: OutputConfig {
                csv_dir: csv_dir.display().to_string(),
                png_dir: csv_dir.join("png").display().to_string(),
            },
            run: RunConfig {
                year_start: 2018,
                year_end: 2018,
                monthly_charts: false,
                merge_monthly_caches: false,
            },
            charts: ChartsConfig {
                enabled: false,
                ..ChartsConfig::default()
            },
            countries: vec![CountryConfig {
                code: "FR".to_string(),
                steps_per_hour: 1,
                color: None,
            }],
            factors: Default::default(),
        }
    }

    #[tokio::test]
    async fn one_year_run_writes_cache_and_emission_files() {
        let cache_dir = tempfile::tempdir().expect("temp cache dir");
        let csv_dir = tempfile::tempdir().expect("temp csv dir");
        let config = batch_config(cache_dir.path(), csv_dir.path());
        let mut provider = MockGenerationProvider::new(vec![year_table(2018)]);

        let summary = run(&config, &mut provider).await.expect("run succeeds");

        assert_eq!(provider.calls, 1);
        assert_eq!(summary.windows_processed, 1);
        assert_eq!(summary.emission_files_written, 1);
        assert_eq!(summary.charts_written, 0);

        let window = Window::yearly(2018).expect("valid year");
        assert!(entry_exists(
            cache_dir.path(),
            &window,
            "FR",
            SeriesKind::Production
        ));
        assert!(entry_exists(
            csv_dir.path(),
            &window,
            "FR",
            SeriesKind::Emission
        ));
    }

    #[tokio::test]
    async fn second_run_is_served_from_the_cache() {
        let cache_dir = tempfile::tempdir().expect("temp cache dir");
        let csv_dir = tempfile::tempdir().expect("temp csv dir");
        let config = batch_config(cache_dir.path(), csv_dir.path());

        let mut first_provider = MockGenerationProvider::new(vec![year_table(2018)]);
        run(&config, &mut first_provider)
            .await
            .expect("first run succeeds");

        let mut second_provider = MockGenerationProvider::new(Vec::new());
        let summary = run(&config, &mut second_provider)
            .await
            .expect("second run succeeds");

        assert_eq!(second_provider.calls, 0);
        assert_eq!(summary.windows_processed, 1);
    }

    #[tokio::test]
    async fn provider_failure_aborts_the_run() {
        let cache_dir = tempfile::tempdir().expect("temp cache dir");
        let csv_dir = tempfile::tempdir().expect("temp csv dir");
        let config = batch_config(cache_dir.path(), csv_dir.path());
        let mut provider = MockGenerationProvider::new(Vec::new());

        assert!(run(&config, &mut provider).await.is_err());
    }
}
