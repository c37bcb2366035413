mod cache;
mod charts;
mod config;
mod emissions;
mod generation;
mod pipeline;
mod series;

use tracing_subscriber::EnvFilter;

use crate::config::{load_config, Config};
use crate::generation::RemoteGenerationClient;

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    init_json_logging();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config: Config = match load_config(&config_path) {
        Ok(config) => config,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    log::info!(
        "gridcarbon_starting config={} years={}-{} countries={}",
        config_path,
        config.run.year_start,
        config.run.year_end,
        config.countries.len()
    );

    let mut provider = RemoteGenerationClient::new(&config.api);

    match pipeline::run(&config, &mut provider).await {
        Ok(summary) => {
            log::info!(
                "run_complete windows={} emission_files={} charts={}",
                summary.windows_processed,
                summary.emission_files_written,
                summary.charts_written
            );
        }
        Err(error) => {
            log::error!("run_failed error={}", error);
            std::process::exit(1);
        }
    }
}
