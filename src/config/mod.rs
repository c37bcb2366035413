mod defaults;
mod io;
mod schema;
mod validate;

pub use io::load_config;
#[allow(unused_imports)]
pub use schema::{
    ApiConfig, CacheConfig, ChartsConfig, Config, CountryConfig, OutputConfig, RunConfig,
};
pub use validate::ConfigError;
