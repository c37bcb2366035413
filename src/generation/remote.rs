use reqwest::Client;

use crate::config::ApiConfig;
use crate::pipeline::Window;
use crate::series::SeriesTable;

use super::provider::{FetchError, GenerationProvider};
use super::response::{table_from_document, GenerationDocument};

/// Client for the "actual generation per production type" endpoint of the
/// market-data service.
pub struct RemoteGenerationClient {
    client: Client,
    base_url: String,
    token: String,
}

impl RemoteGenerationClient {
    pub fn new(api: &ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: api.base_url.trim_end_matches('/').to_string(),
            token: api.token.clone(),
        }
    }
}

impl GenerationProvider for RemoteGenerationClient {
    async fn fetch_generation(
        &mut self,
        country: &str,
        window: &Window,
    ) -> Result<SeriesTable, FetchError> {
        let url = format!("{}/v1/generation", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("country", country.to_string()),
                ("periodStart", window.start().to_rfc3339()),
                ("periodEnd", window.end().to_rfc3339()),
                ("securityToken", self.token.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                country: country.to_string(),
            });
        }

        let document: GenerationDocument = response.json().await?;
        let table = table_from_document(document).map_err(|source| FetchError::Document {
            country: country.to_string(),
            source,
        })?;

        log::info!(
            "generation_fetched country={} window={} rows={} sources={}",
            country,
            window.timespan(),
            table.len(),
            table.columns().len()
        );

        Ok(table)
    }
}
