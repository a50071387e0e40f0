use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{
    city::CityCoordinate,
    config::Config,
    model::RawObservation,
    provider::{FetchCause, FetchError, ObservationSource, truncate_body},
};

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code";

/// Open-Meteo forecast endpoint. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: Client::new() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl ObservationSource for OpenMeteoProvider {
    async fn fetch(&self, city: &CityCoordinate) -> Result<RawObservation, FetchError> {
        debug!(city = %city.name, url = %self.base_url, "requesting current conditions");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", city.latitude.to_string()),
                ("longitude", city.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::new(city, e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| FetchError::new(city, e))?;

        if !status.is_success() {
            return Err(FetchError::new(
                city,
                FetchCause::Status { status, body: truncate_body(&body) },
            ));
        }

        serde_json::from_str(&body).map_err(|e| FetchError::new(city, e))
    }
}
