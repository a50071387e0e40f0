use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::{city::CityCoordinate, model::RawObservation};

pub mod open_meteo;

pub use open_meteo::OpenMeteoProvider;
pub use reqwest::StatusCode;

/// Why a single city's observation could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchCause {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A failed fetch for one city. Recoverable: the city is skipped.
#[derive(Debug, Error)]
#[error("failed to fetch weather for {city}: {cause}")]
pub struct FetchError {
    pub city: String,
    #[source]
    pub cause: FetchCause,
}

impl FetchError {
    pub fn new(city: &CityCoordinate, cause: impl Into<FetchCause>) -> Self {
        Self { city: city.name.clone(), cause: cause.into() }
    }
}

/// Anything that can produce the current observation for a city.
#[async_trait]
pub trait ObservationSource: Send + Sync + Debug {
    async fn fetch(&self, city: &CityCoordinate) -> Result<RawObservation, FetchError>;
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
