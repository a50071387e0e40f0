//! Fetch observations for a registry and assemble them into a [`WeatherTable`].

use futures::{StreamExt, stream};
use std::pin::pin;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    city::CityCoordinate,
    model::{RawObservation, WeatherRecord, WeatherTable},
    provider::{FetchError, ObservationSource},
};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no weather data was fetched for any city")]
    EmptyTable,
}

/// Fail with [`PipelineError::EmptyTable`] unless the table has rows.
pub fn require_non_empty(table: &WeatherTable) -> Result<(), PipelineError> {
    if table.is_empty() { Err(PipelineError::EmptyTable) } else { Ok(()) }
}

/// What happened to one city of the registry.
#[derive(Debug)]
pub enum CityOutcome {
    Recorded(WeatherRecord),
    /// The response decoded but had no `current` block.
    MissingData,
    /// The city already has a row; the earlier record is kept.
    Duplicate(WeatherRecord),
    Failed(FetchError),
}

#[derive(Debug)]
pub struct CityReport {
    pub city: CityCoordinate,
    pub outcome: CityOutcome,
}

/// Progress notifications emitted by [`collect_with`].
#[derive(Debug, Clone, Copy)]
pub enum FetchEvent<'a> {
    /// The city is next in registry order.
    Started(&'a CityCoordinate),
    Finished(&'a CityReport),
}

/// Per-city outcomes and the resulting table, both in registry order.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub cities: Vec<CityReport>,
    pub table: WeatherTable,
}

impl FetchReport {
    pub fn failures(&self) -> impl Iterator<Item = &FetchError> {
        self.cities.iter().filter_map(|r| match &r.outcome {
            CityOutcome::Failed(e) => Some(e),
            _ => None,
        })
    }

    /// Fold one fetch result into the report and return the city's entry.
    pub fn record(
        &mut self,
        city: &CityCoordinate,
        result: Result<RawObservation, FetchError>,
    ) -> &CityReport {
        let outcome = match result {
            Ok(raw) => match build_record(city, Some(&raw)) {
                Some(record) => {
                    if self.table.push(record.clone()) {
                        CityOutcome::Recorded(record)
                    } else {
                        warn!(city = %city.name, "duplicate city in registry; keeping first record");
                        CityOutcome::Duplicate(record)
                    }
                }
                None => {
                    debug!(city = %city.name, "response has no current block; skipping");
                    CityOutcome::MissingData
                }
            },
            Err(err) => {
                info!(city = %city.name, error = %err.cause, "fetch failed; skipping city");
                CityOutcome::Failed(err)
            }
        };
        self.cities.push(CityReport { city: city.clone(), outcome });
        &self.cities[self.cities.len() - 1]
    }
}

/// Turn an optional observation into a record.
///
/// `None` and an observation without `current` both yield `None`; missing
/// fields inside `current` default to zero.
pub fn build_record(city: &CityCoordinate, observation: Option<&RawObservation>) -> Option<WeatherRecord> {
    let current = observation?.current.as_ref()?;
    Some(WeatherRecord::from_current(city, current))
}

/// Query every city and build the table.
pub async fn collect<S>(source: &S, cities: &[CityCoordinate], concurrency: usize) -> FetchReport
where
    S: ObservationSource + ?Sized,
{
    collect_with(source, cities, concurrency, |_| {}).await
}

/// Like [`collect`], reporting progress to `on_event` as it goes.
///
/// With `concurrency <= 1` each city's `Started` fires before its request
/// is sent and `Finished` once it is recorded. Otherwise at most
/// `concurrency` requests are in flight and both events fire as results are
/// consumed, in registry order regardless of completion order.
pub async fn collect_with<S, F>(
    source: &S,
    cities: &[CityCoordinate],
    concurrency: usize,
    mut on_event: F,
) -> FetchReport
where
    S: ObservationSource + ?Sized,
    F: FnMut(FetchEvent<'_>),
{
    info!(cities = cities.len(), concurrency, "fetching current conditions");

    let mut report = FetchReport::default();
    if concurrency <= 1 {
        for city in cities {
            on_event(FetchEvent::Started(city));
            let result = source.fetch(city).await;
            on_event(FetchEvent::Finished(report.record(city, result)));
        }
    } else {
        let mut results = pin!(
            stream::iter(cities)
                .map(|city| async move { (city, source.fetch(city).await) })
                .buffered(concurrency)
        );
        while let Some((city, result)) = results.next().await {
            on_event(FetchEvent::Started(city));
            on_event(FetchEvent::Finished(report.record(city, result)));
        }
    }

    info!(records = report.table.len(), "table assembled");
    report
}
