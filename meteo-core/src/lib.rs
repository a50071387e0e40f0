//! Core library for the `meteo` weather dashboard.
//!
//! This crate defines:
//! - The city registry and the weather-code table
//! - Fetching current conditions from Open-Meteo
//! - Assembling observations into a weather table
//! - Summary statistics and the six-panel chart dashboard
//! - Configuration handling
//!
//! It is used by `meteo-cli`, but can also be reused by other binaries or services.

pub mod city;
pub mod condition;
pub mod config;
pub mod dashboard;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod summary;

pub use city::CityCoordinate;
pub use config::Config;
pub use model::{RawObservation, WeatherRecord, WeatherTable};
pub use pipeline::{CityOutcome, FetchEvent, FetchReport, PipelineError};
pub use provider::{FetchError, ObservationSource, OpenMeteoProvider};
pub use summary::Summary;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tests::FakeSource;

    #[tokio::test]
    async fn one_success_one_failure_end_to_end() {
        let cities = vec![CityCoordinate::new("A", 0.0, 0.0), CityCoordinate::new("B", 1.0, 1.0)];
        let source = FakeSource::default().with("A", 15.0, 50.0, 4.0, 0);

        let report = pipeline::collect(&source, &cities, 1).await;
        let table = &report.table;

        assert_eq!(table.len(), 1);
        let a = &table.records()[0];
        assert_eq!(a.city, "A");
        assert_eq!(a.feels_like, 13.0);
        assert_eq!(a.condition_label, "Clear sky");
        assert_eq!(report.failures().map(|e| e.city.as_str()).collect::<Vec<_>>(), vec!["B"]);

        let summary = Summary::compute(table).expect("non-empty");
        assert_eq!(summary.mean_temperature, 15.0);
        assert_eq!(summary.highest.city, "A");
        assert_eq!(summary.lowest.city, "A");

        assert_eq!(dashboard::panels::condition_counts(table), vec![("Clear sky".to_string(), 1)]);

        if let Some(svg) = crate::dashboard::tests::draw_svg(table) {
            assert!(svg.contains(">A<") || svg.lines().any(|l| l.trim() == "A"));
            assert!(svg.contains("100.0%"));
            assert!(svg.contains("15.0°C"));
        }
    }
}
