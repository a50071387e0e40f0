use chrono::Local;
use std::{fmt::Write, path::Path};

use meteo_core::{
    CityCoordinate, WeatherTable, dashboard::PANEL_TITLES, pipeline::{CityOutcome, CityReport},
};

pub const RULE: &str = "============================================================";

pub fn banner(title: &str) -> String {
    format!("{RULE}\n{title}\n{RULE}")
}

pub fn fetching(city: &CityCoordinate) -> String {
    format!("Fetching data for {}...", city.name)
}

/// Progress line for one city; `None` when the city is skipped silently.
pub fn format_outcome(report: &CityReport) -> Option<String> {
    match &report.outcome {
        CityOutcome::Recorded(r) => {
            Some(format!("  ✓ {}: {:?}°C, {}", r.city, r.temperature, r.condition_label))
        }
        CityOutcome::Duplicate(r) => {
            Some(format!("  ! {}: listed more than once; keeping the first record", r.city))
        }
        CityOutcome::Failed(e) => Some(format!("Error fetching data for {}: {}", e.city, e.cause)),
        CityOutcome::MissingData => None,
    }
}

pub fn format_table(table: &WeatherTable) -> String {
    let width = table.iter().map(|r| r.city.chars().count()).max().unwrap_or(0).max(4);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$}  {:>16}  {:>12}  {:>16}  Weather",
        "City", "Temperature (°C)", "Humidity (%)", "Wind Speed (m/s)"
    );
    for r in table {
        let _ = writeln!(
            out,
            "{:<width$}  {:>16.1}  {:>12.0}  {:>16.1}  {}",
            r.city, r.temperature, r.humidity, r.wind_speed, r.condition_label
        );
    }
    out
}

pub fn format_registry(cities: &[CityCoordinate]) -> String {
    let mut out = String::new();
    for c in cities {
        let _ = writeln!(out, "{:<16} {:>9.4} {:>10.4}", c.name, c.latitude, c.longitude);
    }
    out
}

pub fn completion(output: &Path) -> String {
    let mut out = String::from("\n📊 Your dashboard includes:\n");
    for (i, title) in PANEL_TITLES.iter().enumerate() {
        let _ = writeln!(out, "  {}. {title}", i + 1);
    }
    let _ = writeln!(out, "\n💾 File saved: {}", output.display());
    let _ = writeln!(out, "🕒 Generated at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    out
}
