use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{city::CityCoordinate, condition};

/// Wind speed weight used by the simplified feels-like approximation.
pub const FEELS_LIKE_WIND_FACTOR: f64 = 0.5;

/// Body of an Open-Meteo forecast response, reduced to what the dashboard reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawObservation {
    pub timezone: Option<String>,
    pub current: Option<CurrentConditions>,
}

/// The `current` block. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentConditions {
    pub time: Option<String>,
    pub temperature_2m: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub wind_speed_10m: Option<f64>,
    pub weather_code: Option<i64>,
}

/// One row of the dashboard table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRecord {
    pub city: String,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub condition_code: i64,
    pub condition_label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub feels_like: f64,
    pub observed_at: Option<NaiveDateTime>,
}

impl WeatherRecord {
    /// Build a record from a `current` block, defaulting missing fields to zero.
    pub fn from_current(city: &CityCoordinate, current: &CurrentConditions) -> Self {
        let temperature = current.temperature_2m.unwrap_or(0.0);
        let wind_speed = current.wind_speed_10m.unwrap_or(0.0);
        let condition_code = current.weather_code.unwrap_or(0);

        Self {
            city: city.name.clone(),
            temperature,
            humidity: current.relative_humidity_2m.unwrap_or(0.0),
            wind_speed,
            condition_code,
            condition_label: condition::label(condition_code).to_string(),
            latitude: city.latitude,
            longitude: city.longitude,
            feels_like: feels_like(temperature, wind_speed),
            observed_at: current.time.as_deref().and_then(parse_local_time),
        }
    }
}

/// Temperature minus half the wind speed. Not a meteorological formula.
pub fn feels_like(temperature: f64, wind_speed: f64) -> f64 {
    temperature - wind_speed * FEELS_LIKE_WIND_FACTOR
}

fn parse_local_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// Records in registry order, at most one per city.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeatherTable {
    records: Vec<WeatherRecord>,
}

impl WeatherTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Returns `false` and drops it if the city is already present.
    pub fn push(&mut self, record: WeatherRecord) -> bool {
        if self.contains_city(&record.city) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn contains_city(&self, city: &str) -> bool {
        self.records.iter().any(|r| r.city == city)
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeatherRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cities(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.city.as_str()).collect()
    }
}

impl FromIterator<WeatherRecord> for WeatherTable {
    fn from_iter<I: IntoIterator<Item = WeatherRecord>>(iter: I) -> Self {
        let mut table = WeatherTable::new();
        for record in iter {
            table.push(record);
        }
        table
    }
}

impl<'a> IntoIterator for &'a WeatherTable {
    type Item = &'a WeatherRecord;
    type IntoIter = std::slice::Iter<'a, WeatherRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(city: &str, temperature: f64, humidity: f64, wind_speed: f64, code: i64) -> WeatherRecord {
        let current = CurrentConditions {
            time: None,
            temperature_2m: Some(temperature),
            relative_humidity_2m: Some(humidity),
            wind_speed_10m: Some(wind_speed),
            weather_code: Some(code),
        };
        WeatherRecord::from_current(&CityCoordinate::new(city, 0.0, 0.0), &current)
    }

    #[test]
    fn feels_like_subtracts_half_the_wind() {
        assert_eq!(feels_like(15.0, 4.0), 13.0);
        assert_eq!(feels_like(-7.5, 3.0), -9.0);
        assert_eq!(feels_like(21.3, 0.0), 21.3);
        assert_eq!(feels_like(0.0, 0.0), 0.0);
    }

    #[test]
    fn record_fields_come_from_current_block() {
        let current = CurrentConditions {
            time: Some("2024-05-01T12:15".into()),
            temperature_2m: Some(18.4),
            relative_humidity_2m: Some(62.0),
            wind_speed_10m: Some(11.2),
            weather_code: Some(61),
        };
        let city = CityCoordinate::new("Paris", 48.8566, 2.3522);
        let rec = WeatherRecord::from_current(&city, &current);

        assert_eq!(rec.city, "Paris");
        assert_eq!(rec.temperature, 18.4);
        assert_eq!(rec.humidity, 62.0);
        assert_eq!(rec.wind_speed, 11.2);
        assert_eq!(rec.condition_label, "Slight rain");
        assert_eq!(rec.latitude, 48.8566);
        assert_eq!(rec.longitude, 2.3522);
        assert_eq!(rec.feels_like, 18.4 - 11.2 * 0.5);
        assert_eq!(
            rec.observed_at.map(|t| t.format("%H:%M").to_string()).as_deref(),
            Some("12:15")
        );
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let city = CityCoordinate::new("Nowhere", 1.0, 2.0);
        let rec = WeatherRecord::from_current(&city, &CurrentConditions::default());

        assert_eq!(rec.temperature, 0.0);
        assert_eq!(rec.humidity, 0.0);
        assert_eq!(rec.wind_speed, 0.0);
        assert_eq!(rec.condition_code, 0);
        assert_eq!(rec.condition_label, "Clear sky");
        assert_eq!(rec.feels_like, 0.0);
        assert!(rec.observed_at.is_none());
    }

    #[test]
    fn unparseable_time_is_dropped() {
        let current = CurrentConditions { time: Some("yesterday".into()), ..Default::default() };
        let rec = WeatherRecord::from_current(&CityCoordinate::new("X", 0.0, 0.0), &current);
        assert!(rec.observed_at.is_none());
    }

    #[test]
    fn table_rejects_duplicate_cities() {
        let mut table = WeatherTable::new();
        assert!(table.push(record("A", 1.0, 1.0, 1.0, 0)));
        assert!(!table.push(record("A", 2.0, 2.0, 2.0, 0)));
        assert!(table.push(record("B", 3.0, 3.0, 3.0, 0)));

        assert_eq!(table.cities(), vec!["A", "B"]);
        assert_eq!(table.records()[0].temperature, 1.0);
    }

    #[test]
    fn deserialize_open_meteo_body() {
        let body = r#"{
            "latitude": 51.5, "longitude": -0.12, "timezone": "Europe/London",
            "current_units": {"temperature_2m": "°C"},
            "current": {
                "time": "2024-05-01T12:15", "interval": 900,
                "temperature_2m": 14.2, "relative_humidity_2m": 71,
                "wind_speed_10m": 9.4, "weather_code": 3
            }
        }"#;
        let raw: RawObservation = serde_json::from_str(body).expect("valid body");
        let current = raw.current.expect("current present");

        assert_eq!(raw.timezone.as_deref(), Some("Europe/London"));
        assert_eq!(current.temperature_2m, Some(14.2));
        assert_eq!(current.relative_humidity_2m, Some(71.0));
        assert_eq!(current.weather_code, Some(3));
    }

    #[test]
    fn deserialize_body_without_current() {
        let raw: RawObservation = serde_json::from_str(r#"{"latitude": 1.0}"#).expect("valid body");
        assert!(raw.current.is_none());
    }
}
