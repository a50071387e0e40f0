use std::fmt;

use crate::{
    model::{WeatherRecord, WeatherTable},
    pipeline::{PipelineError, require_non_empty},
};

/// A temperature extreme and the city it was observed in.
#[derive(Debug, Clone, PartialEq)]
pub struct Extreme {
    pub city: String,
    pub temperature: f64,
}

/// Aggregate statistics over a non-empty table.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub mean_temperature: f64,
    pub mean_humidity: f64,
    pub mean_wind_speed: f64,
    pub highest: Extreme,
    pub lowest: Extreme,
}

impl Summary {
    pub fn compute(table: &WeatherTable) -> Result<Self, PipelineError> {
        require_non_empty(table)?;
        let records = table.records();

        // Strict comparisons keep the earliest record on ties.
        let mut highest = &records[0];
        let mut lowest = &records[0];
        for r in &records[1..] {
            if r.temperature > highest.temperature {
                highest = r;
            }
            if r.temperature < lowest.temperature {
                lowest = r;
            }
        }

        Ok(Self {
            mean_temperature: mean(records, |r| r.temperature),
            mean_humidity: mean(records, |r| r.humidity),
            mean_wind_speed: mean(records, |r| r.wind_speed),
            highest: Extreme { city: highest.city.clone(), temperature: highest.temperature },
            lowest: Extreme { city: lowest.city.clone(), temperature: lowest.temperature },
        })
    }
}

fn mean(records: &[WeatherRecord], field: impl Fn(&WeatherRecord) -> f64) -> f64 {
    records.iter().map(field).sum::<f64>() / records.len() as f64
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average Temperature: {:.2}°C", self.mean_temperature)?;
        writeln!(
            f,
            "Highest Temperature: {:.2}°C ({})",
            self.highest.temperature, self.highest.city
        )?;
        writeln!(
            f,
            "Lowest Temperature: {:.2}°C ({})",
            self.lowest.temperature, self.lowest.city
        )?;
        writeln!(f)?;
        writeln!(f, "Average Humidity: {:.2}%", self.mean_humidity)?;
        write!(f, "Average Wind Speed: {:.2} m/s", self.mean_wind_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::record;

    #[test]
    fn empty_table_is_an_error() {
        let err = Summary::compute(&WeatherTable::new()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyTable));
    }

    #[test]
    fn mean_max_min_over_three_cities() {
        let table: WeatherTable = [
            record("Cold", 10.0, 40.0, 2.0, 0),
            record("Mild", 20.0, 60.0, 4.0, 1),
            record("Hot", 30.0, 80.0, 6.0, 2),
        ]
        .into_iter()
        .collect();

        let s = Summary::compute(&table).expect("non-empty");
        assert_eq!(s.mean_temperature, 20.0);
        assert_eq!(s.mean_humidity, 60.0);
        assert_eq!(s.mean_wind_speed, 4.0);
        assert_eq!(s.highest, Extreme { city: "Hot".into(), temperature: 30.0 });
        assert_eq!(s.lowest, Extreme { city: "Cold".into(), temperature: 10.0 });
    }

    #[test]
    fn ties_pick_the_earliest_city() {
        let table: WeatherTable = [
            record("A", 5.0, 0.0, 0.0, 0),
            record("B", 25.0, 0.0, 0.0, 0),
            record("C", 25.0, 0.0, 0.0, 0),
            record("D", 5.0, 0.0, 0.0, 0),
        ]
        .into_iter()
        .collect();

        let s = Summary::compute(&table).expect("non-empty");
        assert_eq!(s.highest.city, "B");
        assert_eq!(s.lowest.city, "A");
    }

    #[test]
    fn single_record_is_both_extremes() {
        let table: WeatherTable = [record("Only", -4.0, 90.0, 8.0, 71)].into_iter().collect();
        let s = Summary::compute(&table).expect("non-empty");

        assert_eq!(s.mean_temperature, -4.0);
        assert_eq!(s.highest.city, "Only");
        assert_eq!(s.lowest.city, "Only");
    }

    #[test]
    fn display_uses_two_decimals_and_units() {
        let table: WeatherTable =
            [record("A", 10.0, 50.0, 3.0, 0), record("B", 15.5, 70.0, 5.0, 0)].into_iter().collect();
        let text = Summary::compute(&table).expect("non-empty").to_string();

        assert!(text.contains("Average Temperature: 12.75°C"));
        assert!(text.contains("Highest Temperature: 15.50°C (B)"));
        assert!(text.contains("Lowest Temperature: 10.00°C (A)"));
        assert!(text.contains("Average Humidity: 60.00%"));
        assert!(text.contains("Average Wind Speed: 4.00 m/s"));
    }
}
