//! Plain-text rendering of fetched weather.

use std::fmt;

use weatherkit_core::{DataSet, Location, PartialWeather};

/// Hours of the hourly forecast shown in text output.
const HOURS_SHOWN: usize = 12;

pub fn weather(location: Location, weather: &PartialWeather) -> String {
    WeatherReport { location, weather }.to_string()
}

struct WeatherReport<'a> {
    location: Location,
    weather: &'a PartialWeather,
}

impl fmt::Display for WeatherReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weather = self.weather;
        writeln!(f, "Weather for {}", self.location)?;

        if weather.is_empty() {
            return writeln!(f, "  (no data returned)");
        }

        if let Some(current) = &weather.current {
            writeln!(f, "\nNow ({}):", current.as_of.format("%Y-%m-%d %H:%M UTC"))?;
            writeln!(
                f,
                "  {}  {:.1}°C (feels like {:.1}°C)",
                current.condition_code, current.temperature, current.temperature_apparent
            )?;
            writeln!(
                f,
                "  humidity {:.0}%  wind {:.1} km/h  UV {}",
                current.humidity * 100.0,
                current.wind_speed,
                current.uv_index
            )?;
        }

        if let Some(next_hour) = &weather.minute {
            let peak = next_hour
                .minutes
                .iter()
                .map(|m| m.precipitation_chance)
                .fold(0.0_f64, f64::max);
            writeln!(f, "\nNext hour: peak precipitation chance {:.0}%", peak * 100.0)?;
        }

        if let Some(hourly) = &weather.hourly {
            writeln!(f, "\nHourly:")?;
            for hour in hourly.hours.iter().take(HOURS_SHOWN) {
                writeln!(
                    f,
                    "  {}  {:>5.1}°C  {:>3.0}%  {}",
                    hour.forecast_start.format("%H:%M"),
                    hour.temperature,
                    hour.precipitation_chance * 100.0,
                    hour.condition_code
                )?;
            }
        }

        if let Some(daily) = &weather.daily {
            writeln!(f, "\nDaily:")?;
            for day in &daily.days {
                writeln!(
                    f,
                    "  {}  {:>5.1}..{:<5.1}°C  {:>3.0}%  {}",
                    day.forecast_start.format("%a %d %b"),
                    day.temperature_min,
                    day.temperature_max,
                    day.precipitation_chance * 100.0,
                    day.condition_code
                )?;
            }
        }

        if let Some(alerts) = &weather.alerts {
            writeln!(f, "\nAlerts:")?;
            if alerts.alerts.is_empty() {
                writeln!(f, "  none")?;
            }
            for alert in &alerts.alerts {
                writeln!(
                    f,
                    "  [{}] {} until {} ({})",
                    alert.severity,
                    alert.description,
                    alert.expire_time.format("%Y-%m-%d %H:%M UTC"),
                    alert.source
                )?;
            }
        }

        if let Some(available) = &weather.availability {
            writeln!(f, "\nAvailable data sets: {}", join(available))?;
        }

        Ok(())
    }
}

pub fn availability(location: Location, data_sets: &[DataSet]) -> String {
    if data_sets.is_empty() {
        format!("No data sets available for {location}\n")
    } else {
        format!("Data sets available for {location}: {}\n", join(data_sets))
    }
}

fn join(data_sets: &[DataSet]) -> String {
    data_sets.iter().map(DataSet::as_str).collect::<Vec<_>>().join(", ")
}
