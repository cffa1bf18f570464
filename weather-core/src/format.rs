//! Human-readable replies for a forecast record.

use std::fmt;

use crate::model::{CommandKind, ForecastRecord, round2};

/// A single labelled reading, e.g. `Humidity: 40%`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub label: &'static str,
    pub value: String,
}

impl Reading {
    /// Same text with the label in bold, for Telegram's Markdown mode.
    pub fn to_markdown(&self) -> String {
        format!("*{}:* {}", self.label, self.value)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Wind speed prints in shortest form, so a whole speed reads `4 m/s`, not `4.0 m/s`.
pub fn render(record: &ForecastRecord, kind: CommandKind) -> Reading {
    match kind {
        CommandKind::Weather => Reading {
            label: "Weather",
            value: format!("is {}", record.description),
        },
        CommandKind::Wind => Reading {
            label: "Wind Speed",
            value: format!("{} m/s", record.wind_speed_mps),
        },
        CommandKind::Temperature => Reading {
            label: "Temperature",
            value: format!("{} °C", decimal(round2(record.temperature_c))),
        },
        CommandKind::Humidity => Reading {
            label: "Humidity",
            value: format!("{}%", record.humidity_pct),
        },
    }
}

/// Shortest form of `value`, but always with a fractional digit (`22.0`).
fn decimal(value: f64) -> String {
    // Avoid printing "-0.0" for values that round to zero from below.
    let value = if value == 0.0 { 0.0 } else { value };
    let text = value.to_string();
    if text.contains('.') || !value.is_finite() {
        text
    } else {
        format!("{text}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::kelvin_to_celsius;

    fn clear_sky() -> ForecastRecord {
        ForecastRecord {
            description: "clear sky".into(),
            wind_speed_mps: 3.5,
            temperature_c: kelvin_to_celsius(295.15),
            humidity_pct: 40,
            observed_at: None,
            location_name: None,
        }
    }

    #[test]
    fn renders_each_metric() {
        let record = clear_sky();

        assert_eq!(render(&record, CommandKind::Weather).to_string(), "Weather: is clear sky");
        assert_eq!(render(&record, CommandKind::Wind).to_string(), "Wind Speed: 3.5 m/s");
        assert_eq!(
            render(&record, CommandKind::Temperature).to_string(),
            "Temperature: 22.0 °C"
        );
        assert_eq!(render(&record, CommandKind::Humidity).to_string(), "Humidity: 40%");
    }

    #[test]
    fn temperature_keeps_two_decimals() {
        let mut record = clear_sky();
        record.temperature_c = kelvin_to_celsius(288.716);
        assert_eq!(
            render(&record, CommandKind::Temperature).to_string(),
            "Temperature: 15.57 °C"
        );

        record.temperature_c = -0.001;
        assert_eq!(
            render(&record, CommandKind::Temperature).to_string(),
            "Temperature: 0.0 °C"
        );
    }

    #[test]
    fn whole_wind_speed_has_no_fraction() {
        let mut record = clear_sky();
        record.wind_speed_mps = 4.0;
        assert_eq!(render(&record, CommandKind::Wind).to_string(), "Wind Speed: 4 m/s");
    }

    #[test]
    fn markdown_bolds_the_label() {
        let reading = render(&clear_sky(), CommandKind::Humidity);
        assert_eq!(reading.to_markdown(), "*Humidity:* 40%");
    }
}
