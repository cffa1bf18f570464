use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset between the provider's native Kelvin readings and Celsius.
pub const KELVIN_OFFSET: f64 = 273.15;

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A resolved place, always rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn rounded(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: round2(latitude),
            longitude: round2(longitude),
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Normalized conditions of the first forecast period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub description: String,
    pub wind_speed_mps: f64,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub observed_at: Option<DateTime<Utc>>,
    pub location_name: Option<String>,
}

/// Which metric a user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Weather,
    Wind,
    Temperature,
    Humidity,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Weather => "weather",
            CommandKind::Wind => "wind",
            CommandKind::Temperature => "temperature",
            CommandKind::Humidity => "humidity",
        }
    }

    pub const fn all() -> &'static [CommandKind] {
        &[
            CommandKind::Weather,
            CommandKind::Wind,
            CommandKind::Temperature,
            CommandKind::Humidity,
        ]
    }

    /// Text sent when asking the user for a location.
    pub fn prompt(&self) -> &'static str {
        match self {
            CommandKind::Weather => "Enter a Location: ",
            CommandKind::Wind => "Enter a Location for Wind Information: ",
            CommandKind::Temperature => "Enter a Location for Temperature Information: ",
            CommandKind::Humidity => "Enter a Location for Humidity Information: ",
        }
    }

    /// Line that precedes the formatted reading.
    pub fn announcement(&self) -> &'static str {
        match self {
            CommandKind::Weather => "Here's the weather!",
            CommandKind::Wind => "Here's the wind information!",
            CommandKind::Temperature => "Here's the temperature information!",
            CommandKind::Humidity => "Here's the humidity information!",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CommandKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "weather" => Ok(CommandKind::Weather),
            "wind" => Ok(CommandKind::Wind),
            "temp" | "temperature" => Ok(CommandKind::Temperature),
            "humidity" => Ok(CommandKind::Humidity),
            _ => Err(anyhow::anyhow!(
                "Unknown metric '{value}'. Supported metrics: weather, wind, temp, humidity."
            )),
        }
    }
}

impl std::str::FromStr for CommandKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandKind::try_from(s)
    }
}
