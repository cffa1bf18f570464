use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{FetchError, truncate_body},
    model::{Coordinates, ForecastRecord, kelvin_to_celsius},
};

use super::ForecastProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: impl Into<String>, http: Client) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    async fn fetch_forecast(&self, coords: Coordinates) -> Result<ForecastRecord, FetchError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwForecastResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::Malformed(format!("{e}: {}", truncate_body(&body))))?;

        parsed.into_record()
    }
}

// Every nested field is optional so that a missing one is reported by name
// instead of as a generic parse failure.

#[derive(Debug, Default, Deserialize)]
struct OwMain {
    temp: Option<f64>,
    humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: Option<i64>,
    main: Option<OwMain>,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: Option<OwWind>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: Option<OwCity>,
    #[serde(default)]
    list: Vec<OwForecastEntry>,
}

impl OwForecastResponse {
    /// The first period stands in for the current conditions; periods are not
    /// matched against the current time.
    fn into_record(self) -> Result<ForecastRecord, FetchError> {
        let location_name = self.city.and_then(|city| match (city.name, city.country) {
            (Some(name), Some(country)) if !country.is_empty() => Some(format!("{name}, {country}")),
            (Some(name), _) => Some(name),
            _ => None,
        });

        let entry = self.list.into_iter().next().ok_or(FetchError::NoPeriods)?;

        let description = entry
            .weather
            .into_iter()
            .next()
            .and_then(|w| w.description)
            .ok_or(FetchError::MissingField("weather[0].description"))?;

        let wind_speed_mps = entry
            .wind
            .and_then(|w| w.speed)
            .ok_or(FetchError::MissingField("wind.speed"))?;

        let main = entry.main.ok_or(FetchError::MissingField("main"))?;
        let temp_kelvin = main.temp.ok_or(FetchError::MissingField("main.temp"))?;
        let humidity_pct = main.humidity.ok_or(FetchError::MissingField("main.humidity"))?;

        Ok(ForecastRecord {
            description,
            wind_speed_mps,
            temperature_c: kelvin_to_celsius(temp_kelvin),
            humidity_pct,
            observed_at: entry.dt.and_then(unix_to_utc),
            location_name,
        })
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    async fn fetch(&self, coords: Coordinates) -> Result<ForecastRecord, FetchError> {
        match self.fetch_forecast(coords).await {
            Ok(record) => {
                tracing::debug!(
                    latitude = coords.latitude,
                    longitude = coords.longitude,
                    description = %record.description,
                    "Fetched forecast"
                );
                Ok(record)
            }
            Err(err) => {
                tracing::error!(
                    latitude = coords.latitude,
                    longitude = coords.longitude,
                    error = %err,
                    "Forecast fetch failed"
                );
                Err(err)
            }
        }
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}
