use anyhow::Result;
use std::sync::Arc;

use crate::{
    config::Settings,
    error::LookupError,
    geocode::{Geocoder, NominatimGeocoder},
    model::{Coordinates, ForecastRecord},
    provider::{ForecastProvider, OpenWeatherProvider},
};

/// Resolver and fetcher chained together.
#[derive(Debug, Clone)]
pub struct WeatherService {
    geocoder: Arc<dyn Geocoder>,
    forecasts: Arc<dyn ForecastProvider>,
}

impl WeatherService {
    pub fn new(geocoder: Arc<dyn Geocoder>, forecasts: Arc<dyn ForecastProvider>) -> Self {
        Self { geocoder, forecasts }
    }

    /// Nominatim + OpenWeather, sharing one HTTP client.
    pub fn from_settings(settings: &Settings, weather_api_key: String) -> Result<Self> {
        let http = settings.http_client()?;

        let geocoder = NominatimGeocoder::new(settings.geocoder_url.as_str(), http.clone());
        let forecasts = OpenWeatherProvider::new(weather_api_key, settings.weather_url.as_str(), http);

        Ok(Self::new(Arc::new(geocoder), Arc::new(forecasts)))
    }

    /// Resolve `query` and fetch its forecast. The fetcher is never called
    /// when resolution fails.
    pub async fn lookup(&self, query: &str) -> Result<ForecastRecord, LookupError> {
        let coords = self.geocoder.resolve(query).await?;
        self.lookup_at(coords).await
    }

    pub async fn lookup_at(&self, coords: Coordinates) -> Result<ForecastRecord, LookupError> {
        Ok(self.forecasts.fetch(coords).await?)
    }
}
