//! Forward geocoding: free-text place names to coordinates.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{
    error::{GeocodeError, truncate_body},
    model::Coordinates,
};

#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Resolve `query` to a single best-match location.
    async fn resolve(&self, query: &str) -> Result<Coordinates, GeocodeError>;
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    http: Client,
}

/// Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    async fn search(&self, query: &str) -> Result<Coordinates, GeocodeError> {
        let url = format!("{}/search", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(GeocodeError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let places: Vec<NominatimPlace> = serde_json::from_str(&body)
            .map_err(|e| GeocodeError::Malformed(format!("{e}: {}", truncate_body(&body))))?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(query.to_string()))?;

        let latitude = parse_degrees(&place.lat, "lat")?;
        let longitude = parse_degrees(&place.lon, "lon")?;

        Ok(Coordinates::rounded(latitude, longitude))
    }
}

fn parse_degrees(raw: &str, field: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeocodeError::Malformed(format!("{field} is not a number: '{raw}'")))
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, query: &str) -> Result<Coordinates, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            tracing::warn!(query, "Location not found for empty input");
            return Err(GeocodeError::NotFound(String::new()));
        }

        match self.search(query).await {
            Ok(coords) => {
                tracing::info!(
                    latitude = coords.latitude,
                    longitude = coords.longitude,
                    query,
                    "Resolved location"
                );
                Ok(coords)
            }
            Err(err @ GeocodeError::NotFound(_)) => {
                tracing::warn!(query, "Location not found for input");
                Err(err)
            }
            Err(err) => {
                tracing::error!(query, error = %err, "Geocoding failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_degrees_accepts_nominatim_strings() {
        assert_eq!(parse_degrees("48.8588897", "lat").unwrap(), 48.8588897);
        assert_eq!(parse_degrees(" -0.1276 ", "lon").unwrap(), -0.1276);
    }

    #[test]
    fn parse_degrees_rejects_garbage() {
        let err = parse_degrees("north", "lat").unwrap_err();
        assert!(matches!(err, GeocodeError::Malformed(_)));
        assert!(parse_degrees("NaN", "lat").is_err());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let geocoder = NominatimGeocoder::new("http://localhost:1234/", Client::new());
        assert_eq!(geocoder.base_url, "http://localhost:1234");
    }

    #[tokio::test]
    async fn blank_query_is_not_found_without_a_request() {
        // Unroutable address: a request would fail with a transport error instead.
        let geocoder = NominatimGeocoder::new("http://127.0.0.1:9", Client::new());
        let err = geocoder.resolve("   ").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
