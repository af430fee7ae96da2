//! Place name to IANA timezone resolution

use std::time::Duration;

use async_trait::async_trait;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::{Error, Result};

const OPEN_METEO_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Resolves a place name to the timezone observed there
#[async_trait]
pub trait TimezoneResolver: Send + Sync {
    /// Resolve `place` to an IANA timezone
    ///
    /// # Errors
    ///
    /// Returns error if the place is unknown or the lookup fails
    async fn resolve_timezone(&self, place: &str) -> Result<Tz>;
}

/// Open-Meteo geocoding search response
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    timezone: Option<String>,
}

/// Timezone lookup through the Open-Meteo geocoding API
///
/// The API returns the IANA zone of each matched place, so no separate
/// coordinate-to-zone step is needed.
pub struct OpenMeteoGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl OpenMeteoGeocoder {
    /// Create a geocoder against the public Open-Meteo endpoint
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(OPEN_METEO_GEOCODING_URL.to_string(), timeout)
    }

    /// Create a geocoder against a custom endpoint
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn with_base_url(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }
}

fn zone_from_response(place: &str, response: GeocodingResponse) -> Result<Tz> {
    let result = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| Error::Geocoding(format!("no match for {place}")))?;

    let zone = result
        .timezone
        .ok_or_else(|| Error::Geocoding(format!("no timezone for {}", result.name)))?;

    zone.parse::<Tz>()
        .map_err(|_| Error::Geocoding(format!("unknown timezone: {zone}")))
}

#[async_trait]
impl TimezoneResolver for OpenMeteoGeocoder {
    async fn resolve_timezone(&self, place: &str) -> Result<Tz> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("name", place), ("count", "1"), ("format", "json")])
            .send()
            .await
            .map_err(|e| Error::Geocoding(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| Error::Geocoding(e.to_string()))?;

        let body: GeocodingResponse = response
            .json()
            .await
            .map_err(|e| Error::Geocoding(e.to_string()))?;

        let zone = zone_from_response(place, body)?;
        tracing::debug!(place = %place, zone = %zone, "resolved timezone");
        Ok(zone)
    }
}
