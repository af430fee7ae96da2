//! Current weather lookup

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{Error, Result};

const OPENWEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Current conditions at a place
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub description: String,
    pub temp_celsius: f64,
}

/// Looks up current weather by place name
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current weather at `place`
    ///
    /// # Errors
    ///
    /// Returns error if the place is unknown or the lookup fails
    async fn current_weather(&self, place: &str) -> Result<WeatherReport>;
}

/// OpenWeatherMap response; `cod` is a number on success and a string on errors
#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    cod: serde_json::Value,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    weather: Vec<OpenWeatherCondition>,
    main: Option<OpenWeatherMain>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    temp: f64,
}

impl OpenWeatherResponse {
    fn is_ok(&self) -> bool {
        self.cod.as_u64() == Some(200) || self.cod.as_str() == Some("200")
    }

    fn into_report(self) -> Result<WeatherReport> {
        if !self.is_ok() {
            return Err(Error::Weather(
                self.message.unwrap_or_else(|| format!("status {}", self.cod)),
            ));
        }

        let description = self
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| Error::Weather("missing conditions".to_string()))?;
        let main = self
            .main
            .ok_or_else(|| Error::Weather("missing temperature".to_string()))?;

        Ok(WeatherReport {
            description,
            temp_celsius: main.temp,
        })
    }
}

/// OpenWeatherMap current-weather client (metric units)
pub struct OpenWeatherMap {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherMap {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing or the HTTP client cannot be built
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config("OpenWeatherMap API key required".to_string()));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: OPENWEATHER_URL.to_string(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMap {
    async fn current_weather(&self, place: &str) -> Result<WeatherReport> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", place), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| Error::Weather(e.to_string()))?;

        // Error statuses still carry a JSON body with `cod` and `message`
        let body: OpenWeatherResponse = response
            .json()
            .await
            .map_err(|e| Error::Weather(e.to_string()))?;

        body.into_report()
    }
}
