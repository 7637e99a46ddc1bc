//! HTTP client for the OpenWeatherMap forecast endpoint.

use std::time::Duration;

use crate::error::WeatherError;
use crate::types::{ForecastResponse, WeatherSummary};

/// Number of 3-hour forecast blocks to request: the current one and the next.
const FORECAST_COUNT: u32 = 2;

/// Client for the OpenWeatherMap 5-day/3-hour forecast API.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl WeatherClient {
    /// Creates a client with the forecast URL, credential, and request
    /// timeout fixed for its lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        })
    }

    /// Creates a client from application configuration, pointed at the
    /// production OpenWeatherMap endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &windrose_core::AppConfig) -> Result<Self, WeatherError> {
        Self::new(
            "https://api.openweathermap.org/data/2.5/forecast",
            config.open_weather_api_key.clone(),
            config.request_timeout_secs,
        )
    }

    /// Fetches the forecast for the next two 3-hour blocks and summarises it.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::Http`] — transport failure or timeout.
    /// - [`WeatherError::UnexpectedStatus`] — non-2xx response (e.g. 401 for
    ///   a bad credential).
    /// - [`WeatherError::Deserialize`] — body is not a valid forecast.
    /// - [`WeatherError::MissingForecast`] — fewer than two entries returned.
    pub async fn fetch_summary(&self, lon: f64, lat: f64) -> Result<WeatherSummary, WeatherError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
                ("cnt", FORECAST_COUNT.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().await?;
        let forecast: ForecastResponse =
            serde_json::from_str(&body).map_err(WeatherError::Deserialize)?;

        tracing::debug!(entries = forecast.list.len(), "decoded weather forecast");

        WeatherSummary::from_forecast(&forecast).ok_or(WeatherError::MissingForecast {
            count: forecast.list.len(),
        })
    }
}
