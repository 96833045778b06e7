//! Weather: current conditions for a city from OpenWeatherMap, in metric units.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::sessions::Session;
use crate::tools::{Availability, ToolHandler, ToolInput, ToolKind, ToolOutput};

const DEFAULT_CITY: &str = "New York";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Weather API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("City not found.")]
    CityNotFound,
}

impl From<WeatherError> for AppError {
    fn from(e: WeatherError) -> Self {
        match e {
            WeatherError::CityNotFound => AppError::NotFound(e.to_string()),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub city: String,
    pub temperature_c: f64,
    /// Title-cased, e.g. "Light Rain".
    pub description: String,
    pub humidity_pct: f64,
    pub wind_speed_ms: f64,
}

#[derive(Debug, Deserialize)]
struct OwmResponse {
    name: Option<String>,
    main: Option<OwmMain>,
    #[serde(default)]
    weather: Vec<OwmCondition>,
    wind: Option<OwmWind>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmError {
    message: String,
}

/// A body without a `main` block means the lookup failed, whatever the status said.
fn parse_report(requested_city: &str, body: &str) -> Result<WeatherReport, WeatherError> {
    let parsed: OwmResponse = serde_json::from_str(body).map_err(|_| WeatherError::CityNotFound)?;
    let main = parsed.main.ok_or(WeatherError::CityNotFound)?;
    Ok(WeatherReport {
        city: parsed.name.unwrap_or_else(|| requested_city.to_string()),
        temperature_c: main.temp,
        description: parsed
            .weather
            .first()
            .map(|c| title_case(&c.description))
            .unwrap_or_default(),
        humidity_pct: main.humidity,
        wind_speed_ms: parsed.wind.map(|w| w.speed).unwrap_or_default(),
    })
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, WeatherError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            base_url,
        })
    }

    pub async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::CityNotFound);
        }
        if !status.is_success() {
            let message = serde_json::from_str::<OwmError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            warn!("Weather API returned {}: {}", status, message);
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        parse_report(city, &body)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct WeatherRequest {
    city: String,
}

impl Default for WeatherRequest {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
        }
    }
}

pub struct WeatherTool {
    client: Option<WeatherClient>,
}

impl WeatherTool {
    pub fn new(client: Option<WeatherClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for WeatherTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Weather
    }

    fn availability(&self) -> Availability {
        match self.client {
            Some(_) => Availability::Ready,
            None => Availability::Unavailable("WEATHER_API_KEY is not set".to_string()),
        }
    }

    async fn invoke(&self, _session: &mut Session, input: ToolInput) -> Result<ToolOutput, AppError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| AppError::ToolUnavailable("WEATHER_API_KEY is not set".to_string()))?;
        let req: WeatherRequest = input.params()?;
        let city = match req.city.trim() {
            "" => DEFAULT_CITY,
            c => c,
        };
        let report = client.current(city).await?;
        debug!(city = %report.city, "Weather fetched");
        ToolOutput::json(&report)
    }
}
