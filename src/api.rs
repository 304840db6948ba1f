//! OpenWeatherMap current-weather client

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::state::WeatherResult;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Errors
// ============================================================================

#[derive(thiserror::Error, Debug)]
pub enum WeatherError {
    #[error("location must not be empty")]
    EmptyLocation,

    #[error("location not found: {0}")]
    NotFound(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider error {code}: {message}")]
    Provider { code: u16, message: String },

    #[error("unexpected response: {0}")]
    Malformed(String),
}

impl WeatherError {
    /// Text for the notice shown to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyLocation => "Enter a location first".to_string(),
            Self::NotFound(_) => "Location not found!".to_string(),
            Self::Transport(e) if e.is_timeout() => {
                "The weather service did not answer in time".to_string()
            }
            Self::Transport(_) => "Could not reach the weather service".to_string(),
            Self::Provider { code: 401, .. } => "The weather API key was rejected".to_string(),
            Self::Provider { code, message } if message.is_empty() => {
                format!("Weather service error ({})", code)
            }
            Self::Provider { code, message } => {
                format!("Weather service error ({}): {}", code, message)
            }
            Self::Malformed(_) => "The weather service sent an unexpected response".to_string(),
        }
    }
}

// ============================================================================
// Response shape
// ============================================================================

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    name: String,
    main: MainReadings,
    #[serde(default)]
    visibility: Option<u32>,
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

/// The provider reports status in `cod`, as a string on errors and a number on success.
fn status_code(body: &Value) -> Option<u16> {
    match body.get("cod")? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        _ => None,
    }
}

/// Turn a decoded body into a result, or the error it describes.
fn parse_body(location: &str, body: Value) -> Result<WeatherResult, WeatherError> {
    match status_code(&body) {
        Some(404) => return Err(WeatherError::NotFound(location.to_string())),
        Some(code) if code != 200 => {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Err(WeatherError::Provider { code, message });
        }
        _ => {}
    }

    let data: WeatherResponse =
        serde_json::from_value(body).map_err(|e| WeatherError::Malformed(e.to_string()))?;
    let condition = data
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::Malformed("no weather condition in response".into()))?;

    Ok(WeatherResult {
        location: data.name,
        temperature: data.main.temp,
        description: condition.description,
        humidity: data.main.humidity,
        visibility: data.visibility,
        pressure: data.main.pressure,
    })
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn url_for(&self, location: &str) -> String {
        format!(
            "{}/data/2.5/weather?q={}&appid={}&units=metric",
            self.base_url,
            urlencoding::encode(location),
            urlencoding::encode(&self.api_key)
        )
    }

    /// Fetch current conditions (metric units) for a location name.
    pub async fn fetch_weather(&self, location: &str) -> Result<WeatherResult, WeatherError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(WeatherError::EmptyLocation);
        }

        tracing::debug!(%location, "requesting current weather");
        let response = self.http.get(self.url_for(location)).send().await?;
        let status = response.status();
        let text = response.text().await?;

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(%status, error = %e, "weather response is not JSON");
            WeatherError::Malformed(format!("HTTP {}: {}", status, e))
        })?;

        let result = parse_body(location, body);
        match &result {
            Ok(weather) => tracing::info!(
                location = %weather.location,
                temperature = weather.temperature,
                "weather loaded"
            ),
            Err(WeatherError::NotFound(_)) => tracing::info!(%location, "location not found"),
            Err(e) => tracing::warn!(%location, %status, error = %e, "weather lookup failed"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_code_accepts_string_and_number() {
        assert_eq!(status_code(&json!({"cod": "404"})), Some(404));
        assert_eq!(status_code(&json!({"cod": 200})), Some(200));
        assert_eq!(status_code(&json!({"name": "x"})), None);
    }

    #[test]
    fn test_parse_body_not_found() {
        let err = parse_body("Atlantis", json!({"cod": "404", "message": "city not found"}))
            .unwrap_err();
        assert!(matches!(err, WeatherError::NotFound(ref l) if l == "Atlantis"));
    }

    #[test]
    fn test_parse_body_provider_error() {
        let err = parse_body("Paris", json!({"cod": 401, "message": "Invalid API key"}))
            .unwrap_err();
        assert!(matches!(err, WeatherError::Provider { code: 401, .. }));
        assert_eq!(err.user_message(), "The weather API key was rejected");
    }

    #[test]
    fn test_parse_body_missing_fields_is_malformed() {
        let err = parse_body("Paris", json!({"cod": 200, "name": "Paris"})).unwrap_err();
        assert!(matches!(err, WeatherError::Malformed(_)));
    }

    #[test]
    fn test_parse_body_empty_weather_list_is_malformed() {
        let body = json!({
            "cod": 200,
            "name": "Paris",
            "visibility": 10000,
            "main": {"temp": 18.3, "humidity": 60, "pressure": 1015},
            "weather": []
        });
        assert!(matches!(
            parse_body("Paris", body),
            Err(WeatherError::Malformed(_))
        ));
    }

    #[test]
    fn test_url_encodes_location() {
        let client = WeatherClient::new("k", "http://localhost/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            client.url_for("São Paulo"),
            "http://localhost/data/2.5/weather?q=S%C3%A3o%20Paulo&appid=k&units=metric"
        );
    }
}
