use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{
        CurrentWeather, DailyWeather, HourlyWeather, SupportedLanguage, TimeFormat, Units,
        Weather, WeatherInfo,
    },
};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const ONE_CALL_PATH: &str = "/data/2.5/onecall";
const DAY_PATTERN: &str = "%A %d/%-m";

/// Typed binding over the One Call endpoint. Holds the HTTP client, the API
/// key and the base URL; tests point the base URL at a local mock server.
#[derive(Debug, Clone)]
pub struct OpenWeatherService {
    http: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherService {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    /// Issue the provider request and return the typed payload.
    ///
    /// Failures are classified before they cross this boundary: non-success
    /// statuses through [`WeatherError::from_status`], transport errors
    /// through `From<reqwest::Error>`, parse failures as `Generic`.
    pub async fn get_weather_data(
        &self,
        longitude: f64,
        latitude: f64,
        excluded_info: &str,
        units: Units,
        language: SupportedLanguage,
    ) -> Result<WeatherResponse, WeatherError> {
        let url = format!("{}{}", self.base_url, ONE_CALL_PATH);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lon", longitude.to_string()),
                ("lat", latitude.to_string()),
                ("exclude", excluded_info.to_string()),
                ("units", units.as_str().to_string()),
                ("lang", language.code().to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::from_status(status));
        }

        let body = res.text().await?;

        let parsed: WeatherResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Generic(format!("failed to parse weather payload: {e}")))?;

        Ok(parsed)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherResponse {
    pub current: CurrentWeatherResponse,
    #[serde(default)]
    pub hourly: Vec<HourlyWeatherResponse>,
    #[serde(default)]
    pub daily: Vec<DailyWeatherResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherResponse {
    pub dt: i64,
    pub temp: f64,
    pub feels_like: f64,
    #[serde(default)]
    pub weather: Vec<WeatherInfoResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyWeatherResponse {
    pub dt: i64,
    pub temp: f64,
    #[serde(default)]
    pub weather: Vec<WeatherInfoResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyWeatherResponse {
    pub dt: i64,
    pub temp: DailyTemperatureResponse,
    #[serde(default)]
    pub weather: Vec<WeatherInfoResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyTemperatureResponse {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherInfoResponse {
    pub main: String,
    pub description: String,
    pub icon: String,
}

impl WeatherResponse {
    /// Map the provider payload into the domain model, shaping display
    /// fields by the requested unit system and time format.
    pub fn to_core_model(&self, units: Units, format: TimeFormat) -> Weather {
        Weather {
            current: CurrentWeather {
                temperature: format_temperature(self.current.temp, units),
                feels_like: format_temperature(self.current.feels_like, units),
                conditions: map_conditions(&self.current.weather),
            },
            hourly: self
                .hourly
                .iter()
                .map(|hour| HourlyWeather {
                    temperature: format_temperature(hour.temp, units),
                    forecasted_time: format_time(hour.dt, format.hour_pattern()),
                    conditions: map_conditions(&hour.weather),
                })
                .collect(),
            daily: self
                .daily
                .iter()
                .map(|day| DailyWeather {
                    max_temp: format_temperature(day.temp.max, units),
                    min_temp: format_temperature(day.temp.min, units),
                    forecasted_time: format_time(day.dt, DAY_PATTERN),
                    conditions: map_conditions(&day.weather),
                })
                .collect(),
        }
    }
}

fn map_conditions(conditions: &[WeatherInfoResponse]) -> Vec<WeatherInfo> {
    conditions
        .iter()
        .map(|info| WeatherInfo {
            main: info.main.clone(),
            description: info.description.clone(),
            icon: info.icon.clone(),
        })
        .collect()
}

fn format_temperature(value: f64, units: Units) -> String {
    format!("{}{}", value.round() as i64, units.temp_symbol())
}

fn format_time(ts: i64, pattern: &str) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.format(pattern).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> WeatherResponse {
        serde_json::from_str(
            r#"{
                "current": {
                    "dt": 1695016200,
                    "temp": 22.4,
                    "feels_like": 21.6,
                    "weather": [
                        {"main": "Clear", "description": "clear sky", "icon": "01d"}
                    ]
                },
                "hourly": [
                    {
                        "dt": 1695019800,
                        "temp": 23.1,
                        "weather": [
                            {"main": "Clouds", "description": "few clouds", "icon": "02d"}
                        ]
                    }
                ],
                "daily": [
                    {
                        "dt": 1695034800,
                        "temp": {"min": 16.2, "max": 24.9},
                        "weather": [
                            {"main": "Rain", "description": "light rain", "icon": "10d"}
                        ]
                    }
                ]
            }"#,
        )
        .expect("fixture should parse")
    }

    #[test]
    fn maps_metric_payload_with_twelve_hour_times() {
        let weather = fixture().to_core_model(Units::Metric, TimeFormat::TwelveHour);

        assert_eq!(weather.current.temperature, "22°C");
        assert_eq!(weather.current.feels_like, "22°C");
        assert_eq!(weather.current.conditions[0].description, "clear sky");

        assert_eq!(weather.hourly.len(), 1);
        assert_eq!(weather.hourly[0].temperature, "23°C");
        assert_eq!(weather.hourly[0].forecasted_time, "06:50 AM");

        assert_eq!(weather.daily.len(), 1);
        assert_eq!(weather.daily[0].max_temp, "25°C");
        assert_eq!(weather.daily[0].min_temp, "16°C");
        assert_eq!(weather.daily[0].forecasted_time, "Monday 18/9");
    }

    #[test]
    fn maps_hourly_times_in_twenty_four_hour_format() {
        let weather = fixture().to_core_model(Units::Metric, TimeFormat::TwentyFourHour);

        assert_eq!(weather.hourly[0].forecasted_time, "06:50");
    }

    #[test]
    fn imperial_units_shape_the_temperature_symbol() {
        let weather = fixture().to_core_model(Units::Imperial, TimeFormat::TwentyFourHour);

        assert_eq!(weather.current.temperature, "22°F");
        assert_eq!(weather.daily[0].max_temp, "25°F");
    }

    #[test]
    fn missing_forecast_sections_default_to_empty() {
        let response: WeatherResponse = serde_json::from_str(
            r#"{"current": {"dt": 1695016200, "temp": 20.0, "feels_like": 19.0, "weather": []}}"#,
        )
        .expect("payload without hourly/daily should parse");

        let weather = response.to_core_model(Units::Metric, TimeFormat::TwentyFourHour);

        assert!(weather.hourly.is_empty());
        assert!(weather.daily.is_empty());
        assert!(weather.current.conditions.is_empty());
    }
}
