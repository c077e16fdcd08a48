use reqwest::StatusCode;
use thiserror::Error;

/// Closed failure taxonomy for the weather-fetch pipeline.
///
/// Sources are flattened to strings so the error stays `Clone + PartialEq`
/// and can live inside view-state snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("server error (status {0})")]
    Server(u16),

    #[error("client error (status {0})")]
    Client(u16),

    #[error("unauthorized, the API key was rejected")]
    Unauthorized,

    #[error("connection failed: {0}")]
    IoConnection(String),

    #[error("unexpected error: {0}")]
    Generic(String),
}

impl WeatherError {
    /// Classify an HTTP status code. 401 is unauthorized, other 4xx are
    /// client errors, 5xx are server errors, anything else is generic.
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 => WeatherError::Unauthorized,
            code @ 400..=499 => WeatherError::Client(code),
            code @ 500..=599 => WeatherError::Server(code),
            code => WeatherError::Generic(format!("unexpected status code {code}")),
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            WeatherError::IoConnection(err.to_string())
        } else {
            WeatherError::Generic(err.to_string())
        }
    }
}
