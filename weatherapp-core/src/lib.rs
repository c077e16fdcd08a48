//! Core library for the `weatherapp` client.
//!
//! This crate defines:
//! - The domain model and error taxonomy for the weather-fetch pipeline
//! - The remote data source over the OpenWeather One Call API
//! - Settings handling (preferred language, units, time format)
//! - Intent/state view-models for the home and settings screens
//!
//! It is used by `weatherapp-cli`, but can also be reused by other frontends.

pub mod error;
pub mod model;
pub mod remote;
pub mod repository;
pub mod settings;
pub mod viewmodel;

pub use error::WeatherError;
pub use model::{DefaultLocation, SupportedLanguage, TimeFormat, Units, Weather};
pub use remote::{DefaultRemoteWeatherDataSource, RemoteWeatherDataSource};
pub use repository::{DefaultWeatherRepository, WeatherRepository};
pub use settings::{DefaultSettingsRepository, Settings, SettingsRepository};
