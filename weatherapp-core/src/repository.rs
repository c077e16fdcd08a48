use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::{
    error::WeatherError,
    model::{DefaultLocation, Weather},
    remote::RemoteWeatherDataSource,
    settings::SettingsRepository,
};

#[async_trait]
pub trait WeatherRepository: Send + Sync + Debug {
    async fn fetch_weather_data(
        &self,
        location: DefaultLocation,
        language: &str,
        units: &str,
    ) -> Result<Weather, WeatherError>;
}

/// Orchestrates a weather fetch: reads the preferred time format from
/// settings, delegates to the remote source and passes the result through
/// unchanged. Stateless beyond its collaborators.
#[derive(Debug)]
pub struct DefaultWeatherRepository {
    remote: Arc<dyn RemoteWeatherDataSource>,
    settings: Arc<dyn SettingsRepository>,
}

impl DefaultWeatherRepository {
    pub fn new(
        remote: Arc<dyn RemoteWeatherDataSource>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        Self { remote, settings }
    }
}

#[async_trait]
impl WeatherRepository for DefaultWeatherRepository {
    async fn fetch_weather_data(
        &self,
        location: DefaultLocation,
        language: &str,
        units: &str,
    ) -> Result<Weather, WeatherError> {
        let format = self.settings.get_format().await;

        match self
            .remote
            .fetch_weather_data(location, language, units, format)
            .await
        {
            Ok(weather) => Ok(weather),
            Err(err) => {
                tracing::error!(error = %err, "weather fetch failed");
                Err(err)
            }
        }
    }
}
