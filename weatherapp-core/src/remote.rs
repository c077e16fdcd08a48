use crate::{
    error::WeatherError,
    model::{DefaultLocation, ExcludedData, SupportedLanguage, TimeFormat, Units, Weather},
    remote::openweather::OpenWeatherService,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Boundary to the weather provider. Implementations classify every failure
/// into [`WeatherError`] and never let a raw transport error escape.
#[async_trait]
pub trait RemoteWeatherDataSource: Send + Sync + Debug {
    async fn fetch_weather_data(
        &self,
        location: DefaultLocation,
        language: &str,
        units: &str,
        format: TimeFormat,
    ) -> Result<Weather, WeatherError>;
}

#[derive(Debug)]
pub struct DefaultRemoteWeatherDataSource {
    service: OpenWeatherService,
}

impl DefaultRemoteWeatherDataSource {
    pub fn new(service: OpenWeatherService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RemoteWeatherDataSource for DefaultRemoteWeatherDataSource {
    async fn fetch_weather_data(
        &self,
        location: DefaultLocation,
        language: &str,
        units: &str,
        format: TimeFormat,
    ) -> Result<Weather, WeatherError> {
        let language = SupportedLanguage::from_name(language)
            .ok_or_else(|| WeatherError::Generic(format!("unsupported language '{language}'")))?;

        let units = Units::try_from(units).map_err(|e| WeatherError::Generic(e.to_string()))?;

        let excluded = format!(
            "{},{}",
            ExcludedData::Minutely.as_str(),
            ExcludedData::Alerts.as_str()
        );

        let response = self
            .service
            .get_weather_data(
                location.longitude,
                location.latitude,
                &excluded,
                units,
                language,
            )
            .await?;

        Ok(response.to_core_model(units, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unsupported_language_is_generic_error() {
        let source =
            DefaultRemoteWeatherDataSource::new(OpenWeatherService::new("KEY".to_string()));
        let location = DefaultLocation { latitude: 12.90, longitude: 10.0 };

        let result = source
            .fetch_weather_data(location, "Klingon", "metric", TimeFormat::TwentyFourHour)
            .await;

        assert!(matches!(result, Err(WeatherError::Generic(msg)) if msg.contains("Klingon")));
    }

    #[tokio::test]
    async fn unknown_unit_system_is_generic_error() {
        let source =
            DefaultRemoteWeatherDataSource::new(OpenWeatherService::new("KEY".to_string()));
        let location = DefaultLocation { latitude: 12.90, longitude: 10.0 };

        let result = source
            .fetch_weather_data(location, "English", "kelvinish", TimeFormat::TwentyFourHour)
            .await;

        assert!(matches!(result, Err(WeatherError::Generic(_))));
    }
}
