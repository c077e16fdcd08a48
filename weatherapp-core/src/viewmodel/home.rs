use std::sync::Arc;
use tokio::sync::watch;

use crate::{
    error::WeatherError,
    model::{DefaultLocation, Weather},
    repository::WeatherRepository,
    settings::SettingsRepository,
};

/// Snapshot of everything the home screen renders. Loading, data and error
/// are mutually exclusive per render cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeScreenViewState {
    pub language: String,
    pub units: String,
    pub is_loading: bool,
    pub weather: Option<Weather>,
    pub error: Option<WeatherError>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HomeScreenIntent {
    LoadWeatherData { location: DefaultLocation },
    /// User-initiated retry after an error; re-enters the load path.
    Retry { location: DefaultLocation },
}

#[derive(Debug)]
pub struct HomeViewModel {
    repository: Arc<dyn WeatherRepository>,
    settings: Arc<dyn SettingsRepository>,
    state: watch::Sender<HomeScreenViewState>,
}

impl HomeViewModel {
    pub fn new(
        repository: Arc<dyn WeatherRepository>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        let (state, _) = watch::channel(HomeScreenViewState::default());
        Self {
            repository,
            settings,
            state,
        }
    }

    pub fn state(&self) -> watch::Receiver<HomeScreenViewState> {
        self.state.subscribe()
    }

    pub async fn process_intent(&self, intent: HomeScreenIntent) {
        match intent {
            HomeScreenIntent::LoadWeatherData { location }
            | HomeScreenIntent::Retry { location } => self.load(location).await,
        }
    }

    async fn load(&self, location: DefaultLocation) {
        let language = self.settings.get_language().await;
        let units = self.settings.get_units().await;

        self.set_state(HomeScreenViewState {
            language: language.clone(),
            units: units.clone(),
            is_loading: true,
            weather: None,
            error: None,
        });

        let result = self
            .repository
            .fetch_weather_data(location, &language, &units)
            .await;

        let next = match result {
            Ok(weather) => HomeScreenViewState {
                language,
                units,
                is_loading: false,
                weather: Some(weather),
                error: None,
            },
            Err(err) => HomeScreenViewState {
                language,
                units,
                is_loading: false,
                weather: None,
                error: Some(err),
            },
        };
        self.set_state(next);
    }

    fn set_state(&self, next: HomeScreenViewState) {
        // send_replace publishes even with no live receivers.
        let _ = self.state.send_replace(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CurrentWeather, TimeFormat, Weather,
    };
    use anyhow::Result;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    fn test_weather() -> Weather {
        Weather {
            current: CurrentWeather {
                temperature: "22°C".to_string(),
                feels_like: "22°C".to_string(),
                conditions: vec![],
            },
            hourly: vec![],
            daily: vec![],
        }
    }

    #[derive(Debug)]
    struct FakeWeatherRepository {
        result: Result<Weather, WeatherError>,
        /// When set, the fetch blocks until notified so tests can observe
        /// the loading snapshot.
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl WeatherRepository for FakeWeatherRepository {
        async fn fetch_weather_data(
            &self,
            _location: DefaultLocation,
            _language: &str,
            _units: &str,
        ) -> Result<Weather, WeatherError> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.result.clone()
        }
    }

    #[derive(Debug)]
    struct FakeSettingsRepository;

    #[async_trait]
    impl SettingsRepository for FakeSettingsRepository {
        async fn get_language(&self) -> String {
            "English".to_string()
        }
        async fn set_language(&self, _language: &str) -> Result<()> {
            Ok(())
        }
        async fn get_units(&self) -> String {
            "metric".to_string()
        }
        async fn set_units(&self, _units: &str) -> Result<()> {
            Ok(())
        }
        async fn get_format(&self) -> TimeFormat {
            TimeFormat::TwentyFourHour
        }
        async fn set_format(&self, _format: TimeFormat) -> Result<()> {
            Ok(())
        }
        async fn get_api_key(&self) -> Option<String> {
            Some("KEY".to_string())
        }
        async fn set_api_key(&self, _api_key: &str) -> Result<()> {
            Ok(())
        }
        fn get_app_version(&self) -> String {
            "0.1.0".to_string()
        }
    }

    fn view_model(result: Result<Weather, WeatherError>, gate: Option<Arc<Notify>>) -> HomeViewModel {
        HomeViewModel::new(
            Arc::new(FakeWeatherRepository { result, gate }),
            Arc::new(FakeSettingsRepository),
        )
    }

    fn location() -> DefaultLocation {
        DefaultLocation { latitude: 12.90, longitude: 10.0 }
    }

    #[tokio::test]
    async fn load_intent_publishes_weather_on_success() {
        let vm = view_model(Ok(test_weather()), None);

        vm.process_intent(HomeScreenIntent::LoadWeatherData { location: location() }).await;

        let state = vm.state().borrow().clone();
        assert!(!state.is_loading);
        assert_eq!(state.weather, Some(test_weather()));
        assert_eq!(state.error, None);
        assert_eq!(state.language, "English");
        assert_eq!(state.units, "metric");
    }

    #[tokio::test]
    async fn load_intent_publishes_error_on_failure() {
        let vm = view_model(Err(WeatherError::Server(500)), None);

        vm.process_intent(HomeScreenIntent::LoadWeatherData { location: location() }).await;

        let state = vm.state().borrow().clone();
        assert!(!state.is_loading);
        assert_eq!(state.weather, None);
        assert_eq!(state.error, Some(WeatherError::Server(500)));
    }

    #[tokio::test]
    async fn loading_state_is_observable_while_fetch_is_in_flight() {
        let gate = Arc::new(Notify::new());
        let vm = Arc::new(view_model(Ok(test_weather()), Some(gate.clone())));
        let mut rx = vm.state();

        let task = tokio::spawn({
            let vm = vm.clone();
            async move {
                vm.process_intent(HomeScreenIntent::LoadWeatherData { location: location() })
                    .await;
            }
        });

        rx.changed().await.expect("loading snapshot");
        {
            let state = rx.borrow();
            assert!(state.is_loading);
            assert_eq!(state.weather, None);
            assert_eq!(state.error, None);
        }

        gate.notify_one();
        task.await.expect("intent task");

        let state = rx.borrow().clone();
        assert!(!state.is_loading);
        assert!(state.weather.is_some());
    }

    #[tokio::test]
    async fn retry_intent_reenters_the_load_path() {
        let vm = view_model(Err(WeatherError::IoConnection("refused".to_string())), None);

        vm.process_intent(HomeScreenIntent::LoadWeatherData { location: location() }).await;
        vm.process_intent(HomeScreenIntent::Retry { location: location() }).await;

        let state = vm.state().borrow().clone();
        assert_eq!(
            state.error,
            Some(WeatherError::IoConnection("refused".to_string()))
        );
        assert!(!state.is_loading);
    }
}
