use std::sync::Arc;
use tokio::sync::watch;

use crate::{model::TimeFormat, settings::SettingsRepository};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SettingsScreenViewState {
    pub selected_language: String,
    pub selected_units: String,
    pub selected_format: String,
    pub available_languages: Vec<String>,
    pub available_units: Vec<String>,
    pub available_formats: Vec<String>,
    pub version_info: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsScreenIntent {
    LoadSettingsScreenData,
    ChangeLanguage(String),
    ChangeUnits(String),
    ChangeTimeFormat(TimeFormat),
}

#[derive(Debug)]
pub struct SettingsViewModel {
    settings: Arc<dyn SettingsRepository>,
    state: watch::Sender<SettingsScreenViewState>,
}

impl SettingsViewModel {
    pub fn new(settings: Arc<dyn SettingsRepository>) -> Self {
        let (state, _) = watch::channel(SettingsScreenViewState::default());
        Self { settings, state }
    }

    pub fn state(&self) -> watch::Receiver<SettingsScreenViewState> {
        self.state.subscribe()
    }

    pub async fn process_intent(&self, intent: SettingsScreenIntent) {
        match intent {
            SettingsScreenIntent::LoadSettingsScreenData => self.load().await,
            SettingsScreenIntent::ChangeLanguage(language) => {
                let result = self.settings.set_language(&language).await;
                self.apply(result, |s| s.selected_language = language);
            }
            SettingsScreenIntent::ChangeUnits(units) => {
                let result = self.settings.set_units(&units).await;
                self.apply(result, |s| s.selected_units = units);
            }
            SettingsScreenIntent::ChangeTimeFormat(format) => {
                let result = self.settings.set_format(format).await;
                self.apply(result, |s| s.selected_format = format.as_str().to_string());
            }
        }
    }

    async fn load(&self) {
        // Bind the snapshot first: the borrow guard must drop before
        // set_state takes the channel's write lock, or load deadlocks.
        let loading = SettingsScreenViewState {
            is_loading: true,
            ..self.state.borrow().clone()
        };
        self.set_state(loading);

        let next = SettingsScreenViewState {
            selected_language: self.settings.get_language().await,
            selected_units: self.settings.get_units().await,
            selected_format: self.settings.get_format().await.as_str().to_string(),
            available_languages: self.settings.available_languages(),
            available_units: self.settings.available_units(),
            available_formats: self.settings.available_formats(),
            version_info: self.settings.get_app_version(),
            is_loading: false,
            error: None,
        };
        self.set_state(next);
    }

    /// Persisted mutations update the selected value; failures surface as
    /// the error field instead, leaving the selection untouched.
    fn apply(
        &self,
        result: anyhow::Result<()>,
        on_success: impl FnOnce(&mut SettingsScreenViewState),
    ) {
        let mut next = self.state.borrow().clone();
        match result {
            Ok(()) => {
                on_success(&mut next);
                next.error = None;
            }
            Err(err) => next.error = Some(err.to_string()),
        }
        self.set_state(next);
    }

    fn set_state(&self, next: SettingsScreenViewState) {
        let _ = self.state.send_replace(next);
    }
}
