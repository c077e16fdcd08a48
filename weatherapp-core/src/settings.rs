use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
};
use tokio::sync::RwLock;

use crate::model::{SupportedLanguage, TimeFormat, Units};

/// User preferences stored on disk as TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// OpenWeather API key, entered via `weatherapp configure`.
    pub api_key: Option<String>,

    /// Display name of the preferred language, e.g. "English".
    pub language: String,

    /// Unit system query value, e.g. "metric".
    pub units: String,

    /// Clock format for hourly forecast times, e.g. "24 hours".
    pub time_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            language: SupportedLanguage::English.name().to_string(),
            units: Units::Metric.as_str().to_string(),
            time_format: TimeFormat::TwentyFourHour.as_str().to_string(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if no file exists yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no settings file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the settings file.
    pub fn settings_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherapp", "weatherapp-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("settings.toml"))
    }
}

/// Read/write access to user preferences, plus the option lists screens
/// render. Reads are single-shot snapshots of the latest value.
#[async_trait]
pub trait SettingsRepository: Send + Sync + Debug {
    async fn get_language(&self) -> String;
    async fn set_language(&self, language: &str) -> Result<()>;

    async fn get_units(&self) -> String;
    async fn set_units(&self, units: &str) -> Result<()>;

    async fn get_format(&self) -> TimeFormat;
    async fn set_format(&self, format: TimeFormat) -> Result<()>;

    async fn get_api_key(&self) -> Option<String>;
    async fn set_api_key(&self, api_key: &str) -> Result<()>;

    fn get_app_version(&self) -> String;

    fn available_languages(&self) -> Vec<String> {
        SupportedLanguage::all()
            .iter()
            .map(|l| l.name().to_string())
            .collect()
    }

    fn available_units(&self) -> Vec<String> {
        Units::all().iter().map(|u| u.as_str().to_string()).collect()
    }

    fn available_formats(&self) -> Vec<String> {
        TimeFormat::all().iter().map(|f| f.as_str().to_string()).collect()
    }
}

/// Settings repository backed by the on-disk TOML file. The latest values
/// are kept in memory; every mutation is persisted before it is visible.
#[derive(Debug)]
pub struct DefaultSettingsRepository {
    path: PathBuf,
    state: RwLock<Settings>,
}

impl DefaultSettingsRepository {
    pub fn new(path: PathBuf, settings: Settings) -> Self {
        Self {
            path,
            state: RwLock::new(settings),
        }
    }

    /// Open the repository at the platform settings path.
    pub fn from_disk() -> Result<Self> {
        let path = Settings::settings_file_path()?;
        let settings = Settings::load_from(&path)?;
        Ok(Self::new(path, settings))
    }

    pub fn settings_path(&self) -> &Path {
        &self.path
    }

    async fn update(&self, mutate: impl FnOnce(&mut Settings)) -> Result<()> {
        let mut state = self.state.write().await;
        mutate(&mut state);
        state.save_to(&self.path)
    }
}

#[async_trait]
impl SettingsRepository for DefaultSettingsRepository {
    async fn get_language(&self) -> String {
        self.state.read().await.language.clone()
    }

    async fn set_language(&self, language: &str) -> Result<()> {
        let language = SupportedLanguage::from_name(language)
            .ok_or_else(|| anyhow!("Unsupported language '{language}'"))?;
        self.update(|s| s.language = language.name().to_string()).await
    }

    async fn get_units(&self) -> String {
        self.state.read().await.units.clone()
    }

    async fn set_units(&self, units: &str) -> Result<()> {
        let units = Units::try_from(units)?;
        self.update(|s| s.units = units.as_str().to_string()).await
    }

    async fn get_format(&self) -> TimeFormat {
        let stored = self.state.read().await.time_format.clone();
        TimeFormat::try_from(stored.as_str()).unwrap_or(TimeFormat::TwentyFourHour)
    }

    async fn set_format(&self, format: TimeFormat) -> Result<()> {
        self.update(|s| s.time_format = format.as_str().to_string()).await
    }

    async fn get_api_key(&self) -> Option<String> {
        self.state.read().await.api_key.clone()
    }

    async fn set_api_key(&self, api_key: &str) -> Result<()> {
        let api_key = api_key.to_string();
        self.update(|s| s.api_key = Some(api_key)).await
    }

    fn get_app_version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}
