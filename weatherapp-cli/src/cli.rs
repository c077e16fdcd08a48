use std::sync::Arc;

use clap::{Parser, Subcommand};
use inquire::{Confirm, Select, Text};

use weatherapp_core::remote::openweather::OpenWeatherService;
use weatherapp_core::viewmodel::{
    HomeScreenIntent, HomeScreenViewState, HomeViewModel, SettingsScreenIntent, SettingsViewModel,
};
use weatherapp_core::{
    DefaultLocation, DefaultRemoteWeatherDataSource, DefaultSettingsRepository,
    DefaultWeatherRepository, SettingsRepository, TimeFormat, Weather,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherapp", version, about = "Weather client for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the API key and display preferences interactively.
    Configure,

    /// Fetch and show the weather for a location.
    Show {
        /// Latitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Print the current settings.
    Settings,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure().await,
            Command::Show { lat, lon } => show(lat, lon).await,
            Command::Settings => print_settings().await,
        }
    }
}

async fn configure() -> anyhow::Result<()> {
    let settings = Arc::new(DefaultSettingsRepository::from_disk()?);
    let view_model = SettingsViewModel::new(settings.clone());

    view_model
        .process_intent(SettingsScreenIntent::LoadSettingsScreenData)
        .await;
    let state = view_model.state().borrow().clone();

    let api_key = Text::new("OpenWeather API key:")
        .with_help_message("Leave empty to keep the current key")
        .prompt()?;
    if !api_key.trim().is_empty() {
        settings.set_api_key(api_key.trim()).await?;
    }

    let language = Select::new("Preferred language:", state.available_languages.clone()).prompt()?;
    view_model
        .process_intent(SettingsScreenIntent::ChangeLanguage(language))
        .await;

    let units = Select::new("Unit system:", state.available_units.clone()).prompt()?;
    view_model
        .process_intent(SettingsScreenIntent::ChangeUnits(units))
        .await;

    let format = Select::new("Time format:", state.available_formats.clone()).prompt()?;
    let format = TimeFormat::try_from(format.as_str())?;
    view_model
        .process_intent(SettingsScreenIntent::ChangeTimeFormat(format))
        .await;

    let state = view_model.state().borrow().clone();
    if let Some(error) = state.error {
        anyhow::bail!("Failed to save settings: {error}");
    }

    println!("Settings saved to {}", settings.settings_path().display());
    Ok(())
}

async fn show(lat: f64, lon: f64) -> anyhow::Result<()> {
    let settings = Arc::new(DefaultSettingsRepository::from_disk()?);

    let api_key = settings.get_api_key().await.ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `weatherapp configure` and enter your OpenWeather API key."
        )
    })?;

    let service = OpenWeatherService::new(api_key);
    let repository = Arc::new(DefaultWeatherRepository::new(
        Arc::new(DefaultRemoteWeatherDataSource::new(service)),
        settings.clone(),
    ));
    let view_model = HomeViewModel::new(repository, settings);

    let location = DefaultLocation { latitude: lat, longitude: lon };
    tracing::debug!(latitude = lat, longitude = lon, "fetching weather");

    let mut intent = HomeScreenIntent::LoadWeatherData { location };
    loop {
        view_model.process_intent(intent).await;
        let state = view_model.state().borrow().clone();

        if let Some(weather) = &state.weather {
            render_weather(&state, weather);
            return Ok(());
        }

        if let Some(error) = &state.error {
            eprintln!("Could not fetch weather: {error}");
            if !Confirm::new("Try again?").with_default(false).prompt()? {
                return Ok(());
            }
            intent = HomeScreenIntent::Retry { location };
            continue;
        }

        return Ok(());
    }
}

async fn print_settings() -> anyhow::Result<()> {
    let settings = Arc::new(DefaultSettingsRepository::from_disk()?);
    let path = settings.settings_path().to_path_buf();
    let view_model = SettingsViewModel::new(settings);

    view_model
        .process_intent(SettingsScreenIntent::LoadSettingsScreenData)
        .await;
    let state = view_model.state().borrow().clone();

    println!("Language:    {}", state.selected_language);
    println!("Units:       {}", state.selected_units);
    println!("Time format: {}", state.selected_format);
    println!("Version:     {}", state.version_info);
    println!("File:        {}", path.display());
    Ok(())
}

fn render_weather(state: &HomeScreenViewState, weather: &Weather) {
    print!("Now: {}", weather.current.temperature);
    if let Some(info) = weather.current.conditions.first() {
        print!(", {}", info.description);
    }
    println!(" (feels like {})", weather.current.feels_like);

    if !weather.hourly.is_empty() {
        println!();
        println!("Next hours:");
        for hour in weather.hourly.iter().take(12) {
            let description = hour
                .conditions
                .first()
                .map(|info| info.description.as_str())
                .unwrap_or("");
            println!("  {:<9} {:>6}  {}", hour.forecasted_time, hour.temperature, description);
        }
    }

    if !weather.daily.is_empty() {
        println!();
        println!("Daily:");
        for day in &weather.daily {
            let description = day
                .conditions
                .first()
                .map(|info| info.description.as_str())
                .unwrap_or("");
            println!(
                "  {:<13} {:>6} / {:<6} {}",
                day.forecasted_time, day.max_temp, day.min_temp, description
            );
        }
    }

    println!();
    println!(
        "Fetched {} (language: {}, units: {})",
        chrono::Local::now().format("%H:%M"),
        state.language,
        state.units
    );
}
