use std::convert::TryFrom;

/// Coordinates of the location to fetch weather for, supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Unit system sent to the provider and used when shaping display fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Units {
    Metric,
    Imperial,
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    /// Symbol appended to formatted temperatures.
    pub fn temp_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => "K",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial, Units::Standard]
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "standard" => Ok(Units::Standard),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported systems: metric, imperial, standard."
            )),
        }
    }
}

/// Preferred clock format for hourly forecast times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFormat {
    TwelveHour,
    TwentyFourHour,
}

impl TimeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFormat::TwelveHour => "12 hours",
            TimeFormat::TwentyFourHour => "24 hours",
        }
    }

    /// strftime pattern applied to hourly timestamps.
    pub fn hour_pattern(&self) -> &'static str {
        match self {
            TimeFormat::TwelveHour => "%I:%M %p",
            TimeFormat::TwentyFourHour => "%H:%M",
        }
    }

    pub const fn all() -> &'static [TimeFormat] {
        &[TimeFormat::TwelveHour, TimeFormat::TwentyFourHour]
    }
}

impl std::fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TimeFormat {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "12 hours" => Ok(TimeFormat::TwelveHour),
            "24 hours" => Ok(TimeFormat::TwentyFourHour),
            _ => Err(anyhow::anyhow!(
                "Unknown time format '{value}'. Supported formats: 12 hours, 24 hours."
            )),
        }
    }
}

/// Languages the provider can localize condition descriptions into.
///
/// Display names are what settings store and screens show; codes are what the
/// provider expects in the `lang` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedLanguage {
    English,
    French,
    German,
    Spanish,
    Italian,
    Portuguese,
    Dutch,
    Polish,
    Ukrainian,
    Swahili,
}

impl SupportedLanguage {
    pub fn name(&self) -> &'static str {
        match self {
            SupportedLanguage::English => "English",
            SupportedLanguage::French => "French",
            SupportedLanguage::German => "German",
            SupportedLanguage::Spanish => "Spanish",
            SupportedLanguage::Italian => "Italian",
            SupportedLanguage::Portuguese => "Portuguese",
            SupportedLanguage::Dutch => "Dutch",
            SupportedLanguage::Polish => "Polish",
            SupportedLanguage::Ukrainian => "Ukrainian",
            SupportedLanguage::Swahili => "Swahili",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SupportedLanguage::English => "en",
            SupportedLanguage::French => "fr",
            SupportedLanguage::German => "de",
            SupportedLanguage::Spanish => "es",
            SupportedLanguage::Italian => "it",
            SupportedLanguage::Portuguese => "pt",
            SupportedLanguage::Dutch => "nl",
            SupportedLanguage::Polish => "pl",
            SupportedLanguage::Ukrainian => "ua",
            SupportedLanguage::Swahili => "sw",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|l| l.name() == name)
    }

    pub const fn all() -> &'static [SupportedLanguage] {
        &[
            SupportedLanguage::English,
            SupportedLanguage::French,
            SupportedLanguage::German,
            SupportedLanguage::Spanish,
            SupportedLanguage::Italian,
            SupportedLanguage::Portuguese,
            SupportedLanguage::Dutch,
            SupportedLanguage::Polish,
            SupportedLanguage::Ukrainian,
            SupportedLanguage::Swahili,
        ]
    }
}

/// One Call response sections that can be left out of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcludedData {
    Minutely,
    Alerts,
}

impl ExcludedData {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExcludedData::Minutely => "minutely",
            ExcludedData::Alerts => "alerts",
        }
    }
}

/// Domain weather model with display fields already shaped by the selected
/// unit system and time format.
#[derive(Debug, Clone, PartialEq)]
pub struct Weather {
    pub current: CurrentWeather,
    pub hourly: Vec<HourlyWeather>,
    pub daily: Vec<DailyWeather>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub temperature: String,
    pub feels_like: String,
    pub conditions: Vec<WeatherInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyWeather {
    pub temperature: String,
    pub forecasted_time: String,
    pub conditions: Vec<WeatherInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyWeather {
    pub max_temp: String,
    pub min_temp: String,
    pub forecasted_time: String,
    pub conditions: Vec<WeatherInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherInfo {
    pub main: String,
    pub description: String,
    pub icon: String,
}
