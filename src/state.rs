//! Application state - single source of truth

use chrono::{NaiveDateTime, Timelike};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::i18n::Language;
use crate::theme::{PresetInfo, ThemeMode, builtin_presets};
use crate::variant::SizeTag;

// ============================================================================
// Weather snapshot
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurrentConditions {
    /// Celsius.
    pub temperature: f32,
    /// km/h.
    pub wind_speed: f32,
    /// Degrees.
    pub wind_direction: f32,
    pub weather_code: u8,
    pub is_day: bool,
    /// Local time, `YYYY-MM-DDTHH:MM`.
    pub time: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DailyForecast {
    /// `YYYY-MM-DD`.
    pub time: Vec<String>,
    pub weather_code: Vec<u8>,
    pub temperature_max: Vec<f32>,
    pub temperature_min: Vec<f32>,
}

/// Hourly columns; the API reports gaps as null
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub relative_humidity: Vec<Option<f32>>,
    pub apparent_temperature: Vec<Option<f32>>,
}

/// One day of the forecast strip
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastDay {
    pub date: String,
    pub weather_code: u8,
    pub max: f32,
    pub min: f32,
}

/// Humidity shown when the hourly series has no value.
pub const FALLBACK_HUMIDITY: f32 = 50.0;

/// One fetched weather payload, replaced wholesale on refresh
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub daily: DailyForecast,
    pub hourly: HourlySeries,
    pub timezone: String,
}

impl WeatherSnapshot {
    pub fn humidity_at(&self, hour: usize) -> f32 {
        self.hourly
            .relative_humidity
            .get(hour)
            .copied()
            .flatten()
            .unwrap_or(FALLBACK_HUMIDITY)
    }

    pub fn apparent_temperature_at(&self, hour: usize) -> f32 {
        self.hourly
            .apparent_temperature
            .get(hour)
            .copied()
            .flatten()
            .unwrap_or(self.current.temperature)
    }

    /// Up to `n` days, stopping at the shortest daily column.
    pub fn forecast_days(&self, n: usize) -> Vec<ForecastDay> {
        let daily = &self.daily;
        daily
            .time
            .iter()
            .zip(&daily.weather_code)
            .zip(daily.temperature_max.iter().zip(&daily.temperature_min))
            .take(n)
            .map(|((date, code), (max, min))| ForecastDay {
                date: date.clone(),
                weather_code: *code,
                max: *max,
                min: *min,
            })
            .collect()
    }

    /// Hour of the observation in the location's own time zone.
    pub fn local_hour(&self) -> Option<usize> {
        NaiveDateTime::parse_from_str(&self.current.time, "%Y-%m-%dT%H:%M")
            .ok()
            .map(|t| t.hour() as usize)
    }

    /// Today's high and low, if the daily series has a first day.
    pub fn today_high_low(&self) -> Option<(f32, f32)> {
        let max = self.daily.temperature_max.first()?;
        let min = self.daily.temperature_min.first()?;
        Some((*max, *min))
    }
}

// ============================================================================
// Locations
// ============================================================================

/// Coordinates closer than this on both axes are the same place.
pub const SAME_PLACE_TOLERANCE: f64 = 0.01;

/// A geographic location
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
    /// First-level admin area (province, state).
    #[serde(default)]
    pub region: Option<String>,
}

impl Location {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
            country: None,
            region: None,
        }
    }

    pub fn same_place(&self, other: &Location) -> bool {
        (self.lat - other.lat).abs() < SAME_PLACE_TOLERANCE
            && (self.lon - other.lon).abs() < SAME_PLACE_TOLERANCE
    }

    /// "region, country" for result lists.
    pub fn subtitle(&self) -> String {
        [self.region.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Add `candidate` unless a known location is the same place.
///
/// Returns the index of the location to select: the existing match, or 0 for
/// a newly inserted entry.
pub fn merge_location(locations: &mut Vec<Location>, candidate: Location) -> usize {
    if let Some(index) = locations.iter().position(|l| l.same_place(&candidate)) {
        return index;
    }
    locations.insert(0, candidate);
    0
}

pub fn default_locations() -> Vec<Location> {
    vec![
        Location::new("秦皇岛", 39.93, 119.6),
        Location::new("London", 51.5074, -0.1278),
        Location::new("Sanya", 18.2528, 109.512),
    ]
}

// ============================================================================
// Units and card view
// ============================================================================

/// Temperature unit preference. Storage is always Celsius.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
pub enum TempUnit {
    #[default]
    #[value(name = "c")]
    Celsius,
    #[value(name = "f")]
    Fahrenheit,
}

impl TempUnit {
    pub fn toggle(&self) -> Self {
        match self {
            TempUnit::Celsius => TempUnit::Fahrenheit,
            TempUnit::Fahrenheit => TempUnit::Celsius,
        }
    }

    /// Rounded display value for a Celsius reading.
    pub fn display(&self, celsius: f32) -> i32 {
        let value = match self {
            TempUnit::Celsius => celsius,
            TempUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        };
        value.round() as i32
    }

    /// Back to Celsius from a display value.
    pub fn to_celsius(&self, value: f32) -> f32 {
        match self {
            TempUnit::Celsius => value,
            TempUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TempUnit::Celsius => "°C",
            TempUnit::Fahrenheit => "°F",
        }
    }

    /// Compact form, e.g. `74°`.
    pub fn format(&self, celsius: f32) -> String {
        format!("{}°", self.display(celsius))
    }
}

/// Which face of the large card is showing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum CardView {
    #[default]
    Main,
    Detail,
}

impl CardView {
    pub fn forward(self) -> Self {
        match self {
            CardView::Main => CardView::Detail,
            CardView::Detail => CardView::Detail,
        }
    }

    pub fn back(self) -> Self {
        match self {
            CardView::Main => CardView::Main,
            CardView::Detail => CardView::Main,
        }
    }
}

// ============================================================================
// App state
// ============================================================================

/// Placeholder pulse timing.
pub const PULSE_TICK_MS: u64 = 50;
pub const PULSE_CYCLE_TICKS: u32 = 24;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Location and weather ---
    #[debug(section = "Location", label = "Known", debug_fmt)]
    pub locations: Vec<Location>,

    #[debug(section = "Location", label = "Current")]
    pub current: usize,

    /// Weather data lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Weather", label = "Data", debug_fmt)]
    pub weather: DataResource<WeatherSnapshot>,

    /// Keeps showing the current snapshot while a fetch runs
    #[debug(section = "Weather", label = "Refreshing")]
    pub is_refreshing: bool,

    /// Latest fetch request; results from older requests are dropped
    #[debug(section = "Weather", label = "Generation")]
    pub fetch_generation: u64,

    #[debug(section = "Weather", label = "Last error", debug_fmt)]
    pub last_error: Option<String>,

    // --- Display ---
    #[debug(section = "Display", label = "Size", debug_fmt)]
    pub size: SizeTag,

    #[debug(section = "Display", label = "Unit", debug_fmt)]
    pub unit: TempUnit,

    #[debug(section = "Display", label = "Language", debug_fmt)]
    pub lang: Language,

    #[debug(section = "Display", label = "Card view", debug_fmt)]
    pub card_view: CardView,

    // --- Theme ---
    #[debug(skip)]
    pub presets: Vec<PresetInfo>,

    #[debug(section = "Theme", label = "Preset")]
    pub preset_index: usize,

    #[debug(section = "Theme", label = "Mode", debug_fmt)]
    pub mode: ThemeMode,

    // --- Search (skipped) ---
    #[debug(skip)]
    pub search_mode: bool,

    #[debug(skip)]
    pub search_query: String,

    #[debug(skip)]
    pub search_results: Vec<Location>,

    /// A search request is outstanding
    #[debug(skip)]
    pub searching: bool,

    #[debug(skip)]
    pub search_selected: usize,

    // --- Animation (skipped) ---
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(locations: Vec<Location>) -> Self {
        let presets: Vec<PresetInfo> = builtin_presets().iter().map(PresetInfo::from).collect();
        let mode = presets.first().map(|p| p.mode).unwrap_or_default();
        Self {
            locations,
            current: 0,
            weather: DataResource::Empty,
            is_refreshing: false,
            fetch_generation: 0,
            last_error: None,
            size: SizeTag::default(),
            unit: TempUnit::default(),
            lang: Language::default(),
            card_view: CardView::default(),
            presets,
            preset_index: 0,
            mode,
            search_mode: false,
            search_query: String::new(),
            search_results: Vec::new(),
            searching: false,
            search_selected: 0,
            tick_count: 0,
        }
    }

    pub fn current_location(&self) -> Option<&Location> {
        self.locations.get(self.current)
    }

    pub fn location_name(&self) -> &str {
        self.current_location().map(|l| l.name.as_str()).unwrap_or("")
    }

    pub fn active_preset(&self) -> Option<&PresetInfo> {
        self.presets.get(self.preset_index)
    }

    pub fn preset_name(&self) -> &str {
        self.active_preset().map(|p| p.name.as_str()).unwrap_or("classic")
    }

    /// Show the placeholder instead of data.
    pub fn is_loading(&self) -> bool {
        self.weather.is_loading() || self.is_refreshing
    }

    /// 0.0..=1.0 triangle wave for the placeholder pulse.
    pub fn pulse(&self) -> f32 {
        let cycle = PULSE_CYCLE_TICKS.max(2);
        let phase = self.tick_count % cycle;
        let half = cycle / 2;
        let rising = if phase <= half { phase } else { cycle - phase };
        rising as f32 / half as f32
    }

    pub(crate) fn reset_search(&mut self) {
        self.search_query.clear();
        self.search_results.clear();
        self.searching = false;
        self.search_selected = 0;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(default_locations())
    }
}
