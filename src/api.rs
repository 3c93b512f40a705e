//! Open-Meteo API client

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::i18n::Language;
use crate::state::{CurrentConditions, DailyForecast, HourlySeries, Location, WeatherSnapshot};

pub const FORECAST_BASE_URL: &str = "https://api.open-meteo.com";
pub const GEOCODING_BASE_URL: &str = "https://geocoding-api.open-meteo.com";

/// Most results a location search returns.
pub const SEARCH_LIMIT: usize = 5;

/// Shorter (trimmed) queries never reach the network.
pub const MIN_QUERY_CHARS: usize = 2;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(StatusCode),
    #[error("location not found: {0}")]
    NotFound(String),
}

/// True when a query is long enough to search for.
pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    timezone: String,
    current_weather: CurrentWeather,
    #[serde(default)]
    daily: Option<DailyBlock>,
    #[serde(default)]
    hourly: Option<HourlyBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f32,
    #[serde(default)]
    windspeed: f32,
    #[serde(default)]
    winddirection: f32,
    weathercode: u8,
    #[serde(default = "daytime")]
    is_day: u8,
    #[serde(default)]
    time: String,
}

fn daytime() -> u8 {
    1
}

#[derive(Debug, Default, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    weather_code: Vec<u8>,
    #[serde(default)]
    temperature_2m_max: Vec<f32>,
    #[serde(default)]
    temperature_2m_min: Vec<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct HourlyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f32>>,
    #[serde(default)]
    apparent_temperature: Vec<Option<f32>>,
}

impl From<ForecastResponse> for WeatherSnapshot {
    fn from(response: ForecastResponse) -> Self {
        let current = response.current_weather;
        let daily = response.daily.unwrap_or_default();
        let hourly = response.hourly.unwrap_or_default();
        WeatherSnapshot {
            current: CurrentConditions {
                temperature: current.temperature,
                wind_speed: current.windspeed,
                wind_direction: current.winddirection,
                weather_code: current.weathercode,
                is_day: current.is_day != 0,
                time: current.time,
            },
            daily: DailyForecast {
                time: daily.time,
                weather_code: daily.weather_code,
                temperature_max: daily.temperature_2m_max,
                temperature_min: daily.temperature_2m_min,
            },
            hourly: HourlySeries {
                time: hourly.time,
                relative_humidity: hourly.relative_humidity_2m,
                apparent_temperature: hourly.apparent_temperature,
            },
            timezone: response.timezone,
        }
    }
}

/// Geocoding API response from Open-Meteo
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        Location {
            name: result.name,
            lat: result.latitude,
            lon: result.longitude,
            country: result.country,
            region: result.admin1,
        }
    }
}

fn parse_locations(response: GeocodingResponse) -> Vec<Location> {
    response
        .results
        .unwrap_or_default()
        .into_iter()
        .take(SEARCH_LIMIT)
        .map(Location::from)
        .collect()
}

// ============================================================================
// Client
// ============================================================================

/// Forecast and geocoding client with overridable base URLs
#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: reqwest::Client,
    forecast_base: String,
    geocoding_base: String,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    pub fn new() -> Self {
        Self::with_base_urls(FORECAST_BASE_URL, GEOCODING_BASE_URL)
    }

    pub fn with_base_urls(
        forecast_base: impl Into<String>,
        geocoding_base: impl Into<String>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            forecast_base: forecast_base.into().trim_end_matches('/').to_string(),
            geocoding_base: geocoding_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn forecast_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "{}/v1/forecast?latitude={}&longitude={}&current_weather=true\
             &daily=weather_code,temperature_2m_max,temperature_2m_min\
             &hourly=relative_humidity_2m,apparent_temperature&timezone=auto",
            self.forecast_base, lat, lon
        )
    }

    pub fn search_url(&self, query: &str, language: Language) -> String {
        format!(
            "{}/v1/search?name={}&count={}&language={}&format=json",
            self.geocoding_base,
            urlencoding::encode(query.trim()),
            SEARCH_LIMIT,
            language.code()
        )
    }

    /// Fetch current conditions, five-day forecast and hourly series.
    pub async fn fetch_snapshot(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot, ApiError> {
        let url = self.forecast_url(lat, lon);
        tracing::debug!(%url, "fetching forecast");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let data: ForecastResponse = response.json().await?;
        Ok(data.into())
    }

    /// Typeahead search. Never fails: errors come back as no results.
    pub async fn search_locations(&self, query: &str, language: Language) -> Vec<Location> {
        if !is_searchable(query) {
            return Vec::new();
        }
        match self.try_search(query, language).await {
            Ok(locations) => locations,
            Err(e) => {
                tracing::warn!(query, error = %e, "location search failed");
                Vec::new()
            }
        }
    }

    /// Resolve a city name to its first search hit.
    pub async fn geocode_city(&self, city: &str, language: Language) -> Result<Location, ApiError> {
        self.try_search(city, language)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(city.to_string()))
    }

    async fn try_search(&self, query: &str, language: Language) -> Result<Vec<Location>, ApiError> {
        let response = self.http.get(self.search_url(query, language)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let data: GeocodingResponse = response.json().await?;
        Ok(parse_locations(data))
    }
}
