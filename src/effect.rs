//! Effects - side effects declared by the reducer

use std::time::Duration;

use tui_dispatch::{TaskKey, TaskManager};

use crate::action::Action;
use crate::api::WeatherClient;
use crate::i18n::Language;

/// Pause before each fetch so the placeholder is visible.
pub const FETCH_DISPLAY_DELAY: Duration = Duration::from_millis(400);
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

pub const WEATHER_TASK: &str = "weather";
pub const SEARCH_TASK: &str = "location_search";

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch a snapshot; the result is tagged with `generation`
    FetchWeather { generation: u64, lat: f64, lon: f64 },
    /// Debounced location search
    SearchLocations { query: String, language: Language },
    /// Drop any pending search
    CancelSearch,
}

/// Handle effects by spawning tasks
pub fn handle_effect(client: &WeatherClient, effect: Effect, tasks: &mut TaskManager<Action>) {
    match effect {
        Effect::FetchWeather {
            generation,
            lat,
            lon,
        } => {
            tracing::info!(generation, lat, lon, "fetching weather");
            let client = client.clone();
            // Same key: a newer fetch replaces the one in flight.
            tasks.spawn(WEATHER_TASK, async move {
                tokio::time::sleep(FETCH_DISPLAY_DELAY).await;
                match client.fetch_snapshot(lat, lon).await {
                    Ok(snapshot) => Action::WeatherDidLoad {
                        generation,
                        snapshot,
                    },
                    Err(e) => Action::WeatherDidError {
                        generation,
                        message: e.to_string(),
                    },
                }
            });
        }
        Effect::SearchLocations { query, language } => {
            let client = client.clone();
            tasks.debounce(SEARCH_TASK, SEARCH_DEBOUNCE, async move {
                let results = client.search_locations(&query, language).await;
                Action::SearchDidLoad { query, results }
            });
        }
        Effect::CancelSearch => {
            tasks.cancel(&TaskKey::new(SEARCH_TASK));
        }
    }
}
