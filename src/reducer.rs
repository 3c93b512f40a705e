//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::api::is_searchable;
use crate::effect::Effect;
use crate::state::{AppState, CardView, merge_location};
use crate::variant::SizeTag;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather actions =====
        Action::WeatherFetch => start_fetch(state, true),

        Action::WeatherDidLoad {
            generation,
            snapshot,
        } => {
            if generation != state.fetch_generation {
                tracing::debug!(
                    generation,
                    latest = state.fetch_generation,
                    "dropping stale weather result"
                );
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Loaded(snapshot);
            state.is_refreshing = false;
            state.last_error = None;
            state.card_view = CardView::Main;
            DispatchResult::changed()
        }

        Action::WeatherDidError {
            generation,
            message,
        } => {
            if generation != state.fetch_generation {
                tracing::debug!(
                    generation,
                    latest = state.fetch_generation,
                    "dropping stale weather error"
                );
                return DispatchResult::unchanged();
            }
            tracing::warn!(error = %message, "weather fetch failed");
            // A refresh keeps the snapshot on screen.
            if !(state.is_refreshing && state.weather.is_loaded()) {
                state.weather = DataResource::Failed(message.clone());
            }
            state.is_refreshing = false;
            state.last_error = Some(message);
            DispatchResult::changed()
        }

        // ===== Location actions =====
        Action::LocationSelect(index) => {
            if index >= state.locations.len() || index == state.current {
                return DispatchResult::unchanged();
            }
            state.current = index;
            state.card_view = CardView::Main;
            start_fetch(state, false)
        }

        // ===== Search actions =====
        Action::SearchOpen => {
            state.search_mode = true;
            state.reset_search();
            DispatchResult::changed()
        }

        Action::SearchClose => {
            state.search_mode = false;
            state.reset_search();
            DispatchResult::changed_with(Effect::CancelSearch)
        }

        Action::SearchQueryChange(query) | Action::SearchQuerySubmit(query) => {
            state.search_query = query;
            state.search_selected = 0;
            request_search(state)
        }

        Action::SearchDidLoad { query, results } => {
            if !state.search_mode || query != state.search_query.trim() {
                return DispatchResult::unchanged();
            }
            state.search_results = results;
            state.searching = false;
            state.search_selected = 0;
            DispatchResult::changed()
        }

        Action::SearchSelect(index) => {
            if index < state.search_results.len() && index != state.search_selected {
                state.search_selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SearchConfirm => {
            let Some(location) = state.search_results.get(state.search_selected).cloned() else {
                return DispatchResult::unchanged();
            };

            state.search_mode = false;
            state.reset_search();
            // The place on screen was picked again: keep its snapshot.
            let on_screen = state.current_location().is_some_and(|l| l.same_place(&location));
            if on_screen && state.weather.is_loaded() {
                return DispatchResult::changed_with(Effect::CancelSearch);
            }
            state.current = merge_location(&mut state.locations, location);
            state.card_view = CardView::Main;

            let mut result = start_fetch(state, false);
            result.effects.insert(0, Effect::CancelSearch);
            result
        }

        // ===== UI actions =====
        Action::UiToggleUnits => {
            state.unit = state.unit.toggle();
            state.card_view = CardView::Main;
            DispatchResult::changed()
        }

        Action::UiToggleLanguage => {
            state.lang = state.lang.toggle();
            if state.search_mode {
                return request_search(state);
            }
            DispatchResult::changed()
        }

        Action::UiSelectSize(size) => set_size(state, size),

        Action::UiNextSize => set_size(state, state.size.next()),

        Action::UiPrevSize => set_size(state, state.size.prev()),

        // ===== Card actions =====
        Action::CardViewChange(view) => {
            if state.size != SizeTag::Large || state.card_view == view {
                return DispatchResult::unchanged();
            }
            state.card_view = view;
            DispatchResult::changed()
        }

        // ===== Theme actions =====
        Action::ThemeCycle => {
            if state.presets.is_empty() {
                return DispatchResult::unchanged();
            }
            state.preset_index = (state.preset_index + 1) % state.presets.len();
            if let Some(preset) = state.presets.get(state.preset_index) {
                state.mode = preset.mode;
            }
            DispatchResult::changed()
        }

        Action::ThemeToggleMode => {
            state.mode = state.mode.toggle();
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Bump the generation and request a fetch for the current location.
///
/// With `keep_data` a loaded snapshot stays while the new one is in flight;
/// otherwise the resource goes back to loading.
fn start_fetch(state: &mut AppState, keep_data: bool) -> DispatchResult<Effect> {
    let Some((lat, lon)) = state.current_location().map(|l| (l.lat, l.lon)) else {
        return DispatchResult::unchanged();
    };

    state.fetch_generation += 1;
    if keep_data && state.weather.is_loaded() {
        state.is_refreshing = true;
    } else {
        state.weather = DataResource::Loading;
        state.is_refreshing = false;
    }
    state.tick_count = 0;

    DispatchResult::changed_with(Effect::FetchWeather {
        generation: state.fetch_generation,
        lat,
        lon,
    })
}

/// Gate a search on the current query: short queries clear and cancel.
fn request_search(state: &mut AppState) -> DispatchResult<Effect> {
    if !is_searchable(&state.search_query) {
        state.search_results.clear();
        state.searching = false;
        return DispatchResult::changed_with(Effect::CancelSearch);
    }
    state.searching = true;
    DispatchResult::changed_with(Effect::SearchLocations {
        query: state.search_query.trim().to_string(),
        language: state.lang,
    })
}

fn set_size(state: &mut AppState, size: SizeTag) -> DispatchResult<Effect> {
    if state.size == size {
        return DispatchResult::unchanged();
    }
    state.size = size;
    DispatchResult::changed()
}
