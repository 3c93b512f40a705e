//! Store, component and render flows through EffectStoreTestHarness

use pretty_assertions::assert_eq;
use tactile_weather::{
    action::Action,
    components::{Component, Showcase, ShowcaseProps},
    effect::Effect,
    i18n::Language,
    reducer::reducer,
    state::{AppState, CardView, DailyForecast, Location, TempUnit, WeatherSnapshot},
    theme::StyleContext,
    variant::SizeTag,
};
use tui_dispatch::testing::*;
use tui_dispatch::{DataResource, NumericComponentId};

fn mock_weather() -> WeatherSnapshot {
    let mut snapshot = WeatherSnapshot::default();
    snapshot.current.temperature = 22.5;
    snapshot.current.weather_code = 0;
    snapshot.current.is_day = true;
    snapshot.current.time = "2024-06-01T14:00".into();
    snapshot.daily = DailyForecast {
        time: (1..=5).map(|d| format!("2024-06-{d:02}")).collect(),
        weather_code: vec![0, 2, 61, 71, 95],
        temperature_max: vec![26.0, 24.0, 19.0, 3.0, 21.0],
        temperature_min: vec![15.0, 14.0, 12.0, -2.0, 16.0],
    };
    snapshot
}

fn state_with_weather() -> AppState {
    AppState {
        weather: DataResource::Loaded(mock_weather()),
        fetch_generation: 1,
        ..Default::default()
    }
}

/// Render the whole showcase page from the harness state.
macro_rules! render_showcase {
    ($harness:expr) => {{
        let styles = StyleContext::new();
        let mut showcase = Showcase::new();
        $harness.render_plain(100, 40, |frame, area, state| {
            let props = ShowcaseProps {
                state,
                styles: &styles,
                hour: 14,
                is_focused: true,
            };
            showcase.render(frame, area, props);
        })
    }};
}

/// Feed keys through the showcase and collect the actions it returns.
macro_rules! send_showcase_keys {
    ($harness:expr, $keys:expr) => {{
        let styles = StyleContext::new();
        let mut component = Showcase::new();
        $harness.send_keys::<NumericComponentId, _, _>($keys, |state, event| {
            let props = ShowcaseProps {
                state,
                styles: &styles,
                hour: 14,
                is_focused: true,
            };
            component
                .handle_event(&event.kind, props)
                .into_iter()
                .collect::<Vec<_>>()
        })
    }};
}

// ============================================================================
// Fetch lifecycle
// ============================================================================

#[test]
fn test_weather_fetch_flow_with_harness() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::WeatherFetch);
    harness.assert_state(|s| s.weather.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::FetchWeather { generation: 1, .. }));

    harness.complete_action(Action::WeatherDidLoad {
        generation: 1,
        snapshot: mock_weather(),
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1, "Should have processed 1 action");
    assert_eq!(changed, 1, "Action should have changed state");

    harness.assert_state(|s| s.weather.is_loaded());
    harness.assert_state(|s| !s.is_loading());
}

#[test]
fn test_weather_error_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::WeatherFetch);
    harness.assert_state(|s| s.weather.is_loading());

    harness.complete_action(Action::WeatherDidError {
        generation: 1,
        message: "Network error".into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.weather.is_failed());
    harness.assert_state(|s| s.weather.error() == Some("Network error"));
    harness.assert_state(|s| s.last_error.as_deref() == Some("Network error"));
}

#[test]
fn test_stale_result_is_dropped() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Two fetches in flight; only the second may land.
    harness.dispatch_collect(Action::WeatherFetch);
    harness.dispatch_collect(Action::LocationSelect(2));
    harness.drain_effects();

    let mut stale = mock_weather();
    stale.current.temperature = -30.0;
    harness.complete_action(Action::WeatherDidLoad {
        generation: 1,
        snapshot: stale,
    });
    let (changed, _) = harness.process_emitted();
    assert_eq!(changed, 0);
    harness.assert_state(|s| s.weather.is_loading());

    harness.complete_action(Action::WeatherDidLoad {
        generation: 2,
        snapshot: mock_weather(),
    });
    harness.process_emitted();
    harness.assert_state(|s| s.weather.data().map(|d| d.current.temperature) == Some(22.5));
}

#[test]
fn test_stale_error_is_dropped() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::WeatherFetch);
    harness.dispatch_collect(Action::WeatherFetch);

    harness.complete_action(Action::WeatherDidError {
        generation: 1,
        message: "old".into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.weather.is_loading());
    harness.assert_state(|s| s.last_error.is_none());
}

#[test]
fn test_unit_toggle_with_harness() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.assert_state(|s| s.unit == TempUnit::Celsius);

    harness.dispatch_collect(Action::UiToggleUnits);
    harness.assert_state(|s| s.unit == TempUnit::Fahrenheit);

    harness.dispatch_collect(Action::UiToggleUnits);
    harness.assert_state(|s| s.unit == TempUnit::Celsius);
}

#[test]
fn test_dispatch_all() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    let results = harness.dispatch_all([
        Action::UiToggleUnits,
        Action::UiToggleUnits,
        Action::UiToggleUnits,
    ]);

    assert_eq!(results, vec![true, true, true]);
    harness.assert_state(|s| s.unit == TempUnit::Fahrenheit);
}

#[test]
fn test_tick_only_animates_while_loading() {
    let mut harness = EffectStoreTestHarness::new(state_with_weather(), reducer);

    let results = harness.dispatch_all([Action::Tick, Action::Tick]);
    assert_eq!(results, vec![false, false]);

    harness.dispatch_collect(Action::WeatherFetch);
    harness.dispatch_all([Action::Tick, Action::Tick, Action::Tick]);
    harness.assert_state(|s| s.tick_count == 3);
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_short_query_cancels_instead_of_searching() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchOpen);
    harness.dispatch_collect(Action::SearchQueryChange("L".into()));

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::CancelSearch));
    harness.assert_state(|s| !s.searching && s.search_results.is_empty());
}

#[test]
fn test_query_triggers_one_search() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchOpen);
    harness.dispatch_collect(Action::SearchQueryChange("  Lo ".into()));

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::SearchLocations { query, language: Language::En } if query == "Lo")
    });
    harness.assert_state(|s| s.searching);
}

#[test]
fn test_search_results_for_old_query_are_ignored() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchOpen);
    harness.dispatch_collect(Action::SearchQueryChange("Lon".into()));
    harness.dispatch_collect(Action::SearchQueryChange("Par".into()));

    harness.complete_action(Action::SearchDidLoad {
        query: "Lon".into(),
        results: vec![Location::new("London", 51.5, -0.12)],
    });
    harness.process_emitted();
    harness.assert_state(|s| s.search_results.is_empty() && s.searching);

    harness.complete_action(Action::SearchDidLoad {
        query: "Par".into(),
        results: vec![Location::new("Paris", 48.85, 2.35)],
    });
    harness.process_emitted();
    harness.assert_state(|s| s.search_results.len() == 1 && !s.searching);
}

#[test]
fn test_confirm_adds_location_and_fetches() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchOpen);
    harness.dispatch_collect(Action::SearchQueryChange("Par".into()));
    harness.complete_action(Action::SearchDidLoad {
        query: "Par".into(),
        results: vec![Location::new("Paris", 48.85, 2.35)],
    });
    harness.process_emitted();
    harness.drain_effects();

    harness.dispatch_collect(Action::SearchConfirm);

    harness.assert_state(|s| !s.search_mode);
    harness.assert_state(|s| s.locations.len() == 4 && s.location_name() == "Paris");
    let effects = harness.drain_effects();
    effects.effects_count(2);
    effects.effects_first_matches(|e| matches!(e, Effect::CancelSearch));
    assert!(
        effects
            .iter()
            .any(|e| matches!(e, Effect::FetchWeather { lat, .. } if *lat == 48.85))
    );
}

#[test]
fn test_confirm_known_place_selects_existing() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchOpen);
    harness.dispatch_collect(Action::SearchQueryChange("San".into()));
    harness.complete_action(Action::SearchDidLoad {
        query: "San".into(),
        results: vec![Location::new("Sanya City", 18.255, 109.508)],
    });
    harness.process_emitted();

    harness.dispatch_collect(Action::SearchConfirm);
    harness.assert_state(|s| s.locations.len() == 3 && s.current == 2);
}

#[test]
fn test_close_cancels_pending_search() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchOpen);
    harness.dispatch_collect(Action::SearchQueryChange("Tokyo".into()));
    harness.drain_effects();

    harness.dispatch_collect(Action::SearchClose);
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::CancelSearch));
    harness.assert_state(|s| !s.search_mode && s.search_query.is_empty());
}

// ============================================================================
// Component + store integration
// ============================================================================

#[test]
fn test_keyboard_triggers_fetch() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    let actions = send_showcase_keys!(harness, "r");
    actions.assert_count(1);
    actions.assert_first(Action::WeatherFetch);

    harness.dispatch_collect(Action::WeatherFetch);
    harness.assert_state(|s| s.weather.is_loading());

    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::FetchWeather { .. }));
}

#[test]
fn test_keyboard_toggle_units() {
    let mut harness = EffectStoreTestHarness::new(state_with_weather(), reducer);

    for action in send_showcase_keys!(harness, "u") {
        harness.dispatch_collect(action);
    }

    harness.assert_state(|s| s.unit == TempUnit::Fahrenheit);
}

#[test]
fn test_unit_key_resets_card_view() {
    let mut harness = EffectStoreTestHarness::new(state_with_weather(), reducer);

    harness.dispatch_collect(Action::CardViewChange(CardView::Detail));
    harness.assert_state(|s| s.card_view == CardView::Detail);

    for action in send_showcase_keys!(harness, "u") {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.card_view == CardView::Main && s.unit == TempUnit::Fahrenheit);
}

#[test]
fn test_keyboard_cycles_sizes() {
    let mut harness = EffectStoreTestHarness::new(state_with_weather(), reducer);

    for action in send_showcase_keys!(harness, "] ] 7") {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.size == SizeTag::Micro);
}

// ============================================================================
// Rendering with the harness
// ============================================================================

#[test]
fn test_render_loading_state() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::WeatherFetch);

    let output = render_showcase!(harness);

    assert!(output.contains("..."), "Placeholder should be visible:\n{output}");
    assert!(!output.contains("Today"), "No forecast without data:\n{output}");
}

#[test]
fn test_render_weather_data() {
    let mut harness = EffectStoreTestHarness::new(state_with_weather(), reducer);

    let output = render_showcase!(harness);

    assert!(output.contains("Clear"), "Description should be visible:\n{output}");
    assert!(output.contains("Today"), "Forecast should be visible:\n{output}");
}

#[test]
fn test_render_unit_toggle_changes_display() {
    let mut harness = EffectStoreTestHarness::new(state_with_weather(), reducer);

    let celsius_output = render_showcase!(harness);
    harness.dispatch_collect(Action::UiToggleUnits);
    let fahrenheit_output = render_showcase!(harness);

    assert_ne!(
        celsius_output, fahrenheit_output,
        "Celsius and Fahrenheit renders should differ"
    );
    assert!(fahrenheit_output.contains("79°"), "26°C high is 79°F:\n{fahrenheit_output}");
}

#[test]
fn test_multiple_async_completions() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::WeatherFetch);

    harness.complete_action(Action::WeatherDidLoad {
        generation: 1,
        snapshot: mock_weather(),
    });
    harness.complete_action(Action::UiToggleUnits);

    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 2);
    assert_eq!(changed, 2);
    harness.assert_state(|s| s.weather.is_loaded());
    harness.assert_state(|s| s.unit == TempUnit::Fahrenheit);
}
