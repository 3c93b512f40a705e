//! Action and reducer tests using EffectStore and TestHarness

use pretty_assertions::assert_eq;
use tactile_weather::{
    action::Action,
    components::{Component, Showcase, ShowcaseProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, CardView, Location, TempUnit, WeatherSnapshot},
    theme::{StyleContext, ThemeMode},
    variant::SizeTag,
};
use tui_dispatch::testing::*;
use tui_dispatch::{
    DataResource, EffectStore, NumericComponentId, assert_emitted, assert_not_emitted,
};

fn snapshot(temperature: f32) -> WeatherSnapshot {
    let mut snapshot = WeatherSnapshot::default();
    snapshot.current.temperature = temperature;
    snapshot.current.time = "2024-06-01T14:00".into();
    snapshot
}

#[test]
fn test_reducer_weather_fetch() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    assert!(store.state().weather.is_empty());

    let result = store.dispatch(Action::WeatherFetch);
    assert!(result.changed, "State should change");
    assert!(store.state().weather.is_loading());
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(
        result.effects[0],
        Effect::FetchWeather { generation: 1, .. }
    ));
}

#[test]
fn test_reducer_weather_load() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    let data = snapshot(22.5);

    store.dispatch(Action::WeatherFetch);
    store.dispatch(Action::WeatherDidLoad {
        generation: 1,
        snapshot: data.clone(),
    });

    assert!(store.state().weather.is_loaded());
    assert_eq!(store.state().weather.data(), Some(&data));
    assert_eq!(store.state().last_error, None);
}

#[test]
fn test_refresh_keeps_snapshot_on_error() {
    let mut store = EffectStore::new(
        AppState {
            weather: DataResource::Loaded(snapshot(18.0)),
            ..Default::default()
        },
        reducer,
    );

    store.dispatch(Action::WeatherFetch);
    assert!(store.state().is_refreshing);
    assert!(store.state().is_loading());

    store.dispatch(Action::WeatherDidError {
        generation: 1,
        message: "timed out".into(),
    });

    assert!(store.state().weather.is_loaded());
    assert!(!store.state().is_refreshing);
    assert_eq!(store.state().last_error.as_deref(), Some("timed out"));
}

#[test]
fn test_reducer_toggle_units() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert_eq!(store.state().unit, TempUnit::Celsius);
    store.dispatch(Action::UiToggleUnits);
    assert_eq!(store.state().unit, TempUnit::Fahrenheit);
    store.dispatch(Action::UiToggleUnits);
    assert_eq!(store.state().unit, TempUnit::Celsius);
}

#[test]
fn test_location_select_refetches() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::LocationSelect(1));
    assert!(result.changed);
    assert_eq!(store.state().location_name(), "London");
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::FetchWeather { lat, .. }] if (*lat - 51.5074).abs() < 1e-9
    ));

    // Out of range and same index are no-ops.
    assert!(!store.dispatch(Action::LocationSelect(9)).changed);
    assert!(!store.dispatch(Action::LocationSelect(1)).changed);
}

#[test]
fn test_theme_cycle_adopts_preset_mode() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    assert_eq!(store.state().preset_name(), "classic");

    store.dispatch(Action::ThemeCycle);
    assert_eq!(store.state().preset_name(), "graphite");
    assert_eq!(store.state().mode, ThemeMode::Dark);

    store.dispatch(Action::ThemeToggleMode);
    assert_eq!(store.state().preset_name(), "graphite");
    assert_eq!(store.state().mode, ThemeMode::Light);
}

#[test]
fn test_size_cycle_wraps() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::UiPrevSize);
    assert_eq!(store.state().size, SizeTag::Micro);
    store.dispatch(Action::UiNextSize);
    assert_eq!(store.state().size, SizeTag::Large);

    assert!(!store.dispatch(Action::UiSelectSize(SizeTag::Large)).changed);
}

#[test]
fn test_card_view_only_flips_on_large() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::CardViewChange(CardView::Detail));
    assert_eq!(store.state().card_view, CardView::Detail);

    store.dispatch(Action::UiSelectSize(SizeTag::Medium));
    store.dispatch(Action::UiToggleUnits);
    assert_eq!(store.state().card_view, CardView::Main);

    assert!(!store.dispatch(Action::CardViewChange(CardView::Detail)).changed);
}

#[test]
fn test_component_keyboard_events() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = Showcase::new();
    let styles = StyleContext::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("r", |state, event| {
        let props = ShowcaseProps {
            state,
            styles: &styles,
            hour: 12,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::WeatherFetch);
}

#[test]
fn test_component_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = Showcase::new();
    let styles = StyleContext::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("r q u", |state, event| {
        let props = ShowcaseProps {
            state,
            styles: &styles,
            hour: 12,
            is_focused: false,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    let did_load = Action::WeatherDidLoad {
        generation: 1,
        snapshot: WeatherSnapshot::default(),
    };
    let toggle = Action::UiToggleUnits;
    let tick = Action::Tick;

    assert_eq!(did_load.category(), Some("weather_did"));
    assert_eq!(toggle.category(), Some("ui"));
    assert_eq!(tick.category(), None);

    assert!(did_load.is_weather_did());
    assert!(toggle.is_ui());
}

#[test]
fn test_harness_emit_and_drain() {
    let mut harness = TestHarness::<(), Action>::new(());

    harness.emit(Action::WeatherFetch);
    harness.emit(Action::UiToggleUnits);
    harness.emit(Action::WeatherDidError {
        generation: 1,
        message: "oops".into(),
    });

    let actions = harness.drain_emitted();
    actions.assert_count(3);
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::WeatherFetch,
        Action::WeatherDidLoad {
            generation: 1,
            snapshot: WeatherSnapshot::default(),
        },
    ];

    assert_emitted!(actions, Action::WeatherFetch);
    assert_emitted!(actions, Action::WeatherDidLoad { .. });
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::WeatherDidError { .. });
}

#[test]
fn test_custom_location_list() {
    let custom = Location::new("My Place", 12.34, 56.78);
    let state = AppState::new(vec![custom.clone()]);

    assert_eq!(state.current_location(), Some(&custom));
    assert_eq!(state.location_name(), "My Place");
}

#[test]
fn test_temp_unit_formatting() {
    assert_eq!(TempUnit::Celsius.format(0.0), "0°");
    assert_eq!(TempUnit::Fahrenheit.format(0.0), "32°");
    assert_eq!(TempUnit::Fahrenheit.format(23.4), "74°");
    assert_eq!(TempUnit::Celsius.format(-0.4), "0°");
    assert_eq!(TempUnit::Fahrenheit.symbol(), "°F");
}
