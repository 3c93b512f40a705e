//! Widget composition and render tests using RenderHarness

use pretty_assertions::assert_eq;
use tactile_weather::{
    components::{CardContent, Component, ShowcaseProps, WeatherWidget, compose},
    i18n::Language,
    state::{AppState, CardView, DailyForecast, HourlySeries, TempUnit, WeatherSnapshot},
    theme::StyleContext,
    variant::{CardArrangement, HeaderStyle, SizeTag},
};
use tui_dispatch::{DataResource, testing::*};

fn snapshot() -> WeatherSnapshot {
    let mut snapshot = WeatherSnapshot::default();
    snapshot.current.temperature = 23.4;
    snapshot.current.wind_speed = 11.6;
    snapshot.current.weather_code = 3;
    snapshot.current.is_day = true;
    snapshot.current.time = "2024-06-01T09:00".into();
    snapshot.daily = DailyForecast {
        time: (1..=5).map(|d| format!("2024-06-{d:02}")).collect(),
        weather_code: vec![3, 0, 61, 80, 95],
        temperature_max: vec![27.0, 25.0, 20.0, 18.0, 22.0],
        temperature_min: vec![16.0, 15.0, 13.0, 12.0, 14.0],
    };
    snapshot.hourly = HourlySeries {
        time: Vec::new(),
        relative_humidity: vec![Some(71.4); 24],
        apparent_temperature: vec![Some(25.2); 24],
    };
    snapshot
}

fn loaded(size: SizeTag) -> AppState {
    AppState {
        weather: DataResource::Loaded(snapshot()),
        fetch_generation: 1,
        size,
        ..Default::default()
    }
}

fn render_widget(state: &AppState, width: u16, height: u16) -> String {
    let styles = StyleContext::new();
    let mut render = RenderHarness::new(width, height);
    let mut widget = WeatherWidget;

    render.render_to_string_plain(|frame| {
        let props = ShowcaseProps {
            state,
            styles: &styles,
            hour: 9,
            is_focused: true,
        };
        widget.render(frame, frame.area(), props.widget_props());
    })
}

#[test]
fn test_composition_per_size() {
    let styles = StyleContext::new();
    let expected = [
        (SizeTag::Large, Some(HeaderStyle::Full), true),
        (SizeTag::Medium, Some(HeaderStyle::Full), false),
        (SizeTag::Small, Some(HeaderStyle::Compact), false),
        (SizeTag::Mini, None, false),
        (SizeTag::WideSmall, None, false),
        (SizeTag::WideMedium, None, false),
        (SizeTag::Micro, None, false),
    ];

    for (size, header, forecast) in expected {
        let state = loaded(size);
        let props = ShowcaseProps {
            state: &state,
            styles: &styles,
            hour: 9,
            is_focused: true,
        };
        let composition = compose(&props.widget_props());

        assert_eq!(composition.header, header, "header for {size}");
        assert_eq!(composition.forecast.is_some(), forecast, "forecast for {size}");
        assert_eq!(composition.layout.size, size);
        assert!(matches!(composition.card, CardContent::Ready { .. }), "card for {size}");
    }
}

#[test]
fn test_arrangement_tracks_size() {
    let styles = StyleContext::new();
    let state = loaded(SizeTag::Micro);
    let props = ShowcaseProps {
        state: &state,
        styles: &styles,
        hour: 9,
        is_focused: true,
    };

    let CardContent::Ready { arrangement, readings } = compose(&props.widget_props()).card else {
        panic!("expected ready card");
    };
    assert!(matches!(arrangement, CardArrangement::Micro { .. }));
    assert_eq!(readings.temperature, 23);
    assert_eq!(readings.humidity, 71);
    assert_eq!(readings.feels_like, 25);
}

#[test]
fn test_loading_uses_placeholder_for_every_size() {
    let styles = StyleContext::new();
    for size in SizeTag::ALL {
        let state = AppState {
            weather: DataResource::Loading,
            size,
            ..Default::default()
        };
        let props = ShowcaseProps {
            state: &state,
            styles: &styles,
            hour: 0,
            is_focused: true,
        };
        let composition = compose(&props.widget_props());
        assert_eq!(composition.card, CardContent::Placeholder, "card for {size}");
        assert_eq!(composition.forecast, None);
    }
}

#[test]
fn test_render_loading_placeholder() {
    let state = AppState {
        weather: DataResource::Loading,
        size: SizeTag::Small,
        ..Default::default()
    };

    let output = render_widget(&state, 30, 20);

    assert!(output.contains("..."), "Placeholder should be visible:\n{output}");
}

#[test]
fn test_render_mini_in_fahrenheit() {
    let state = AppState {
        unit: TempUnit::Fahrenheit,
        ..loaded(SizeTag::Mini)
    };

    let output = render_widget(&state, 20, 12);

    assert!(output.contains("74°"), "23.4°C is 74°F:\n{output}");
    assert!(!output.contains("°F"), "Mini shows no unit symbol:\n{output}");
}

#[test]
fn test_render_small_in_celsius() {
    let output = render_widget(&loaded(SizeTag::Small), 30, 20);

    assert!(output.contains("23°"), "Temperature should be visible:\n{output}");
    assert!(output.contains("Overcast"), "Description should be visible:\n{output}");
    assert!(output.contains("秦皇岛"), "Title should be visible:\n{output}");
}

#[test]
fn test_render_large_forecast_strip() {
    let output = render_widget(&loaded(SizeTag::Large), 60, 34);

    assert!(output.contains("Today"), "Forecast should start with today:\n{output}");
    // 2024-06-02 is a Sunday.
    assert!(output.contains("Sun"), "Weekday labels should follow:\n{output}");
    assert!(output.contains("27°"), "Today's high should be visible:\n{output}");
}

#[test]
fn test_render_large_detail_view() {
    let state = AppState {
        card_view: CardView::Detail,
        ..loaded(SizeTag::Large)
    };

    let output = render_widget(&state, 60, 34);

    assert!(output.contains("Feels like"), "Detail rows should be visible:\n{output}");
    assert!(output.contains("25°"));
    assert!(output.contains("71%"));
    assert!(output.contains("12 km/h"));
}

#[test]
fn test_render_wide_medium_high_low() {
    let output = render_widget(&loaded(SizeTag::WideMedium), 60, 12);

    assert!(output.contains("H:27° L:16°"), "High/low should be visible:\n{output}");
}

#[test]
fn test_render_medium_air_quality() {
    let output = render_widget(&loaded(SizeTag::Medium), 60, 20);

    assert!(output.contains("Air"), "Air quality badge should be visible:\n{output}");
    assert!(output.contains("Overcast"), "Description should be visible:\n{output}");
}

#[test]
fn test_render_micro_single_row() {
    let output = render_widget(&loaded(SizeTag::Micro), 20, 8);

    assert!(output.contains("23°"), "Temperature should be visible:\n{output}");
}

#[test]
fn test_render_micro_cuts_long_name_with_ellipsis() {
    // 秦皇岛 is six cells, more than the name's share of a micro card.
    let output = render_widget(&loaded(SizeTag::Micro), 20, 8);

    assert!(output.contains("秦"), "Name should start visible:\n{output}");
    assert!(output.contains('\u{2026}'), "Cut name should end in an ellipsis:\n{output}");
    assert!(!output.contains("秦皇岛"), "Full name should not fit:\n{output}");
}

#[test]
fn test_render_chinese_labels() {
    let state = AppState {
        lang: Language::Zh,
        ..loaded(SizeTag::Large)
    };

    let output = render_widget(&state, 60, 34);

    assert!(output.contains("今天"), "Forecast labels should be translated:\n{output}");
}

#[test]
fn test_dark_mode_changes_nothing_but_colors() {
    let state = loaded(SizeTag::Medium);
    let styles = StyleContext::new();
    let mut widget = WeatherWidget;
    let mut render = RenderHarness::new(60, 20);

    let mut draw = |render: &mut RenderHarness| {
        render.render_to_string_plain(|frame| {
            let props = ShowcaseProps {
                state: &state,
                styles: &styles,
                hour: 9,
                is_focused: true,
            };
            widget.render(frame, frame.area(), props.widget_props());
        })
    };

    let light = draw(&mut render);
    styles.set_mode(tactile_weather::theme::ThemeMode::Dark);
    let dark = draw(&mut render);

    assert_eq!(light, dark);
}
