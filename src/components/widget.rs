//! The weather widget: header, primary card and forecast strip composed per
//! size variant

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Padding},
};
use tui_dispatch::EventKind;

use super::forecast_strip::{ForecastCell, ForecastStrip, ForecastStripProps, forecast_cells};
use super::header::{Header, HeaderProps};
use super::main_card::{CardContent, MainCard, MainCardProps, Readings, paint_shadow, shadow_color};
use super::Component;
use crate::action::Action;
use crate::i18n::Language;
use crate::state::{CardView, TempUnit, WeatherSnapshot};
use crate::theme::{StyleContext, ThemeVar};
use crate::variant::{CardArrangement, FORECAST_ROWS, HeaderStyle, LayoutParams, SizeTag, resolve};

pub struct WeatherWidgetProps<'a> {
    pub size: SizeTag,
    pub data: Option<&'a WeatherSnapshot>,
    pub loading: bool,
    pub unit: TempUnit,
    pub location_name: &'a str,
    pub lang: Language,
    /// Local hour, indexes the hourly series.
    pub hour: usize,
    pub card_view: CardView,
    pub pulse: f32,
    pub styles: &'a StyleContext,
    pub is_focused: bool,
    // Action constructors
    pub on_toggle_unit: fn() -> Action,
    pub on_refresh: fn() -> Action,
    pub on_open_search: fn() -> Action,
    pub on_card_view: fn(CardView) -> Action,
}

/// Everything the widget will draw, resolved from props
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetComposition {
    pub layout: LayoutParams,
    pub header: Option<HeaderStyle>,
    pub card: CardContent,
    pub forecast: Option<Vec<ForecastCell>>,
}

/// Resolve the variant and build the view model.
pub fn compose(props: &WeatherWidgetProps<'_>) -> WidgetComposition {
    let layout = resolve(props.size);

    let card = match props.data {
        Some(snapshot) if !props.loading => CardContent::Ready {
            arrangement: layout.arrangement,
            readings: Readings::from_snapshot(
                snapshot,
                props.location_name,
                props.unit,
                props.lang,
                props.hour,
            ),
        },
        _ => CardContent::Placeholder,
    };

    let forecast = props
        .data
        .filter(|_| layout.shows_forecast())
        .map(|snapshot| forecast_cells(snapshot, props.unit, props.lang));

    WidgetComposition {
        layout,
        header: layout.header,
        card,
        forecast,
    }
}

#[derive(Default)]
pub struct WeatherWidget;

impl WeatherWidget {
    /// Outer size of the widget for a size tag.
    pub fn size_for(size: SizeTag) -> (u16, u16) {
        let layout = resolve(size);
        (layout.width, layout.height())
    }
}

impl Component<Action> for WeatherWidget {
    type Props<'a> = WeatherWidgetProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };

        let layout = resolve(props.size);
        let controls = layout.header.is_some_and(HeaderStyle::has_controls);
        let flips = matches!(layout.arrangement, CardArrangement::Large { .. })
            && props.data.is_some()
            && !props.loading;

        match key.code {
            KeyCode::Char('u') if controls => Some((props.on_toggle_unit)()),
            KeyCode::Char('r') if controls => Some((props.on_refresh)()),
            KeyCode::Char('/') if controls => Some((props.on_open_search)()),
            KeyCode::Right | KeyCode::Enter if flips && props.card_view == CardView::Main => {
                Some((props.on_card_view)(props.card_view.forward()))
            }
            KeyCode::Left | KeyCode::Backspace if flips && props.card_view == CardView::Detail => {
                Some((props.on_card_view)(props.card_view.back()))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let composition = compose(&props);
        let layout = composition.layout;
        let palette = props.styles.palette();

        let container = layout.fit(area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(layout.container_border())
            .border_style(Style::default().fg(palette.get(ThemeVar::BorderMedium)))
            .style(palette.surface(ThemeVar::BgWidget));
        let padded = block.inner(container);
        let inner = Block::default()
            .padding(Padding::new(
                layout.padding_x,
                layout.padding_x,
                layout.padding_y,
                layout.padding_y,
            ))
            .inner(padded);
        frame.render_widget(block, container);

        let header_rows = composition.header.map(HeaderStyle::rows).unwrap_or(0);
        let forecast_rows = if composition.forecast.is_some() { FORECAST_ROWS } else { 0 };
        let [header_area, card_area, forecast_area] = Layout::vertical([
            Constraint::Length(header_rows),
            Constraint::Length(layout.card_height),
            Constraint::Length(forecast_rows),
        ])
        .areas(inner);

        if let Some(style) = composition.header {
            let mut header = Header;
            header.render(
                frame,
                header_area,
                HeaderProps {
                    style,
                    title: props.location_name,
                    unit: props.unit,
                    palette: &palette,
                },
            );
        }

        paint_shadow(
            frame.buffer_mut(),
            card_area,
            layout.shadow,
            padded,
            shadow_color(layout.shadow, &palette),
        );
        let mut card = MainCard;
        card.render(
            frame,
            card_area,
            MainCardProps {
                content: &composition.card,
                card_view: props.card_view,
                lang: props.lang,
                border: layout.card_border(),
                pulse: props.pulse,
                palette: &palette,
            },
        );

        if let Some(cells) = &composition.forecast {
            let mut strip = ForecastStrip;
            strip.render(
                frame,
                forecast_area,
                ForecastStripProps {
                    cells,
                    palette: &palette,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn press(
        widget: &mut WeatherWidget,
        props: WeatherWidgetProps<'_>,
        code: KeyCode,
    ) -> Vec<Action> {
        let event = EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE));
        widget.handle_event(&event, props).into_iter().collect()
    }

    fn props<'a>(
        size: SizeTag,
        data: Option<&'a WeatherSnapshot>,
        card_view: CardView,
        styles: &'a StyleContext,
    ) -> WeatherWidgetProps<'a> {
        WeatherWidgetProps {
            size,
            data,
            loading: false,
            unit: TempUnit::Celsius,
            location_name: "London",
            lang: Language::En,
            hour: 0,
            card_view,
            pulse: 0.0,
            styles,
            is_focused: true,
            on_toggle_unit: || Action::UiToggleUnits,
            on_refresh: || Action::WeatherFetch,
            on_open_search: || Action::SearchOpen,
            on_card_view: Action::CardViewChange,
        }
    }

    #[test]
    fn test_header_controls_only_with_full_header() {
        let styles = StyleContext::new();
        let mut widget = WeatherWidget;

        let medium = props(SizeTag::Medium, None, CardView::Main, &styles);
        assert_eq!(press(&mut widget, medium, KeyCode::Char('/')), vec![Action::SearchOpen]);

        let small = props(SizeTag::Small, None, CardView::Main, &styles);
        assert!(press(&mut widget, small, KeyCode::Char('r')).is_empty());
    }

    #[test]
    fn test_large_card_flips_with_data() {
        let styles = StyleContext::new();
        let snapshot = WeatherSnapshot::default();
        let mut widget = WeatherWidget;

        let main = props(SizeTag::Large, Some(&snapshot), CardView::Main, &styles);
        assert_eq!(
            press(&mut widget, main, KeyCode::Right),
            vec![Action::CardViewChange(CardView::Detail)]
        );

        let detail = props(SizeTag::Large, Some(&snapshot), CardView::Detail, &styles);
        assert_eq!(
            press(&mut widget, detail, KeyCode::Backspace),
            vec![Action::CardViewChange(CardView::Main)]
        );

        let empty = props(SizeTag::Large, None, CardView::Main, &styles);
        assert!(press(&mut widget, empty, KeyCode::Enter).is_empty());

        let medium = props(SizeTag::Medium, Some(&snapshot), CardView::Main, &styles);
        assert!(press(&mut widget, medium, KeyCode::Right).is_empty());
    }

    #[test]
    fn test_forecast_hidden_while_loading_without_data() {
        let styles = StyleContext::new();
        let snapshot = WeatherSnapshot::default();

        let mut loading = props(SizeTag::Large, None, CardView::Main, &styles);
        loading.loading = true;
        assert_eq!(compose(&loading).forecast, None);

        let mut refreshing = props(SizeTag::Large, Some(&snapshot), CardView::Main, &styles);
        refreshing.loading = true;
        let composition = compose(&refreshing);
        assert_eq!(composition.card, CardContent::Placeholder);
        assert!(composition.forecast.is_some());
    }

    #[test]
    fn test_size_for_matches_layout() {
        assert_eq!(WeatherWidget::size_for(SizeTag::Micro), (16, 5));
        assert_eq!(WeatherWidget::size_for(SizeTag::Large).0, 56);
    }
}
