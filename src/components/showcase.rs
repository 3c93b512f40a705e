//! Demo page: location tabs, one widget, status line and key hints

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, WeatherWidget, WeatherWidgetProps};
use crate::action::Action;
use crate::state::{AppState, CardView};
use crate::theme::{Palette, StyleContext, ThemeVar};
use crate::variant::SizeTag;

pub struct ShowcaseProps<'a> {
    pub state: &'a AppState,
    pub styles: &'a StyleContext,
    pub hour: usize,
    pub is_focused: bool,
}

impl<'a> ShowcaseProps<'a> {
    pub fn widget_props(&self) -> WeatherWidgetProps<'a> {
        let state = self.state;
        WeatherWidgetProps {
            size: state.size,
            data: state.weather.data(),
            loading: state.is_loading(),
            unit: state.unit,
            location_name: state.location_name(),
            lang: state.lang,
            hour: self.hour,
            card_view: state.card_view,
            pulse: state.pulse(),
            styles: self.styles,
            is_focused: self.is_focused,
            on_toggle_unit: || Action::UiToggleUnits,
            on_refresh: || Action::WeatherFetch,
            on_open_search: || Action::SearchOpen,
            on_card_view: Action::CardViewChange,
        }
    }
}

pub struct Showcase {
    widget: WeatherWidget,
    status_bar: StatusBar,
}

impl Default for Showcase {
    fn default() -> Self {
        Self {
            widget: WeatherWidget,
            status_bar: StatusBar::new(),
        }
    }
}

impl Showcase {
    pub fn new() -> Self {
        Self::default()
    }

    fn location_tabs(state: &AppState, palette: &Palette) -> Line<'static> {
        let mut spans = Vec::new();
        for (index, location) in state.locations.iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(" \u{b7} ", palette.fg(ThemeVar::TextMuted)));
            }
            let style = if index == state.current {
                palette
                    .on(ThemeVar::TextPrimary, ThemeVar::HighlightStrong)
                    .add_modifier(Modifier::BOLD)
            } else {
                palette.fg(ThemeVar::TextTertiary)
            };
            spans.push(Span::styled(format!(" {} ", location.name), style));
        }
        Line::from(spans).centered()
    }

    fn status_line(state: &AppState, palette: &Palette) -> Line<'static> {
        let mut spans = vec![Span::styled(
            format!(
                "{}  \u{b7}  {}  \u{b7}  {}  \u{b7}  {}",
                state.size,
                state.preset_name(),
                state.mode.as_str(),
                state.lang.strings().language_name,
            ),
            palette.fg(ThemeVar::TextTertiary),
        )];
        if let Some(error) = &state.last_error {
            spans.push(Span::styled(
                format!("  \u{b7}  {error}"),
                palette.fg(ThemeVar::TextSecondary).add_modifier(Modifier::ITALIC),
            ));
        } else if let Some(error) = state.weather.error() {
            spans.push(Span::styled(
                format!("  \u{b7}  {error}"),
                palette.fg(ThemeVar::TextSecondary).add_modifier(Modifier::ITALIC),
            ));
        }
        Line::from(spans).centered()
    }

    fn hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
        let mut hints = vec![
            StatusBarHint::new("u", "units"),
            StatusBarHint::new("r", "refresh"),
            StatusBarHint::new("/", "search"),
            StatusBarHint::new("Tab", "city"),
            StatusBarHint::new("[ ]", "size"),
            StatusBarHint::new("t", "theme"),
            StatusBarHint::new("m", "mode"),
            StatusBarHint::new("l", state.lang.toggle().strings().language_name),
        ];
        if state.size == SizeTag::Large {
            let hint = match state.card_view {
                CardView::Main => StatusBarHint::new("\u{2192}", "details"),
                CardView::Detail => StatusBarHint::new("\u{2190}", "back"),
            };
            hints.push(hint);
        }
        hints.push(StatusBarHint::new("q", "quit"));
        hints
    }

    fn status_style(palette: &Palette) -> StatusBarStyle {
        StatusBarStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: Some(palette.get(ThemeVar::BgPanel)),
                fg: Some(palette.get(ThemeVar::TextSecondary)),
            },
            text: palette.fg(ThemeVar::TextTertiary),
            hint_key: palette.bold(ThemeVar::TextPrimary),
            hint_label: palette.fg(ThemeVar::TextTertiary),
            separator: palette.fg(ThemeVar::TextMuted),
        }
    }
}

impl Component<Action> for Showcase {
    type Props<'a> = ShowcaseProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let from_widget = self
            .widget
            .handle_event(event, props.widget_props())
            .into_iter()
            .next();
        if from_widget.is_some() {
            return from_widget;
        }

        let EventKind::Key(key) = event else {
            return None;
        };
        let state = props.state;
        let count = state.locations.len().max(1);

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('u') => Some(Action::UiToggleUnits),
            KeyCode::Char('r') | KeyCode::F(5) => Some(Action::WeatherFetch),
            KeyCode::Char('/') => Some(Action::SearchOpen),
            KeyCode::Char('l') => Some(Action::UiToggleLanguage),
            KeyCode::Char('t') => Some(Action::ThemeCycle),
            KeyCode::Char('m') => Some(Action::ThemeToggleMode),
            KeyCode::Char(']') => Some(Action::UiNextSize),
            KeyCode::Char('[') => Some(Action::UiPrevSize),
            KeyCode::Char(digit @ '1'..='7') => {
                let index = digit as usize - '1' as usize;
                SizeTag::ALL.get(index).copied().map(Action::UiSelectSize)
            }
            KeyCode::Tab => Some(Action::LocationSelect((state.current + 1) % count)),
            KeyCode::BackTab => Some(Action::LocationSelect((state.current + count - 1) % count)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let palette = props.styles.palette();

        frame.render_widget(Block::default().style(palette.surface(ThemeVar::BgPage)), area);

        let [tabs, _gap, body, status, hints] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(Self::location_tabs(state, &palette)), tabs);

        let (width, height) = WeatherWidget::size_for(state.size);
        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(body);
        let [slot] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(column);
        self.widget.render(frame, slot, props.widget_props());

        frame.render_widget(Paragraph::new(Self::status_line(state, &palette)), status);

        let hint_items = Self::hints(state);
        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            hints,
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hint_items).with_separator("  "),
                right: StatusBarSection::empty(),
                style: Self::status_style(&palette),
                is_focused: false,
            },
        );
    }
}
