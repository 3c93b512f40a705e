//! Widget header: location title, plus unit switch and buttons when full

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::TempUnit;
use crate::theme::{Palette, ThemeVar};
use crate::variant::HeaderStyle;

pub const REFRESH_ICON: &str = "\u{21bb}";
pub const SEARCH_ICON: &str = "\u{2315}";

pub struct Header;

pub struct HeaderProps<'a> {
    pub style: HeaderStyle,
    pub title: &'a str,
    pub unit: TempUnit,
    pub palette: &'a Palette,
}

impl Header {
    fn unit_switch(unit: TempUnit, palette: &Palette) -> Vec<Span<'static>> {
        [TempUnit::Celsius, TempUnit::Fahrenheit]
            .into_iter()
            .map(|option| {
                let style = if option == unit {
                    palette
                        .on(ThemeVar::TextPrimary, ThemeVar::SwitchThumb)
                        .add_modifier(Modifier::BOLD)
                } else {
                    palette.on(ThemeVar::TextMuted, ThemeVar::SwitchTrack)
                };
                Span::styled(format!(" {} ", option.symbol()), style)
            })
            .collect()
    }

    fn button(icon: &'static str, palette: &Palette) -> Span<'static> {
        Span::styled(
            format!(" {icon} "),
            palette.on(ThemeVar::ButtonText, ThemeVar::ButtonBg),
        )
    }
}

impl Component<Action> for Header {
    type Props<'a> = HeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let [top, hint, _gap] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(if props.style.has_controls() { 1 } else { 0 }),
            Constraint::Fill(1),
        ])
        .areas(area);

        let title = Span::styled(props.title.to_string(), palette.bold(ThemeVar::TextPrimary));

        if !props.style.has_controls() {
            frame.render_widget(Paragraph::new(Line::from(title)), top);
            return;
        }

        let [title_area, controls] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(20)]).areas(top);
        frame.render_widget(Paragraph::new(Line::from(title)), title_area);

        let mut spans = Self::unit_switch(props.unit, palette);
        spans.push(Span::raw(" "));
        spans.push(Self::button(REFRESH_ICON, palette));
        spans.push(Span::raw(" "));
        spans.push(Self::button(SEARCH_ICON, palette));
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
            controls,
        );

        let keys = Line::styled(
            "u units \u{b7} r refresh \u{b7} / search",
            palette.fg(ThemeVar::TextMuted),
        );
        frame.render_widget(Paragraph::new(keys).alignment(Alignment::Right), hint);
    }
}
