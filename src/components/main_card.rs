//! The primary card: one arrangement per size variant

use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use chrono::NaiveDateTime;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::i18n::{Language, Strings, weather_description};
use crate::icons::{IconScale, WeatherIcon};
use crate::state::{CardView, TempUnit, WeatherSnapshot};
use crate::theme::{Palette, ThemeVar};
use crate::variant::{CardArrangement, ShadowDepth};

/// Display-ready values, converted to the chosen unit
#[derive(Clone, Debug, PartialEq)]
pub struct Readings {
    pub location: String,
    pub icon: WeatherIcon,
    /// Raw reading, drives the temperature color.
    pub celsius: f32,
    pub temperature: i32,
    pub unit: TempUnit,
    pub description: &'static str,
    /// Day 0 high and low.
    pub high_low: Option<(i32, i32)>,
    pub feels_like: i32,
    /// Percent.
    pub humidity: i32,
    /// km/h.
    pub wind: i32,
    /// `HH:MM` of the observation.
    pub updated_at: Option<String>,
}

impl Readings {
    pub fn from_snapshot(
        snapshot: &WeatherSnapshot,
        location: &str,
        unit: TempUnit,
        lang: Language,
        hour: usize,
    ) -> Self {
        let current = &snapshot.current;
        Self {
            location: location.to_string(),
            icon: WeatherIcon::from_code(current.weather_code, current.is_day),
            celsius: current.temperature,
            temperature: unit.display(current.temperature),
            unit,
            description: weather_description(current.weather_code, lang),
            high_low: snapshot
                .today_high_low()
                .map(|(max, min)| (unit.display(max), unit.display(min))),
            feels_like: unit.display(snapshot.apparent_temperature_at(hour)),
            humidity: snapshot.humidity_at(hour).round() as i32,
            wind: current.wind_speed.round() as i32,
            updated_at: observation_time(&current.time),
        }
    }

    /// `74°`
    pub fn temperature_label(&self) -> String {
        format!("{}°", self.temperature)
    }

    /// `74°F`
    pub fn temperature_with_unit(&self) -> String {
        format!("{}{}", self.temperature, self.unit.symbol())
    }

    pub fn high_low_label(&self) -> Option<String> {
        self.high_low.map(|(max, min)| format!("H:{max}° L:{min}°"))
    }
}

fn observation_time(time: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|t| t.format("%H:%M").to_string())
}

/// What the card shows
#[derive(Clone, Debug, PartialEq)]
pub enum CardContent {
    /// Shared by every size while loading or without data.
    Placeholder,
    Ready {
        arrangement: CardArrangement,
        readings: Readings,
    },
}

pub struct MainCard;

pub struct MainCardProps<'a> {
    pub content: &'a CardContent,
    pub card_view: CardView,
    pub lang: Language,
    pub border: BorderType,
    /// 0.0..=1.0, placeholder only.
    pub pulse: f32,
    pub palette: &'a Palette,
}

impl Component<Action> for MainCard {
    type Props<'a> = MainCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let border_color = match props.content {
            CardContent::Placeholder => blend(
                palette.get(ThemeVar::BorderLight),
                palette.get(ThemeVar::BorderMedium),
                props.pulse,
            ),
            CardContent::Ready { .. } => palette.get(ThemeVar::BorderLight),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(props.border)
            .border_style(Style::default().fg(border_color))
            .style(palette.surface(ThemeVar::BgCard));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let CardContent::Ready {
            arrangement,
            readings,
        } = props.content
        else {
            render_placeholder(frame, inner, palette, props.pulse);
            return;
        };

        let strings = props.lang.strings();
        match *arrangement {
            CardArrangement::Micro { name_share_pct } => {
                let [name, rest] = Layout::horizontal([
                    Constraint::Percentage(name_share_pct),
                    Constraint::Fill(1),
                ])
                .areas(inner);
                let label = truncate_name(&readings.location, name.width);
                frame.render_widget(
                    Paragraph::new(label).style(palette.bold(ThemeVar::TextPrimary)),
                    name,
                );
                let line = Line::from(vec![
                    Span::styled(readings.icon.glyph(), palette.fg(ThemeVar::TextSecondary)),
                    Span::raw(" "),
                    Span::styled(readings.temperature_label(), palette.bold(ThemeVar::TextPrimary)),
                ]);
                frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), rest);
            }
            CardArrangement::Mini => {
                let lines = vec![
                    Line::styled(readings.location.clone(), palette.fg(ThemeVar::TextSecondary)),
                    Line::styled(readings.icon.glyph(), palette.fg(ThemeVar::TextPrimary)),
                    Line::styled(readings.temperature_label(), palette.bold(ThemeVar::TextPrimary)),
                ];
                render_centered_lines(frame, inner, lines);
            }
            CardArrangement::WideSmall { icon } => {
                let [art, text] =
                    Layout::horizontal([Constraint::Length(icon.columns()), Constraint::Fill(1)])
                        .spacing(1)
                        .areas(inner);
                render_icon(frame, art, readings.icon, icon, palette);
                let lines = vec![
                    Line::styled(readings.location.clone(), palette.fg(ThemeVar::TextSecondary)),
                    Line::styled(readings.temperature_label(), palette.bold(ThemeVar::TextPrimary)),
                ];
                render_lines(frame, text, lines, Alignment::Left);
            }
            CardArrangement::WideMedium { icon } => {
                let [art, temp, text] = Layout::horizontal([
                    Constraint::Length(icon.columns()),
                    Constraint::Length(6),
                    Constraint::Fill(1),
                ])
                .spacing(1)
                .areas(inner);
                render_icon(frame, art, readings.icon, icon, palette);
                let label = Line::styled(
                    readings.temperature_label(),
                    palette.bold(ThemeVar::TextPrimary),
                );
                render_lines(frame, temp, vec![label], Alignment::Left);
                let mut lines = vec![
                    Line::styled(readings.location.clone(), palette.bold(ThemeVar::TextPrimary)),
                    Line::styled(readings.description, palette.fg(ThemeVar::TextSecondary)),
                ];
                if let Some(label) = readings.high_low_label() {
                    lines.push(Line::styled(label, palette.fg(ThemeVar::TextTertiary)));
                }
                render_lines(frame, text, lines, Alignment::Right);
            }
            CardArrangement::Small { icon } => {
                let [art, temp, desc] = Layout::vertical([
                    Constraint::Length(icon.rows()),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .flex(Flex::Center)
                .areas(inner);
                render_icon(frame, art, readings.icon, icon, palette);
                frame.render_widget(
                    Paragraph::new(readings.temperature_label())
                        .style(palette.bold(ThemeVar::TextPrimary))
                        .alignment(Alignment::Center),
                    temp,
                );
                frame.render_widget(
                    Paragraph::new(readings.description)
                        .style(palette.fg(ThemeVar::TextSecondary))
                        .alignment(Alignment::Center),
                    desc,
                );
            }
            CardArrangement::Medium { icon } => {
                let [art, text] = Layout::horizontal([
                    Constraint::Length(icon.columns() + 2),
                    Constraint::Fill(1),
                ])
                .areas(inner);
                render_icon(frame, art, readings.icon, icon, palette);

                let [temp, desc, air] = Layout::vertical([
                    Constraint::Length(4),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .flex(Flex::Center)
                .areas(text);
                render_art_temperature(frame, temp, readings);
                frame.render_widget(
                    Paragraph::new(readings.description)
                        .style(palette.fg(ThemeVar::TextSecondary))
                        .alignment(Alignment::Center),
                    desc,
                );
                frame.render_widget(air_badge(strings, palette), air);
            }
            CardArrangement::Large { icon } => match props.card_view {
                CardView::Main => {
                    let [art, temp, desc, air, updated] = Layout::vertical([
                        Constraint::Length(icon.rows()),
                        Constraint::Length(4),
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Length(1),
                    ])
                    .flex(Flex::Center)
                    .areas(inner);
                    render_icon(frame, art, readings.icon, icon, palette);
                    render_art_temperature(frame, temp, readings);
                    frame.render_widget(
                        Paragraph::new(readings.description)
                            .style(palette.fg(ThemeVar::TextSecondary))
                            .alignment(Alignment::Center),
                        desc,
                    );
                    frame.render_widget(air_badge(strings, palette), air);
                    if let Some(time) = &readings.updated_at {
                        frame.render_widget(
                            Paragraph::new(format!("{} {time}", strings.updated_at))
                                .style(palette.fg(ThemeVar::TextMuted))
                                .alignment(Alignment::Center),
                            updated,
                        );
                    }
                }
                CardView::Detail => render_detail(frame, inner, readings, props.lang, palette),
            },
        }
    }
}

fn air_badge(strings: &Strings, palette: &Palette) -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled(format!("{} ", strings.air_quality), palette.fg(ThemeVar::TextTertiary)),
        Span::styled(
            format!(" {} ", strings.excellent),
            Style::default()
                .fg(palette.get(ThemeVar::BgCard))
                .bg(palette.get(ThemeVar::AccentSuccess))
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
}

fn render_detail(
    frame: &mut Frame,
    area: Rect,
    readings: &Readings,
    lang: Language,
    palette: &Palette,
) {
    let strings = lang.strings();
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<12}"), palette.fg(ThemeVar::TextTertiary)),
            Span::styled(value, palette.bold(ThemeVar::TextPrimary)),
        ])
    };
    let lines = vec![
        Line::styled(strings.details, palette.bold(ThemeVar::TextSecondary)),
        Line::default(),
        row(strings.feels_like, format!("{}°", readings.feels_like)),
        row(strings.humidity, format!("{}%", readings.humidity)),
        row(strings.wind, format!("{} km/h", readings.wind)),
        Line::default(),
        Line::styled("\u{2190}", palette.fg(ThemeVar::TextMuted)),
    ];

    let [body] = Layout::horizontal([Constraint::Length(24)])
        .flex(Flex::Center)
        .areas(area);
    render_lines(frame, body, lines, Alignment::Left);
}

fn render_placeholder(frame: &mut Frame, area: Rect, palette: &Palette, pulse: f32) {
    let color = blend(
        palette.get(ThemeVar::TextMuted),
        palette.get(ThemeVar::TextTertiary),
        pulse,
    );
    render_centered_lines(frame, area, vec![Line::styled("...", Style::default().fg(color))]);
}

fn render_icon(
    frame: &mut Frame,
    area: Rect,
    icon: WeatherIcon,
    scale: IconScale,
    palette: &Palette,
) {
    let [row] = Layout::vertical([Constraint::Length(scale.rows())])
        .flex(Flex::Center)
        .areas(area);
    let art = icon.text(scale, palette.fg(ThemeVar::TextSecondary));
    frame.render_widget(Paragraph::new(art).alignment(Alignment::Center), row);
}

fn render_art_temperature(frame: &mut Frame, area: Rect, readings: &Readings) {
    let renderer = Renderer::new(fonts::stack(&["miniwi"]))
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(temperature_gradient(readings.celsius));
    frame.render_widget(ArtBox::new(&renderer, &readings.temperature_with_unit()), area);
}

fn render_lines(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>, alignment: Alignment) {
    let [body] = Layout::vertical([Constraint::Length(lines.len() as u16)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(Paragraph::new(lines).alignment(alignment), body);
}

fn render_centered_lines(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    render_lines(frame, area, lines, Alignment::Center);
}

/// Cut `text` to `max` cells, ending in an ellipsis when anything was dropped.
fn truncate_name(text: &str, max: u16) -> String {
    let max = max as usize;
    if Span::raw(text).width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut end = 0;
    for (i, c) in text.char_indices() {
        let next = i + c.len_utf8();
        if Span::raw(&text[..next]).width() > max - 1 {
            break;
        }
        end = next;
    }
    format!("{}\u{2026}", &text[..end])
}

/// Paint the drop shadow band right of and below `card`, clipped to `clip`.
pub fn paint_shadow(buf: &mut Buffer, card: Rect, depth: ShadowDepth, clip: Rect, color: Color) {
    let (dx, dy) = depth.offset();
    let right = Rect::new(card.right(), card.y + 1, dx, card.height.saturating_sub(1) + dy);
    let below = Rect::new(card.x + 1, card.bottom(), card.width, dy);
    for band in [right, below] {
        let band = band.intersection(clip);
        for y in band.top()..band.bottom() {
            for x in band.left()..band.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(" ").set_bg(color);
                }
            }
        }
    }
}

pub fn shadow_color(depth: ShadowDepth, palette: &Palette) -> Color {
    match depth {
        ShadowDepth::Light => palette.get(ThemeVar::ShadowMedium),
        ShadowDepth::Heavy => palette.get(ThemeVar::ShadowHeavy),
    }
}

/// Linear mix of two RGB colors; other colors switch at the midpoint.
fn blend(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}

fn temperature_gradient(celsius: f32) -> Fill {
    let (start, end) = match celsius {
        t if t < 0.0 => (ArtColor::rgb(150, 200, 255), ArtColor::rgb(200, 230, 255)),
        t if t < 15.0 => (ArtColor::rgb(100, 180, 255), ArtColor::rgb(150, 220, 200)),
        t if t < 25.0 => (ArtColor::rgb(100, 200, 150), ArtColor::rgb(255, 220, 100)),
        t if t < 35.0 => (ArtColor::rgb(255, 180, 80), ArtColor::rgb(255, 120, 80)),
        _ => (ArtColor::rgb(255, 100, 80), ArtColor::rgb(255, 60, 60)),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}
