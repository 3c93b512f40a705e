//! Five-day forecast strip under the large card

use chrono::{Datelike, NaiveDate};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::i18n::Language;
use crate::icons::WeatherIcon;
use crate::state::{TempUnit, WeatherSnapshot};
use crate::theme::{Palette, ThemeVar};
use crate::variant::FORECAST_DAYS;

/// One column of the strip
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastCell {
    pub label: String,
    pub icon: WeatherIcon,
    pub max: i32,
    pub min: i32,
}

/// Build the strip's cells; day 0 is "today", the rest are weekday names.
pub fn forecast_cells(
    snapshot: &WeatherSnapshot,
    unit: TempUnit,
    lang: Language,
) -> Vec<ForecastCell> {
    let strings = lang.strings();
    snapshot
        .forecast_days(FORECAST_DAYS)
        .into_iter()
        .enumerate()
        .map(|(index, day)| {
            let label = if index == 0 {
                strings.today.to_string()
            } else {
                NaiveDate::parse_from_str(&day.date, "%Y-%m-%d")
                    .map(|date| {
                        let index = date.weekday().num_days_from_sunday() as usize;
                        strings.week_days[index].to_string()
                    })
                    .unwrap_or(day.date)
            };
            ForecastCell {
                label,
                icon: WeatherIcon::from_code(day.weather_code, true),
                max: unit.display(day.max),
                min: unit.display(day.min),
            }
        })
        .collect()
}

pub struct ForecastStrip;

pub struct ForecastStripProps<'a> {
    pub cells: &'a [ForecastCell],
    pub palette: &'a Palette,
}

impl Component<Action> for ForecastStrip {
    type Props<'a> = ForecastStripProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        // First row is the gap under the card.
        let [_gap, panel] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
        frame.render_widget(Block::default().style(palette.surface(ThemeVar::BgPanel)), panel);

        let ratio = Constraint::Ratio(1, FORECAST_DAYS as u32);
        let columns = Layout::horizontal(vec![ratio; FORECAST_DAYS]).split(panel);
        for (cell, column) in props.cells.iter().zip(columns.iter()) {
            let lines = vec![
                Line::styled(cell.label.clone(), palette.fg(ThemeVar::TextTertiary)),
                Line::styled(cell.icon.glyph(), palette.fg(ThemeVar::TextSecondary)),
                Line::styled(format!("{}°", cell.max), palette.bold(ThemeVar::TextPrimary)),
                Line::styled(format!("{}°", cell.min), palette.fg(ThemeVar::TextMuted)),
            ];
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), *column);
        }
    }
}
