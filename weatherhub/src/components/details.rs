//! Grid of detail cards under the headline temperature

use chrono::{DateTime, FixedOffset, Local};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use weatherhub_core::{TempUnit, WeatherSnapshot};

use super::Component;
use crate::theme::Palette;

const COLUMNS: u32 = 4;
const CARD_HEIGHT: u16 = 2;

pub struct Details;

pub struct DetailsProps<'a> {
    pub snapshot: &'a WeatherSnapshot,
    pub unit: TempUnit,
    pub palette: &'a Palette,
}

struct Card {
    label: &'static str,
    value: String,
}

impl Card {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

impl Details {
    /// Rows needed for `snapshot`, including the gaps between card rows.
    pub fn height(snapshot: &WeatherSnapshot) -> u16 {
        let rows = if snapshot.sun.is_some() { 3 } else { 2 };
        rows * CARD_HEIGHT + (rows - 1)
    }
}

/// Wall-clock time of `timestamp` at the location, or in the local zone when
/// the location's offset is unknown.
pub fn format_clock(timestamp: i64, utc_offset: Option<i32>) -> String {
    let Some(utc) = DateTime::from_timestamp(timestamp, 0) else {
        return "--:--".to_string();
    };
    match utc_offset.and_then(FixedOffset::east_opt) {
        Some(offset) => utc.with_timezone(&offset).format("%H:%M").to_string(),
        None => utc.with_timezone(&Local).format("%H:%M").to_string(),
    }
}

pub fn format_visibility(meters: Option<u32>) -> String {
    match meters {
        Some(m) => format!("{:.1} km", f64::from(m) / 1000.0),
        None => "n/a".to_string(),
    }
}

fn card_rows(snapshot: &WeatherSnapshot, unit: TempUnit) -> Vec<[Card; 4]> {
    let mut rows = vec![
        [
            Card::new("Temperature", unit.format(snapshot.temperature)),
            Card::new("Feels like", unit.format_degrees(snapshot.feels_like)),
            Card::new(
                "Min / Max",
                format!(
                    "{} / {}",
                    unit.format_degrees(snapshot.temp_min),
                    unit.format_degrees(snapshot.temp_max)
                ),
            ),
            Card::new("Pressure", format!("{} mb", snapshot.pressure)),
        ],
        [
            Card::new("Humidity", format!("{}%", snapshot.humidity)),
            Card::new("Wind", format!("{:.1} m/s", snapshot.wind_speed)),
            Card::new("Visibility", format_visibility(snapshot.visibility)),
            Card::new("Cloud cover", format!("{}%", snapshot.cloud_cover)),
        ],
    ];
    if let Some(sun) = snapshot.sun {
        rows.push([
            Card::new("Sunrise", format_clock(sun.sunrise, snapshot.utc_offset)),
            Card::new("Sunset", format_clock(sun.sunset, snapshot.utc_offset)),
            Card::new("", String::new()),
            Card::new("", String::new()),
        ]);
    }
    rows
}

impl Component for Details {
    type Props<'a> = DetailsProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let rows = card_rows(props.snapshot, props.unit);

        let row_areas = Layout::vertical(
            rows.iter()
                .map(|_| Constraint::Length(CARD_HEIGHT))
                .collect::<Vec<_>>(),
        )
        .spacing(1)
        .split(area);

        let card_style = Style::default().bg(palette.card).fg(palette.fg);
        for (cards, row_area) in rows.iter().zip(row_areas.iter()) {
            let cells = Layout::horizontal([Constraint::Ratio(1, COLUMNS); COLUMNS as usize])
                .spacing(1)
                .split(*row_area);
            for (card, cell) in cards.iter().zip(cells.iter()) {
                if card.label.is_empty() {
                    continue;
                }
                let text = vec![
                    Line::from(Span::styled(card.label, card_style.fg(palette.muted))),
                    Line::from(Span::styled(card.value.as_str(), card_style.bold())),
                ];
                frame.render_widget(
                    Paragraph::new(text)
                        .style(card_style)
                        .alignment(Alignment::Center),
                    *cell,
                );
            }
        }
    }
}
