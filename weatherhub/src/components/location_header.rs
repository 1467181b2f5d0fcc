//! Place name and local date/time above the weather details

use chrono::{FixedOffset, Utc};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use weatherhub_core::WeatherSnapshot;

use super::{Component, LOCATION_ICON};
use crate::theme::Palette;

pub struct LocationHeader;

pub struct LocationHeaderProps<'a> {
    pub snapshot: &'a WeatherSnapshot,
    pub palette: &'a Palette,
}

impl LocationHeader {
    pub const HEIGHT: u16 = 2;
}

/// "London, GB", or just the name when no country was reported.
pub fn place_name(snapshot: &WeatherSnapshot) -> String {
    match &snapshot.country {
        Some(country) if !country.is_empty() => format!("{}, {}", snapshot.location, country),
        _ => snapshot.location.clone(),
    }
}

impl Component for LocationHeader {
    type Props<'a> = LocationHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);
        let palette = props.palette;

        let location_line = Line::from(vec![
            Span::raw(LOCATION_ICON),
            Span::styled(place_name(props.snapshot), palette.base().bold()),
        ])
        .centered();
        frame.render_widget(Paragraph::new(location_line), chunks[0]);

        let local_time = props
            .snapshot
            .utc_offset
            .and_then(FixedOffset::east_opt)
            .map(|offset| Utc::now().with_timezone(&offset).format("%H:%M").to_string());
        if let Some(time) = local_time {
            let time_line =
                Line::from(Span::styled(format!("Local time {time}"), palette.muted())).centered();
            frame.render_widget(Paragraph::new(time_line), chunks[1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(country: Option<&str>) -> WeatherSnapshot {
        WeatherSnapshot {
            location: "Tokyo".into(),
            country: country.map(str::to_string),
            condition: "clear".into(),
            description: "clear sky".into(),
            temperature: 20.0,
            feels_like: 20.0,
            temp_min: 18.0,
            temp_max: 22.0,
            pressure: 1010,
            humidity: 50,
            wind_speed: 2.0,
            visibility: None,
            cloud_cover: 0,
            sun: None,
            utc_offset: Some(32400),
        }
    }

    #[test]
    fn test_place_name() {
        assert_eq!(place_name(&snapshot(Some("JP"))), "Tokyo, JP");
        assert_eq!(place_name(&snapshot(None)), "Tokyo");
        assert_eq!(place_name(&snapshot(Some(""))), "Tokyo");
    }
}
