//! Location consent overlay
//!
//! Drawn over the dimmed main view while the app waits for the user to allow
//! or deny a location lookup.

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};
use weatherhub_core::Action;

use super::{Component, LOCATION_ICON};
use crate::event::EventKind;
use crate::theme::Palette;

pub struct ConsentPromptProps<'a> {
    pub palette: &'a Palette,
}

#[derive(Default)]
pub struct ConsentPrompt;

impl ConsentPrompt {
    pub const WIDTH: u16 = 52;
    pub const HEIGHT: u16 = 7;
}

/// Calculate a centered rectangle within an area, keeping a one-cell margin.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Fills an area with a background color, hiding what was drawn below.
struct BgFill(Color);

impl Widget for BgFill {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                buf[(x, y)].set_bg(self.0);
                buf[(x, y)].set_symbol(" ");
            }
        }
    }
}

impl Component for ConsentPrompt {
    type Props<'a> = ConsentPromptProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let EventKind::Key(key) = event else {
            return None;
        };
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                Some(Action::LocationConsent(true))
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                Some(Action::LocationConsent(false))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;

        let full = frame.area();
        frame
            .buffer_mut()
            .set_style(full, Style::default().add_modifier(Modifier::DIM));

        let modal = centered_rect(Self::WIDTH, Self::HEIGHT, area);
        frame.render_widget(BgFill(palette.card), modal);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.accent())
            .title(format!(" {LOCATION_ICON}Use your location? "))
            .style(Style::default().bg(palette.card).fg(palette.fg));

        let text = vec![
            Line::from(""),
            Line::from("WeatherHub would like to look up your approximate"),
            Line::from("location to show the weather where you are."),
            Line::from(""),
            Line::from(vec![
                Span::styled("y", palette.accent()),
                Span::raw(" allow    "),
                Span::styled("n", palette.accent()),
                Span::raw(" deny"),
            ])
            .centered(),
        ];
        frame.render_widget(
            Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Center),
            modal,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key, ActionAssertions, RenderHarness};
    use weatherhub_core::Theme;

    fn press(k: &str) -> Vec<Action> {
        let palette = Palette::for_condition(Theme::Light, None);
        ConsentPrompt
            .handle_event(
                &EventKind::Key(key(k)),
                ConsentPromptProps { palette: &palette },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn test_allow_and_deny_keys() {
        press("y").assert_first(Action::LocationConsent(true));
        press("enter").assert_first(Action::LocationConsent(true));
        press("n").assert_first(Action::LocationConsent(false));
        press("esc").assert_first(Action::LocationConsent(false));
        press("x").assert_empty();
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
        // clamped to the area minus a margin
        assert_eq!(centered_rect(100, 30, area), Rect::new(1, 1, 78, 22));
    }

    #[test]
    fn test_render_prompt() {
        let palette = Palette::for_condition(Theme::Dark, None);
        let mut render = RenderHarness::new(80, 24);
        let output = render.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("background"), frame.area());
            ConsentPrompt.render(
                frame,
                frame.area(),
                ConsentPromptProps { palette: &palette },
            );
        });
        assert!(output.contains("Use your location?"));
        assert!(output.contains("background"));
    }
}
