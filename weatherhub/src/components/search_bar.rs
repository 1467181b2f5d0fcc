//! Single-line city search input

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use weatherhub_core::Action;

use super::Component;
use crate::event::EventKind;
use crate::theme::Palette;

pub const PLACEHOLDER: &str = "Search for a city...";

pub struct SearchBarProps<'a> {
    pub value: &'a str,
    pub is_focused: bool,
    pub palette: &'a Palette,
}

/// Text input with a cursor. The text itself lives in state; every edit is
/// sent as [`Action::SearchInput`].
#[derive(Default)]
pub struct SearchBar {
    /// Cursor position (byte index)
    cursor: usize,
    was_focused: bool,
}

impl SearchBar {
    pub const HEIGHT: u16 = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// Put the cursor at the end when focus arrives, and keep it on a char
    /// boundary inside `value`.
    fn sync(&mut self, value: &str, is_focused: bool) {
        if is_focused && !self.was_focused {
            self.cursor = value.len();
        }
        self.was_focused = is_focused;
        self.cursor = self.cursor.min(value.len());
        while !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn prev_boundary(&self, value: &str) -> usize {
        value[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self, value: &str) -> usize {
        value[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.cursor)
    }

    fn insert_char(&mut self, value: &str, c: char) -> String {
        let mut new_value = String::with_capacity(value.len() + c.len_utf8());
        new_value.push_str(&value[..self.cursor]);
        new_value.push(c);
        new_value.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        new_value
    }

    fn delete_before(&mut self, value: &str) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        let start = self.prev_boundary(value);
        let new_value = format!("{}{}", &value[..start], &value[self.cursor..]);
        self.cursor = start;
        Some(new_value)
    }

    fn delete_at(&self, value: &str) -> Option<String> {
        if self.cursor >= value.len() {
            return None;
        }
        let end = self.next_boundary(value);
        Some(format!("{}{}", &value[..self.cursor], &value[end..]))
    }
}

impl Component for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        self.sync(props.value, props.is_focused);
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = props.value.len();
                    None
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    Some(Action::SearchInput(String::new()))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Esc => Some(Action::SearchCancel),
            KeyCode::Enter => Some(Action::SearchSubmit),
            KeyCode::Char(c) => Some(Action::SearchInput(self.insert_char(props.value, c))),
            KeyCode::Backspace => self.delete_before(props.value).map(Action::SearchInput),
            KeyCode::Delete => self.delete_at(props.value).map(Action::SearchInput),
            KeyCode::Left => {
                self.cursor = self.prev_boundary(props.value);
                None
            }
            KeyCode::Right => {
                self.cursor = self.next_boundary(props.value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = props.value.len();
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.sync(props.value, props.is_focused);
        let palette = props.palette;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if props.is_focused {
                palette.accent()
            } else {
                palette.border()
            })
            .title(" 🔍 Search ")
            .title_style(palette.muted());
        let inner = block.inner(area);

        let line = if props.value.is_empty() {
            Line::from(Span::styled(PLACEHOLDER, palette.muted()))
        } else {
            Line::from(props.value)
        };
        frame.render_widget(Paragraph::new(line).block(block), area);

        if props.is_focused {
            let column = props.value[..self.cursor].chars().count() as u16;
            let cursor_x = inner.x.saturating_add(column);
            if cursor_x < inner.x + inner.width {
                frame.set_cursor_position((cursor_x, inner.y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key, ActionAssertions, RenderHarness};
    use weatherhub_core::Theme;

    fn palette() -> Palette {
        Palette::for_condition(Theme::Light, None)
    }

    fn press(bar: &mut SearchBar, value: &str, k: &str) -> Vec<Action> {
        let palette = palette();
        let props = SearchBarProps {
            value,
            is_focused: true,
            palette: &palette,
        };
        bar.handle_event(&EventKind::Key(key(k)), props)
            .into_iter()
            .collect()
    }

    #[test]
    fn test_typing_appends_at_end() {
        let mut bar = SearchBar::new();
        press(&mut bar, "Pari", "s").assert_first(Action::SearchInput("Paris".into()));
    }

    #[test]
    fn test_backspace_and_cursor_moves() {
        let mut bar = SearchBar::new();
        press(&mut bar, "Oslo", "left").assert_empty();
        press(&mut bar, "Oslo", "backspace").assert_first(Action::SearchInput("Oso".into()));
        press(&mut bar, "Oso", "home").assert_empty();
        press(&mut bar, "Oso", "delete").assert_first(Action::SearchInput("so".into()));
    }

    #[test]
    fn test_multibyte_input() {
        let mut bar = SearchBar::new();
        press(&mut bar, "Zürich", "backspace").assert_first(Action::SearchInput("Züric".into()));
        press(&mut bar, "Zü", "backspace").assert_first(Action::SearchInput("Z".into()));
    }

    #[test]
    fn test_enter_and_esc() {
        let mut bar = SearchBar::new();
        press(&mut bar, "Rome", "enter").assert_first(Action::SearchSubmit);
        press(&mut bar, "Rome", "esc").assert_first(Action::SearchCancel);
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut bar = SearchBar::new();
        press(&mut bar, "Rome", "ctrl+u").assert_first(Action::SearchInput(String::new()));
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut bar = SearchBar::new();
        let palette = palette();
        let props = SearchBarProps {
            value: "",
            is_focused: false,
            palette: &palette,
        };
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("a")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_placeholder_and_value() {
        let mut render = RenderHarness::new(40, 3);
        let mut bar = SearchBar::new();
        let palette = palette();

        let output = render.render_to_string_plain(|frame| {
            let props = SearchBarProps {
                value: "",
                is_focused: false,
                palette: &palette,
            };
            bar.render(frame, frame.area(), props);
        });
        assert!(output.contains(PLACEHOLDER));

        let output = render.render_to_string_plain(|frame| {
            let props = SearchBarProps {
                value: "Lisbon",
                is_focused: true,
                palette: &palette,
            };
            bar.render(frame, frame.area(), props);
        });
        assert!(output.contains("Lisbon"));
    }
}
