//! Root component
//!
//! Routes key events by input mode and lays out the search bar, history
//! chips, weather body and help bar. The consent prompt is drawn on top while
//! it is open.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    widgets::{Block, Borders},
    Frame,
};
use weatherhub_core::{Action, AppState, InputMode};

use super::{
    Component, ConsentPrompt, ConsentPromptProps, HelpBar, HelpBarProps, HistoryBar,
    HistoryBarProps, SearchBar, SearchBarProps, WeatherBody, WeatherBodyProps,
};
use crate::event::EventKind;
use crate::theme::Palette;

pub const LOCATION_ICON: &str = "📍 ";
pub const ERROR_ICON: &str = "⚠️";
pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
}

#[derive(Default)]
pub struct WeatherDisplay {
    search: SearchBar,
    consent: ConsentPrompt,
}

impl WeatherDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn browse_keys(code: KeyCode, state: &AppState) -> Option<Action> {
        match code {
            KeyCode::Char('/') | KeyCode::Char('s') => Some(Action::SearchFocus),
            KeyCode::Char('l') => Some(Action::LocationRequest),
            KeyCode::Char('r') | KeyCode::F(5) => Some(Action::WeatherFetch),
            KeyCode::Char('u') => Some(Action::UiToggleUnits),
            KeyCode::Char('t') => Some(Action::UiToggleTheme),
            KeyCode::Char(c @ '1'..='5') => {
                let index = (c as usize) - ('1' as usize);
                (index < state.history.len()).then_some(Action::HistorySelect(index))
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }
}

impl Component for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let state = props.state;
        let palette = Palette::for_condition(state.theme, None);

        let key = match event {
            EventKind::Resize(w, h) => return vec![Action::UiTerminalResize(*w, *h)],
            EventKind::Key(_) if event.is_interrupt() => return vec![Action::Quit],
            EventKind::Key(key) => key,
        };

        match state.mode {
            InputMode::ConsentPrompt => self
                .consent
                .handle_event(event, ConsentPromptProps { palette: &palette })
                .into_iter()
                .collect(),
            InputMode::Search => self
                .search
                .handle_event(
                    event,
                    SearchBarProps {
                        value: &state.search_input,
                        is_focused: true,
                        palette: &palette,
                    },
                )
                .into_iter()
                .collect(),
            InputMode::Browse => Self::browse_keys(key.code, state).into_iter().collect(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let palette = Palette::for_condition(
            state.theme,
            state.ui.snapshot().map(|snapshot| snapshot.category()),
        );

        let loading_indicator = if state.ui.is_loading() {
            let spinner = SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()];
            format!(" {spinner} ")
        } else {
            String::new()
        };

        let outer_block = Block::default()
            .borders(Borders::ALL)
            .style(palette.base())
            .border_style(palette.border())
            .title(format!(" ☁ WeatherHub {loading_indicator}"))
            .title_style(palette.accent())
            .title_alignment(Alignment::Center);

        let inner = outer_block.inner(area);
        frame.render_widget(outer_block, area);

        let [search_area, history_area, body_area, help_area] = Layout::vertical([
            Constraint::Length(SearchBar::HEIGHT),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.search.render(
            frame,
            search_area,
            SearchBarProps {
                value: &state.search_input,
                is_focused: state.mode == InputMode::Search,
                palette: &palette,
            },
        );
        HistoryBar.render(
            frame,
            history_area,
            HistoryBarProps {
                history: &state.history,
                palette: &palette,
            },
        );
        WeatherBody.render(
            frame,
            body_area,
            WeatherBodyProps {
                state,
                palette: &palette,
            },
        );
        HelpBar.render(
            frame,
            help_area,
            HelpBarProps {
                mode: state.mode,
                palette: &palette,
            },
        );

        if state.mode == InputMode::ConsentPrompt {
            self.consent
                .render(frame, area, ConsentPromptProps { palette: &palette });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key, ActionAssertions};

    fn press(component: &mut WeatherDisplay, state: &AppState, k: &str) -> Vec<Action> {
        component
            .handle_event(&EventKind::Key(key(k)), WeatherDisplayProps { state })
            .into_iter()
            .collect()
    }

    #[test]
    fn test_browse_keys() {
        let mut component = WeatherDisplay::new();
        let state = AppState::default();

        press(&mut component, &state, "r").assert_first(Action::WeatherFetch);
        press(&mut component, &state, "f5").assert_first(Action::WeatherFetch);
        press(&mut component, &state, "/").assert_first(Action::SearchFocus);
        press(&mut component, &state, "l").assert_first(Action::LocationRequest);
        press(&mut component, &state, "u").assert_first(Action::UiToggleUnits);
        press(&mut component, &state, "t").assert_first(Action::UiToggleTheme);
        press(&mut component, &state, "q").assert_first(Action::Quit);
    }

    #[test]
    fn test_history_keys_only_within_range() {
        let mut component = WeatherDisplay::new();
        let mut state = AppState::default();
        state.history.record("Paris");
        state.history.record("Rome");

        press(&mut component, &state, "2").assert_first(Action::HistorySelect(1));
        press(&mut component, &state, "3").assert_empty();
    }

    #[test]
    fn test_search_mode_routes_to_search_bar() {
        let mut component = WeatherDisplay::new();
        let state = AppState {
            mode: InputMode::Search,
            search_input: "Berli".into(),
            ..AppState::default()
        };

        press(&mut component, &state, "n").assert_first(Action::SearchInput("Berlin".into()));
        press(&mut component, &state, "q").assert_first(Action::SearchInput("Berliq".into()));
        press(&mut component, &state, "enter").assert_first(Action::SearchSubmit);
    }

    #[test]
    fn test_consent_mode_routes_to_prompt() {
        let mut component = WeatherDisplay::new();
        let state = AppState {
            mode: InputMode::ConsentPrompt,
            ..AppState::default()
        };

        press(&mut component, &state, "y").assert_first(Action::LocationConsent(true));
        press(&mut component, &state, "r").assert_empty();
    }

    #[test]
    fn test_ctrl_c_quits_in_every_mode() {
        let mut component = WeatherDisplay::new();
        for mode in [InputMode::Browse, InputMode::Search, InputMode::ConsentPrompt] {
            let state = AppState {
                mode,
                ..AppState::default()
            };
            press(&mut component, &state, "ctrl+c").assert_first(Action::Quit);
        }
    }

    #[test]
    fn test_resize_event() {
        let mut component = WeatherDisplay::new();
        let state = AppState::default();
        let actions: Vec<_> = component
            .handle_event(&EventKind::Resize(100, 40), WeatherDisplayProps { state: &state })
            .into_iter()
            .collect();
        actions.assert_first(Action::UiTerminalResize(100, 40));
    }
}
