//! Key hints for the current input mode

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use weatherhub_core::InputMode;

use super::Component;
use crate::theme::Palette;

pub struct HelpBar;

pub struct HelpBarProps<'a> {
    pub mode: InputMode,
    pub palette: &'a Palette,
}

fn bindings(mode: InputMode) -> &'static [(&'static str, &'static str)] {
    match mode {
        InputMode::Browse => &[
            ("/", "search"),
            ("l", "my location"),
            ("1-5", "recent"),
            ("r", "refresh"),
            ("u", "units"),
            ("t", "theme"),
            ("q", "quit"),
        ],
        InputMode::Search => &[("enter", "search"), ("esc", "cancel")],
        InputMode::ConsentPrompt => &[("y", "allow"), ("n", "deny")],
    }
}

impl Component for HelpBar {
    type Props<'a> = HelpBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let spans: Vec<Span> = bindings(props.mode)
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(format!(" {key}"), palette.accent()),
                    Span::styled(format!(" {label} "), palette.muted()),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RenderHarness;
    use weatherhub_core::Theme;

    #[test]
    fn test_bindings_follow_mode() {
        let palette = Palette::for_condition(Theme::Dark, None);
        let mut render = RenderHarness::new(100, 1);

        let browse = render.render_to_string_plain(|frame| {
            HelpBar.render(
                frame,
                frame.area(),
                HelpBarProps {
                    mode: InputMode::Browse,
                    palette: &palette,
                },
            );
        });
        assert!(browse.contains("refresh"));
        assert!(browse.contains("my location"));

        let search = render.render_to_string_plain(|frame| {
            HelpBar.render(
                frame,
                frame.area(),
                HelpBarProps {
                    mode: InputMode::Search,
                    palette: &palette,
                },
            );
        });
        assert!(search.contains("cancel"));
        assert!(!search.contains("refresh"));
    }
}
