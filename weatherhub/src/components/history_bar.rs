//! "Recent:" chips for the last successful name lookups

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use weatherhub_core::QueryHistory;

use super::Component;
use crate::theme::Palette;

pub struct HistoryBar;

pub struct HistoryBarProps<'a> {
    pub history: &'a QueryHistory,
    pub palette: &'a Palette,
}

impl Component for HistoryBar {
    type Props<'a> = HistoryBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.history.is_empty() {
            return;
        }
        let palette = props.palette;

        let mut spans = vec![Span::styled(" Recent:", palette.muted())];
        for (i, name) in props.history.entries().iter().enumerate() {
            spans.push(Span::styled(format!(" [{}]", i + 1), palette.accent()));
            spans.push(Span::raw(format!(" {name}")));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
