//! Component trait for pure UI elements

use ratatui::{layout::Rect, Frame};
use weatherhub_core::Action;

use crate::event::EventKind;

/// A UI element that renders from props and answers events with actions
///
/// Props carry everything needed to render, borrowed from state. Components
/// may keep view-only state in `&mut self` (a cursor position, say) but any
/// data change goes through an [`Action`].
pub trait Component {
    type Props<'a>;

    /// Map an event to actions. Render-only components keep the default.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None::<Action>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
