//! The event/action/render loop
//!
//! One `tokio::select!` loop owns the store. Terminal events are mapped to
//! actions by the UI; actions (from the UI, subscriptions, and finished tasks)
//! go through the store; effects are handed to the [`EffectHandler`].

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use weatherhub_core::{Action, AppState, EffectHandler, Middleware, Store, TaskManager};

use crate::event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
use crate::subscriptions::Subscriptions;

/// Timeout passed to each `crossterm::event::poll` call
const POLL_TIMEOUT: Duration = Duration::from_millis(10);
/// Sleep between poll cycles
const POLL_LOOP_SLEEP: Duration = Duration::from_millis(16);

/// Actions produced by one event, plus an optional render hint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventOutcome {
    pub actions: Vec<Action>,
    pub needs_render: bool,
}

impl EventOutcome {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn action(action: Action) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    pub fn from_actions(iter: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl From<Action> for EventOutcome {
    fn from(action: Action) -> Self {
        Self::action(action)
    }
}

impl From<Option<Action>> for EventOutcome {
    fn from(action: Option<Action>) -> Self {
        action.map(Self::action).unwrap_or_default()
    }
}

pub struct Runtime<M: Middleware> {
    store: Store<M>,
    handler: EffectHandler,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    tasks: TaskManager,
    subscriptions: Subscriptions,
    should_render: bool,
}

impl<M: Middleware> Runtime<M> {
    pub fn new(store: Store<M>, handler: EffectHandler) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store,
            handler,
            tasks: TaskManager::new(action_tx.clone()),
            subscriptions: Subscriptions::new(action_tx.clone()),
            action_tx,
            action_rx,
            should_render: true,
        }
    }

    /// Queue an action for the next loop iteration.
    pub fn enqueue(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn subscriptions(&mut self) -> &mut Subscriptions {
        &mut self.subscriptions
    }

    /// Dispatch one action and run its effects.
    ///
    /// Returns `false` when the action asks the app to quit.
    pub fn process_action(&mut self, action: Action) -> bool {
        if matches!(action, Action::Quit) {
            return false;
        }

        let result = self.store.dispatch(action);
        if result.changed {
            self.should_render = true;
        }
        for effect in result.effects {
            self.handler.handle(effect, &mut self.tasks);
        }
        true
    }

    /// Map one terminal event and reduce its actions right away, so the next
    /// event is mapped against the updated state.
    ///
    /// Returns `false` when one of the actions asks the app to quit.
    pub fn handle_event<FEvent, R>(&mut self, event: &EventKind, map_event: &mut FEvent) -> bool
    where
        FEvent: FnMut(&EventKind, &AppState) -> R,
        R: Into<EventOutcome>,
    {
        let outcome: EventOutcome = map_event(event, self.store.state()).into();
        if outcome.needs_render {
            self.should_render = true;
        }
        outcome
            .actions
            .into_iter()
            .all(|action| self.process_action(action))
    }

    pub async fn run<B, FRender, FEvent, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &AppState),
        FEvent: FnMut(&EventKind, &AppState) -> R,
        R: Into<EventOutcome>,
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(
            event_tx,
            POLL_TIMEOUT,
            POLL_LOOP_SLEEP,
            cancel_token.clone(),
        );

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| render(frame, frame.area(), state))?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let Some(event) = process_raw_event(raw_event) else {
                        continue;
                    };
                    if !self.handle_event(&event, &mut map_event) {
                        info!("Quit requested");
                        break;
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if !self.process_action(action) {
                        info!("Quit requested");
                        break;
                    }
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        self.subscriptions.cancel_all();
        self.tasks.cancel_all();
        Ok(())
    }
}
