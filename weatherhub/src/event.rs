//! Terminal events and the crossterm poller

use std::time::Duration;

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Raw event from crossterm before processing
#[derive(Debug)]
pub enum RawEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// The event payload components receive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Key(KeyEvent),
    Resize(u16, u16),
}

impl EventKind {
    /// Ctrl+C quits from any mode
    pub fn is_interrupt(&self) -> bool {
        matches!(
            self,
            EventKind::Key(key)
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
        )
    }
}

/// Spawn the event polling task with cancellation support
///
/// Crossterm's poll blocks, so it runs in short slices between sleeps and
/// forwards at most a batch of events per cycle.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut events_processed = 0;
                    while events_processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        events_processed += 1;
                        let raw = match event::read() {
                            Ok(event::Event::Key(key)) => Some(RawEvent::Key(key)),
                            Ok(event::Event::Resize(w, h)) => Some(RawEvent::Resize(w, h)),
                            _ => None,
                        };
                        if let Some(raw) = raw {
                            if tx.send(raw).is_err() {
                                debug!("Event channel closed, stopping poller");
                                return;
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Turn a raw event into an [`EventKind`]
///
/// Key releases and repeats are dropped (Windows reports both).
pub fn process_raw_event(raw: RawEvent) -> Option<EventKind> {
    match raw {
        RawEvent::Key(key) if key.kind == KeyEventKind::Press => Some(EventKind::Key(key)),
        RawEvent::Key(_) => None,
        RawEvent::Resize(w, h) => Some(EventKind::Resize(w, h)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key_with(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn test_process_raw_event_key() {
        let press = key_with(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Press);
        assert_eq!(
            process_raw_event(RawEvent::Key(press)),
            Some(EventKind::Key(press))
        );
    }

    #[test]
    fn test_key_release_is_dropped() {
        let release = key_with(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(process_raw_event(RawEvent::Key(release)), None);
    }

    #[test]
    fn test_process_raw_event_resize() {
        assert_eq!(
            process_raw_event(RawEvent::Resize(80, 24)),
            Some(EventKind::Resize(80, 24))
        );
    }

    #[test]
    fn test_interrupt() {
        let ctrl_c = key_with(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        let plain_c = key_with(KeyCode::Char('c'), KeyModifiers::NONE, KeyEventKind::Press);

        assert!(EventKind::Key(ctrl_c).is_interrupt());
        assert!(!EventKind::Key(plain_c).is_interrupt());
        assert!(!EventKind::Resize(1, 1).is_interrupt());
    }
}
