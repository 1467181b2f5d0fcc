//! WeatherHub terminal UI
//!
//! The runtime, components and configuration for the `weatherhub` binary.
//! State, the reducer and the lookup services live in `weatherhub-core`.

pub mod cli;
pub mod component;
pub mod components;
pub mod event;
pub mod logging;
pub mod runtime;
pub mod subscriptions;
pub mod testing;
pub mod theme;

pub use component::Component;
pub use event::EventKind;
pub use runtime::{EventOutcome, Runtime};
pub use subscriptions::Subscriptions;
pub use theme::Palette;
