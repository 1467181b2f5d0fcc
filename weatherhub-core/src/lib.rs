//! Core of WeatherHub: state, reducer and the weather lookup plumbing
//!
//! Nothing in this crate touches the terminal. The flow is
//!
//! 1. an [`Action`] is dispatched to the [`Store`],
//! 2. the [`reducer`] updates [`AppState`] and returns [`Effect`]s,
//! 3. the [`EffectHandler`] runs each effect as a task on the [`TaskManager`],
//! 4. the task sends a `*Did*` result action back through the action channel.
//!
//! Every lookup carries a [`RequestId`]; results for anything but the latest
//! request are dropped by the reducer.

pub mod action;
pub mod api;
pub mod condition;
pub mod effect;
pub mod error;
pub mod geolocation;
pub mod history;
pub mod query;
pub mod reducer;
pub mod services;
pub mod state;
pub mod store;
pub mod tasks;

pub use action::Action;
pub use api::{ClientConfig, WeatherClient, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use condition::ConditionCategory;
pub use effect::{DispatchResult, Effect};
pub use error::{GeolocationError, LookupError};
pub use geolocation::{Geolocator, IpLocator, Locator};
pub use history::{QueryHistory, HISTORY_CAPACITY};
pub use query::{Coordinates, QueryDescriptor};
pub use reducer::reducer;
pub use services::EffectHandler;
pub use state::{
    AppState, InputMode, RequestId, SunTimes, TempUnit, Theme, UiState, WeatherSnapshot,
};
pub use store::{Middleware, NoopMiddleware, Store, TracingMiddleware};
pub use tasks::{TaskKey, TaskManager};
