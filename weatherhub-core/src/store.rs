//! Centralized state store with reducer pattern

use crate::action::Action;
use crate::effect::{DispatchResult, Effect};
use crate::state::AppState;

/// A reducer handles one action, mutates state, and declares effects.
pub type Reducer = fn(&mut AppState, Action) -> DispatchResult<Effect>;

/// Owns the [`AppState`] for one session.
///
/// All state mutation goes through [`Store::dispatch`], which runs the
/// middleware hooks around the reducer.
pub struct Store<M: Middleware = NoopMiddleware> {
    state: AppState,
    reducer: Reducer,
    middleware: M,
}

impl Store<NoopMiddleware> {
    pub fn new(state: AppState, reducer: Reducer) -> Self {
        Self::with_middleware(state, reducer, NoopMiddleware)
    }
}

impl<M: Middleware> Store<M> {
    pub fn with_middleware(state: AppState, reducer: Reducer, middleware: M) -> Self {
        Self {
            state,
            reducer,
            middleware,
        }
    }

    /// Dispatch an action through middleware and reducer
    pub fn dispatch(&mut self, action: Action) -> DispatchResult<Effect> {
        self.middleware.before(&action);
        let result = (self.reducer)(&mut self.state, action.clone());
        self.middleware.after(&action, &result);
        result
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a mutable reference to the state
    ///
    /// Use sparingly - prefer dispatching actions for state changes.
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}

/// Hooks that run around every dispatch
pub trait Middleware {
    /// Called before the action reaches the reducer
    fn before(&mut self, action: &Action);

    /// Called after the reducer returned
    fn after(&mut self, action: &Action, result: &DispatchResult<Effect>);
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl Middleware for NoopMiddleware {
    fn before(&mut self, _action: &Action) {}
    fn after(&mut self, _action: &Action, _result: &DispatchResult<Effect>) {}
}

/// Logs every action through `tracing`
///
/// `Tick` is skipped unless `include_ticks` is set; it fires several times a
/// second and drowns everything else.
#[derive(Debug, Clone, Default)]
pub struct TracingMiddleware {
    pub include_ticks: bool,
}

impl TracingMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    fn skip(&self, action: &Action) -> bool {
        !self.include_ticks && matches!(action, Action::Tick)
    }
}

impl Middleware for TracingMiddleware {
    fn before(&mut self, action: &Action) {
        if self.skip(action) {
            return;
        }
        tracing::debug!(
            action = %action.name(),
            category = action.category().unwrap_or("global"),
            summary = %action.summary(),
            "Dispatching action"
        );
    }

    fn after(&mut self, action: &Action, result: &DispatchResult<Effect>) {
        if self.skip(action) {
            return;
        }
        tracing::debug!(
            action = %action.name(),
            state_changed = result.changed,
            effects = result.effects.len(),
            "Action processed"
        );
    }
}
