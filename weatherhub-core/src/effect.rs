//! Effects - side effects declared by the reducer
//!
//! The reducer never performs I/O. It returns a [`DispatchResult`] saying
//! whether state changed and which [`Effect`]s the runtime should run.

use crate::query::QueryDescriptor;
use crate::state::RequestId;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch current weather for a resolved query
    FetchWeather {
        request: RequestId,
        query: QueryDescriptor,
    },

    /// Ask the locator for the user's position
    Locate { request: RequestId },
}

impl Effect {
    pub fn request(&self) -> RequestId {
        match self {
            Effect::FetchWeather { request, .. } | Effect::Locate { request } => *request,
        }
    }
}

/// Result of dispatching an action: change flag plus effects to run.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// Changed or not depending on `changed`, no effects.
    #[inline]
    pub fn changed_if(changed: bool) -> Self {
        Self {
            changed,
            effects: vec![],
        }
    }

    /// A single effect, no state change.
    #[inline]
    pub fn effect(effect: E) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }

    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    #[inline]
    pub fn mark_changed(mut self) -> Self {
        self.changed = true;
        self
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_result_builders() {
        let r: DispatchResult<Effect> = DispatchResult::unchanged();
        assert!(!r.changed);
        assert!(!r.has_effects());

        let r: DispatchResult<Effect> = DispatchResult::changed_if(true);
        assert!(r.changed);
        assert!(r.effects.is_empty());

        let r = DispatchResult::changed_with(Effect::Locate {
            request: RequestId(7),
        });
        assert!(r.changed);
        assert!(r.has_effects());
        assert_eq!(r.effects[0].request(), RequestId(7));
    }
}
