#![forbid(unsafe_code)]

//! Interfaces the selector graph needs from a state store.
//!
//! The store is an external collaborator: it owns named feature slices,
//! replaces them when state mutates, and raises a per-feature change
//! notification. The graph only ever reads.

use std::any::Any;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Result, SelectorError};

/// Opaque current state of one feature slice.
pub type FeatureState = Rc<dyn Any>;

/// Callback invoked with the feature name after the slice changed.
pub type ChangeListener = Rc<dyn Fn(&str)>;

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Allocate a process-unique id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// One named, independently mutable slice of application state.
pub trait Feature {
    fn name(&self) -> &str;

    /// Current state of the slice.
    fn state(&self) -> FeatureState;

    /// Register a listener raised every time the slice changes.
    fn add_change_listener(&self, listener: ChangeListener) -> ListenerId;

    /// Remove a listener. Returns `false` when the id was not registered.
    fn remove_change_listener(&self, id: ListenerId) -> bool;
}

/// Read access to the features held by a store.
pub trait Store {
    /// Look up a feature by name.
    fn feature(&self, name: &str) -> Option<Rc<dyn Feature>>;

    /// Every feature currently known to the store, in registration order.
    fn features(&self) -> Vec<Rc<dyn Feature>>;

    /// Current state of the named feature.
    fn feature_state(&self, name: &str) -> Result<FeatureState> {
        self.feature(name)
            .map(|feature| feature.state())
            .ok_or_else(|| SelectorError::unknown_feature(name))
    }
}

/// Feature name derived from a state type.
///
/// Stable for a given build and type; used whenever a feature is registered or
/// selected without an explicit name.
#[must_use]
pub fn feature_name_of<T: ?Sized + 'static>() -> &'static str {
    std::any::type_name::<T>()
}
