#![forbid(unsafe_code)]

//! In-memory reference store.
//!
//! [`MemoryStore`] holds [`FeatureSlice`]s in registration order. Replacing a
//! slice's state raises its change notification synchronously, every time,
//! whether or not the new state equals the old one: deciding what changed is
//! the selector graph's job.
//!
//! # Re-entrancy
//!
//! No `RefCell` borrow is held while listeners run, so a listener may read
//! any slice, register or remove listeners, or mutate state again.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;

use crate::error::{Result, SelectorError};
use crate::store::{ChangeListener, Feature, FeatureState, ListenerId, Store, feature_name_of};

/// One named slice of state with its change listeners.
pub struct FeatureSlice {
    name: String,
    state: RefCell<FeatureState>,
    listeners: RefCell<Vec<(ListenerId, ChangeListener)>>,
    version: Cell<u64>,
}

impl FeatureSlice {
    #[must_use]
    pub fn new<T: Any>(name: impl Into<String>, initial: T) -> Self {
        Self {
            name: name.into(),
            state: RefCell::new(Rc::new(initial)),
            listeners: RefCell::new(Vec::new()),
            version: Cell::new(0),
        }
    }

    /// Replace the state with `value` and notify listeners.
    pub fn set_state<T: Any>(&self, value: T) {
        self.replace_state(Rc::new(value));
    }

    /// Replace the state with an already shared value and notify listeners.
    pub fn replace_state(&self, state: FeatureState) {
        *self.state.borrow_mut() = state;
        self.version.set(self.version.get() + 1);
        self.notify();
    }

    /// Derive the next state from the current one.
    ///
    /// Fails with [`SelectorError::TypeMismatch`] when the slice does not
    /// currently hold a `T`; the state is left untouched in that case.
    pub fn update<T: Any>(&self, f: impl FnOnce(&T) -> T) -> Result<()> {
        let current = self
            .state()
            .downcast::<T>()
            .map_err(|_| SelectorError::type_mismatch::<T>(self.name.as_str()))?;
        self.set_state(f(&current));
        Ok(())
    }

    /// Number of replacements since creation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version.get()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn notify(&self) {
        let listeners: Vec<ChangeListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        tracing::trace!(
            message = "feature.changed",
            feature = %self.name,
            version = self.version.get(),
            listeners = listeners.len()
        );
        for listener in listeners {
            listener(&self.name);
        }
    }
}

impl Feature for FeatureSlice {
    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> FeatureState {
        Rc::clone(&self.state.borrow())
    }

    fn add_change_listener(&self, listener: ChangeListener) -> ListenerId {
        let id = ListenerId::next();
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn remove_change_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }
}

impl fmt::Debug for FeatureSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureSlice")
            .field("name", &self.name)
            .field("version", &self.version.get())
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

/// A store holding feature slices in memory.
#[derive(Default)]
pub struct MemoryStore {
    slices: RefCell<Vec<Rc<FeatureSlice>>>,
    index: RefCell<AHashMap<String, usize>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a feature under an explicit name.
    pub fn register<T: Any>(&self, name: impl Into<String>, initial: T) -> Result<Rc<FeatureSlice>> {
        let name = name.into();
        let mut index = self.index.borrow_mut();
        if index.contains_key(&name) {
            return Err(SelectorError::DuplicateFeature { name });
        }
        let slice = Rc::new(FeatureSlice::new(name.clone(), initial));
        let mut slices = self.slices.borrow_mut();
        index.insert(name, slices.len());
        slices.push(Rc::clone(&slice));
        Ok(slice)
    }

    /// Register a feature under the name derived from its state type.
    pub fn register_feature<T: Any>(&self, initial: T) -> Result<Rc<FeatureSlice>> {
        self.register(feature_name_of::<T>(), initial)
    }

    #[must_use]
    pub fn slice(&self, name: &str) -> Option<Rc<FeatureSlice>> {
        let position = *self.index.borrow().get(name)?;
        self.slices.borrow().get(position).cloned()
    }

    /// Replace the state of the named feature and notify its listeners.
    pub fn set_state<T: Any>(&self, name: &str, value: T) -> Result<()> {
        let slice = self
            .slice(name)
            .ok_or_else(|| SelectorError::unknown_feature(name))?;
        slice.set_state(value);
        Ok(())
    }

    /// Derive the next state of the named feature from the current one.
    pub fn update<T: Any>(&self, name: &str, f: impl FnOnce(&T) -> T) -> Result<()> {
        let slice = self
            .slice(name)
            .ok_or_else(|| SelectorError::unknown_feature(name))?;
        slice.update(f)
    }

    /// Total number of change listeners across all features.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.slices
            .borrow()
            .iter()
            .map(|slice| slice.listener_count())
            .sum()
    }

    #[must_use]
    pub fn feature_names(&self) -> Vec<String> {
        self.slices
            .borrow()
            .iter()
            .map(|slice| slice.name.clone())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slices.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.borrow().is_empty()
    }
}

impl Store for MemoryStore {
    fn feature(&self, name: &str) -> Option<Rc<dyn Feature>> {
        self.slice(name).map(|slice| slice as Rc<dyn Feature>)
    }

    fn features(&self) -> Vec<Rc<dyn Feature>> {
        self.slices
            .borrow()
            .iter()
            .map(|slice| Rc::clone(slice) as Rc<dyn Feature>)
            .collect()
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("features", &self.slices.borrow())
            .finish()
    }
}
