#![forbid(unsafe_code)]

//! Single-slot value box used for every cached input and result of a
//! selector node.
//!
//! # Invariants
//!
//! 1. A fresh slot is empty; "never computed" is distinct from any value.
//! 2. [`refresh`](CachedValue::refresh) only overwrites the slot when the new
//!    value differs under [`values_equal`]; otherwise the previously stored
//!    `Rc` is retained, so unchanged pulls keep handing out the same
//!    allocation.
//! 3. [`clear`](CachedValue::clear) returns the slot to the empty state.

use std::fmt;
use std::rc::Rc;

use crate::equality::{SelectorValue, values_equal};

pub struct CachedValue<T> {
    slot: Option<Rc<T>>,
}

impl<T> CachedValue<T> {
    /// An empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// Whether the slot has been filled since creation or the last clear.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.slot.is_some()
    }

    /// A new handle to the stored value, if any.
    #[must_use]
    pub fn get(&self) -> Option<Rc<T>> {
        self.slot.clone()
    }

    /// Borrow the stored value without touching the reference count.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.slot.as_deref()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}

impl<T: SelectorValue> CachedValue<T> {
    /// Offer a freshly pulled value to the slot.
    ///
    /// Returns the value the slot holds afterwards together with whether it
    /// changed. Filling an empty slot always counts as a change.
    pub fn refresh(&mut self, fresh: Rc<T>) -> (Rc<T>, bool) {
        match &self.slot {
            Some(current) if values_equal(current, &fresh) => (Rc::clone(current), false),
            _ => {
                self.slot = Some(Rc::clone(&fresh));
                (fresh, true)
            }
        }
    }
}

impl<T> Default for CachedValue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for CachedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Some(value) => f.debug_tuple("CachedValue").field(value).finish(),
            None => f.write_str("CachedValue(<empty>)"),
        }
    }
}
