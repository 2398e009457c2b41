#![forbid(unsafe_code)]

//! Change-detection equality for selector slots.
//!
//! Every cached slot in a selector graph (inputs and results alike) decides
//! "did this value change?" with the same three-tier rule:
//!
//! 1. **Identity**: both slots share the same allocation (`Rc::ptr_eq`). This
//!    is the fast path for immutable state handed through unchanged, e.g. a
//!    feature slice that was not replaced.
//! 2. **Self-supplied equality**: [`SelectorValue::custom_eq`], when the type
//!    provides one and it answers `Some(true)`.
//! 3. **Structural equality**: the type's `PartialEq`.
//!
//! Two values are considered equal as soon as one tier says so. The rule is
//! deliberately not configurable per selector.
//!
//! # Implementing `SelectorValue`
//!
//! Most state types only need the marker impl on top of a derived `PartialEq`:
//!
//! ```
//! use statelens_core::impl_selector_value;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct CounterState {
//!     count: i32,
//! }
//!
//! impl_selector_value!(CounterState);
//! ```
//!
//! Types with a cheaper or looser notion of sameness override `custom_eq`:
//!
//! ```
//! use statelens_core::SelectorValue;
//!
//! #[derive(Debug, PartialEq)]
//! struct Document {
//!     revision: u64,
//!     body: String,
//! }
//!
//! impl SelectorValue for Document {
//!     fn custom_eq(&self, other: &Self) -> Option<bool> {
//!         Some(self.revision == other.revision)
//!     }
//! }
//! ```

use std::rc::Rc;
use std::sync::Arc;

/// A value that can live in a selector slot.
pub trait SelectorValue: PartialEq + 'static {
    /// Equality supplied by the type itself, consulted before `PartialEq`.
    ///
    /// `None` means the type has nothing beyond its `PartialEq` to offer.
    fn custom_eq(&self, _other: &Self) -> Option<bool> {
        None
    }
}

/// Apply the three-tier equality rule to two shared slot values.
#[must_use]
pub fn values_equal<T: SelectorValue>(a: &Rc<T>, b: &Rc<T>) -> bool {
    Rc::ptr_eq(a, b) || a.custom_eq(b) == Some(true) || **a == **b
}

/// Implement [`SelectorValue`] with the default (structural) behaviour for
/// one or more types.
#[macro_export]
macro_rules! impl_selector_value {
    ($($ty:ty),+ $(,)?) => {
        $(impl $crate::SelectorValue for $ty {})+
    };
}

impl_selector_value!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    &'static str,
);

impl<T: SelectorValue> SelectorValue for Option<T> {
    fn custom_eq(&self, other: &Self) -> Option<bool> {
        match (self, other) {
            (Some(a), Some(b)) => a.custom_eq(b),
            _ => None,
        }
    }
}

impl<T: SelectorValue> SelectorValue for Box<T> {
    fn custom_eq(&self, other: &Self) -> Option<bool> {
        (**self).custom_eq(other)
    }
}

impl<T: PartialEq + 'static> SelectorValue for Vec<T> {}

impl<T: PartialEq + 'static, const N: usize> SelectorValue for [T; N] {}

// Shared pointers answer the identity question for their pointee as well.
impl<T: ?Sized + PartialEq + 'static> SelectorValue for Rc<T> {
    fn custom_eq(&self, other: &Self) -> Option<bool> {
        Rc::ptr_eq(self, other).then_some(true)
    }
}

impl<T: ?Sized + PartialEq + 'static> SelectorValue for Arc<T> {
    fn custom_eq(&self, other: &Self) -> Option<bool> {
        Arc::ptr_eq(self, other).then_some(true)
    }
}

macro_rules! tuple_selector_value {
    ($($name:ident),+) => {
        impl<$($name: PartialEq + 'static),+> SelectorValue for ($($name,)+) {}
    };
}

tuple_selector_value!(A);
tuple_selector_value!(A, B);
tuple_selector_value!(A, B, C);
tuple_selector_value!(A, B, C, D);
tuple_selector_value!(A, B, C, D, E);
tuple_selector_value!(A, B, C, D, E, F);
