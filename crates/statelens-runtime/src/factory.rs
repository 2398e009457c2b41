#![forbid(unsafe_code)]

//! Construction helpers for selector graphs.
//!
//! Feature selectors read one named slice out of the store; `create_selector`
//! through `create_selector6` combine existing selectors with a projector.
//! Graphs are acyclic by construction since a selector can only reference
//! handles that already exist.
//!
//! ```
//! use std::rc::Rc;
//! use statelens_core::{MemoryStore, impl_selector_value};
//! use statelens_runtime::factory::{create_feature_selector, create_selector};
//!
//! #[derive(Debug, PartialEq)]
//! struct CounterState {
//!     count: i32,
//! }
//! impl_selector_value!(CounterState);
//!
//! let store = MemoryStore::new();
//! store.register_feature(CounterState { count: 2 }).unwrap();
//!
//! let state = create_feature_selector::<CounterState>();
//! let count = create_selector(&state, |s| s.count);
//! let text = create_selector(&count, |c| format!("Clicked {c} times"));
//!
//! assert_eq!(text.select(&store).unwrap().as_str(), "Clicked 2 times");
//! ```

use std::any::Any;

use statelens_core::{SelectorError, SelectorValue, Store, feature_name_of};

use crate::memoized::{Memoized1, Memoized2, Memoized3, Memoized4, Memoized5, Memoized6};
use crate::selector::Selector;

/// Root selector for the feature named after `T`.
#[must_use]
pub fn create_feature_selector<T: Any>() -> Selector<T> {
    create_feature_selector_named(feature_name_of::<T>())
}

/// Root selector for the feature registered under `name`.
///
/// Pulling fails with [`SelectorError::UnknownFeature`] when the store holds
/// no such feature and with [`SelectorError::TypeMismatch`] when the slice is
/// not a `T`.
#[must_use]
pub fn create_feature_selector_named<T: Any>(name: impl Into<String>) -> Selector<T> {
    let name = name.into();
    Selector::root(move |store: &dyn Store| {
        let state = store.feature_state(&name)?;
        state
            .downcast::<T>()
            .map_err(|_| SelectorError::type_mismatch::<T>(name.as_str()))
    })
}

pub fn create_selector<A, R>(a: &Selector<A>, projector: impl Fn(&A) -> R + 'static) -> Selector<R>
where
    A: SelectorValue,
    R: SelectorValue,
{
    Memoized1::new(a, projector).into_selector()
}

pub fn create_selector2<A, B, R>(
    a: &Selector<A>,
    b: &Selector<B>,
    projector: impl Fn(&A, &B) -> R + 'static,
) -> Selector<R>
where
    A: SelectorValue,
    B: SelectorValue,
    R: SelectorValue,
{
    Memoized2::new(a, b, projector).into_selector()
}

pub fn create_selector3<A, B, C, R>(
    a: &Selector<A>,
    b: &Selector<B>,
    c: &Selector<C>,
    projector: impl Fn(&A, &B, &C) -> R + 'static,
) -> Selector<R>
where
    A: SelectorValue,
    B: SelectorValue,
    C: SelectorValue,
    R: SelectorValue,
{
    Memoized3::new(a, b, c, projector).into_selector()
}

pub fn create_selector4<A, B, C, D, R>(
    a: &Selector<A>,
    b: &Selector<B>,
    c: &Selector<C>,
    d: &Selector<D>,
    projector: impl Fn(&A, &B, &C, &D) -> R + 'static,
) -> Selector<R>
where
    A: SelectorValue,
    B: SelectorValue,
    C: SelectorValue,
    D: SelectorValue,
    R: SelectorValue,
{
    Memoized4::new(a, b, c, d, projector).into_selector()
}

pub fn create_selector5<A, B, C, D, E, R>(
    a: &Selector<A>,
    b: &Selector<B>,
    c: &Selector<C>,
    d: &Selector<D>,
    e: &Selector<E>,
    projector: impl Fn(&A, &B, &C, &D, &E) -> R + 'static,
) -> Selector<R>
where
    A: SelectorValue,
    B: SelectorValue,
    C: SelectorValue,
    D: SelectorValue,
    E: SelectorValue,
    R: SelectorValue,
{
    Memoized5::new(a, b, c, d, e, projector).into_selector()
}

/// Six inputs is the widest node; wider projections nest selectors.
pub fn create_selector6<A, B, C, D, E, F, R>(
    a: &Selector<A>,
    b: &Selector<B>,
    c: &Selector<C>,
    d: &Selector<D>,
    e: &Selector<E>,
    f: &Selector<F>,
    projector: impl Fn(&A, &B, &C, &D, &E, &F) -> R + 'static,
) -> Selector<R>
where
    A: SelectorValue,
    B: SelectorValue,
    C: SelectorValue,
    D: SelectorValue,
    E: SelectorValue,
    F: SelectorValue,
    R: SelectorValue,
{
    Memoized6::new(a, b, c, d, e, f, projector).into_selector()
}
