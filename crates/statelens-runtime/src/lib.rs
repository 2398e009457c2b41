#![forbid(unsafe_code)]

//! Memoized selector graphs over a feature store.
//!
//! Build a graph bottom-up with the [`factory`] functions, pull values with
//! [`Selector::select`], or bind a terminal selector to the store with a
//! [`SelectorSubscription`] to be told when its value changes.
//!
//! Everything here is single-threaded: handles are `Rc`-based and `!Send`.

pub mod factory;
pub mod memoized;
pub mod selector;
pub mod subscription;

pub use factory::{
    create_feature_selector, create_feature_selector_named, create_selector, create_selector2,
    create_selector3, create_selector4, create_selector5, create_selector6,
};
pub use memoized::{MemoStats, Memoized1, Memoized2, Memoized3, Memoized4, Memoized5, Memoized6};
pub use selector::{Selection, Selector, SelectorKind};
pub use subscription::{SelectorSubscription, StoreSelectExt, SubscriptionConfig, ValueListener};
