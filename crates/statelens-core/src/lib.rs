#![forbid(unsafe_code)]

//! Core: store interfaces, change-detection equality, cached slots, errors.
//!
//! Everything the selector graph in `statelens-runtime` builds on lives here:
//!
//! - [`Store`] / [`Feature`]: the read-and-listen surface of an external state
//!   store, plus [`MemoryStore`] as an in-memory implementation.
//! - [`SelectorValue`] and [`values_equal`]: the three-tier equality rule used
//!   to decide whether a slot changed.
//! - [`CachedValue`]: the single-slot box behind every memoized input and
//!   result.
//! - [`SelectorError`]: the error taxonomy.

pub mod cached;
pub mod equality;
pub mod error;
pub mod memory;
pub mod store;

pub use cached::CachedValue;
pub use equality::{SelectorValue, values_equal};
pub use error::{Result, SelectorError};
pub use memory::{FeatureSlice, MemoryStore};
pub use store::{ChangeListener, Feature, FeatureState, ListenerId, Store, feature_name_of};
