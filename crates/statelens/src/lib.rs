#![forbid(unsafe_code)]

//! statelens public facade crate.
//!
//! Re-exports the store interfaces from `statelens-core` and the selector
//! graph from `statelens-runtime`. Most users only need the prelude:
//!
//! ```
//! use std::rc::Rc;
//! use statelens::prelude::*;
//!
//! let store = Rc::new(MemoryStore::new());
//! store.register("Counter", 0_i32).unwrap();
//!
//! let count = create_feature_selector_named::<i32>("Counter");
//! let parity = create_selector(&count, |c| c % 2 == 0);
//! let sub = store.subscribe_selector(&parity, |even: &bool| println!("even: {even}")).unwrap();
//!
//! store.set_state("Counter", 1_i32).unwrap();
//! assert!(!*sub.value());
//! assert_eq!(sub.version(), 1);
//! ```

pub use statelens_core::{MemoryStore, Result, SelectorError, SelectorValue, Store};
pub use statelens_runtime::{Selector, SelectorSubscription, SubscriptionConfig};

pub mod prelude {
    pub use statelens_core::{
        Feature, ListenerId, MemoryStore, Result, SelectorError, SelectorValue, Store,
        feature_name_of, impl_selector_value,
    };
    pub use statelens_runtime::{
        MemoStats, Selection, Selector, SelectorKind, SelectorSubscription, StoreSelectExt,
        SubscriptionConfig, create_feature_selector, create_feature_selector_named,
        create_selector, create_selector2, create_selector3, create_selector4, create_selector5,
        create_selector6,
    };
}
