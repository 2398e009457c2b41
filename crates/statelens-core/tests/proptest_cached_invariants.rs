#![forbid(unsafe_code)]

//! Property-based invariant tests for cached slots and equality.
//!
//! 1. A slot reports a change exactly when the offered value differs from the
//!    previously retained one (first fill included).
//! 2. After any refresh the slot holds a value equal to the last offered one.
//! 3. An unchanged refresh hands back the retained allocation.
//! 4. `values_equal` agrees with `PartialEq` for plain values.

use std::rc::Rc;

use proptest::prelude::*;
use statelens_core::{CachedValue, values_equal};

proptest! {
    #[test]
    fn change_count_matches_distinct_transitions(values in proptest::collection::vec(0u8..4, 0..64)) {
        let mut slot = CachedValue::new();
        let mut changes = 0usize;
        for v in &values {
            let (_, changed) = slot.refresh(Rc::new(*v));
            if changed {
                changes += 1;
            }
        }

        let mut expected = 0usize;
        let mut last: Option<u8> = None;
        for v in &values {
            if last != Some(*v) {
                expected += 1;
                last = Some(*v);
            }
        }
        prop_assert_eq!(changes, expected);
    }

    #[test]
    fn slot_tracks_last_offered_value(values in proptest::collection::vec(any::<i16>(), 1..32)) {
        let mut slot = CachedValue::new();
        for v in &values {
            slot.refresh(Rc::new(*v));
            prop_assert_eq!(slot.peek(), Some(v));
        }
    }

    #[test]
    fn unchanged_refresh_returns_retained_allocation(text in "[a-z]{0,12}") {
        let mut slot = CachedValue::new();
        let (first, _) = slot.refresh(Rc::new(text.clone()));
        let (second, changed) = slot.refresh(Rc::new(text));
        prop_assert!(!changed);
        prop_assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn equality_agrees_with_partial_eq(a in any::<i64>(), b in any::<i64>()) {
        prop_assert_eq!(values_equal(&Rc::new(a), &Rc::new(b)), a == b);
    }
}
