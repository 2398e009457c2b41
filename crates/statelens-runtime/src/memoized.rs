#![forbid(unsafe_code)]

//! Memoized selectors over 1 to 6 upstream selectors.
//!
//! # Algorithm
//!
//! Every pull of a Memoized-N node:
//!
//! 1. Pulls **all** N upstream selectors in order and offers each value to
//!    its input slot. A slot changes when it was empty or when the new value
//!    differs under [`values_equal`](statelens_core::values_equal).
//! 2. If any slot changed, or the node has never produced a result, invokes
//!    the projector with the cached inputs and offers the output to the result
//!    slot. The pull reports `changed` only if that output differs from the
//!    previous one; an equal output leaves the previous `Rc` in place.
//! 3. Otherwise returns the cached result untouched without invoking the
//!    projector.
//!
//! # Invariants
//!
//! 1. The projector runs at most once per distinct combination of inputs,
//!    however often the node is pulled.
//! 2. The projector never runs with an empty input slot; reaching that state
//!    fails with [`SelectorError::IncompleteInputs`].
//! 3. No `RefCell` borrow is held while upstream selectors or the projector
//!    run, so projectors may re-enter the graph.
//!
//! # Failure Modes
//!
//! - **Upstream error mid-pull**: inputs pulled before the failing one have
//!   already taken their new values. The node stays pending, so the next
//!   successful pull projects even if every slot then compares equal.
//!
//! Graphs needing more than six inputs nest memoized selectors, e.g. combine
//! two Memoized-3 nodes with a Memoized-2.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use statelens_core::{CachedValue, Result, SelectorError, SelectorValue, Store};

use crate::selector::{Node, Selection, Selector, SelectorKind};

/// Counters describing how a memoized node has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MemoStats {
    /// Calls to `select`/`select_tracked`.
    pub pulls: u64,
    /// Projector invocations.
    pub recomputations: u64,
    /// Pulls whose result differed from the previous one.
    pub changes: u64,
}

impl MemoStats {
    /// Pulls answered from the cache without running the projector.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.pulls.saturating_sub(self.recomputations)
    }
}

/// Shared tail of every memoized pull: decide whether to project, then settle
/// the result slot.
fn settle<R: SelectorValue>(
    result: &RefCell<CachedValue<R>>,
    stats: &Cell<MemoStats>,
    kind: SelectorKind,
    inputs_changed: bool,
    project: impl FnOnce() -> Result<Rc<R>>,
) -> Result<Selection<R>> {
    let mut counters = stats.get();
    counters.pulls += 1;
    stats.set(counters);

    if !inputs_changed {
        let cached = result.borrow().get();
        if let Some(value) = cached {
            return Ok(Selection {
                value,
                changed: false,
            });
        }
    }

    let fresh = project()?;
    let (value, changed) = result.borrow_mut().refresh(fresh);

    let mut counters = stats.get();
    counters.recomputations += 1;
    if changed {
        counters.changes += 1;
    }
    stats.set(counters);

    tracing::trace!(
        message = "selector.recompute",
        kind = ?kind,
        result_type = std::any::type_name::<R>(),
        changed
    );
    Ok(Selection { value, changed })
}

macro_rules! memoized_selector {
    (
        $(#[$meta:meta])*
        $name:ident, $arity:literal;
        $( $input:ident => $upstream:ident, $slot:ident, $index:literal );+ $(;)?
    ) => {
        $(#[$meta])*
        pub struct $name<$($input,)+ R> {
            $( $upstream: Selector<$input>, )+
            $( $slot: RefCell<CachedValue<$input>>, )+
            result: RefCell<CachedValue<R>>,
            projector: Box<dyn Fn($(&Rc<$input>),+) -> Rc<R>>,
            stats: Cell<MemoStats>,
            // An input changed since the last successful projection.
            pending: Cell<bool>,
        }

        impl<$($input: SelectorValue,)+ R: SelectorValue> $name<$($input,)+ R> {
            /// Build the node from its upstream selectors, given in projector
            /// argument order.
            pub fn new(
                $( $upstream: &Selector<$input>, )+
                projector: impl Fn($(&$input),+) -> R + 'static,
            ) -> Self {
                Self::with_shared_projector(
                    $( $upstream, )+
                    move |$($upstream: &Rc<$input>),+| Rc::new(projector($(&**$upstream),+)),
                )
            }

            /// Build the node from a projector working on the shared slot
            /// values, so it can hand an input back without copying it.
            pub(crate) fn with_shared_projector(
                $( $upstream: &Selector<$input>, )+
                projector: impl Fn($(&Rc<$input>),+) -> Rc<R> + 'static,
            ) -> Self {
                Self {
                    $( $upstream: $upstream.clone(), )+
                    $( $slot: RefCell::new(CachedValue::new()), )+
                    result: RefCell::new(CachedValue::new()),
                    projector: Box::new(projector),
                    stats: Cell::new(MemoStats::default()),
                    pending: Cell::new(false),
                }
            }

            pub fn into_selector(self) -> Selector<R> {
                Selector::from_node(self)
            }
        }

        impl<$($input: SelectorValue,)+ R: SelectorValue> Node<R> for $name<$($input,)+ R> {
            fn pull(&self, store: &dyn Store) -> Result<Selection<R>> {
                // Every upstream is pulled, even once a change is known.
                $(
                    let fresh = self.$upstream.select(store)?;
                    let (_, changed) = self.$slot.borrow_mut().refresh(fresh);
                    if changed {
                        self.pending.set(true);
                    }
                )+

                let selection = settle(
                    &self.result,
                    &self.stats,
                    SelectorKind::$name,
                    self.pending.get(),
                    || {
                        $(
                            let $upstream = self
                                .$slot
                                .borrow()
                                .get()
                                .ok_or(SelectorError::incomplete_inputs($arity, $index))?;
                        )+
                        Ok((self.projector)($(&$upstream),+))
                    },
                )?;
                self.pending.set(false);
                Ok(selection)
            }

            fn release(&self) {
                $( self.$slot.borrow_mut().clear(); )+
                self.result.borrow_mut().clear();
                self.pending.set(false);
            }

            fn kind(&self) -> SelectorKind {
                SelectorKind::$name
            }

            fn stats(&self) -> Option<MemoStats> {
                Some(self.stats.get())
            }
        }

        impl<$($input: fmt::Debug,)+ R: fmt::Debug> fmt::Debug for $name<$($input,)+ R> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    $( .field(stringify!($slot), &self.$slot.borrow()) )+
                    .field("result", &self.result.borrow())
                    .field("stats", &self.stats.get())
                    .finish_non_exhaustive()
            }
        }
    };
}

memoized_selector! {
    /// Memoized selector over one upstream selector.
    Memoized1, 1;
    A => input1, slot1, 0;
}

memoized_selector! {
    /// Memoized selector over two upstream selectors.
    Memoized2, 2;
    A => input1, slot1, 0;
    B => input2, slot2, 1;
}

memoized_selector! {
    /// Memoized selector over three upstream selectors.
    Memoized3, 3;
    A => input1, slot1, 0;
    B => input2, slot2, 1;
    C => input3, slot3, 2;
}

memoized_selector! {
    /// Memoized selector over four upstream selectors.
    Memoized4, 4;
    A => input1, slot1, 0;
    B => input2, slot2, 1;
    C => input3, slot3, 2;
    D => input4, slot4, 3;
}

memoized_selector! {
    /// Memoized selector over five upstream selectors.
    Memoized5, 5;
    A => input1, slot1, 0;
    B => input2, slot2, 1;
    C => input3, slot3, 2;
    D => input4, slot4, 3;
    E => input5, slot5, 4;
}

memoized_selector! {
    /// Memoized selector over six upstream selectors.
    Memoized6, 6;
    A => input1, slot1, 0;
    B => input2, slot2, 1;
    C => input3, slot3, 2;
    D => input4, slot4, 3;
    E => input5, slot5, 4;
    F => input6, slot6, 5;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
