#![forbid(unsafe_code)]

//! Selector handles and root selectors.
//!
//! A [`Selector<T>`] is a cheap-clone handle to one node of a selector graph.
//! Cloning a handle shares the node, including its caches. Nodes come in a
//! closed set of variants reported by [`SelectorKind`]:
//!
//! - **Root**: a pure read function over the store, typically bound to a
//!   feature name. Roots keep no cache and recompute on every pull.
//! - **Memoized-N** (N = 1..6): see [`crate::memoized`].
//!
//! Evaluation is pull-based: [`Selector::select`] on a terminal node pulls
//! every ancestor on demand.

use std::fmt;
use std::rc::Rc;

use statelens_core::{Result, SelectorValue, Store};

use crate::memoized::{MemoStats, Memoized1};

/// The variant of a selector node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SelectorKind {
    Root,
    Memoized1,
    Memoized2,
    Memoized3,
    Memoized4,
    Memoized5,
    Memoized6,
}

impl SelectorKind {
    /// Number of upstream selectors (0 for roots).
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Root => 0,
            Self::Memoized1 => 1,
            Self::Memoized2 => 2,
            Self::Memoized3 => 3,
            Self::Memoized4 => 4,
            Self::Memoized5 => 5,
            Self::Memoized6 => 6,
        }
    }

    #[must_use]
    pub const fn is_memoized(self) -> bool {
        !matches!(self, Self::Root)
    }
}

/// Result of a tracked pull: the value and whether it differs from the value
/// the node returned before.
#[derive(Debug)]
pub struct Selection<T> {
    pub value: Rc<T>,
    pub changed: bool,
}

impl<T> Clone for Selection<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            changed: self.changed,
        }
    }
}

/// Behaviour shared by every node variant.
pub(crate) trait Node<T> {
    fn pull(&self, store: &dyn Store) -> Result<Selection<T>>;

    fn release(&self);

    fn kind(&self) -> SelectorKind;

    fn stats(&self) -> Option<MemoStats>;
}

/// Handle to a node of a selector graph.
pub struct Selector<T> {
    node: Rc<dyn Node<T>>,
}

impl<T> Clone for Selector<T> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
        }
    }
}

impl<T> fmt::Debug for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("kind", &self.node.kind())
            .field("value_type", &std::any::type_name::<T>())
            .field("stats", &self.node.stats())
            .finish()
    }
}

impl<T: 'static> Selector<T> {
    pub(crate) fn from_node(node: impl Node<T> + 'static) -> Self {
        Self {
            node: Rc::new(node),
        }
    }

    /// Root selector over a shared read function.
    pub(crate) fn root(read: impl Fn(&dyn Store) -> Result<Rc<T>> + 'static) -> Self {
        Self::from_node(RootNode {
            read: Box::new(read),
        })
    }

    /// Root selector computing its value with an arbitrary pure function of
    /// the store.
    ///
    /// The function runs on every pull; wrap the result in a memoized
    /// selector to stop changes from propagating when it returns equal values.
    pub fn from_fn(read: impl Fn(&dyn Store) -> Result<T> + 'static) -> Self {
        Self::root(move |store| read(store).map(Rc::new))
    }

    /// Evaluate the node against `store`.
    pub fn select(&self, store: &dyn Store) -> Result<Rc<T>> {
        self.node.pull(store).map(|selection| selection.value)
    }

    /// Evaluate the node and report whether the value changed since the
    /// previous pull. Roots have no memory and always report a change.
    pub fn select_tracked(&self, store: &dyn Store) -> Result<Selection<T>> {
        self.node.pull(store)
    }

    /// Forget every cached input and result; the next pull recomputes from
    /// scratch. No-op for roots.
    pub fn release(&self) {
        self.node.release();
    }

    #[must_use]
    pub fn kind(&self) -> SelectorKind {
        self.node.kind()
    }

    /// Memoization counters, `None` for roots.
    #[must_use]
    pub fn stats(&self) -> Option<MemoStats> {
        self.node.stats()
    }

    /// Whether both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl<T: SelectorValue> Selector<T> {
    /// Memoized selector projecting this one; shorthand for
    /// [`create_selector`](crate::factory::create_selector).
    pub fn map<R: SelectorValue>(&self, projector: impl Fn(&T) -> R + 'static) -> Selector<R> {
        Memoized1::new(self, projector).into_selector()
    }
}

struct RootNode<T> {
    read: Box<dyn Fn(&dyn Store) -> Result<Rc<T>>>,
}

impl<T> Node<T> for RootNode<T> {
    fn pull(&self, store: &dyn Store) -> Result<Selection<T>> {
        Ok(Selection {
            value: (self.read)(store)?,
            changed: true,
        })
    }

    fn release(&self) {}

    fn kind(&self) -> SelectorKind {
        SelectorKind::Root
    }

    fn stats(&self) -> Option<MemoStats> {
        None
    }
}
