#![forbid(unsafe_code)]

//! Live, change-driven bindings of a selector to a store.
//!
//! A [`SelectorSubscription`] listens to every feature the store knew about
//! when the subscription was built. Each feature change re-pulls the selector
//! through an internal Memoized-1 adapter, and value listeners fire only when
//! the selected value actually changed.
//!
//! # Lifecycle
//!
//! ```text
//! new ──► active ◄──► paused
//!           │            │
//!           └──► disposed ◄┘   (dispose() or drop)
//! ```
//!
//! # Invariants
//!
//! 1. The initial pull performed by the constructor never notifies.
//! 2. Listeners fire once per distinct consecutive value, in registration
//!    order, and `version()` counts those notifications.
//! 3. A paused subscription never pulls. `resume()` performs a single pull,
//!    so any number of changes while paused yields at most one notification.
//! 4. After `dispose()` the store holds no listener for the subscription.
//!
//! # Failure Modes
//!
//! Errors from the initial pull and from [`SelectorSubscription::refresh`]
//! return to the caller. A pull triggered by a store event has no caller: the
//! error is logged with `subscription.pull_failed` and kept in
//! [`SelectorSubscription::last_error`] until the next successful pull.
//!
//! # Known limitation
//!
//! Features registered after the subscription was built are not observed.

use std::cell::{Cell, OnceCell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use statelens_core::{
    ChangeListener, Feature, ListenerId, Result, SelectorError, SelectorValue, Store,
};

use crate::memoized::Memoized1;
use crate::selector::Selector;

/// Callback invoked with the new value after it changed.
pub type ValueListener<T> = Rc<dyn Fn(&T)>;

/// Options applied when a subscription is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionConfig {
    /// Name carried by the subscription's log events.
    pub label: Option<String>,
    /// Build the subscription in the paused state.
    pub start_paused: bool,
}

impl SubscriptionConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn start_paused(mut self, paused: bool) -> Self {
        self.start_paused = paused;
        self
    }
}

struct Registration {
    feature: Rc<dyn Feature>,
    id: ListenerId,
}

struct SubscriptionInner<T> {
    label: String,
    store: Rc<dyn Store>,
    adapter: Selector<T>,
    registrations: RefCell<Vec<Registration>>,
    value: RefCell<Rc<T>>,
    version: Cell<u64>,
    last_error: RefCell<Option<SelectorError>>,
    listeners: RefCell<Vec<(ListenerId, ValueListener<T>)>>,
    paused: Cell<bool>,
    disposed: Cell<bool>,
}

impl<T: SelectorValue> SubscriptionInner<T> {
    fn on_feature_changed(&self, feature: &str) {
        if self.disposed.get() || self.paused.get() {
            return;
        }
        if let Err(error) = self.pull() {
            tracing::warn!(
                message = "subscription.pull_failed",
                subscription = %self.label,
                feature,
                error = %error
            );
            *self.last_error.borrow_mut() = Some(error);
        }
    }

    /// Re-pull the adapter. A changed value reaches `deliver` from inside the
    /// adapter's projector.
    fn pull(&self) -> Result<bool> {
        let selection = self.adapter.select_tracked(self.store.as_ref())?;
        self.last_error.borrow_mut().take();
        Ok(selection.changed)
    }

    fn deliver(&self, value: Rc<T>) {
        if self.disposed.get() {
            return;
        }
        *self.value.borrow_mut() = Rc::clone(&value);
        let version = self.version.get() + 1;
        self.version.set(version);

        let listeners: Vec<ValueListener<T>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        tracing::debug!(
            message = "subscription.notify",
            subscription = %self.label,
            version,
            listeners = listeners.len()
        );
        for listener in listeners {
            listener(&value);
        }
    }

    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        let registrations = std::mem::take(&mut *self.registrations.borrow_mut());
        let features = registrations.len();
        for registration in registrations {
            registration.feature.remove_change_listener(registration.id);
        }
        self.listeners.borrow_mut().clear();
        tracing::debug!(
            message = "subscription.dispose",
            subscription = %self.label,
            features
        );
    }
}

/// A selector bound to a store, notifying listeners on value transitions.
///
/// Dropping the subscription disposes it.
pub struct SelectorSubscription<T: SelectorValue> {
    inner: Rc<SubscriptionInner<T>>,
}

impl<T: SelectorValue> SelectorSubscription<T> {
    /// Subscribe without a value listener.
    pub fn new(store: Rc<dyn Store>, selector: &Selector<T>) -> Result<Self> {
        Self::build(store, selector, SubscriptionConfig::default(), None)
    }

    /// Subscribe with an initial value listener.
    pub fn with_listener(
        store: Rc<dyn Store>,
        selector: &Selector<T>,
        listener: impl Fn(&T) + 'static,
    ) -> Result<Self> {
        Self::build(
            store,
            selector,
            SubscriptionConfig::default(),
            Some(Rc::new(listener)),
        )
    }

    pub fn with_config(
        store: Rc<dyn Store>,
        selector: &Selector<T>,
        config: SubscriptionConfig,
    ) -> Result<Self> {
        Self::build(store, selector, config, None)
    }

    fn build(
        store: Rc<dyn Store>,
        selector: &Selector<T>,
        config: SubscriptionConfig,
        listener: Option<ValueListener<T>>,
    ) -> Result<Self> {
        let features = store.features();

        // Filled once the inner state exists, which keeps the initial pull
        // silent.
        let sink: Rc<OnceCell<Weak<SubscriptionInner<T>>>> = Rc::new(OnceCell::new());
        let adapter = {
            let sink = Rc::clone(&sink);
            Memoized1::with_shared_projector(selector, move |value: &Rc<T>| {
                if let Some(inner) = sink.get().and_then(Weak::upgrade) {
                    inner.deliver(Rc::clone(value));
                }
                Rc::clone(value)
            })
            .into_selector()
        };
        let initial = adapter.select(store.as_ref())?;

        let label = config
            .label
            .unwrap_or_else(|| std::any::type_name::<T>().to_string());
        let inner = Rc::new(SubscriptionInner {
            label,
            store,
            adapter,
            registrations: RefCell::new(Vec::with_capacity(features.len())),
            value: RefCell::new(initial),
            version: Cell::new(0),
            last_error: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            paused: Cell::new(config.start_paused),
            disposed: Cell::new(false),
        });
        let _ = sink.set(Rc::downgrade(&inner));

        if let Some(listener) = listener {
            inner
                .listeners
                .borrow_mut()
                .push((ListenerId::next(), listener));
        }

        for feature in features {
            let weak = Rc::downgrade(&inner);
            let on_change: ChangeListener = Rc::new(move |name: &str| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_feature_changed(name);
                }
            });
            let id = feature.add_change_listener(on_change);
            inner
                .registrations
                .borrow_mut()
                .push(Registration { feature, id });
        }

        tracing::debug!(
            message = "subscription.create",
            subscription = %inner.label,
            features = inner.registrations.borrow().len(),
            paused = config.start_paused
        );
        Ok(Self { inner })
    }

    /// The most recently selected value.
    #[must_use]
    pub fn value(&self) -> Rc<T> {
        Rc::clone(&self.inner.value.borrow())
    }

    /// Number of notifications delivered so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Stop reacting to store changes; `value()` stays frozen.
    pub fn pause(&self) {
        self.inner.paused.set(true);
    }

    /// Resume and immediately reconcile with the store.
    ///
    /// No-op unless paused. The reconciling pull notifies at most once; its
    /// error, if any, is returned and also kept in `last_error()`.
    pub fn resume(&self) -> Result<()> {
        if !self.inner.paused.replace(false) || self.inner.disposed.get() {
            return Ok(());
        }
        self.inner.pull().map(|_| ()).inspect_err(|error| {
            *self.inner.last_error.borrow_mut() = Some(error.clone());
        })
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.inner.paused.get()
    }

    /// Re-pull now and report whether the value changed.
    ///
    /// Returns `Ok(false)` without pulling while paused or after disposal.
    pub fn refresh(&self) -> Result<bool> {
        if self.inner.paused.get() || self.inner.disposed.get() {
            return Ok(false);
        }
        self.inner.pull()
    }

    /// Detach from every feature and drop all value listeners. Idempotent.
    pub fn dispose(&self) {
        self.inner.dispose();
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    /// Register a value listener; listeners run in registration order.
    ///
    /// Listeners added after disposal are never invoked.
    pub fn add_value_changed_listener(&self, listener: impl Fn(&T) + 'static) -> ListenerId {
        let id = ListenerId::next();
        if !self.inner.disposed.get() {
            let listener: ValueListener<T> = Rc::new(listener);
            self.inner.listeners.borrow_mut().push((id, listener));
        }
        id
    }

    /// Register a listener that only learns that the value changed.
    ///
    /// It shares the value listeners' ordering and is removed with
    /// [`remove_value_changed_listener`](Self::remove_value_changed_listener).
    pub fn add_state_changed_listener(&self, listener: impl Fn() + 'static) -> ListenerId {
        self.add_value_changed_listener(move |_: &T| listener())
    }

    /// Returns `false` when the id was not registered.
    pub fn remove_value_changed_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Number of features the subscription is attached to.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.inner.registrations.borrow().len()
    }

    /// Error from the latest failed pull, cleared by the next successful one.
    #[must_use]
    pub fn last_error(&self) -> Option<SelectorError> {
        self.inner.last_error.borrow().clone()
    }
}

impl<T: SelectorValue> Drop for SelectorSubscription<T> {
    fn drop(&mut self) {
        self.inner.dispose();
    }
}

impl<T: SelectorValue> fmt::Debug for SelectorSubscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectorSubscription")
            .field("label", &self.inner.label)
            .field("version", &self.version())
            .field("paused", &self.is_paused())
            .field("disposed", &self.is_disposed())
            .field("features", &self.feature_count())
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

/// Subscription shorthands on a shared store handle.
pub trait StoreSelectExt {
    /// Evaluate `selector` once against this store.
    fn select<T: 'static>(&self, selector: &Selector<T>) -> Result<Rc<T>>;

    fn subscribe_selector<T: SelectorValue>(
        &self,
        selector: &Selector<T>,
        listener: impl Fn(&T) + 'static,
    ) -> Result<SelectorSubscription<T>>;

    fn subscribe_selector_with<T: SelectorValue>(
        &self,
        selector: &Selector<T>,
        config: SubscriptionConfig,
        listener: impl Fn(&T) + 'static,
    ) -> Result<SelectorSubscription<T>>;
}

impl<S: Store + 'static> StoreSelectExt for Rc<S> {
    fn select<T: 'static>(&self, selector: &Selector<T>) -> Result<Rc<T>> {
        selector.select(self.as_ref())
    }

    fn subscribe_selector<T: SelectorValue>(
        &self,
        selector: &Selector<T>,
        listener: impl Fn(&T) + 'static,
    ) -> Result<SelectorSubscription<T>> {
        SelectorSubscription::with_listener(Rc::clone(self) as Rc<dyn Store>, selector, listener)
    }

    fn subscribe_selector_with<T: SelectorValue>(
        &self,
        selector: &Selector<T>,
        config: SubscriptionConfig,
        listener: impl Fn(&T) + 'static,
    ) -> Result<SelectorSubscription<T>> {
        SelectorSubscription::build(
            Rc::clone(self) as Rc<dyn Store>,
            selector,
            config,
            Some(Rc::new(listener)),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{create_feature_selector_named, create_selector, create_selector2};
    use statelens_core::MemoryStore;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |value: &T| sink.borrow_mut().push(value.clone()))
    }

    fn counter_store() -> Rc<MemoryStore> {
        let store = Rc::new(MemoryStore::new());
        store.register("Counter", 0_i32).unwrap();
        store
    }

    fn parity() -> Selector<bool> {
        create_selector(&create_feature_selector_named::<i32>("Counter"), |c| c % 2 == 0)
    }

    #[test]
    fn initial_pull_is_silent() {
        let store = counter_store();
        let (seen, listener) = recorder::<bool>();
        let sub = store.subscribe_selector(&parity(), listener).unwrap();

        assert!(*sub.value());
        assert_eq!(sub.version(), 0);
        assert!(seen.borrow().is_empty());
        assert_eq!(sub.feature_count(), 1);
    }

    #[test]
    fn equal_values_are_suppressed() {
        let store = counter_store();
        let (seen, listener) = recorder::<bool>();
        let sub = store.subscribe_selector(&parity(), listener).unwrap();

        store.set_state("Counter", 2_i32).unwrap();
        store.set_state("Counter", 4_i32).unwrap();
        assert!(seen.borrow().is_empty());

        store.set_state("Counter", 5_i32).unwrap();
        store.set_state("Counter", 7_i32).unwrap();
        store.set_state("Counter", 8_i32).unwrap();
        assert_eq!(*seen.borrow(), vec![false, true]);
        assert_eq!(sub.version(), 2);
        assert!(*sub.value());
    }

    #[test]
    fn pause_freezes_and_resume_notifies_net_change_once() {
        let store = counter_store();
        let count = create_selector(&create_feature_selector_named::<i32>("Counter"), |c| *c);
        let (seen, listener) = recorder::<i32>();
        let sub = store.subscribe_selector(&count, listener).unwrap();

        sub.pause();
        assert!(sub.is_paused());
        store.set_state("Counter", 1_i32).unwrap();
        store.set_state("Counter", 2_i32).unwrap();
        store.set_state("Counter", 3_i32).unwrap();
        assert_eq!(*sub.value(), 0);
        assert!(seen.borrow().is_empty());

        sub.resume().unwrap();
        assert!(!sub.is_paused());
        assert_eq!(*seen.borrow(), vec![3]);
        assert_eq!(*sub.value(), 3);

        // Resuming an active subscription does nothing.
        sub.resume().unwrap();
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn resume_without_net_change_is_silent() {
        let store = counter_store();
        let count = create_selector(&create_feature_selector_named::<i32>("Counter"), |c| *c);
        let (seen, listener) = recorder::<i32>();
        let sub = store.subscribe_selector(&count, listener).unwrap();

        sub.pause();
        store.set_state("Counter", 9_i32).unwrap();
        store.set_state("Counter", 0_i32).unwrap();
        sub.resume().unwrap();
        assert!(seen.borrow().is_empty());
        assert_eq!(sub.version(), 0);
    }

    #[test]
    fn start_paused_config() {
        let store = counter_store();
        let config = SubscriptionConfig::new()
            .with_label("parity")
            .start_paused(true);
        let (seen, listener) = recorder::<bool>();
        let sub = store
            .subscribe_selector_with(&parity(), config, listener)
            .unwrap();

        assert_eq!(sub.label(), "parity");
        assert!(sub.is_paused());
        store.set_state("Counter", 1_i32).unwrap();
        assert!(seen.borrow().is_empty());
        assert!(!sub.refresh().unwrap());

        sub.resume().unwrap();
        assert_eq!(*seen.borrow(), vec![false]);
    }

    #[test]
    fn dispose_detaches_and_is_idempotent() {
        let store = counter_store();
        store.register("Other", String::new()).unwrap();
        let (seen, listener) = recorder::<bool>();
        let sub = store.subscribe_selector(&parity(), listener).unwrap();
        assert_eq!(store.listener_count(), 2);

        sub.dispose();
        assert!(sub.is_disposed());
        assert_eq!(store.listener_count(), 0);
        assert_eq!(sub.listener_count(), 0);

        sub.dispose();
        assert_eq!(store.listener_count(), 0);

        store.set_state("Counter", 1_i32).unwrap();
        assert!(seen.borrow().is_empty());
        assert!(!sub.refresh().unwrap());
    }

    #[test]
    fn drop_disposes() {
        let store = counter_store();
        {
            let _sub = SelectorSubscription::new(store.clone(), &parity()).unwrap();
            assert_eq!(store.listener_count(), 1);
        }
        assert_eq!(store.listener_count(), 0);
        store.set_state("Counter", 3_i32).unwrap();
    }

    #[test]
    fn listeners_run_in_order_and_can_be_removed() {
        let store = counter_store();
        let count = create_selector(&create_feature_selector_named::<i32>("Counter"), |c| *c);
        let sub = SelectorSubscription::new(store.clone(), &count).unwrap();

        let log = Rc::new(RefCell::new(Vec::new()));
        let first = {
            let log = Rc::clone(&log);
            sub.add_value_changed_listener(move |v: &i32| log.borrow_mut().push(format!("a{v}")))
        };
        {
            let log = Rc::clone(&log);
            sub.add_value_changed_listener(move |v: &i32| log.borrow_mut().push(format!("b{v}")));
        }
        assert_eq!(sub.listener_count(), 2);

        store.set_state("Counter", 1_i32).unwrap();
        assert!(sub.remove_value_changed_listener(first));
        assert!(!sub.remove_value_changed_listener(first));
        store.set_state("Counter", 2_i32).unwrap();

        assert_eq!(*log.borrow(), vec!["a1", "b1", "b2"]);
    }

    #[test]
    fn listener_may_read_the_subscription() {
        let store = counter_store();
        let count = create_selector(&create_feature_selector_named::<i32>("Counter"), |c| *c);
        let slot: Rc<OnceCell<SelectorSubscription<i32>>> = Rc::new(OnceCell::new());
        let observed = Rc::new(RefCell::new(Vec::new()));

        let sub = SelectorSubscription::new(store.clone(), &count).unwrap();
        {
            let slot = Rc::clone(&slot);
            let observed = Rc::clone(&observed);
            sub.add_value_changed_listener(move |v: &i32| {
                let current = slot.get().map(|s| (*s.value(), s.version()));
                observed.borrow_mut().push((*v, current));
            });
        }
        let _ = slot.set(sub);

        store.set_state("Counter", 5_i32).unwrap();
        assert_eq!(*observed.borrow(), vec![(5, Some((5, 1)))]);

        if let Some(sub) = slot.get() {
            sub.dispose();
        }
    }

    #[test]
    fn refresh_reports_change() {
        let store = counter_store();
        // A source outside the store changes without raising any event.
        let source = Rc::new(Cell::new(1_i32));
        let outside = {
            let source = Rc::clone(&source);
            Selector::from_fn(move |_| Ok(source.get())).map(|v| *v)
        };
        let sub = SelectorSubscription::new(store.clone(), &outside).unwrap();
        assert!(!sub.refresh().unwrap());

        source.set(2);
        assert_eq!(*sub.value(), 1);
        assert!(sub.refresh().unwrap());
        assert_eq!(*sub.value(), 2);
        assert_eq!(sub.version(), 1);
        assert!(!sub.refresh().unwrap());
    }

    #[test]
    fn event_errors_are_logged_and_kept() {
        let store = counter_store();
        let count = create_feature_selector_named::<i32>("Counter").map(|c| *c);
        let (seen, listener) = recorder::<i32>();
        let sub = store.subscribe_selector(&count, listener).unwrap();

        store.set_state("Counter", "oops").unwrap();
        assert!(matches!(
            sub.last_error(),
            Some(SelectorError::TypeMismatch { .. })
        ));
        assert_eq!(*sub.value(), 0);

        store.set_state("Counter", 4_i32).unwrap();
        assert!(sub.last_error().is_none());
        assert_eq!(*seen.borrow(), vec![4]);
    }

    #[test]
    fn recovery_after_failed_pull_projects_current_inputs() {
        let store = Rc::new(MemoryStore::new());
        store.register("a", 1_i32).unwrap();
        store.register("b", 10_i32).unwrap();
        let a = create_feature_selector_named::<i32>("a");
        let b = create_feature_selector_named::<i32>("b");
        let sum = create_selector2(&a, &b, |a, b| a + b);
        let (seen, listener) = recorder::<i32>();
        let sub = store.subscribe_selector(&sum, listener).unwrap();
        assert_eq!(sub.feature_count(), 2);

        store.set_state("b", "oops").unwrap();
        store.set_state("a", 2_i32).unwrap();
        assert!(sub.last_error().is_some());
        assert_eq!(*sub.value(), 11);

        // `b` returns to the value it held before the failure.
        store.set_state("b", 10_i32).unwrap();
        let direct = create_selector2(&a, &b, |a, b| a + b);
        assert_eq!(*sub.value(), 12);
        assert_eq!(*sub.value(), *store.select(&direct).unwrap());
        assert!(sub.last_error().is_none());
        assert_eq!(*seen.borrow(), vec![12]);
        assert_eq!(sub.version(), 1);
    }

    #[test]
    fn state_changed_listeners_fire_without_payload() {
        let store = counter_store();
        let sub = SelectorSubscription::new(store.clone(), &parity()).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let log = Rc::clone(&log);
            sub.add_value_changed_listener(move |even: &bool| {
                log.borrow_mut().push(format!("value {even}"));
            });
        }
        let state = {
            let log = Rc::clone(&log);
            sub.add_state_changed_listener(move || log.borrow_mut().push("state".to_string()))
        };
        assert_eq!(sub.listener_count(), 2);

        store.set_state("Counter", 1_i32).unwrap();
        store.set_state("Counter", 3_i32).unwrap();
        assert!(sub.remove_value_changed_listener(state));
        store.set_state("Counter", 4_i32).unwrap();

        assert_eq!(*log.borrow(), vec!["value false", "state", "value true"]);
    }

    #[test]
    fn construction_errors_propagate() {
        let store: Rc<dyn Store> = Rc::new(MemoryStore::new());
        let missing = create_feature_selector_named::<i32>("Counter").map(|c| *c);
        let err = SelectorSubscription::new(store, &missing).unwrap_err();
        assert_eq!(err, SelectorError::unknown_feature("Counter"));
    }

    #[test]
    fn late_features_are_not_observed() {
        let store = counter_store();
        let sub = SelectorSubscription::new(store.clone(), &parity()).unwrap();
        store.register("Late", 0_u8).unwrap();

        let late = store.slice("Late").unwrap();
        assert_eq!(late.listener_count(), 0);
        assert_eq!(sub.feature_count(), 1);
    }

    #[test]
    fn every_feature_change_repulls_but_only_transitions_notify() {
        let store = counter_store();
        store.register("Step", 1_i32).unwrap();
        let sum = create_selector2(
            &create_feature_selector_named::<i32>("Counter"),
            &create_feature_selector_named::<i32>("Step"),
            |c, s| c + s,
        );
        let (seen, listener) = recorder::<i32>();
        let sub = store.subscribe_selector(&sum, listener).unwrap();
        assert_eq!(*sub.value(), 1);

        store.set_state("Counter", 1_i32).unwrap();
        store.set_state("Step", 0_i32).unwrap();
        store.set_state("Step", 5_i32).unwrap();
        assert_eq!(*seen.borrow(), vec![2, 6]);
    }

    #[test]
    fn debug_reports_state() {
        let store = counter_store();
        let sub = SelectorSubscription::with_config(
            store.clone(),
            &parity(),
            SubscriptionConfig::new().with_label("dbg"),
        )
        .unwrap();
        let dbg = format!("{sub:?}");
        assert!(dbg.contains("dbg"));
        assert!(dbg.contains("disposed: false"));
    }
}
