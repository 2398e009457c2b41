#![forbid(unsafe_code)]

//! The two-counter graph and the click sequence the demo plays through it.
//!
//! ```text
//! CounterState ─► count1 ─┬─► even_or_none1 ─┐
//!                         ├─► button_text    ├─► all_even
//!                         └─► sum ◄─┐        │
//! Counter2State ─► count2 ──────────┴─► even_or_none2
//! ```

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use serde::Serialize;
use statelens_core::{MemoryStore, SelectorValue, feature_name_of, impl_selector_value};
use statelens_runtime::{
    MemoStats, Selector, SelectorKind, SelectorSubscription, StoreSelectExt, SubscriptionConfig,
    create_feature_selector, create_selector, create_selector2,
};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct CounterState {
    pub count: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Counter2State {
    pub count: i32,
}

impl_selector_value!(CounterState, Counter2State);

/// Text shown on the first counter's button.
#[must_use]
pub fn button_text(count: i32) -> String {
    match count {
        0 => "Click me".to_string(),
        1 => "Clicked 1 time".to_string(),
        n => format!("Clicked {n} times"),
    }
}

fn even_or_none(count: &i32) -> Option<i32> {
    (count % 2 == 0).then_some(*count)
}

pub struct CounterGraph {
    pub count1: Selector<i32>,
    pub count2: Selector<i32>,
    pub even_or_none1: Selector<Option<i32>>,
    pub even_or_none2: Selector<Option<i32>>,
    pub sum: Selector<i32>,
    pub all_even: Selector<&'static str>,
    pub button_text: Selector<String>,
}

impl CounterGraph {
    #[must_use]
    pub fn new() -> Self {
        let count1 = create_selector(&create_feature_selector::<CounterState>(), |s| s.count);
        let count2 = create_selector(&create_feature_selector::<Counter2State>(), |s| s.count);
        let even_or_none1 = create_selector(&count1, even_or_none);
        let even_or_none2 = create_selector(&count2, even_or_none);
        let sum = create_selector2(&count1, &count2, |a, b| a + b);
        let all_even = create_selector2(&even_or_none1, &even_or_none2, |a, b| {
            if a.is_some() && b.is_some() { "yes" } else { "no" }
        });
        let button_text = create_selector(&count1, |count| button_text(*count));
        Self {
            count1,
            count2,
            even_or_none1,
            even_or_none2,
            sum,
            all_even,
            button_text,
        }
    }

    fn selector_reports(&self) -> Vec<SelectorReport> {
        fn entry<T: 'static>(name: &'static str, selector: &Selector<T>) -> SelectorReport {
            SelectorReport {
                name,
                kind: selector.kind(),
                stats: selector.stats(),
            }
        }
        vec![
            entry("count1", &self.count1),
            entry("count2", &self.count2),
            entry("even_or_none1", &self.even_or_none1),
            entry("even_or_none2", &self.even_or_none2),
            entry("sum", &self.sum),
            entry("all_even", &self.all_even),
            entry("button_text", &self.button_text),
        ]
    }
}

impl Default for CounterGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScenarioArgs {
    pub clicks1: u32,
    pub clicks2: u32,
    pub repeat_last: bool,
    pub pause: bool,
}

#[derive(Debug, Serialize)]
pub struct SelectorReport {
    pub name: &'static str,
    pub kind: SelectorKind,
    pub stats: Option<MemoStats>,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionReport {
    pub name: &'static str,
    pub notifications: u64,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub clicks1: u32,
    pub clicks2: u32,
    pub events: Vec<String>,
    pub subscriptions: Vec<SubscriptionReport>,
    pub selectors: Vec<SelectorReport>,
}

type EventLog = Rc<RefCell<Vec<String>>>;

fn subscribe<T: SelectorValue + fmt::Debug>(
    store: &Rc<MemoryStore>,
    name: &'static str,
    selector: &Selector<T>,
    events: &EventLog,
) -> Result<SelectorSubscription<T>> {
    let events = Rc::clone(events);
    let config = SubscriptionConfig::new().with_label(name);
    let subscription = store.subscribe_selector_with(selector, config, move |value: &T| {
        events.borrow_mut().push(format!("{name} -> {value:?}"));
    })?;
    Ok(subscription)
}

fn summarize<T: SelectorValue + fmt::Debug>(
    name: &'static str,
    subscription: &SelectorSubscription<T>,
) -> SubscriptionReport {
    SubscriptionReport {
        name,
        notifications: subscription.version(),
        value: format!("{:?}", subscription.value()),
    }
}

fn click1(store: &MemoryStore) -> Result<()> {
    store.update::<CounterState>(feature_name_of::<CounterState>(), |s| CounterState {
        count: s.count + 1,
    })?;
    Ok(())
}

fn click2(store: &MemoryStore) -> Result<()> {
    store.update::<Counter2State>(feature_name_of::<Counter2State>(), |s| Counter2State {
        count: s.count + 1,
    })?;
    Ok(())
}

/// Publish an equal copy of the current state of both counters.
fn republish(store: &Rc<MemoryStore>) -> Result<()> {
    let state1 = store.select(&create_feature_selector::<CounterState>())?;
    store.set_state(feature_name_of::<CounterState>(), CounterState::clone(&state1))?;
    let state2 = store.select(&create_feature_selector::<Counter2State>())?;
    store.set_state(feature_name_of::<Counter2State>(), Counter2State::clone(&state2))?;
    Ok(())
}

pub fn run_scenario(args: &ScenarioArgs) -> Result<Report> {
    let store = Rc::new(MemoryStore::new());
    store.register_feature(CounterState { count: 0 })?;
    store.register_feature(Counter2State { count: 0 })?;

    let graph = CounterGraph::new();
    let events: EventLog = Rc::new(RefCell::new(Vec::new()));

    let button = subscribe(&store, "button_text", &graph.button_text, &events)?;
    let even1 = subscribe(&store, "even_or_none1", &graph.even_or_none1, &events)?;
    let count2 = subscribe(&store, "count2", &graph.count2, &events)?;
    let sum = subscribe(&store, "sum", &graph.sum, &events)?;
    let all_even = subscribe(&store, "all_even", &graph.all_even, &events)?;

    tracing::info!(
        message = "demo.start",
        clicks1 = args.clicks1,
        clicks2 = args.clicks2,
        pause = args.pause,
        repeat_last = args.repeat_last
    );

    if args.pause {
        button.pause();
    }
    for _ in 0..args.clicks1 {
        click1(&store)?;
    }
    for _ in 0..args.clicks2 {
        click2(&store)?;
    }
    if args.pause {
        button.resume()?;
    }
    if args.repeat_last {
        republish(&store)?;
    }

    let subscriptions = vec![
        summarize("button_text", &button),
        summarize("even_or_none1", &even1),
        summarize("count2", &count2),
        summarize("sum", &sum),
        summarize("all_even", &all_even),
    ];
    let selectors = graph.selector_reports();

    tracing::info!(
        message = "demo.finish",
        events = events.borrow().len(),
        listeners = store.listener_count()
    );

    Ok(Report {
        clicks1: args.clicks1,
        clicks2: args.clicks2,
        events: events.take(),
        subscriptions,
        selectors,
    })
}

pub fn render_text(report: &Report, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "clicks: {} / {}", report.clicks1, report.clicks2)?;

    writeln!(out, "events:")?;
    if report.events.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for event in &report.events {
        writeln!(out, "  {event}")?;
    }

    writeln!(out, "subscriptions:")?;
    for sub in &report.subscriptions {
        writeln!(
            out,
            "  {:<14} notifications={:<4} value={}",
            sub.name, sub.notifications, sub.value
        )?;
    }

    writeln!(out, "selectors:")?;
    for selector in &report.selectors {
        match selector.stats {
            Some(stats) => writeln!(
                out,
                "  {:<14} {:?} pulls={} recomputations={} changes={} hits={}",
                selector.name,
                selector.kind,
                stats.pulls,
                stats.recomputations,
                stats.changes,
                stats.hits()
            )?,
            None => writeln!(out, "  {:<14} {:?}", selector.name, selector.kind)?,
        }
    }
    Ok(())
}
