//! Benchmarks for memoized pulls and subscription dispatch.
//!
//! Run with: cargo bench -p statelens-runtime

use std::hint::black_box;
use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use statelens_core::MemoryStore;
use statelens_runtime::{
    Selector, StoreSelectExt, create_feature_selector_named, create_selector, create_selector2,
};

/// A chain of `depth` memoized nodes over one `u64` feature.
fn make_chain(depth: usize) -> Selector<u64> {
    let mut node = create_selector(&create_feature_selector_named::<u64>("n"), |n| *n);
    for _ in 1..depth {
        node = create_selector(&node, |n| n.wrapping_add(1));
    }
    node
}

fn bench_cached_pull(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector/cached_pull");
    let store = MemoryStore::new();
    let _ = store.register("n", 1_u64);

    for depth in [1, 4, 16, 64] {
        let chain = make_chain(depth);
        let _ = chain.select(&store);
        group.bench_with_input(BenchmarkId::new("chain", depth), &chain, |b, chain| {
            b.iter(|| black_box(chain.select(&store)))
        });
    }

    group.finish();
}

fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector/recompute");
    let store = MemoryStore::new();
    let _ = store.register("n", 0_u64);

    for depth in [1, 4, 16, 64] {
        let chain = make_chain(depth);
        let mut next = 0_u64;
        group.bench_with_input(BenchmarkId::new("chain", depth), &chain, |b, chain| {
            b.iter(|| {
                next = next.wrapping_add(1);
                let _ = store.set_state("n", next);
                black_box(chain.select(&store))
            })
        });
    }

    group.finish();
}

fn bench_diamond(c: &mut Criterion) {
    let store = MemoryStore::new();
    let _ = store.register("a", 1_i64);
    let _ = store.register("b", 2_i64);
    let a = create_feature_selector_named::<i64>("a");
    let b = create_feature_selector_named::<i64>("b");
    let left = create_selector2(&a, &b, |a, b| a + b);
    let right = create_selector2(&a, &b, |a, b| a * b);
    let top = create_selector2(&left, &right, |l, r| l - r);

    let mut next = 0_i64;
    c.bench_function("selector/diamond_update", |bench| {
        bench.iter(|| {
            next += 1;
            let _ = store.set_state("a", next);
            black_box(top.select(&store))
        })
    });
}

fn bench_subscription_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("subscription/fanout");

    for subscribers in [1, 8, 64] {
        let store = Rc::new(MemoryStore::new());
        let _ = store.register("n", 0_u64);
        let parity = create_selector(&create_feature_selector_named::<u64>("n"), |n| n % 2);
        let subs: Vec<_> = (0..subscribers)
            .filter_map(|_| {
                store
                    .subscribe_selector(&parity, |v: &u64| {
                        black_box(*v);
                    })
                    .ok()
            })
            .collect();

        let mut next = 0_u64;
        group.bench_with_input(
            BenchmarkId::new("set_state", subscribers),
            &subscribers,
            |b, _| {
                b.iter(|| {
                    next += 1;
                    let _ = store.set_state("n", next);
                })
            },
        );
        drop(subs);
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_pull,
    bench_recompute,
    bench_diamond,
    bench_subscription_fanout
);
criterion_main!(benches);
