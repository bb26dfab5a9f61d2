//! Benchmarks for chain building and late-bound member resolution.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use chainable::{Base, Chainable, MemberSet, Receiver, Value};

fn chain_of(depth: usize) -> Chainable {
    let mut ty = Chainable::wrap(Base::record("Bench"))
        .extend(MemberSet::new().behavior("first", |this, _| this.get("m0")));
    for i in 0..depth {
        ty = ty.extend(MemberSet::new().data(format!("m{i}"), i as i64));
    }
    ty
}

/// Benchmark building chains of varying depth
fn bench_extend(c: &mut Criterion) {
    let mut group = c.benchmark_group("extend");

    for n in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("depth", n), &n, |b, &n| {
            b.iter(|| black_box(chain_of(n)));
        });
    }

    group.finish();
}

/// Benchmark calling an early behavior on the deepest type
fn bench_late_binding(c: &mut Criterion) {
    let mut group = c.benchmark_group("late_binding");

    for n in [10, 100, 1000] {
        let ty = chain_of(n);
        let instance = ty.construct(&[]).unwrap();

        group.bench_with_input(BenchmarkId::new("class_call", n), &n, |b, _| {
            b.iter(|| black_box(ty.call("first", &[])));
        });
        group.bench_with_input(BenchmarkId::new("instance_call", n), &n, |b, _| {
            b.iter(|| black_box(instance.call("first", &[])));
        });
        group.bench_with_input(BenchmarkId::new("get", n), &n, |b, _| {
            b.iter(|| black_box(instance.get("m0")));
        });
    }

    group.finish();
}

/// Benchmark sibling branching from one receiver
fn bench_branching(c: &mut Criterion) {
    let receiver = chain_of(100);
    c.bench_function("branch_from_depth_100", |b| {
        b.iter(|| black_box(receiver.extend(MemberSet::new().data("c", Value::int(1)))));
    });
}

criterion_group!(benches, bench_extend, bench_late_binding, bench_branching);
criterion_main!(benches);
