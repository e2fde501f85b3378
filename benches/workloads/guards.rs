use criterion::{black_box, Criterion, Throughput};
use std::cell::Cell;
use warden::{defer, guard, scope_exit, scope_fail, scope_success, ScopeGuard};

const OPS: u64 = 10_000;

pub fn run(c: &mut Criterion) {
    let mut group = c.benchmark_group("scope_guards");
    group.throughput(Throughput::Elements(OPS));

    let hits = Cell::new(0u64);

    group.bench_function("plain_call", |b| {
        b.iter(|| {
            for _ in 0..OPS {
                hits.set(black_box(hits.get() + 1));
            }
        })
    });

    group.bench_function("scope_exit", |b| {
        b.iter(|| {
            for _ in 0..OPS {
                let _guard = scope_exit(|| hits.set(black_box(hits.get() + 1)));
            }
        })
    });

    group.bench_function("scope_fail_not_taken", |b| {
        b.iter(|| {
            for _ in 0..OPS {
                let _guard = scope_fail(|| hits.set(black_box(hits.get() + 1)));
            }
        })
    });

    group.bench_function("scope_success", |b| {
        b.iter(|| {
            for _ in 0..OPS {
                let _guard = scope_success(|| hits.set(black_box(hits.get() + 1)));
            }
        })
    });

    group.bench_function("defer_macro", |b| {
        b.iter(|| {
            for _ in 0..OPS {
                defer! { hits.set(black_box(hits.get() + 1)); }
            }
        })
    });

    group.bench_function("value_guard_dismissed", |b| {
        b.iter(|| {
            for i in 0..OPS {
                let g = guard(black_box(i), |v| hits.set(v));
                black_box(ScopeGuard::dismiss(g));
            }
        })
    });

    group.finish();
    black_box(hits.get());
}
