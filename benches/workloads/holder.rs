use criterion::{black_box, Criterion, Throughput};
use warden::{unique_resource, unique_resource_checked, unique_resource_ref};

const OPS: u64 = 10_000;

pub fn run(c: &mut Criterion) {
    bench_lifecycle(c);
    bench_reset(c);
    bench_erased(c);
}

fn close(fd: &mut u64) {
    black_box(*fd);
}

fn bench_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("holder_lifecycle");
    group.throughput(Throughput::Elements(OPS));

    // Baseline: the deleter called by hand.
    group.bench_function("manual_close", |b| {
        b.iter(|| {
            for i in 0..OPS {
                let mut fd = black_box(i);
                close(&mut fd);
            }
        })
    });

    group.bench_function("new_drop", |b| {
        b.iter(|| {
            for i in 0..OPS {
                drop(unique_resource(black_box(i), close));
            }
        })
    });

    group.bench_function("checked_half_invalid", |b| {
        b.iter(|| {
            for i in 0..OPS {
                drop(unique_resource_checked(black_box(i % 2), 0u64, close));
            }
        })
    });

    group.bench_function("borrowed_drop", |b| {
        let mut fds: Vec<u64> = (0..OPS).collect();
        b.iter(|| {
            for fd in &mut fds {
                drop(unique_resource_ref(fd, close));
            }
        })
    });

    group.finish();
}

fn bench_reset(c: &mut Criterion) {
    let mut group = c.benchmark_group("holder_reset");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("reset_with", |b| {
        b.iter(|| {
            let mut holder = unique_resource(0, close);
            for i in 0..OPS {
                holder.reset_with(black_box(i));
            }
        })
    });

    group.bench_function("release", |b| {
        b.iter(|| {
            for i in 0..OPS {
                let mut holder = unique_resource(black_box(i), close);
                black_box(*holder.release());
            }
        })
    });

    group.finish();
}

fn bench_erased(c: &mut Criterion) {
    let mut group = c.benchmark_group("holder_erased");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("boxed_deleter", |b| {
        b.iter(|| {
            for i in 0..OPS {
                drop(unique_resource(black_box(i), close).into_boxed());
            }
        })
    });

    group.finish();
}
