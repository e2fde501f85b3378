use criterion::{black_box, BatchSize, Criterion, Throughput};
use warden::{unique_resource, Duplicate, Take, UniqueResource};

const HOLDERS: usize = 1_000;

type Holder = UniqueResource<String, fn(&mut String)>;

fn close(s: &mut String) {
    black_box(s.len());
}

fn pool() -> Vec<Holder> {
    (0..HOLDERS)
        .map(|i| unique_resource(format!("handle-{i}"), close as fn(&mut String)))
        .collect()
}

pub fn run(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer");
    group.throughput(Throughput::Elements(HOLDERS as u64));

    group.bench_function("native_move", |b| {
        b.iter_batched(
            pool,
            |holders| {
                let moved: Vec<Holder> = holders.into_iter().collect();
                black_box(moved)
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("take_from_take", |b| {
        b.iter_batched(
            pool,
            |mut holders| {
                let taken: Vec<Holder> = holders
                    .iter_mut()
                    .map(UniqueResource::take_from::<Take, Duplicate>)
                    .collect();
                black_box((holders, taken))
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("take_from_duplicate", |b| {
        b.iter_batched(
            pool,
            |mut holders| {
                let taken: Vec<Holder> = holders
                    .iter_mut()
                    .map(UniqueResource::take_from::<Duplicate, Duplicate>)
                    .collect();
                black_box((holders, taken))
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("assign_from_duplicate", |b| {
        b.iter_batched(
            || (pool(), pool()),
            |(mut targets, mut sources)| {
                for (target, source) in targets.iter_mut().zip(&mut sources) {
                    target.assign_from::<Duplicate, Duplicate>(source);
                }
                black_box((targets, sources))
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}
