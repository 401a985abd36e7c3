use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pgqb::{Entry, SelectQb, SqlQb, WhereQb, and, condition, table};

/// SELECT with `n` top-level equality conditions:
/// SELECT * FROM t WHERE col0 = $1 AND col1 = $2 ...
fn build_flat(n: usize) -> SelectQb {
    let mut qb = table("t").select();
    for i in 0..n {
        qb = qb.filter(&format!("col{i}"), i as i64);
    }
    qb
}

/// An OR of `n` two-condition AND groups, each with an IN list of 3:
/// ((a0 = $1 AND b0 IN ($2,$3,$4)) OR (a1 = $5 AND ...) ...)
fn build_nested(n: usize) -> SelectQb {
    let groups: Vec<Entry> = (0..n)
        .map(|i| {
            and([
                condition(&format!("a{i}"), i as i64),
                condition(&format!("b{i}"), vec![1i64, 2, 3]).op("IN"),
            ])
        })
        .collect();
    table("t").select().or(groups).limit(50)
}

fn bench_flat(c: &mut Criterion) {
    let mut group = c.benchmark_group("condition_tree/flat");

    for n in [1, 5, 10, 50, 100] {
        let qb = build_flat(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &qb, |b, qb| {
            b.iter(|| black_box(qb.get()));
        });
    }

    group.finish();
}

fn bench_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("condition_tree/nested");

    for n in [1, 5, 10, 50] {
        let qb = build_nested(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &qb, |b, qb| {
            b.iter(|| black_box(qb.get()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("condition_tree/build_and_render");

    for n in [1, 10, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let qb = build_nested(n).or([condition("x", 1i64), condition("y", 2i64)]);
                black_box(qb.get())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_flat, bench_nested, bench_build_and_render);
criterion_main!(benches);
