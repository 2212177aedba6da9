use criterion::{Criterion, criterion_group, criterion_main};
use quill::prelude::*;
use std::hint::black_box;

fn wide_filter(n: usize) -> Query {
    let mut q = Query::optional("WHERE");
    for i in 0..n {
        q = q.and("? = ?", (Embedded::new(format!("c{i}")), i as i64));
    }
    Query::new("SELECT * FROM t ?", (q,))
}

fn deep_nesting(depth: i32) -> Query {
    let mut q = Query::new("x = ?", (0,));
    for level in 1..depth {
        q = Query::new("(?) AND y = ?", (q, level));
    }
    q
}

fn build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.bench_function("wide_100", |b| b.iter(|| wide_filter(black_box(100))));
    group.bench_function("deep_100", |b| b.iter(|| deep_nesting(black_box(100))));
    group.bench_function("in_list_1000", |b| {
        let ids: Vec<i64> = (0..1000).collect();
        b.iter(|| Query::new("id IN (?)", (black_box(&ids),)))
    });
    group.finish();
}

fn render(c: &mut Criterion) {
    let wide = wide_filter(100);
    let deep = deep_nesting(100);

    let mut group = c.benchmark_group("render");
    for dialect in [Dialect::Sql, Dialect::PostgreSQL, Dialect::Raw] {
        group.bench_function(format!("wide_100/{dialect}"), |b| {
            b.iter(|| black_box(&wide).render(dialect))
        });
        group.bench_function(format!("deep_100/{dialect}"), |b| {
            b.iter(|| black_box(&deep).render(dialect))
        });
    }
    group.finish();
}

criterion_group!(benches, build, render);
criterion_main!(benches);
