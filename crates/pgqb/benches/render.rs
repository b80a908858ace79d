use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pgqb::prelude::*;

/// SELECT c0, c1, ... FROM t WHERE (c0 = $1) AND (c1 = $2) ...
fn build_select(n: usize) -> SelectStmt {
    let t = table("t");
    let mut stmt = select((0..n).map(|i| t.column(format!("col{i}"))));
    for i in 0..n {
        stmt = stmt.where_(t.column(format!("col{i}")).eq(arg(format!("p{i}"))));
    }
    stmt
}

/// A chain of `n` additions: ((c + 1) + 1) + ...
fn build_nested(n: usize) -> Expr {
    let mut e: Expr = table("t").column("c").into();
    for _ in 0..n {
        e = e.add(1);
    }
    e
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/select");

    for n in [1, 5, 10, 50, 100] {
        let stmt = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &stmt, |b, stmt| {
            b.iter(|| black_box(stmt.render(RenderOptions::default())));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/build_and_render");

    for n in [1, 10, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_select(n).to_sql()));
        });
    }

    group.finish();
}

fn bench_nested_expr(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/nested_expr");

    for n in [10, 100] {
        let e = build_nested(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &e, |b, e| {
            b.iter(|| black_box(e.to_sql()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_build_and_render, bench_nested_expr);
criterion_main!(benches);
