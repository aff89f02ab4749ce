use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlwhere::{Dialect, Expression, FormatOptions, and, eq, gt, in_list, or, order_by};

/// Build `n` OR-groups of two conditions each, AND-ed together:
/// ((col0=?) OR (col0>?)) AND ((col1=?) OR (col1>?)) ...
fn build_expression(n: usize) -> Expression {
    and((0..n).map(|i| {
        let col = format!("t.col{i}");
        or([eq(col.clone(), i as i64), gt(col, i as i64 * 10)])
    }))
}

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/format");

    for n in [1, 5, 10, 50, 100] {
        let expr = build_expression(n);
        for dialect in [Dialect::Sqlite, Dialect::Postgres] {
            let opts = FormatOptions::from(dialect);
            group.bench_with_input(
                BenchmarkId::new(dialect.name(), n),
                &expr,
                |b, expr| {
                    b.iter(|| black_box(expr.format(&opts)));
                },
            );
        }
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/build_and_render");
    let opts = FormatOptions::from(Dialect::Postgres);

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let expr = build_expression(n);
                black_box(sqlwhere::where_clause(&expr, &opts));
            });
        });
    }

    group.finish();
}

fn bench_in_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/in_list");

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let expr = in_list("id", values.iter().copied());
                black_box(expr.format(&FormatOptions::from(Dialect::SqlServer)));
            });
        });
    }

    group.finish();
}

fn bench_display(c: &mut Criterion) {
    let expr = build_expression(10);
    c.bench_function("render/display_inline", |b| {
        b.iter(|| black_box(expr.to_string()));
    });
}

fn bench_query_constraint(c: &mut Criterion) {
    let qc = order_by(["a", "b"])
        .desc()
        .order_by(["c"])
        .asc()
        .nulls_last()
        .limit(10)
        .offset(20);
    c.bench_function("render/query_constraint", |b| {
        b.iter(|| black_box(qc.format(Dialect::Postgres)));
    });
}

criterion_group!(
    benches,
    bench_format,
    bench_build_and_render,
    bench_in_list,
    bench_display,
    bench_query_constraint
);
criterion_main!(benches);
