use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use rowlist_chunk::RowList;
use rowlist_core::schema::{DataType, Field, Schema};
use rowlist_core::types::Scalar;

fn make_rows(rows: usize) -> Vec<Vec<Scalar>> {
    (0..rows)
        .map(|i| {
            vec![
                Scalar::Str(format!("group-{}", i % 4)),
                Scalar::I64(i as i64),
                Scalar::F64((i % 10) as f64),
            ]
        })
        .collect()
}

fn schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("group", DataType::Utf8, false),
        Field::new("order", DataType::Int64, false),
        Field::new("value", DataType::Float64, false),
    ]))
}

fn bench_append_reset_cycle(c: &mut Criterion) {
    let rows = make_rows(4096);
    let mut list = RowList::new(schema(), 32, 1024);
    c.bench_function("append_reset_4096", |b| {
        b.iter(|| {
            for row in &rows {
                list.append_row(row);
            }
            list.reset();
        })
    });
}

fn bench_walk(c: &mut Criterion) {
    let mut list = RowList::new(schema(), 32, 1024);
    for row in make_rows(4096) {
        list.append_row(&row);
    }
    c.bench_function("walk_4096", |b| {
        b.iter(|| {
            let mut sum = 0i64;
            list.walk(|row| {
                if let Scalar::I64(v) = row[1] {
                    sum += v;
                }
                Ok::<_, std::convert::Infallible>(())
            })
            .unwrap();
            sum
        })
    });
}

criterion_group!(lists, bench_append_reset_cycle, bench_walk);
criterion_main!(lists);
