//! Benchmarks for the order rollups
//!
//! Run with: cargo bench

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_decimal::Decimal;
use storefront::data::{parse_orders, OrderRecord, OrderTable};
use storefront::rollup::{category_rollup, daily_rollup};

const CATEGORIES: [&str; 8] = [
    "beleza_saude",
    "cama_mesa_banho",
    "esporte_lazer",
    "informatica_acessorios",
    "moveis_decoracao",
    "utilidades_domesticas",
    "relogios_presentes",
    "brinquedos",
];

/// Line items spread over about two years, roughly 1.2 items per order
fn create_test_orders(count: usize) -> OrderTable {
    let start = NaiveDate::from_ymd_opt(2016, 9, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();

    (0..count)
        .map(|i| {
            let order = i * 5 / 6;
            OrderRecord::new(
                format!("order-{order}"),
                Some(CATEGORIES[order % CATEGORIES.len()]),
                Decimal::new((i % 5000) as i64 + 99, 2),
                start + Duration::hours((order % 17_000) as i64),
            )
        })
        .collect()
}

fn create_test_csv(count: usize) -> String {
    let mut csv = String::from("order_id,product_category_name,price,shipping_limit_date\n");
    for row in create_test_orders(count).rows() {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            row.order_id.as_deref().unwrap_or(""),
            row.product_category_name.as_deref().unwrap_or(""),
            row.price.unwrap_or_default(),
            row.shipping_limit_date
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default()
        ));
    }
    csv
}

fn bench_rollups(c: &mut Criterion) {
    let mut group = c.benchmark_group("rollup");

    for size in [1_000, 10_000, 100_000] {
        let orders = create_test_orders(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("daily_{}", size), |b| {
            b.iter(|| daily_rollup(black_box(&orders)))
        });

        group.bench_function(format!("category_{}", size), |b| {
            b.iter(|| category_rollup(black_box(&orders)))
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [1_000, 10_000] {
        let csv = create_test_csv(size);

        group.throughput(Throughput::Bytes(csv.len() as u64));

        group.bench_function(format!("parse_{}", size), |b| {
            b.iter(|| parse_orders(black_box(csv.as_bytes())).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rollups, bench_parse);
criterion_main!(benches);
