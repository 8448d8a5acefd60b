use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rda::{from_str, to_string, Rda};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Clone)]
struct Order {
    id: u64,
    customer: String,
    items: Vec<Product>,
    note: Option<String>,
}

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU|{}", i),
            name: format!("Product; {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
        })
        .collect()
}

fn grid(rows: usize, cols: usize) -> Rda {
    let mut rda = Rda::new();
    for row in 0..rows {
        for col in 0..cols {
            rda.set_value_at(&[row, col], format!("r{}c{}", row, col))
                .unwrap();
        }
    }
    rda
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 100, 1000].iter() {
        let text = grid(*size, 8).to_string();
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| Rda::parse(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_parse_formatted(c: &mut Criterion) {
    let text = grid(100, 8).to_string_formatted();

    c.bench_function("parse_formatted", |b| {
        b.iter(|| Rda::parse(black_box(&text)))
    });
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [10, 100, 1000].iter() {
        let rda = grid(*size, 8);
        group.bench_with_input(BenchmarkId::from_parameter(size), &rda, |b, rda| {
            b.iter(|| black_box(rda).to_string())
        });
    }
    group.finish();
}

fn benchmark_addressing(c: &mut Criterion) {
    c.bench_function("set_value_at_deep", |b| {
        b.iter(|| {
            let mut rda = Rda::new();
            for i in 0..16 {
                rda.set_value_at(black_box(&[i, i % 3, i % 5, 1]), "v").unwrap();
            }
            rda
        })
    });
}

fn benchmark_serialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_array");

    for size in [10, 100, 500].iter() {
        let products = products(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&products)))
        });
    }
    group.finish();
}

fn benchmark_deserialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_array");

    for size in [10, 100, 500].iter() {
        let text = to_string(&products(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str::<Vec<Product>>(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let order = Order {
        id: 1001,
        customer: "Alice".to_string(),
        items: products(20),
        note: None,
    };

    let mut group = c.benchmark_group("comparison");

    group.bench_function("rda_serialize", |b| {
        b.iter(|| rda::to_string(black_box(&order)))
    });

    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&order)))
    });

    let rda_str = rda::to_string(&order).unwrap();
    let json_str = serde_json::to_string(&order).unwrap();

    group.bench_function("rda_deserialize", |b| {
        b.iter(|| rda::from_str::<Order>(black_box(&rda_str)))
    });

    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<Order>(black_box(&json_str)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_parse_formatted,
    benchmark_encode,
    benchmark_addressing,
    benchmark_serialize_array,
    benchmark_deserialize_array,
    benchmark_comparison_with_json
);
criterion_main!(benches);
