use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_wowace::{decode_for_print, encode_for_print, from_slice, to_vec};

#[derive(Serialize, Deserialize, Clone)]
struct Character {
    name: String,
    realm: String,
    level: u8,
    online: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Item {
    id: u32,
    name: String,
    price: f64,
    count: u16,
}

#[derive(Serialize, Deserialize, Clone)]
struct Profile {
    id: u32,
    layout: Layout,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone)]
struct Layout {
    anchor: String,
    offset: (f64, f64),
    scale: f64,
}

fn character() -> Character {
    Character {
        name: "Thrall".to_string(),
        realm: "Durotar".to_string(),
        level: 60,
        online: true,
    }
}

fn items(size: usize) -> Vec<Item> {
    (0..size)
        .map(|i| Item {
            id: i as u32,
            name: format!("Item ^{}~", i),
            price: i as f64 * 1.25,
            count: (i % 20) as u16,
        })
        .collect()
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let character = character();

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_vec(black_box(&character)))
    });
}

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let encoded = to_vec(&character()).unwrap();

    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_slice::<Character>(black_box(&encoded)))
    });
}

fn benchmark_serialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_array");

    for size in [10, 50, 100, 500].iter() {
        let items = items(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| to_vec(black_box(items)))
        });
    }

    group.finish();
}

fn benchmark_deserialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_array");

    for size in [10, 50, 100, 500].iter() {
        let encoded = to_vec(&items(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &encoded, |b, encoded| {
            b.iter(|| from_slice::<Vec<Item>>(black_box(encoded)))
        });
    }

    group.finish();
}

fn benchmark_nested(c: &mut Criterion) {
    let profile = Profile {
        id: 1,
        layout: Layout {
            anchor: "TOPLEFT".to_string(),
            offset: (12.5, -40.0),
            scale: 0.9,
        },
        tags: vec!["raid".to_string(), "healer".to_string(), "main".to_string()],
    };
    let encoded = to_vec(&profile).unwrap();

    c.bench_function("serialize_nested", |b| b.iter(|| to_vec(black_box(&profile))));
    c.bench_function("deserialize_nested", |b| {
        b.iter(|| from_slice::<Profile>(black_box(&encoded)))
    });
}

fn benchmark_transport(c: &mut Criterion) {
    let mut group = c.benchmark_group("transport");

    for size in [64, 1024, 16384].iter() {
        let bytes: Vec<u8> = (0..*size).map(|i| (i * 31 % 251) as u8).collect();
        let text = encode_for_print(&bytes);

        group.bench_with_input(BenchmarkId::new("encode", size), &bytes, |b, bytes| {
            b.iter(|| encode_for_print(black_box(bytes)))
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &text, |b, text| {
            b.iter(|| decode_for_print(black_box(text)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_serialize_array,
    benchmark_deserialize_array,
    benchmark_nested,
    benchmark_transport
);
criterion_main!(benches);
