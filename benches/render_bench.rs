// Benchmark for pin-list parsing and keyword rendering
// Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};
use pinmap_gen::config::RenderOptions;
use pinmap_gen::pin::PinSet;

fn synthetic_pins() -> String {
    let mut text = String::new();
    for port in 'A'..='Z' {
        for bit in 0..=255u8 {
            text.push_str(&format!("{}{}\n", port, bit));
        }
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let text = synthetic_pins();
    c.bench_function("parse 6656 pins", |b| {
        b.iter(|| {
            let pins = PinSet::parse(&text).unwrap();
            assert_eq!(pins.len(), 26 * 256);
        });
    });
}

fn bench_keywords(c: &mut Criterion) {
    let pins = PinSet::parse(&synthetic_pins()).unwrap();
    let options = RenderOptions::default();
    c.bench_function("keywords for 6656 pins", |b| {
        b.iter(|| {
            let out = pinmap_gen::render::keywords([&pins, &pins], &options).unwrap();
            assert_eq!(out.lines().count(), 26 * 256 + 1);
        });
    });
}

criterion_group!(benches, bench_parse, bench_keywords);
criterion_main!(benches);
