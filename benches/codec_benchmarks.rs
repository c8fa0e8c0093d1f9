//! Benchmarks for the word codec.
//!
//! Covers pattern sizes from the shortest to the longest allowed, ASCII
//! and multi-byte alphabets, and the dispatch cost of multi-pattern
//! encoders.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use phonid::prelude::*;

fn classes(pairs: &[(ClassTag, &str)]) -> ClassMap {
    pairs
        .iter()
        .map(|&(tag, chars)| (tag, CharSet::from(chars)))
        .collect()
}

fn encoder(patterns: &[&str], map: ClassMap) -> PhoneticEncoder {
    PhoneticEncoder::new(&PhoneticConfig {
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
        placeholders: map,
    })
    .expect("benchmark config must validate")
}

fn bench_encode_by_pattern_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_by_pattern_size");

    let cases: [(&str, &str); 3] = [
        ("short", "CVC"),
        ("medium", "CVCVCVC"),
        ("long", "CVCVCVCVCVC"),
    ];

    for (name, pattern) in cases {
        let encoder = encoder(
            &[pattern],
            classes(&[
                (ClassTag::Consonant, "bcdfghjkpqstvwxz"),
                (ClassTag::Vowel, "aeiou"),
            ]),
        );
        let value = encoder.max_value() / 2;

        group.bench_with_input(BenchmarkId::from_parameter(name), &value, |b, &value| {
            b.iter(|| encoder.encode(black_box(value)).unwrap());
        });
    }

    group.finish();
}

fn bench_decode_by_pattern_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_by_pattern_size");

    let cases: [(&str, &str); 3] = [
        ("short", "CVC"),
        ("medium", "CVCVCVC"),
        ("long", "CVCVCVCVCVC"),
    ];

    for (name, pattern) in cases {
        let encoder = encoder(
            &[pattern],
            classes(&[
                (ClassTag::Consonant, "bcdfghjkpqstvwxz"),
                (ClassTag::Vowel, "aeiou"),
            ]),
        );
        let word = encoder.encode(encoder.max_value() / 2).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(name), &word, |b, word| {
            b.iter(|| encoder.decode(black_box(word)).unwrap());
        });
    }

    group.finish();
}

fn bench_multi_pattern_dispatch(c: &mut Criterion) {
    let encoder = encoder(
        &["CVC", "VCCVC", "CVCVCVC", "CVCVCVCVCVC"],
        classes(&[
            (ClassTag::Consonant, "bcdfghjkpqstvwxz"),
            (ClassTag::Vowel, "aeiou"),
        ]),
    );

    // One value per pattern bucket.
    let values = [500u64, 100_000, 5_000_000, 10_000_000_000];

    c.bench_function("multi_pattern_dispatch", |b| {
        b.iter(|| {
            for &value in &values {
                black_box(encoder.encode(black_box(value)).unwrap());
            }
        });
    });
}

fn bench_unicode_alphabet(c: &mut Criterion) {
    let encoder = encoder(
        &["SVSVS"],
        classes(&[(ClassTag::Sibilant, "ʃʒʂʐ"), (ClassTag::Vowel, "aeiou")]),
    );
    let value = encoder.max_value() / 2;
    let word = encoder.encode(value).unwrap();

    let mut group = c.benchmark_group("unicode_alphabet");
    group.bench_function("encode", |b| {
        b.iter(|| encoder.encode(black_box(value)).unwrap());
    });
    group.bench_function("decode", |b| {
        b.iter(|| encoder.decode(black_box(&word)).unwrap());
    });
    group.finish();
}

fn bench_validation(c: &mut Criterion) {
    let config = PhoneticConfig::default();

    c.bench_function("validate_default_config", |b| {
        b.iter(|| black_box(&config).validate().unwrap());
    });
}

criterion_group!(
    benches,
    bench_encode_by_pattern_size,
    bench_decode_by_pattern_size,
    bench_multi_pattern_dispatch,
    bench_unicode_alphabet,
    bench_validation
);
criterion_main!(benches);
