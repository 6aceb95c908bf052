//! Benchmark – `utf8text` string routines
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use utf8text::{
    str_casecmp, str_chr, str_cmp, str_cpy, str_length, str_str, str_to_autf16, str_to_awstr,
    str_tokens,
};

fn make_words(count: usize) -> Vec<u8> {
    const WORDS: [&str; 6] = ["kůň", "ódy", "🐎", "ďábelské", "úpěl", "žluťoučký"];

    let mut s = String::new();
    for i in 0..count {
        s.push_str(WORDS[i % WORDS.len()]);
        s.push(if i % 7 == 0 { ',' } else { ' ' });
    }
    s.push_str("needle");
    s.into_bytes()
}

fn bench_string_ops(c: &mut Criterion) {
    let text = make_words(4_096);
    let upper = text.to_ascii_uppercase();

    let mut group = c.benchmark_group("string_ops");

    group.bench_function("str_length", |b| b.iter(|| black_box(str_length(black_box(&text)))));
    group.bench_function("str_cmp", |b| b.iter(|| black_box(str_cmp(black_box(&text), &upper))));
    group.bench_function("str_casecmp", |b| {
        b.iter(|| black_box(str_casecmp(black_box(&text), &upper)));
    });
    group.bench_function("str_chr_ascii", |b| {
        b.iter(|| black_box(str_chr(black_box(&text), u32::from(b'n'))));
    });
    group.bench_function("str_chr_non_ascii", |b| {
        b.iter(|| black_box(str_chr(black_box(&text), 0x1F40E)));
    });
    group.bench_function("str_str", |b| b.iter(|| black_box(str_str(black_box(&text), b"needle"))));

    group.bench_function("str_cpy", |b| {
        let mut dest = vec![0u8; text.len() / 2];
        b.iter(|| black_box(str_cpy(&mut dest, black_box(&text))));
    });

    group.bench_function("str_tokens", |b| {
        b.iter_batched_ref(
            || text.clone(),
            |buf| black_box(str_tokens(buf, b" ,").count()),
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function("str_to_awstr", |b| {
        b.iter(|| black_box(str_to_awstr(black_box(&text))));
    });
    group.bench_function("str_to_autf16", |b| {
        b.iter(|| black_box(str_to_autf16(black_box(&text))));
    });

    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_string_ops }
criterion_main!(benches);
