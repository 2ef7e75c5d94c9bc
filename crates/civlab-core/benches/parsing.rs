use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use civlab_core::content::builtin_banks;
use civlab_core::parser::{parse_bank_str, validate_bank};

fn make_bank(questions: usize) -> String {
    let mut toml = String::from(
        r#"[bank]
id = "bench"
title = "Bench Bank"
discipline = "structural"
description = "Generated for benchmarking"
"#,
    );
    for i in 0..questions {
        toml.push_str(&format!(
            r#"
[[questions]]
text = "Generated question number {i}?"
options = ["Option A {i}", "Option B {i}", "Option C {i}", "Option D {i}"]
correct_option = {}
explanation = "Explanation for question {i}."
"#,
            i % 4
        ));
    }
    toml
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_bank");

    for size in [3, 30, 300] {
        let toml = make_bank(size);
        group.bench_function(format!("{size}_questions"), |b| {
            b.iter(|| parse_bank_str(black_box(&toml), Path::new("bench.toml")).unwrap())
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let bank = parse_bank_str(&make_bank(300), Path::new("bench.toml")).unwrap();
    c.bench_function("validate_300_questions", |b| {
        b.iter(|| validate_bank(black_box(&bank)))
    });
}

fn bench_builtin(c: &mut Criterion) {
    c.bench_function("builtin_banks", |b| b.iter(|| builtin_banks().unwrap()));
}

criterion_group!(benches, bench_parse, bench_validate, bench_builtin);
criterion_main!(benches);
