//! Benchmarks comparing the two parsing strategies on synthesized modules.

use criterion::{Criterion, criterion_group, criterion_main};
use semunit::{ParseStrategy, StructuralParser, SyntaxTreeParser};
use std::hint::black_box;

/// Build a module with `n` top-level declarations of rotating kinds.
fn synth_module(n: usize) -> String {
    let mut source = String::from("import React from 'react';\n\n");
    for i in 0..n {
        let decl = match i % 5 {
            0 => format!(
                "/** Handler {i}. */\nexport function handler{i}(input: string) {{\n  return input.length + {i};\n}}\n"
            ),
            1 => format!(
                "export const Panel{i} = (props: {{ title: string }}) => {{\n  return null;\n}}\n"
            ),
            2 => format!("const useThing{i} = () => {{\n  return {i};\n}}\n"),
            3 => format!("export interface Shape{i} {{\n  size: number;\n}}\n"),
            _ => format!("const limit{i} = {i};\n"),
        };
        source.push_str(&decl);
        source.push('\n');
    }
    source
}

fn bench_parse_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_file");

    for &decls in &[16usize, 256] {
        let source = synth_module(decls);

        let structural = StructuralParser::new();
        group.bench_function(format!("structural/{decls}"), |b| {
            b.iter(|| {
                structural
                    .parse_file("bench.tsx", black_box(&source))
                    .expect("structural never fails")
            })
        });

        let syntax = SyntaxTreeParser::new();
        group.bench_function(format!("syntax-tree/{decls}"), |b| {
            b.iter(|| {
                syntax
                    .parse_file("bench.tsx", black_box(&source))
                    .expect("bench module is valid")
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_file);
criterion_main!(benches);
