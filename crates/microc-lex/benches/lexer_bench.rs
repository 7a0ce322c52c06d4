//! Lexer benchmarks.
//!
//! Run with `cargo bench --package microc-lex`.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use microc_lex::Lexer;
use microc_util::span::FileId;

fn token_count(source: &str) -> usize {
    Lexer::new(source, FileId(0)).count()
}

fn bench_lexer_declaration(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    let source = "int x1 = 2 + 2; int x2 = 2;";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("declaration", |b| {
        b.iter(|| token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_function(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_complex");

    let source = "\
        int add(int a, int b) {\n\
        \tint result = a + b;\n\
        \twhile (result != 100) {\n\
        \t\tif (result == 200) { break; }\n\
        \t\tresult = result - 1;\n\
        \t}\n\
        \treturn result;\n\
        }\n";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("function_with_control_flow", |b| {
        b.iter(|| token_count(black_box(source)))
    });

    group.finish();
}

criterion_group!(benches, bench_lexer_declaration, bench_lexer_function);
criterion_main!(benches);
