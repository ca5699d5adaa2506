//! Benchmarks for kakaopack decoding, parsing and rendering.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- divider`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use kakaopack::config::{ConvertConfig, DocumentConfig, EncodingConfig, TableConfig};
use kakaopack::core::{render_document, render_table};
use kakaopack::encoding::resolve_with_config;
use kakaopack::parsers::KakaoTalkParser;
use kakaopack::{Transcript, convert_with_config};

// =============================================================================
// Test Data Generators
// =============================================================================

fn generate_divider_export(count: usize) -> String {
    let mut text = String::from("벤치마크 님과 카카오톡 대화\n저장한 날짜 : 2024-01-16 10:00:00\n\n");
    for i in 0..count {
        if i % 50 == 0 {
            let day = 1 + (i / 50) % 28;
            text.push_str(&format!("--------------- 2024년 1월 {day}일 ---------------\n"));
        }
        let sender = if i % 2 == 0 { "홍길동" } else { "김철수" };
        let marker = if i % 24 < 12 { "오전" } else { "오후" };
        let hour = i % 12 + 1;
        text.push_str(&format!("[{sender}] [{marker} {hour}:{:02}] 메시지 번호 {i}\n", i % 60));
        if i % 5 == 0 {
            text.push_str("두 번째 줄입니다\n");
        }
    }
    text
}

fn generate_dotted_export(count: usize) -> String {
    let mut text = String::new();
    for i in 0..count {
        let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
        let day = 1 + (i / 50) % 28;
        let hour = i % 12 + 1;
        text.push_str(&format!("2024. 1. {day}. 오후 {hour}:{:02}, {sender}, Message number {i}\n", i % 60));
    }
    text
}

fn offline_document() -> DocumentConfig {
    DocumentConfig::new().with_font_path("/nonexistent/kakaopack/NanumGothic.ttf")
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_divider_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("divider_parsing");
    let parser = KakaoTalkParser::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let txt = generate_divider_export(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let transcript = parser.parse_str(black_box(txt)).unwrap();
                black_box(transcript)
            });
        });
    }
    group.finish();
}

fn bench_dotted_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("dotted_parsing");
    let parser = KakaoTalkParser::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let txt = generate_dotted_export(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let transcript = parser.parse_str(black_box(txt)).unwrap();
                black_box(transcript)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Encoding Benchmarks
// =============================================================================

fn bench_encoding_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding_resolution");
    let txt = generate_divider_export(20_000);
    let (cp949, _, _) = encoding_rs::EUC_KR.encode(&txt);
    let cp949 = cp949.into_owned();

    for (name, threshold) in [("sequential", usize::MAX), ("parallel", 0)] {
        let config = EncodingConfig::new().with_parallel_threshold(threshold);
        group.throughput(Throughput::Bytes(cp949.len() as u64));
        group.bench_with_input(BenchmarkId::new("cp949", name), &cp949, |b, bytes| {
            b.iter(|| black_box(resolve_with_config(black_box(bytes), &config)));
        });
        group.bench_with_input(BenchmarkId::new("utf8", name), txt.as_bytes(), |b, bytes| {
            b.iter(|| black_box(resolve_with_config(black_box(bytes), &config)));
        });
    }
    group.finish();
}

// =============================================================================
// Rendering Benchmarks
// =============================================================================

fn parsed(size: usize) -> Transcript {
    KakaoTalkParser::new()
        .parse_str(&generate_divider_export(size))
        .unwrap()
}

fn bench_render_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_table");
    let config = TableConfig::new();

    for size in [100_usize, 1_000, 10_000] {
        let transcript = parsed(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &transcript, |b, transcript| {
            b.iter(|| black_box(render_table(black_box(transcript), &config).unwrap()));
        });
    }
    group.finish();
}

fn bench_render_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_document");
    group.sample_size(10);
    let config = offline_document();

    for size in [100_usize, 1_000] {
        let transcript = parsed(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &transcript, |b, transcript| {
            b.iter(|| black_box(render_document(black_box(transcript), &config).unwrap()));
        });
    }
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    group.sample_size(10);
    let config = ConvertConfig::new().with_document(offline_document());

    for size in [100_usize, 1_000] {
        let txt = generate_divider_export(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), txt.as_bytes(), |b, bytes| {
            b.iter(|| black_box(convert_with_config(black_box(bytes), "bench.txt", &config).unwrap()));
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_divider_parsing,
    bench_dotted_parsing,
    bench_encoding_resolution,
    bench_render_table,
    bench_render_document,
    bench_full_pipeline,
);

criterion_main!(benches);
