use criterion::{criterion_group, criterion_main, Criterion};
use opentelemetry::trace::{SpanContext, SpanId, TraceFlags, TraceId, TraceState};
use opentelemetry_rocketmq::trace::{decode, encode};
use std::hint::black_box;

fn criterion_benchmark(c: &mut Criterion) {
    let span_context = SpanContext::new(
        TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736").unwrap(),
        SpanId::from_hex("00f067aa0ba902b7").unwrap(),
        TraceFlags::SAMPLED,
        false,
        TraceState::default(),
    );
    let trace_parent = encode(&span_context);
    let with_trailing_data = format!("01{}-vendor=opaque", &trace_parent[2..]);

    let mut group = c.benchmark_group("trace_parent");

    group.bench_function("encode", |b| {
        b.iter(|| black_box(encode(black_box(&span_context))));
    });

    group.bench_function("decode", |b| {
        b.iter(|| black_box(decode(black_box(Some(trace_parent.as_str())))));
    });

    group.bench_function("decode_trailing_data", |b| {
        b.iter(|| black_box(decode(black_box(Some(with_trailing_data.as_str())))));
    });

    group.bench_function("decode_invalid", |b| {
        b.iter(|| black_box(decode(black_box(Some("00-not-a-trace-parent")))));
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
