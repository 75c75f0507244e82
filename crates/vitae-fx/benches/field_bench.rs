//! Benchmarks for the shape field.
//!
//! Run with: cargo bench -p vitae-fx

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use vitae_core::geometry::CanvasSize;
use vitae_fx::{
    CommandBuffer, FieldConfig, LinkCache, LinkParams, Palette, RenderOptions, ShapeField,
    initialize_shapes, render,
};

const SIZE: CanvasSize = CanvasSize::new(1920.0, 1080.0);

fn bench_initialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("field/initialize");
    for count in [30usize, 50, 80] {
        let config = FieldConfig::default().with_shape_count(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &config, |b, config| {
            b.iter(|| black_box(initialize_shapes(SIZE, config)))
        });
    }
    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("field/tick");
    for count in [30usize, 50, 80] {
        let config = FieldConfig::default().with_shape_count(count);
        let Ok(mut field) = ShapeField::new(SIZE, config) else {
            continue;
        };
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter(|| {
                field.tick();
                black_box(field.shapes());
            })
        });
    }
    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("field/frame");
    for count in [30usize, 80] {
        let config = FieldConfig::default().with_shape_count(count);
        let Ok(mut field) = ShapeField::new(SIZE, config) else {
            continue;
        };
        let mut links = LinkCache::new(LinkParams::default(), 1);
        let options = RenderOptions {
            glow: true,
            ..RenderOptions::default()
        };
        let mut buf = CommandBuffer::new();

        group.bench_function(BenchmarkId::new("tick+links+render", count), |b| {
            b.iter(|| {
                let tick = field.elapsed_ticks();
                field.tick();
                links.refresh(tick, field.shapes());
                buf.clear();
                render(
                    &mut buf,
                    field.size(),
                    field.shapes(),
                    links.links(),
                    &Palette::CV,
                    &options,
                );
                black_box(buf.len());
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_initialize, bench_tick, bench_frame);
criterion_main!(benches);
