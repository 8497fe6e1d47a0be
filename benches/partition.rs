use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gridcut::split::subdivide;
use gridcut::{export_images, CanvasSize, EditorState, Partition, Splits, SplitterConfig};
use image::{Rgba, RgbaImage};
use std::hint::black_box;

fn create_test_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    })
}

fn editor(splits: Splits, enable_parallel: bool) -> EditorState {
    let mut state = EditorState::new(SplitterConfig::new(1000, 100, enable_parallel));
    state.splits = splits;
    state
}

// Candidate enumeration for growing line counts
fn bench_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumeration");
    let counts = [1, 10, 50, 100];

    for count in counts.iter() {
        let splits = Splits::grid(*count, *count);
        group.bench_with_input(BenchmarkId::new("lines", count), &splits, |b, splits| {
            b.iter(|| {
                let partition = Partition::from_splits(splits, CanvasSize::new(4000, 3000));
                black_box(partition.candidates(0).count());
            });
        });
    }
    group.finish();
}

fn bench_subdivide(c: &mut Criterion) {
    let mut group = c.benchmark_group("subdivide");
    let lines = Splits::grid(20, 0).horizontal;

    for count in [1, 2, 4].iter() {
        group.bench_with_input(BenchmarkId::new("count", count), count, |b, &count| {
            b.iter(|| black_box(subdivide(&lines, count)));
        });
    }
    group.finish();
}

// Benchmark parallel vs sequential rendering
fn bench_parallel_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_vs_sequential");
    let sizes = [(500, 500), (1000, 1000), (2000, 2000)];

    for size in sizes.iter() {
        let (width, height) = *size;
        let sources = [create_test_image(width, height)];
        let parallel = editor(Splits::grid(3, 3), true);
        let sequential = editor(Splits::grid(3, 3), false);

        group.bench_with_input(
            BenchmarkId::new("parallel", format!("{}x{}", width, height)),
            &sources,
            |b, sources| {
                b.iter(|| black_box(export_images(&parallel, sources, None).unwrap()));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("sequential", format!("{}x{}", width, height)),
            &sources,
            |b, sources| {
                b.iter(|| black_box(export_images(&sequential, sources, None).unwrap()));
            },
        );
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_enumeration, bench_subdivide, bench_parallel_rendering
}
criterion_main!(benches);
