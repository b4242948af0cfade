// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the quadscan-detect crate. Covers colour-range
// detection, extraction with rectification, and the edge-based detector on
// one synthetic frame.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

use quadscan_detect::{DocumentDetector, EdgeDetector};

const BACKGROUND: Rgb<u8> = Rgb([24, 24, 28]);

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// 640x480 dark frame holding one slightly skewed light page.
fn synthetic_frame() -> DynamicImage {
    let mut img = RgbImage::from_pixel(640, 480, BACKGROUND);
    let page = [
        Point::new(150, 100),
        Point::new(470, 115),
        Point::new(485, 380),
        Point::new(140, 365),
    ];
    draw_polygon_mut(&mut img, &page, Rgb([236, 232, 224]));
    DynamicImage::ImageRgb8(img)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_detect_documents(c: &mut Criterion) {
    let frame = synthetic_frame();
    let detector = DocumentDetector::new();

    c.bench_function("detect_documents (640x480)", |b| {
        b.iter(|| {
            let quads = detector.detect_documents(black_box(&frame), BACKGROUND);
            black_box(quads.ok());
        });
    });
}

/// Detection plus bilinear rectification of the central page.
fn bench_extract_document(c: &mut Criterion) {
    let frame = synthetic_frame();
    let detector = DocumentDetector::new();

    c.bench_function("extract_document (640x480)", |b| {
        b.iter(|| {
            let page = detector.extract_document(black_box(&frame), BACKGROUND);
            black_box(page.ok());
        });
    });
}

fn bench_edge_detector(c: &mut Criterion) {
    let frame = synthetic_frame();
    let detector = EdgeDetector::new();

    c.bench_function("edge_detect (640x480)", |b| {
        b.iter(|| {
            let quads = detector.detect(black_box(&frame), 1);
            black_box(quads.ok());
        });
    });
}

criterion_group!(
    benches,
    bench_detect_documents,
    bench_extract_document,
    bench_edge_detector
);
criterion_main!(benches);
