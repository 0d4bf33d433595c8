use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pm_acute::{AcuteParams, DebugContext, build_angle_chain, find_acute_landmarks};
use pm_core::{Image, Point2i};

/// Square outline of `4 * side` points, one per boundary pixel step.
fn build_square(side: i32) -> Vec<Point2i> {
    let mut pts = Vec::with_capacity(4 * side as usize);
    pts.extend((0..side).map(|x| Point2i::new(x, 0)));
    pts.extend((0..side).map(|y| Point2i::new(side, y)));
    pts.extend((1..=side).rev().map(|x| Point2i::new(x, side)));
    pts.extend((1..=side).rev().map(|y| Point2i::new(0, y)));
    pts
}

fn bench_chain(c: &mut Criterion) {
    let contour = build_square(500);

    c.bench_function("pm_acute_angle_chain_2000", |b| {
        b.iter(|| {
            let chain = build_angle_chain(black_box(&contour), 20).expect("valid contour");
            black_box(chain.len());
        });
    });
}

fn bench_acute_landmarks(c: &mut Criterion) {
    let contour = build_square(500);
    let mut mask = Image::new_fill(512, 512, 0u8);
    mask.fill_rect(0, 0, 500, 500, 255);
    let params = AcuteParams::new(20, 100.0);

    c.bench_function("pm_acute_landmarks_2000", |b| {
        b.iter(|| {
            let mut ctx = DebugContext::default();
            let result = find_acute_landmarks(
                black_box(&contour),
                Some(mask.as_view()),
                black_box(&params),
                &mut ctx,
            )
            .expect("valid contour");
            black_box(result.landmarks.len());
        });
    });
}

criterion_group!(benches, bench_chain, bench_acute_landmarks);
criterion_main!(benches);
