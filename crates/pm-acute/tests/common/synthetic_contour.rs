#![allow(dead_code)]

use pm_core::{Image, Point2i};

/// Traces a closed polygon with unit pixel steps. Edges must be axis-aligned or
/// diagonal; each vertex appears exactly once.
pub fn trace_polygon(vertices: &[(i32, i32)]) -> Vec<Point2i> {
    assert!(vertices.len() >= 3, "polygon needs at least three vertices");

    let mut pts = Vec::new();
    for (i, &(x0, y0)) in vertices.iter().enumerate() {
        let (x1, y1) = vertices[(i + 1) % vertices.len()];
        let (sx, sy) = ((x1 - x0).signum(), (y1 - y0).signum());
        let (mut x, mut y) = (x0, y0);
        while (x, y) != (x1, y1) {
            pts.push(Point2i::new(x, y));
            x += sx;
            y += sy;
        }
    }
    pts
}

/// Axis-aligned square with its first point on the `(0, 0)` corner.
pub fn square(side: i32) -> Vec<Point2i> {
    trace_polygon(&[(0, 0), (side, 0), (side, side), (0, side)])
}

pub const L_SHAPE: [(i32, i32); 6] = [(0, 0), (100, 0), (100, 50), (50, 50), (50, 100), (0, 100)];

/// L-shaped outline with one reflex corner at `(50, 50)`.
pub fn l_shape() -> Vec<Point2i> {
    trace_polygon(&L_SHAPE)
}

/// Binary mask of the region enclosed by [`l_shape`], boundary included.
pub fn l_shape_mask() -> Image<u8> {
    let mut mask = Image::new_fill(110, 110, 0u8);
    mask.fill_rect(0, 0, 100, 50, 255);
    mask.fill_rect(0, 0, 50, 100, 255);
    mask
}

/// Quadrilateral whose only acute vertex is the 45 degree tip at `(0, 0)`,
/// which is also the first point of the trace.
pub fn lone_tip() -> Vec<Point2i> {
    trace_polygon(&[(0, 0), (100, 100), (100, 200), (0, 200)])
}

/// Rasterised circle without repeated consecutive points.
pub fn circle(cx: f64, cy: f64, radius: f64) -> Vec<Point2i> {
    let samples = (radius * 32.0).ceil() as usize;
    let mut pts: Vec<Point2i> = (0..samples)
        .map(|k| {
            let t = std::f64::consts::TAU * k as f64 / samples as f64;
            Point2i::new(
                (cx + radius * t.cos()).round() as i32,
                (cy + radius * t.sin()).round() as i32,
            )
        })
        .collect();
    pts.dedup();
    while pts.len() > 1 && pts.last() == pts.first() {
        pts.pop();
    }
    pts
}

/// Same loop, starting `k` points later.
pub fn rotated(contour: &[Point2i], k: usize) -> Vec<Point2i> {
    let mut out = contour.to_vec();
    out.rotate_left(k);
    out
}
