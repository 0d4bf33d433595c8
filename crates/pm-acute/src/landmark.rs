use log::debug;
use pm_core::{MaskView, Point2i};

use crate::chain::AngleChain;
use crate::island::Island;

/// Pseudo-landmark picked from one island.
#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    /// Contour index of the landmark.
    pub index: usize,
    pub point: Point2i,
    /// First island member in contour order.
    pub start_index: usize,
    pub start: Point2i,
    /// Last island member in contour order.
    pub stop_index: usize,
    pub stop: Point2i,
    pub island_len: usize,
    /// Mean mask value strictly inside the island's convex hull; `None` without
    /// a mask or when the hull has no interior pixel.
    pub ptval: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curvature {
    /// The tip bulges outward; its hull interior lies on the object.
    Convex,
    /// A notch; its hull interior lies on the background.
    Concave,
}

impl Landmark {
    /// Classifies the landmark from `ptval` against the mask foreground value.
    pub fn curvature(&self, foreground: u8) -> Option<Curvature> {
        let ptval = self.ptval?;
        if ptval >= f64::from(foreground) / 2.0 {
            Some(Curvature::Convex)
        } else {
            Some(Curvature::Concave)
        }
    }
}

/// One row of the distance table: a member of an eligible island and its mean
/// distance to the island's endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRecord {
    pub index: usize,
    pub mean_dist: f64,
    pub angle: f64,
}

/// Reduces every island with at least three members to one landmark.
///
/// The landmark is the member farthest, on average, from the island's first
/// and last members; ties keep the earliest member. Islands that are too short
/// produce neither a landmark nor distance rows.
pub fn select_landmarks(
    contour: &[Point2i],
    chain: &AngleChain,
    islands: &[Island],
    mask: Option<MaskView<'_>>,
) -> (Vec<Landmark>, Vec<DistanceRecord>) {
    let angles = chain.as_slice();
    let mut landmarks = Vec::new();
    let mut distances = Vec::new();

    for island in islands.iter().filter(|isl| isl.is_landmark_eligible()) {
        let start_index = island.start();
        let stop_index = island.end();
        let start = contour[start_index];
        let stop = contour[stop_index];

        let mut best: Option<(usize, f64)> = None;
        for &i in island.members() {
            let p = contour[i];
            let mean_dist = (p.dist(start) + p.dist(stop)) / 2.0;
            distances.push(DistanceRecord {
                index: i,
                mean_dist,
                angle: angles[i],
            });
            if best.is_none_or(|(_, d)| mean_dist > d) {
                best = Some((i, mean_dist));
            }
        }

        let Some((index, _)) = best else {
            continue;
        };
        let ptval = mask.and_then(|m| interior_mean(contour, island, m));

        landmarks.push(Landmark {
            index,
            point: contour[index],
            start_index,
            start,
            stop_index,
            stop,
            island_len: island.len(),
            ptval,
        });
    }

    debug!(
        "landmarks: {} selected from {} islands",
        landmarks.len(),
        islands.len()
    );
    (landmarks, distances)
}

/// Mean mask value over pixels strictly inside the hull of the island's points.
///
/// The scan covers the hull's bounding box clipped to the mask raster.
fn interior_mean(contour: &[Point2i], island: &Island, mask: MaskView<'_>) -> Option<f64> {
    let pts: Vec<Point2i> = island.members().iter().map(|&i| contour[i]).collect();
    let hull = convex_hull(&pts);
    if hull.len() < 3 || mask.width() == 0 || mask.height() == 0 {
        return None;
    }

    let max_x = i32::try_from(mask.width() - 1).unwrap_or(i32::MAX);
    let max_y = i32::try_from(mask.height() - 1).unwrap_or(i32::MAX);
    let (mut x0, mut y0, mut x1, mut y1) = (i32::MAX, i32::MAX, i32::MIN, i32::MIN);
    for p in &hull {
        x0 = x0.min(p.x);
        y0 = y0.min(p.y);
        x1 = x1.max(p.x);
        y1 = y1.max(p.y);
    }
    let (x0, y0) = (x0.max(0), y0.max(0));
    let (x1, y1) = (x1.min(max_x), y1.min(max_y));

    let mut sum = 0u64;
    let mut count = 0u64;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = Point2i::new(x, y);
            if !strictly_inside(&hull, p) {
                continue;
            }
            if let Some(&v) = mask.get_at(p) {
                sum += u64::from(v);
                count += 1;
            }
        }
    }

    (count > 0).then(|| sum as f64 / count as f64)
}

fn cross(o: Point2i, a: Point2i, b: Point2i) -> i64 {
    let (ax, ay) = (i64::from(a.x) - i64::from(o.x), i64::from(a.y) - i64::from(o.y));
    let (bx, by) = (i64::from(b.x) - i64::from(o.x), i64::from(b.y) - i64::from(o.y));
    ax * by - ay * bx
}

/// Monotone-chain hull with collinear points dropped, counter-clockwise in a
/// y-up frame.
fn convex_hull(points: &[Point2i]) -> Vec<Point2i> {
    let mut pts = points.to_vec();
    pts.sort_unstable_by_key(|p| (p.x, p.y));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    fn turns_left(hull: &[Point2i], p: Point2i) -> bool {
        let n = hull.len();
        cross(hull[n - 2], hull[n - 1], p) > 0
    }

    let mut hull: Vec<Point2i> = Vec::with_capacity(pts.len() * 2);
    for &p in &pts {
        while hull.len() >= 2 && !turns_left(&hull, p) {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && !turns_left(&hull, p) {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// Points on the hull boundary are outside.
fn strictly_inside(hull: &[Point2i], p: Point2i) -> bool {
    let n = hull.len();
    (0..n).all(|i| cross(hull[i], hull[(i + 1) % n], p) > 0)
}
