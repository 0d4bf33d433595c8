//! Per-vertex angle scores along a closed contour.
//!
//! For every vertex `V` two reference points are chosen: `A`, scanning
//! backward along the loop, and `B`, scanning forward. Each is the farthest
//! point from `V` that still lies within the chordal window `win`; the scan in
//! a direction stops at the first point beyond the window. The score is the
//! angle at `V` between the rays `V->A` and `V->B`, from the law of cosines.
//!
//! Small scores mark sharp local turns (tips, lobes, notches). A straight run
//! scores 180 degrees.

use log::debug;
use pm_core::circular::offset;
use pm_core::{Error, Point2i};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::params::min_contour_len;

/// Angle scores in degrees, index-aligned with the contour they came from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AngleChain(Vec<f64>);

impl AngleChain {
    pub fn new(angles: Vec<f64>) -> Self {
        Self(angles)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<f64> {
        self.0.get(i).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Ascending indices whose score is `<= threshold_deg`.
    pub fn acute_indices(&self, threshold_deg: f64) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &a)| a <= threshold_deg)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Computes the angle score of every contour vertex.
///
/// Fails with [`Error::InsufficientContour`] when the contour has fewer than
/// `max(3, 2 * win + 1)` points, and with [`Error::InvalidWindow`] for
/// `win == 0`.
pub fn build_angle_chain(contour: &[Point2i], win: u32) -> Result<AngleChain, Error> {
    if win == 0 {
        return Err(Error::InvalidWindow);
    }
    let required = min_contour_len(win);
    if contour.len() < required {
        return Err(Error::InsufficientContour {
            points: contour.len(),
            required,
        });
    }

    let n = contour.len();
    // A and B never come from the far side of the vertex.
    let max_steps = (n - 1) / 2;
    let win = f64::from(win);

    #[cfg(feature = "rayon")]
    let angles: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|i| vertex_angle(contour, i, win, max_steps))
        .collect();
    #[cfg(not(feature = "rayon"))]
    let angles: Vec<f64> = (0..n)
        .map(|i| vertex_angle(contour, i, win, max_steps))
        .collect();

    debug!("angle chain: {n} vertices, win={win}");
    Ok(AngleChain(angles))
}

fn vertex_angle(contour: &[Point2i], i: usize, win: f64, max_steps: usize) -> f64 {
    let v = contour[i];
    let a = reference_point(contour, i, -1, win, max_steps);
    let b = reference_point(contour, i, 1, win, max_steps);
    angle_at(v, a, b)
}

/// Farthest point from `contour[i]` within `win`, walking in `dir` (+1/-1).
///
/// The immediate neighbor is always accepted as the starting reference, even
/// when it is farther than `win`.
fn reference_point(
    contour: &[Point2i],
    i: usize,
    dir: isize,
    win: f64,
    max_steps: usize,
) -> Point2i {
    let n = contour.len();
    let v = contour[i];

    let mut best = contour[offset(i, dir, n)];
    let mut best_dist = v.dist(best);

    for step in 2..=max_steps {
        let p = contour[offset(i, dir * step as isize, n)];
        let d = v.dist(p);
        if d > win {
            break;
        }
        if d > best_dist {
            best = p;
            best_dist = d;
        }
    }

    best
}

/// Angle at `v` between rays `v->a` and `v->b`, in degrees within `[0, 180]`.
///
/// A zero-length ray has no direction; such a vertex scores 180.
pub fn angle_at(v: Point2i, a: Point2i, b: Point2i) -> f64 {
    let p12_sq = v.dist_sq(a);
    let p13_sq = v.dist_sq(b);
    let p23_sq = a.dist_sq(b);

    let denom = 2.0 * p12_sq.sqrt() * p13_sq.sqrt();
    if denom == 0.0 {
        return 180.0;
    }

    let cos = ((p12_sq + p13_sq - p23_sq) / denom).clamp(-1.0, 1.0);
    cos.acos().to_degrees().clamp(0.0, 180.0)
}
