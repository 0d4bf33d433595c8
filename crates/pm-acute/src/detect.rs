use std::time::Instant;

use log::debug;
use pm_core::{Error, MaskView, Point2i};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::chain::{AngleChain, build_angle_chain};
use crate::debug::DebugContext;
use crate::island::{Island, extract_islands};
use crate::landmark::{DistanceRecord, Landmark, select_landmarks};
use crate::params::AcuteParams;

/// Everything one detector run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct AcuteResult {
    pub chain: AngleChain,
    pub islands: Vec<Island>,
    pub landmarks: Vec<Landmark>,
    /// Per-member rows for every landmark-eligible island, in island order.
    pub distances: Vec<DistanceRecord>,
}

impl AcuteResult {
    pub fn points(&self) -> Vec<Point2i> {
        self.landmarks.iter().map(|lm| lm.point).collect()
    }

    pub fn start_points(&self) -> Vec<Point2i> {
        self.landmarks.iter().map(|lm| lm.start).collect()
    }

    pub fn stop_points(&self) -> Vec<Point2i> {
        self.landmarks.iter().map(|lm| lm.stop).collect()
    }

    pub fn ptvals(&self) -> Vec<Option<f64>> {
        self.landmarks.iter().map(|lm| lm.ptval).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

/// Detects acute-angle pseudo-landmarks on a closed contour.
///
/// Runs the angle chain, island and landmark stages in order, recording one
/// step per stage in `ctx`. With a mask, every landmark also carries the mean
/// mask value inside its island's hull.
pub fn find_acute_landmarks(
    contour: &[Point2i],
    mask: Option<MaskView<'_>>,
    params: &AcuteParams,
    ctx: &mut DebugContext,
) -> Result<AcuteResult, Error> {
    params.validate()?;

    let started = Instant::now();
    let chain = build_angle_chain(contour, params.win)?;
    ctx.record("angle_chain", started);

    let started = Instant::now();
    let islands = extract_islands(contour, &chain, params);
    ctx.record("islands", started);

    let started = Instant::now();
    let (landmarks, distances) = select_landmarks(contour, &chain, &islands, mask);
    ctx.record("landmarks", started);

    debug!(
        "acute landmarks: {} points, {} islands, {} landmarks in {:.3} ms",
        contour.len(),
        islands.len(),
        landmarks.len(),
        ctx.total_ms()
    );

    Ok(AcuteResult {
        chain,
        islands,
        landmarks,
        distances,
    })
}

/// Runs [`find_acute_landmarks`] on independent contours without masks.
///
/// Each run gets its own [`DebugContext`]. With the `rayon` feature the
/// contours are processed in parallel; results keep the input order.
pub fn find_acute_landmarks_batch<C>(
    contours: &[C],
    params: &AcuteParams,
) -> Vec<Result<AcuteResult, Error>>
where
    C: AsRef<[Point2i]> + Sync,
{
    let run = |contour: &C| {
        let mut ctx = DebugContext::default();
        find_acute_landmarks(contour.as_ref(), None, params, &mut ctx)
    };

    #[cfg(feature = "rayon")]
    let results = contours.par_iter().map(run).collect();
    #[cfg(not(feature = "rayon"))]
    let results = contours.iter().map(run).collect();

    results
}

#[cfg(test)]
mod tests {
    use pm_core::{Error, Point2i};

    use super::{find_acute_landmarks, find_acute_landmarks_batch};
    use crate::debug::{DebugContext, DebugMode};
    use crate::params::AcuteParams;

    fn square(side: i32) -> Vec<Point2i> {
        let mut pts = Vec::new();
        pts.extend((0..side).map(|x| Point2i::new(x, 0)));
        pts.extend((0..side).map(|y| Point2i::new(side, y)));
        pts.extend((1..=side).rev().map(|x| Point2i::new(x, side)));
        pts.extend((1..=side).rev().map(|y| Point2i::new(0, y)));
        pts
    }

    #[test]
    fn stages_are_recorded_in_order() {
        let contour = square(100);
        let mut ctx = DebugContext::new(DebugMode::Plot);
        let result = find_acute_landmarks(&contour, None, &AcuteParams::new(20, 100.0), &mut ctx)
            .expect("valid input");

        assert_eq!(result.landmarks.len(), 4);
        assert_eq!(ctx.step(), 3);
        let labels: Vec<_> = ctx.stages().iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["angle_chain", "islands", "landmarks"]);
    }

    #[test]
    fn parallel_lists_line_up() {
        let contour = square(100);
        let mut ctx = DebugContext::default();
        let result = find_acute_landmarks(&contour, None, &AcuteParams::new(20, 100.0), &mut ctx)
            .expect("valid input");

        let points = result.points();
        assert_eq!(points.len(), result.start_points().len());
        assert_eq!(points.len(), result.stop_points().len());
        assert_eq!(result.ptvals(), vec![None; points.len()]);
        assert_eq!(result.distances.len(), 4 * 7);
    }

    #[test]
    fn invalid_params_fail_before_any_stage() {
        let contour = square(100);
        let mut ctx = DebugContext::default();
        let err = find_acute_landmarks(&contour, None, &AcuteParams::new(20, 200.0), &mut ctx);

        assert_eq!(err, Err(Error::InvalidThreshold));
        assert_eq!(ctx.step(), 0);
    }

    #[test]
    fn batch_keeps_input_order() {
        let contours = vec![square(100), square(3), square(50)];
        let results = find_acute_landmarks_batch(&contours, &AcuteParams::new(20, 100.0));

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().map(|r| r.landmarks.len()), Ok(4));
        assert!(matches!(
            results[1],
            Err(Error::InsufficientContour { points: 12, .. })
        ));
        assert_eq!(results[2].as_ref().map(|r| r.landmarks.len()), Ok(4));
    }
}
