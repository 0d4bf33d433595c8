//! Size-invariant landmark coordinates.
//!
//! Landmarks are re-expressed relative to the contour's area centroid and
//! divided by the contour's bounding-box height, so objects imaged at
//! different magnifications can be compared point by point.

use pm_core::{Error, Point2f, Point2i};

#[derive(Debug, Clone, PartialEq)]
pub struct ScaledFeatures {
    pub points: Vec<Point2f>,
    pub centroid: Point2f,
    /// Bounding-box height in pixels, inclusive of both end rows.
    pub height: f64,
}

/// Maps `points` into the centroid-origin, height-normalised frame of `contour`.
pub fn scale_landmarks(contour: &[Point2i], points: &[Point2i]) -> Result<ScaledFeatures, Error> {
    let Some(first) = contour.first() else {
        return Err(Error::InsufficientContour {
            points: 0,
            required: 1,
        });
    };

    let centroid = area_centroid(contour).unwrap_or_else(|| vertex_mean(contour));
    let (min_y, max_y) = contour
        .iter()
        .fold((first.y, first.y), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    let height = f64::from(max_y) - f64::from(min_y) + 1.0;

    let points = points
        .iter()
        .map(|p| {
            let d = p.to_f64() - centroid;
            Point2f {
                x: d.x / height,
                y: d.y / height,
            }
        })
        .collect();

    Ok(ScaledFeatures {
        points,
        centroid,
        height,
    })
}

/// Shoelace centroid of the closed polygon; `None` when the area vanishes.
fn area_centroid(contour: &[Point2i]) -> Option<Point2f> {
    let n = contour.len();
    let mut twice_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = contour[i].to_f64();
        let b = contour[(i + 1) % n].to_f64();
        let w = a.x * b.y - b.x * a.y;
        twice_area += w;
        cx += (a.x + b.x) * w;
        cy += (a.y + b.y) * w;
    }

    if twice_area.abs() < 1e-9 {
        return None;
    }
    let k = 1.0 / (3.0 * twice_area);
    Some(Point2f {
        x: cx * k,
        y: cy * k,
    })
}

fn vertex_mean(contour: &[Point2i]) -> Point2f {
    let n = contour.len() as f64;
    let (sx, sy) = contour.iter().fold((0.0, 0.0), |(sx, sy), p| {
        (sx + f64::from(p.x), sy + f64::from(p.y))
    });
    Point2f {
        x: sx / n,
        y: sy / n,
    }
}

#[cfg(test)]
mod tests {
    use pm_core::{Error, Point2i};

    use super::scale_landmarks;

    fn square(side: i32) -> Vec<Point2i> {
        let mut pts = Vec::new();
        pts.extend((0..side).map(|x| Point2i::new(x, 0)));
        pts.extend((0..side).map(|y| Point2i::new(side, y)));
        pts.extend((1..=side).rev().map(|x| Point2i::new(x, side)));
        pts.extend((1..=side).rev().map(|y| Point2i::new(0, y)));
        pts
    }

    #[test]
    fn square_scales_about_its_center() {
        let contour = square(100);
        let scaled = scale_landmarks(&contour, &[Point2i::new(100, 0), Point2i::new(50, 50)])
            .expect("non-empty contour");

        assert!((scaled.centroid.x - 50.0).abs() < 1e-9);
        assert!((scaled.centroid.y - 50.0).abs() < 1e-9);
        assert_eq!(scaled.height, 101.0);

        assert!((scaled.points[0].x - 50.0 / 101.0).abs() < 1e-12);
        assert!((scaled.points[0].y + 50.0 / 101.0).abs() < 1e-12);
        assert!(scaled.points[1].x.abs() < 1e-12);
        assert!(scaled.points[1].y.abs() < 1e-12);
    }

    #[test]
    fn orientation_does_not_move_the_centroid() {
        let mut contour = square(40);
        contour.reverse();
        let scaled = scale_landmarks(&contour, &[]).expect("non-empty contour");

        assert!((scaled.centroid.x - 20.0).abs() < 1e-9);
        assert!((scaled.centroid.y - 20.0).abs() < 1e-9);
        assert!(scaled.points.is_empty());
    }

    #[test]
    fn flat_contours_fall_back_to_the_vertex_mean() {
        let contour = [Point2i::new(0, 3), Point2i::new(4, 3), Point2i::new(8, 3)];
        let scaled = scale_landmarks(&contour, &[Point2i::new(8, 3)]).expect("non-empty");

        assert!((scaled.centroid.x - 4.0).abs() < 1e-12);
        assert!((scaled.centroid.y - 3.0).abs() < 1e-12);
        assert_eq!(scaled.height, 1.0);
        assert!((scaled.points[0].x - 4.0).abs() < 1e-12);
    }

    #[test]
    fn empty_contour_is_rejected() {
        assert_eq!(
            scale_landmarks(&[], &[]),
            Err(Error::InsufficientContour {
                points: 0,
                required: 1
            })
        );
    }
}
