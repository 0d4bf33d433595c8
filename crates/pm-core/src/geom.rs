use core::ops::Sub;

/// Integer pixel coordinate of a contour point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point2i {
    pub x: i32,
    pub y: i32,
}

impl Point2i {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared distance; exact for coordinate differences below 2^26.
    pub fn dist_sq(self, other: Self) -> f64 {
        let d = self - other;
        d.dot(d)
    }

    /// Euclidean (chordal) distance in pixels.
    pub fn dist(self, other: Self) -> f64 {
        (self - other).norm()
    }

    pub fn to_f64(self) -> Point2f {
        Point2f {
            x: f64::from(self.x),
            y: f64::from(self.y),
        }
    }
}

impl From<(i32, i32)> for Point2i {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for Point2i {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2f {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2f {
    pub x: f64,
    pub y: f64,
}

impl Vec2f {
    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y
    }

    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl Sub<Point2f> for Point2f {
    type Output = Vec2f;

    fn sub(self, rhs: Point2f) -> Self::Output {
        Vec2f {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Sub for Point2i {
    type Output = Vec2f;

    fn sub(self, rhs: Point2i) -> Self::Output {
        Vec2f {
            x: f64::from(self.x) - f64::from(rhs.x),
            y: f64::from(self.y) - f64::from(rhs.y),
        }
    }
}
