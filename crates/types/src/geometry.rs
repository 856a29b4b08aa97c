use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// A position or offset in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// The same offset on both axes.
    pub const fn splat(value: f64) -> Self {
        Self { x: value, y: value }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// The four corners of a rectangle, in clockwise order from the upper left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    UpperLeft,
    UpperRight,
    LowerRight,
    LowerLeft,
}

impl Corner {
    pub const CLOCKWISE: [Corner; 4] = [
        Corner::UpperLeft,
        Corner::UpperRight,
        Corner::LowerRight,
        Corner::LowerLeft,
    ];

    /// Multipliers that turn positive offsets into movement toward the interior.
    pub fn factors(self) -> Point {
        match self {
            Corner::UpperLeft => Point::new(1.0, 1.0),
            Corner::UpperRight => Point::new(-1.0, 1.0),
            Corner::LowerRight => Point::new(-1.0, -1.0),
            Corner::LowerLeft => Point::new(1.0, -1.0),
        }
    }
}

/// A point on the edge of a rectangle that knows which way is inward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePoint {
    pub position: Point,
    pub factors: Point,
}

impl EdgePoint {
    pub fn new(position: impl Into<Point>, factors: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            factors: factors.into(),
        }
    }

    /// Displace the point. Positive offsets always move toward the next
    /// corner on each axis, so the result can be added blindly to an origin.
    pub fn displaced(&self, offsets: impl Into<Point>) -> Point {
        let offsets = offsets.into();
        Point::new(
            self.position.x + self.factors.x * offsets.x,
            self.position.y + self.factors.y * offsets.y,
        )
    }
}

/// A width and a height in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn as_point(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Swap the axes.
    pub fn tilted(&self) -> Self {
        Self::new(self.height, self.width)
    }

    pub fn corner(&self, corner: Corner) -> EdgePoint {
        let position = match corner {
            Corner::UpperLeft => Point::zero(),
            Corner::UpperRight => Point::new(self.width, 0.0),
            Corner::LowerRight => Point::new(self.width, self.height),
            Corner::LowerLeft => Point::new(0.0, self.height),
        };
        EdgePoint::new(position, corner.factors())
    }

    pub fn corners(&self) -> [EdgePoint; 4] {
        Corner::CLOCKWISE.map(|c| self.corner(c))
    }

    /// Pairs of points offset from each corner, for drawing frames.
    ///
    /// The first point of each pair lies on the edge arriving at the corner
    /// when walking clockwise, and the second on the edge leaving it.
    pub fn corner_offsets(&self, offsets: impl Into<Point>) -> Vec<(Point, Point)> {
        let (a, b) = {
            let p = offsets.into();
            (p.x, p.y)
        };
        let mut x_first = false;
        self.corners()
            .iter()
            .map(|corner| {
                let pair = if x_first {
                    (corner.displaced((a, b)), corner.displaced((b, a)))
                } else {
                    (corner.displaced((b, a)), corner.displaced((a, b)))
                };
                x_first = !x_first;
                pair
            })
            .collect()
    }
}

impl From<(f64, f64)> for Rectangle {
    fn from((width, height): (f64, f64)) -> Self {
        Self { width, height }
    }
}

impl Sub<f64> for Rectangle {
    type Output = Rectangle;

    fn sub(self, rhs: f64) -> Rectangle {
        Rectangle::new(self.width - rhs, self.height - rhs)
    }
}

/// A bounding-box view of a set of integer coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointList {
    points: Vec<(i64, i64)>,
}

impl PointList {
    pub fn new(points: impl IntoIterator<Item = (i64, i64)>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    pub fn points(&self) -> &[(i64, i64)] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn min_x(&self) -> i64 {
        self.points.iter().map(|p| p.0).min().unwrap_or(0)
    }

    pub fn max_x(&self) -> i64 {
        self.points.iter().map(|p| p.0).max().unwrap_or(0)
    }

    pub fn min_y(&self) -> i64 {
        self.points.iter().map(|p| p.1).min().unwrap_or(0)
    }

    pub fn max_y(&self) -> i64 {
        self.points.iter().map(|p| p.1).max().unwrap_or(0)
    }

    /// `None` when the spread overflows.
    pub fn diff_x(&self) -> Option<i64> {
        self.max_x().checked_sub(self.min_x())
    }

    pub fn diff_y(&self) -> Option<i64> {
        self.max_y().checked_sub(self.min_y())
    }

    /// The translation that moves the lowest coordinates to zero.
    pub fn offset(&self) -> Option<(i64, i64)> {
        Some((self.min_x().checked_neg()?, self.min_y().checked_neg()?))
    }

    /// Rows and columns needed to hold every point.
    pub fn shape(&self) -> Option<(usize, usize)> {
        if self.is_empty() {
            return Some((0, 0));
        }
        let rows = usize::try_from(self.diff_y()?.checked_add(1)?).ok()?;
        let cols = usize::try_from(self.diff_x()?.checked_add(1)?).ok()?;
        Some((rows, cols))
    }
}
