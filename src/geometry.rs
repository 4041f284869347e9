use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 2x3 affine matrix mapping `(x, y)` to
/// `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineTransform {
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `theta` radians; positive angles turn the x axis towards
    /// the y axis.
    pub fn rotation(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    pub fn shearing(shx: f64, shy: f64) -> Self {
        Self::new(1.0, shy, shx, 1.0, 0.0, 0.0)
    }

    /// Compose `other` into this transform so that `other` is applied first
    /// and `self` afterwards.
    pub fn concatenate(&mut self, other: &AffineTransform) {
        *self = Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        };
    }

    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.concatenate(&Self::translation(tx, ty));
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.concatenate(&Self::scaling(sx, sy));
    }

    pub fn rotate(&mut self, theta: f64) {
        self.concatenate(&Self::rotation(theta));
    }

    pub fn rotate_about(&mut self, theta: f64, x: f64, y: f64) {
        self.translate(x, y);
        self.rotate(theta);
        self.translate(-x, -y);
    }

    pub fn shear(&mut self, shx: f64, shy: f64) {
        self.concatenate(&Self::shearing(shx, shy));
    }

    pub fn apply(&self, point: Point) -> Point {
        Point {
            x: self.a * point.x + self.c * point.y + self.e,
            y: self.b * point.x + self.d * point.y + self.f,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn is_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.e, self.f]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathSegment {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    /// Control point, then end point.
    QuadTo(f64, f64, f64, f64),
    /// Two control points, then end point.
    CubicTo(f64, f64, f64, f64, f64, f64),
    Close,
}

impl PathSegment {
    fn map(self, f: impl Fn(Point) -> Point) -> Self {
        let p = |x, y| f(Point::new(x, y));
        match self {
            PathSegment::MoveTo(x, y) => {
                let q = p(x, y);
                PathSegment::MoveTo(q.x, q.y)
            }
            PathSegment::LineTo(x, y) => {
                let q = p(x, y);
                PathSegment::LineTo(q.x, q.y)
            }
            PathSegment::QuadTo(cx, cy, x, y) => {
                let c = p(cx, cy);
                let q = p(x, y);
                PathSegment::QuadTo(c.x, c.y, q.x, q.y)
            }
            PathSegment::CubicTo(c1x, c1y, c2x, c2y, x, y) => {
                let c1 = p(c1x, c1y);
                let c2 = p(c2x, c2y);
                let q = p(x, y);
                PathSegment::CubicTo(c1.x, c1.y, c2.x, c2.y, q.x, q.y)
            }
            PathSegment::Close => PathSegment::Close,
        }
    }

    fn points(&self) -> Vec<Point> {
        match *self {
            PathSegment::MoveTo(x, y) | PathSegment::LineTo(x, y) => vec![Point::new(x, y)],
            PathSegment::QuadTo(cx, cy, x, y) => vec![Point::new(cx, cy), Point::new(x, y)],
            PathSegment::CubicTo(c1x, c1y, c2x, c2y, x, y) => vec![
                Point::new(c1x, c1y),
                Point::new(c2x, c2y),
                Point::new(x, y),
            ],
            PathSegment::Close => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// An immutable-by-convention sequence of path segments in device space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::MoveTo(x, y));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::LineTo(x, y));
        self
    }

    pub fn quad_to(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::QuadTo(cx, cy, x, y));
        self
    }

    pub fn cubic_to(mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) -> Self {
        self.segments
            .push(PathSegment::CubicTo(c1x, c1y, c2x, c2y, x, y));
        self
    }

    pub fn close(mut self) -> Self {
        self.segments.push(PathSegment::Close);
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn transformed(&self, transform: &AffineTransform) -> Path {
        if transform.is_identity() {
            return self.clone();
        }
        Path {
            segments: self
                .segments
                .iter()
                .map(|seg| seg.map(|p| transform.apply(p)))
                .collect(),
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Path {
        self.transformed(&AffineTransform::translation(dx, dy))
    }

    /// Bounds over every point of the path, control points included.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.segments.iter().flat_map(|seg| seg.points());
        let first = points.next()?;
        let init = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(points.fold(init, |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }
}
