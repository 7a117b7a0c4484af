//! Bézier flattening by de Casteljau subdivision
//!
//! The coverage accumulator only understands straight edges, so every
//! quadratic and cubic segment is split in half until its control points sit
//! within [`FLATNESS_TOLERANCE`] of the chord.

/// A point in mask pixel space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

/// A curve is flat once its control points stray less than 1/16 px
pub const FLATNESS_TOLERANCE: f32 = 1.0 / 16.0;

/// Malformed outlines still terminate after this many splits
const MAX_DEPTH: u32 = 16;

/// Manhattan distance of the control point from the chord midpoint
pub fn quadratic_flatness(p0: Point, p1: Point, p2: Point) -> f32 {
    let mid = p0.midpoint(p2);
    (p1.x - mid.x).abs() + (p1.y - mid.y).abs()
}

/// Worse of the two control points, measured the same way
pub fn cubic_flatness(p0: Point, p1: Point, p2: Point, p3: Point) -> f32 {
    let mid = p0.midpoint(p3);
    let d1 = (p1.x - mid.x).abs() + (p1.y - mid.y).abs();
    let d2 = (p2.x - mid.x).abs() + (p2.y - mid.y).abs();
    d1.max(d2)
}

/// Emit line endpoints approximating the quadratic from `p0` to `p2`
///
/// `p0` itself is not emitted; the caller is already standing on it.
pub fn flatten_quadratic<F>(p0: Point, p1: Point, p2: Point, output: &mut F)
where
    F: FnMut(Point),
{
    subdivide_quadratic(p0, p1, p2, output, 0);
}

/// Emit line endpoints approximating the cubic from `p0` to `p3`
pub fn flatten_cubic<F>(p0: Point, p1: Point, p2: Point, p3: Point, output: &mut F)
where
    F: FnMut(Point),
{
    subdivide_cubic(p0, p1, p2, p3, output, 0);
}

fn subdivide_quadratic<F>(p0: Point, p1: Point, p2: Point, output: &mut F, depth: u32)
where
    F: FnMut(Point),
{
    if depth >= MAX_DEPTH || quadratic_flatness(p0, p1, p2) <= FLATNESS_TOLERANCE {
        output(p2);
        return;
    }

    let m01 = p0.midpoint(p1);
    let m12 = p1.midpoint(p2);
    let m012 = m01.midpoint(m12);

    subdivide_quadratic(p0, m01, m012, output, depth + 1);
    subdivide_quadratic(m012, m12, p2, output, depth + 1);
}

fn subdivide_cubic<F>(p0: Point, p1: Point, p2: Point, p3: Point, output: &mut F, depth: u32)
where
    F: FnMut(Point),
{
    if depth >= MAX_DEPTH || cubic_flatness(p0, p1, p2, p3) <= FLATNESS_TOLERANCE {
        output(p3);
        return;
    }

    let m01 = p0.midpoint(p1);
    let m12 = p1.midpoint(p2);
    let m23 = p2.midpoint(p3);
    let m012 = m01.midpoint(m12);
    let m123 = m12.midpoint(m23);
    let m0123 = m012.midpoint(m123);

    subdivide_cubic(p0, m01, m012, m0123, output, depth + 1);
    subdivide_cubic(m0123, m123, m23, p3, output, depth + 1);
}
