//! Shared geometry utilities.

use kurbo::{Point, Rect};

/// Signed area of a closed polygon via the shoelace formula.
///
/// Positive = counter-clockwise, negative = clockwise.
pub fn signed_area(pts: &[Point]) -> f64 {
    let n = pts.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            pts[i].x * pts[j].y - pts[j].x * pts[i].y
        })
        .sum::<f64>()
        / 2.0
}

/// Perimeter of a closed polygon, including the edge from last back to first.
pub fn perimeter(pts: &[Point]) -> f64 {
    let n = pts.len();
    if n < 2 {
        return 0.0;
    }
    (0..n).map(|i| pts[i].distance(pts[(i + 1) % n])).sum()
}

/// Z component of (a - o) × (b - o). Positive when o→a→b turns left.
pub fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a - o).cross(b - o)
}

/// Axis-aligned bounds of a point set, `None` when empty.
pub fn bounds(pts: &[Point]) -> Option<Rect> {
    let (&first, rest) = pts.split_first()?;
    Some(
        rest.iter()
            .fold(Rect::from_points(first, first), |r, &p| r.union_pt(p)),
    )
}

/// Interior angle at `b` in radians, in [0, π].
pub fn angle_at(a: Point, b: Point, c: Point) -> f64 {
    let u = a - b;
    let v = c - b;
    u.cross(v).atan2(u.dot(v)).abs()
}
