//! Convex hull via Andrew's monotone chain.
//!
//! Hull vertices come back counter-clockwise, in minimal form: collinear
//! points along an edge and duplicate points are dropped, so the vertex
//! count is the number of true corners of the hull.

use std::f64::consts::PI;

use geo::{Coord, LineString, Polygon};
use kurbo::{BezPath, Point};

use crate::error::ShapeError;
use crate::geom::{cross, perimeter, signed_area};

/// Convex polygon around a point set. Vertices are a subset of the input,
/// counter-clockwise, without repeating the first vertex at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexHull {
    pub vertices: Vec<Point>,
}

impl ConvexHull {
    /// Shoelace area (always positive for a CCW hull).
    pub fn area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    /// Sum of edge lengths, closing edge included.
    pub fn perimeter(&self) -> f64 {
        perimeter(&self.vertices)
    }

    /// Isoperimetric ratio 4π·A / P². 1.0 for a circle, lower for polygons.
    pub fn circularity(&self) -> f64 {
        let p = self.perimeter();
        if p <= 0.0 {
            return 0.0;
        }
        4.0 * PI * self.area() / (p * p)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The hull as a closed `geo` polygon, for intersection tests.
    pub fn to_polygon(&self) -> Polygon<f64> {
        let ring: Vec<Coord<f64>> = self
            .vertices
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect();
        Polygon::new(LineString::from(ring), vec![])
    }

    /// The hull as a closed `BezPath`, for rendering.
    pub fn to_bezpath(&self) -> BezPath {
        let mut path = BezPath::new();
        if let Some((&first, rest)) = self.vertices.split_first() {
            path.move_to(first);
            for &p in rest {
                path.line_to(p);
            }
            path.close_path();
        }
        path
    }
}

/// Compute the convex hull of `points`.
///
/// Fails with `InsufficientPoints` when fewer than 3 distinct points are
/// given, and `Degenerate` when they are all collinear.
pub fn convex_hull(points: &[Point]) -> Result<ConvexHull, ShapeError> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return Err(ShapeError::InsufficientPoints { found: pts.len() });
    }

    let mut lower: Vec<Point> = Vec::with_capacity(pts.len());
    for &p in &pts {
        push_turning_left(&mut lower, p);
    }
    let mut upper: Vec<Point> = Vec::with_capacity(pts.len());
    for &p in pts.iter().rev() {
        push_turning_left(&mut upper, p);
    }

    // Each chain ends where the other begins.
    lower.pop();
    upper.pop();
    lower.extend(upper);

    if lower.len() < 3 {
        return Err(ShapeError::Degenerate);
    }
    Ok(ConvexHull { vertices: lower })
}

/// Push `p`, first popping points that would make a right turn or a
/// straight line (the latter keeps the hull minimal).
fn push_turning_left(chain: &mut Vec<Point>, p: Point) {
    while chain.len() >= 2 && cross(chain[chain.len() - 2], chain[chain.len() - 1], p) <= 0.0 {
        chain.pop();
    }
    chain.push(p);
}
