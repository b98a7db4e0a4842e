//! Polygon simplification for corner counting.
//!
//! Ramer–Douglas–Peucker via `geo`, so the number of corners of a drawn
//! shape does not depend on how densely it was sampled.

use geo::{Coord, LineString, Simplify};
use kurbo::Point;

/// Points retained by RDP simplification, in input order.
/// First and last match the input's first and last.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplifiedPolygon {
    pub points: Vec<Point>,
}

impl SimplifiedPolygon {
    /// Number of distinct corners: retained points, minus one when the
    /// last point lands on the first, exactly or within `closure_tolerance`.
    pub fn corner_count(&self, closure_tolerance: f64) -> usize {
        match (self.points.first(), self.points.last()) {
            (Some(&first), Some(&last))
                if self.points.len() > 1
                    && (first == last || first.distance(last) < closure_tolerance) =>
            {
                self.points.len() - 1
            }
            _ => self.points.len(),
        }
    }
}

/// RDP-simplify `points` with the given tolerance.
///
/// A tolerance of 0 (or fewer than 3 points) returns the input unchanged.
pub fn simplify(points: &[Point], tolerance: f64) -> SimplifiedPolygon {
    if points.len() <= 2 || tolerance <= 0.0 {
        return SimplifiedPolygon {
            points: points.to_vec(),
        };
    }
    let line: LineString<f64> = points.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    let points = line
        .simplify(&tolerance)
        .into_inner()
        .into_iter()
        .map(|c| Point::new(c.x, c.y))
        .collect();
    SimplifiedPolygon { points }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(xy: &[(f64, f64)]) -> Vec<Point> {
        xy.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    /// Closed square with `per_side` samples along each edge.
    fn dense_square(per_side: usize) -> Vec<Point> {
        let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)];
        let mut out = Vec::new();
        for w in corners.windows(2) {
            let (a, b) = (w[0], w[1]);
            for i in 0..per_side {
                let t = i as f64 / per_side as f64;
                out.push(Point::new(a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t));
            }
        }
        out.push(Point::new(0.0, 0.0));
        out
    }

    #[test]
    fn closed_square_has_four_corners() {
        let simplified = simplify(
            &pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
            0.01,
        );
        assert_eq!(simplified.points.len(), 5);
        assert_eq!(simplified.corner_count(0.01), 4);
    }

    #[test]
    fn corner_count_ignores_sampling_density() {
        for per_side in [1, 10, 50] {
            let simplified = simplify(&dense_square(per_side), 0.01);
            assert_eq!(simplified.corner_count(0.01), 4, "per_side={}", per_side);
        }
    }

    #[test]
    fn endpoints_are_preserved() {
        let input = pts(&[(0.0, 0.0), (1.0, 0.001), (2.0, 0.0), (3.0, 1.0)]);
        let simplified = simplify(&input, 0.01);
        assert_eq!(simplified.points.first(), input.first());
        assert_eq!(simplified.points.last(), input.last());
        assert_eq!(simplified.points.len(), 3);
    }

    #[test]
    fn near_closed_endpoints_count_once() {
        let simplified = simplify(
            &pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.005, 0.0)]),
            0.01,
        );
        assert_eq!(simplified.points.len(), 5);
        assert_eq!(simplified.corner_count(0.01), 4);
        // A gap at or beyond the closure tolerance is a real vertex.
        assert_eq!(simplified.corner_count(0.005), 5);
    }

    #[test]
    fn zero_tolerance_is_identity() {
        let input = dense_square(5);
        assert_eq!(simplify(&input, 0.0).points, input);
    }

    #[test]
    fn huge_tolerance_collapses_open_curve() {
        let input = pts(&[(0.0, 0.0), (1.0, 0.3), (2.0, -0.2), (3.0, 0.0)]);
        let simplified = simplify(&input, 100.0);
        assert_eq!(simplified.points.len(), 2);
        assert_eq!(simplified.corner_count(0.01), 2);
    }

    #[test]
    fn huge_tolerance_collapses_closed_curve_below_a_triangle() {
        let simplified = simplify(&dense_square(4), 100.0);
        assert!(simplified.corner_count(0.01) < 3);
    }
}
