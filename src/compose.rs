//! Overlap-aware overlay composition.
//!
//! Greedy and order-dependent: earlier hulls win, and a later hull that
//! touches or overlaps any accepted hull is dropped whole.

use geo::{Intersects, Polygon};
use log::debug;

use crate::hull::{convex_hull, ConvexHull};
use crate::model::Drawing;

/// A hull accepted into the overlay, tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayShape {
    pub path_index: usize,
    pub subpath_index: usize,
    pub hull: ConvexHull,
}

/// Accepted hulls from one composition pass, in draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositeOverlay {
    pub shapes: Vec<OverlayShape>,
}

/// Keep each hull unless it intersects one already kept.
///
/// Returns the accepted hulls as an ordered subsequence of the input.
pub fn compose(hulls: &[ConvexHull]) -> Vec<ConvexHull> {
    accept_indices(hulls).into_iter().map(|i| hulls[i].clone()).collect()
}

/// Indices into `hulls` of the accepted entries, ascending.
fn accept_indices(hulls: &[ConvexHull]) -> Vec<usize> {
    let mut accepted: Vec<(usize, Polygon<f64>)> = Vec::new();
    for (i, hull) in hulls.iter().enumerate() {
        let poly = hull.to_polygon();
        if let Some((j, _)) = accepted.iter().find(|(_, kept)| kept.intersects(&poly)) {
            debug!("overlay: hull {} rejected, intersects hull {}", i, j);
            continue;
        }
        accepted.push((i, poly));
    }
    accepted.into_iter().map(|(i, _)| i).collect()
}

/// Build the overlay for a whole drawing.
///
/// Every subpath with a valid hull is a candidate, open or closed;
/// subpaths with fewer than three points or collinear points are skipped.
pub fn compose_drawing(drawing: &Drawing) -> CompositeOverlay {
    let mut origins = Vec::new();
    let mut hulls = Vec::new();
    for (pi, si, sub) in drawing.subpaths() {
        match convex_hull(&sub.points) {
            Ok(hull) => {
                origins.push((pi, si));
                hulls.push(hull);
            }
            Err(e) => debug!("overlay: subpath {}.{} skipped: {}", pi, si, e),
        }
    }

    let shapes = accept_indices(&hulls)
        .into_iter()
        .map(|i| {
            let (path_index, subpath_index) = origins[i];
            OverlayShape {
                path_index,
                subpath_index,
                hull: hulls[i].clone(),
            }
        })
        .collect();
    CompositeOverlay { shapes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Path, Subpath};
    use kurbo::Point;

    fn square(x: f64, y: f64, size: f64) -> ConvexHull {
        convex_hull(&[
            Point::new(x, y),
            Point::new(x + size, y),
            Point::new(x + size, y + size),
            Point::new(x, y + size),
        ])
        .unwrap()
    }

    #[test]
    fn identical_squares_keep_first_only() {
        let a = square(0.0, 0.0, 1.0);
        let out = compose(&[a.clone(), square(0.0, 0.0, 1.0)]);
        assert_eq!(out, vec![a]);
    }

    #[test]
    fn disjoint_squares_both_kept_in_order() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(5.0, 5.0, 1.0);
        assert_eq!(compose(&[a.clone(), b.clone()]), vec![a, b]);
    }

    #[test]
    fn bounding_boxes_overlap_but_polygons_do_not() {
        let tri_a = convex_hull(&[Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(0.0, 2.0)]).unwrap();
        let tri_b = convex_hull(&[Point::new(2.0, 2.0), Point::new(2.0, 0.5), Point::new(0.5, 2.0)]).unwrap();
        assert_eq!(compose(&[tri_a, tri_b]).len(), 2);
    }

    #[test]
    fn touching_boundaries_count_as_intersecting() {
        let out = compose(&[square(0.0, 0.0, 1.0), square(1.0, 0.0, 1.0)]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn greedy_choice_depends_on_order() {
        // The middle square overlaps both neighbours; the neighbours are disjoint.
        let left = square(0.0, 0.0, 1.0);
        let mid = square(0.5, 0.0, 1.0);
        let right = square(1.2, 0.0, 1.0);
        assert_eq!(compose(&[mid.clone(), left.clone(), right.clone()]), vec![mid.clone()]);
        assert_eq!(compose(&[left.clone(), mid, right.clone()]), vec![left, right]);
    }

    #[test]
    fn drawing_overlay_records_origins_and_skips_degenerate() {
        let drawing = Drawing {
            paths: vec![
                Path {
                    id: 0,
                    subpaths: vec![
                        Subpath::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
                        Subpath::from_xy(&[(0.0, 0.0), (1.0, 1.0)]),
                    ],
                },
                Path {
                    id: 1,
                    subpaths: vec![
                        Subpath::from_xy(&[(0.2, 0.2), (0.8, 0.2), (0.5, 0.8)]),
                        Subpath::from_xy(&[(3.0, 0.0), (7.0, 0.0), (7.0, 1.0), (3.0, 1.0)]),
                    ],
                },
            ],
        };
        let overlay = compose_drawing(&drawing);
        let origins: Vec<(usize, usize)> = overlay
            .shapes
            .iter()
            .map(|s| (s.path_index, s.subpath_index))
            .collect();
        assert_eq!(origins, vec![(0, 0), (1, 1)]);
        assert_eq!(overlay.shapes[0].hull.len(), 4);
    }
}
