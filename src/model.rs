//! Drawing data model: drawings hold paths, paths hold subpaths of points.

use kurbo::{BezPath, Point};

/// An ordered run of points forming one drawn curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Subpath {
    pub points: Vec<Point>,
}

/// Subpaths sharing a source identifier (a stroke group).
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub id: u64,
    pub subpaths: Vec<Subpath>,
}

/// The unit of input to the pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    pub paths: Vec<Path>,
}

impl Subpath {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Build from `(x, y)` tuples.
    pub fn from_xy(points: &[(f64, f64)]) -> Self {
        Self {
            points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Open polyline through the points, for rendering.
    pub fn to_bezpath(&self) -> BezPath {
        let mut path = BezPath::new();
        if let Some(&first) = self.points.first() {
            path.move_to(first);
            for &p in &self.points[1..] {
                path.line_to(p);
            }
        }
        path
    }
}

impl Drawing {
    /// Iterate `(path_index, subpath_index, subpath)` in draw order.
    pub fn subpaths(&self) -> impl Iterator<Item = (usize, usize, &Subpath)> {
        self.paths.iter().enumerate().flat_map(|(pi, path)| {
            path.subpaths
                .iter()
                .enumerate()
                .map(move |(si, sub)| (pi, si, sub))
        })
    }

    pub fn subpath_count(&self) -> usize {
        self.paths.iter().map(|p| p.subpaths.len()).sum()
    }
}
