//! Rule-based shape classification of closed subpaths.
//!
//! Order of tests:
//! 1. Hull circularity above threshold → circle
//! 2. RDP corner count, with bounding-box aspect ratio splitting 4-gons
//!    into squares and rectangles
//!
//! Geometric failures (too few points, collinear input) classify as
//! `Unknown` instead of propagating, so one bad subpath never aborts a drawing.

use std::collections::BTreeMap;
use std::f64::consts::FRAC_PI_2;
use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::closure::is_closed;
use crate::config::ClassifierConfig;
use crate::error::ShapeError;
use crate::geom::{angle_at, bounds};
use crate::hull::{convex_hull, ConvexHull};
use crate::model::Subpath;
use crate::simplify::simplify;

/// The closed set of shapes the classifier can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShapeLabel {
    Circle,
    Square,
    Rectangle,
    Triangle,
    #[serde(rename = "Pentagon (Star)")]
    Pentagon,
    #[serde(rename = "Star or Complex Shape")]
    StarOrComplex,
    Unknown,
}

impl ShapeLabel {
    pub const ALL: [ShapeLabel; 7] = [
        ShapeLabel::Circle,
        ShapeLabel::Square,
        ShapeLabel::Rectangle,
        ShapeLabel::Triangle,
        ShapeLabel::Pentagon,
        ShapeLabel::StarOrComplex,
        ShapeLabel::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeLabel::Circle => "Circle",
            ShapeLabel::Square => "Square",
            ShapeLabel::Rectangle => "Rectangle",
            ShapeLabel::Triangle => "Triangle",
            ShapeLabel::Pentagon => "Pentagon (Star)",
            ShapeLabel::StarOrComplex => "Star or Complex Shape",
            ShapeLabel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ShapeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge lengths and interior angles of a four-vertex hull.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadGeometry {
    /// Edge `i` runs from vertex `i` to vertex `i + 1`.
    pub edges: [f64; 4],
    /// Interior angle at each vertex, radians.
    pub angles: [f64; 4],
}

impl QuadGeometry {
    /// `None` unless the hull has exactly four vertices.
    pub fn from_hull(hull: &ConvexHull) -> Option<Self> {
        let v: &[kurbo::Point; 4] = hull.vertices.as_slice().try_into().ok()?;
        let edges = std::array::from_fn(|i| v[i].distance(v[(i + 1) % 4]));
        let angles = std::array::from_fn(|i| angle_at(v[(i + 3) % 4], v[i], v[(i + 1) % 4]));
        Some(Self { edges, angles })
    }

    /// Every interior angle within `tol` radians of a right angle.
    pub fn is_rectangular(&self, tol: f64) -> bool {
        self.angles.iter().all(|a| (a - FRAC_PI_2).abs() <= tol)
    }

    /// Longest and shortest edge differ by at most `rel_tol` of the longest.
    pub fn is_equilateral(&self, rel_tol: f64) -> bool {
        let max = self.edges.iter().copied().fold(f64::MIN, f64::max);
        let min = self.edges.iter().copied().fold(f64::MAX, f64::min);
        max > 0.0 && (max - min) <= rel_tol * max
    }
}

/// A label plus the measurements that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub label: ShapeLabel,
    /// Hull circularity; `None` when no hull could be built.
    pub circularity: Option<f64>,
    /// Corner count after simplification; 0 when not reached.
    pub corners: usize,
    /// Bounding-box width / height; `None` for zero height or when not reached.
    pub aspect_ratio: Option<f64>,
    /// Hull edge/angle measurements for four-corner shapes.
    pub quad: Option<QuadGeometry>,
}

impl Classification {
    fn unknown() -> Self {
        Self {
            label: ShapeLabel::Unknown,
            circularity: None,
            corners: 0,
            aspect_ratio: None,
            quad: None,
        }
    }
}

/// Classify a closed subpath.
///
/// Callers are expected to have checked closure; see [`classify_subpath`]
/// for the checked entry point.
pub fn classify(subpath: &Subpath, config: &ClassifierConfig) -> Classification {
    let hull = match convex_hull(&subpath.points) {
        Ok(hull) => hull,
        Err(ShapeError::InsufficientPoints { found }) => {
            debug!("classification skipped: {} distinct points", found);
            return Classification::unknown();
        }
        Err(e) => {
            warn!("classification skipped: {}", e);
            return Classification::unknown();
        }
    };

    let circularity = hull.circularity();
    if circularity > config.circularity_threshold {
        debug!("circularity={:.2} -> Circle", circularity);
        return Classification {
            label: ShapeLabel::Circle,
            circularity: Some(circularity),
            ..Classification::unknown()
        };
    }

    let aspect_ratio = bounds(&subpath.points)
        .filter(|r| r.height() > 0.0)
        .map(|r| r.width() / r.height());
    let corners = simplify(&subpath.points, config.simplify_tolerance)
        .corner_count(config.closure_tolerance);

    let label = match (corners, aspect_ratio) {
        (4, Some(ratio)) if config.is_square_aspect(ratio) => ShapeLabel::Square,
        (4, Some(_)) => ShapeLabel::Rectangle,
        (3, _) => ShapeLabel::Triangle,
        (5, _) => ShapeLabel::Pentagon,
        (c, _) if c > 5 => ShapeLabel::StarOrComplex,
        _ => ShapeLabel::Unknown,
    };
    debug!(
        "circularity={:.2} corners={} aspect_ratio={} -> {}",
        circularity,
        corners,
        aspect_ratio.map_or_else(|| "n/a".to_string(), |r| format!("{:.2}", r)),
        label,
    );

    Classification {
        label,
        circularity: Some(circularity),
        corners,
        aspect_ratio,
        quad: if corners == 4 { QuadGeometry::from_hull(&hull) } else { None },
    }
}

/// Classify any subpath: open subpaths and those with fewer than three
/// points are `Unknown`.
pub fn classify_subpath(subpath: &Subpath, config: &ClassifierConfig) -> Classification {
    if subpath.len() < 3 || !is_closed(subpath, config.closure_tolerance) {
        return Classification::unknown();
    }
    classify(subpath, config)
}

/// Per-label counts, in label order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShapeCounts(pub BTreeMap<ShapeLabel, usize>);

impl ShapeCounts {
    pub fn get(&self, label: ShapeLabel) -> usize {
        self.0.get(&label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
}

impl fmt::Display for ShapeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Detected:")?;
        if self.0.is_empty() {
            return write!(f, " nothing");
        }
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(label, n)| format!("{} {}", n, label))
            .collect();
        write!(f, " {}", parts.join(", "))
    }
}

/// Fold labels into counts.
pub fn tally<'a>(labels: impl IntoIterator<Item = &'a ShapeLabel>) -> ShapeCounts {
    ShapeCounts(labels.into_iter().fold(BTreeMap::new(), |mut acc, &label| {
        *acc.entry(label).or_insert(0) += 1;
        acc
    }))
}
