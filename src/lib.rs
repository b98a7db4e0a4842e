//! shapesnap: hand-drawn polylines → geometric primitives.
//!
//! Classifies closed curves as circles, squares, rectangles, triangles,
//! pentagons or complex shapes, and composes non-overlapping overlays
//! of the detected shapes.
//!
//! # Example
//!
//! ```no_run
//! use shapesnap::{analyze, input, ClassifierConfig};
//! use std::path::Path;
//!
//! let drawing = input::read_drawing(Path::new("shapes.csv"))?;
//! let analysis = analyze(&drawing, &ClassifierConfig::default());
//! println!("{}", analysis.counts);
//! # Ok::<(), shapesnap::ShapeError>(())
//! ```

#![forbid(unsafe_code)]

mod closure;
mod config;
mod geom;

pub mod classify;
pub mod compose;
pub mod error;
pub mod hull;
pub mod input;
pub mod mirror;
pub mod model;
pub mod render;
pub mod simplify;

// Re-export kurbo so downstream users get the same Point type.
pub use kurbo;

pub use classify::{classify, classify_subpath, tally, Classification, ShapeCounts, ShapeLabel};
pub use closure::is_closed;
pub use compose::{compose, compose_drawing, CompositeOverlay, OverlayShape};
pub use config::ClassifierConfig;
pub use error::ShapeError;
pub use hull::{convex_hull, ConvexHull};
pub use model::{Drawing, Path, Subpath};
pub use simplify::{simplify, SimplifiedPolygon};

use log::debug;
use serde::Serialize;

/// A closed subpath and how it was classified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedSubpath {
    pub path_index: usize,
    pub subpath_index: usize,
    #[serde(flatten)]
    pub classification: Classification,
}

/// Result of classifying every subpath of a drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Closed subpaths with their classification, in draw order.
    pub shapes: Vec<ClassifiedSubpath>,
    /// One label per subpath in draw order; open subpaths are `Unknown`.
    pub labels: Vec<ShapeLabel>,
    /// Label counts over the closed subpaths.
    pub counts: ShapeCounts,
}

/// Classify every subpath of `drawing`.
///
/// Each subpath is handled in isolation: a degenerate one becomes
/// `Unknown` without affecting its siblings.
pub fn analyze(drawing: &Drawing, config: &ClassifierConfig) -> Analysis {
    let mut shapes = Vec::new();
    let mut labels = Vec::with_capacity(drawing.subpath_count());

    for (path_index, subpath_index, sub) in drawing.subpaths() {
        if !is_closed(sub, config.closure_tolerance) {
            debug!("subpath {}.{}: open", path_index, subpath_index);
            labels.push(ShapeLabel::Unknown);
            continue;
        }
        let classification = classify_subpath(sub, config);
        labels.push(classification.label);
        shapes.push(ClassifiedSubpath {
            path_index,
            subpath_index,
            classification,
        });
    }

    let counts = tally(shapes.iter().map(|s| &s.classification.label));
    Analysis {
        shapes,
        labels,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &str = "\
0,0,0.0,0.0
0,0,1.0,0.0
0,0,1.0,1.0
0,0,0.0,1.0
0,0,0.0,0.0
0,1,5.0,0.0
0,1,6.0,1.0
1,0,10.0,0.0
1,0,14.0,0.0
1,0,14.0,2.0
1,0,10.0,2.0
1,0,10.0,0.0
1,1,20.0,20.0
";

    #[test]
    fn mixed_drawing() {
        let drawing = input::parse_drawing(MIXED).unwrap();
        let analysis = analyze(&drawing, &ClassifierConfig::default());

        assert_eq!(
            analysis.labels,
            vec![
                ShapeLabel::Square,
                ShapeLabel::Unknown,
                ShapeLabel::Rectangle,
                ShapeLabel::Unknown,
            ]
        );
        // The single point is closed but too short to classify.
        let origins: Vec<(usize, usize)> = analysis
            .shapes
            .iter()
            .map(|s| (s.path_index, s.subpath_index))
            .collect();
        assert_eq!(origins, vec![(0, 0), (1, 0), (1, 1)]);
        assert_eq!(analysis.counts.get(ShapeLabel::Square), 1);
        assert_eq!(analysis.counts.get(ShapeLabel::Rectangle), 1);
        assert_eq!(analysis.counts.get(ShapeLabel::Unknown), 1);
    }

    #[test]
    fn analysis_serializes_to_json() {
        let drawing = input::parse_drawing(MIXED).unwrap();
        let analysis = analyze(&drawing, &ClassifierConfig::default());
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["labels"][0], "Square");
        assert_eq!(json["shapes"][0]["label"], "Square");
        assert_eq!(json["shapes"][0]["corners"], 4);
        assert_eq!(json["counts"]["Rectangle"], 1);
    }

    #[test]
    fn repeated_analysis_is_identical() {
        let drawing = input::parse_drawing(MIXED).unwrap();
        let config = ClassifierConfig::default();
        assert_eq!(analyze(&drawing, &config), analyze(&drawing, &config));
    }
}
