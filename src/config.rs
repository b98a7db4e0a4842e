use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;

/// All classification thresholds in one struct.
/// Serializable so presets can be saved and loaded from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Maximum endpoint distance (input units) for a subpath to count as closed.
    /// The comparison is strict: distance must be below this value.
    pub closure_tolerance: f64,
    /// RDP tolerance used when counting corners.
    /// 0 keeps every input point.
    pub simplify_tolerance: f64,
    /// Circularity (4π·area / perimeter²) above which a shape is a circle.
    pub circularity_threshold: f64,
    /// Open interval of bounding-box aspect ratios treated as square.
    pub square_aspect_band: (f64, f64),
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            closure_tolerance: 0.01,
            simplify_tolerance: 0.01,
            circularity_threshold: 0.85,
            square_aspect_band: (0.8, 1.2),
        }
    }
}

impl ClassifierConfig {
    /// Load a JSON preset. Missing fields fall back to defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ShapeError> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| ShapeError::MalformedInput {
            line: e.line(),
            reason: e.to_string(),
        })
    }

    /// True when `ratio` falls strictly inside the square band.
    pub fn is_square_aspect(&self, ratio: f64) -> bool {
        let (lo, hi) = self.square_aspect_band;
        lo < ratio && ratio < hi
    }
}
