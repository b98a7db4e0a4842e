use crate::model::Subpath;

/// Whether a subpath's first and last points coincide within `tolerance`.
///
/// Strict comparison: endpoints exactly `tolerance` apart are open.
/// A single point is closed. An empty subpath is not.
/// Says nothing about self-intersection.
pub fn is_closed(subpath: &Subpath, tolerance: f64) -> bool {
    match (subpath.points.first(), subpath.points.last()) {
        (Some(first), Some(last)) => first.distance(*last) < tolerance,
        _ => false,
    }
}
