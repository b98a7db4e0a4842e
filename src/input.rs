//! Delimited coordinate tables → `Drawing`.
//!
//! Each row is `path_id, subpath_id, x, y`. Rows are grouped by path id,
//! then subpath id, both in ascending order; points keep their row order
//! within a subpath.

use std::collections::BTreeMap;
use std::path::Path as FsPath;

use kurbo::Point;

use crate::error::ShapeError;
use crate::model::{Drawing, Path, Subpath};

const MIN_COLUMNS: usize = 4;

/// Read and parse a comma-separated coordinate table.
pub fn read_drawing(path: &FsPath) -> Result<Drawing, ShapeError> {
    let text = std::fs::read_to_string(path)?;
    parse_drawing(&text)
}

/// Parse a comma-separated coordinate table.
///
/// Blank lines are ignored. Every other row must have the same number of
/// columns (at least four), all numeric, with non-negative integral ids.
pub fn parse_drawing(text: &str) -> Result<Drawing, ShapeError> {
    let mut groups: BTreeMap<u64, BTreeMap<u64, Vec<Point>>> = BTreeMap::new();
    let mut columns: Option<usize> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let fields = raw
            .split(',')
            .map(|f| parse_field(f, line))
            .collect::<Result<Vec<f64>, _>>()?;

        match columns {
            None if fields.len() < MIN_COLUMNS => {
                return Err(malformed(
                    line,
                    format!("expected at least {} columns, found {}", MIN_COLUMNS, fields.len()),
                ));
            }
            None => columns = Some(fields.len()),
            Some(n) if n != fields.len() => {
                return Err(malformed(
                    line,
                    format!("expected {} columns, found {}", n, fields.len()),
                ));
            }
            Some(_) => {}
        }

        let path_id = parse_id(fields[0], line)?;
        let subpath_id = parse_id(fields[1], line)?;
        groups
            .entry(path_id)
            .or_default()
            .entry(subpath_id)
            .or_default()
            .push(Point::new(fields[2], fields[3]));
    }

    if groups.is_empty() {
        return Err(malformed(0, "no coordinate rows".to_string()));
    }

    let paths = groups
        .into_iter()
        .map(|(id, subs)| Path {
            id,
            subpaths: subs.into_values().map(Subpath::new).collect(),
        })
        .collect();
    Ok(Drawing { paths })
}

fn parse_field(field: &str, line: usize) -> Result<f64, ShapeError> {
    let field = field.trim();
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(malformed(line, format!("non-numeric field '{}'", field))),
    }
}

/// Ids are written as floats (`0.0000e+00`) by some exporters.
fn parse_id(value: f64, line: usize) -> Result<u64, ShapeError> {
    if value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(malformed(line, format!("invalid group id {}", value)));
    }
    Ok(value as u64)
}

fn malformed(line: usize, reason: String) -> ShapeError {
    ShapeError::MalformedInput { line, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_path_then_subpath() {
        let text = "\
1,0,5.0,5.0
0,1,2.0,2.0
0,0,0.0,0.0
0,0,1.0,0.0
0,1,3.0,3.0
";
        let drawing = parse_drawing(text).unwrap();
        assert_eq!(drawing.paths.len(), 2);
        assert_eq!(drawing.paths[0].id, 0);
        assert_eq!(drawing.paths[1].id, 1);
        assert_eq!(
            drawing.paths[0].subpaths[0].points,
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]
        );
        assert_eq!(
            drawing.paths[0].subpaths[1].points,
            vec![Point::new(2.0, 2.0), Point::new(3.0, 3.0)]
        );
        assert_eq!(drawing.subpath_count(), 3);
    }

    #[test]
    fn scientific_notation_ids_and_blank_lines() {
        let text = "0.0000e+00,0.0000e+00,1.5,2.5\n\n1.0000e+00,0.0000e+00,3.0,4.0\n";
        let drawing = parse_drawing(text).unwrap();
        assert_eq!(drawing.paths.len(), 2);
        assert_eq!(drawing.paths[1].subpaths[0].points[0], Point::new(3.0, 4.0));
    }

    #[test]
    fn non_numeric_field_is_rejected_with_line() {
        let err = parse_drawing("0,0,1.0,2.0\n0,0,abc,2.0\n").unwrap_err();
        match err {
            ShapeError::MalformedInput { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("abc"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn inconsistent_columns_are_rejected() {
        let err = parse_drawing("0,0,1.0,2.0\n0,0,1.0,2.0,7.0\n").unwrap_err();
        assert!(matches!(err, ShapeError::MalformedInput { line: 2, .. }));
        let err = parse_drawing("0,0,1.0\n").unwrap_err();
        assert!(matches!(err, ShapeError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn fractional_or_negative_ids_are_rejected() {
        assert!(parse_drawing("0.5,0,1.0,2.0\n").is_err());
        assert!(parse_drawing("-1,0,1.0,2.0\n").is_err());
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(matches!(
            parse_drawing("\n  \n").unwrap_err(),
            ShapeError::MalformedInput { .. }
        ));
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shapes.csv");
        std::fs::write(&path, "0,0,0.0,0.0\n0,0,1.0,1.0\n").unwrap();
        let drawing = read_drawing(&path).unwrap();
        assert_eq!(drawing.paths[0].subpaths[0].len(), 2);
        assert!(matches!(
            read_drawing(&dir.path().join("missing.csv")).unwrap_err(),
            ShapeError::Io(_)
        ));
    }
}
