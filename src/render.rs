//! Raster rendering of drawings, classifications and overlays.
//!
//! Converts kurbo BezPaths to pixels via tiny-skia and writes PNGs.
//! Input coordinates are Y-up; images are Y-down, so every panel
//! flips Y while fitting the drawing's bounds into the canvas.

use std::path::Path;

use kurbo::{BezPath, PathEl, Rect};

use crate::compose::CompositeOverlay;
use crate::error::ShapeError;
use crate::geom::bounds;
use crate::model::Drawing;
use crate::Analysis;

/// Colours cycled by path index: red, green, blue, yellow, purple.
const PALETTE: [(u8, u8, u8); 5] = [
    (255, 0, 0),
    (0, 128, 0),
    (0, 0, 255),
    (255, 255, 0),
    (128, 0, 128),
];

const PADDING: f32 = 20.0;
const STROKE_WIDTH: f32 = 2.0;

fn palette_color(path_index: usize) -> tiny_skia::Color {
    let (r, g, b) = PALETTE[path_index % PALETTE.len()];
    tiny_skia::Color::from_rgba8(r, g, b, 255)
}

/// Convert a polyline `BezPath` to a `tiny_skia::Path`.
fn kurbo_to_tinyskia(
    bezpath: &BezPath,
    transform: tiny_skia::Transform,
) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for el in bezpath.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                let (x, y) = transform_point(p.x, p.y, transform);
                pb.move_to(x, y);
            }
            PathEl::LineTo(p) => {
                let (x, y) = transform_point(p.x, p.y, transform);
                pb.line_to(x, y);
            }
            PathEl::ClosePath => pb.close(),
            // Overlay and subpath paths are polylines only.
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        }
    }
    pb.finish()
}

/// Apply transform manually to a point (f64 → f32).
fn transform_point(x: f64, y: f64, t: tiny_skia::Transform) -> (f32, f32) {
    let x = x as f32;
    let y = y as f32;
    (t.sx * x + t.kx * y + t.tx, t.ky * x + t.sy * y + t.ty)
}

/// Map `content` into a `size`×`size` canvas, Y flipped, centred.
fn fit_transform(content: Rect, size: u32) -> tiny_skia::Transform {
    let avail = size as f32 - PADDING * 2.0;
    let (w, h) = (content.width() as f32, content.height() as f32);
    let s = match (w > 0.0, h > 0.0) {
        (true, true) => (avail / w).min(avail / h),
        (true, false) => avail / w,
        (false, true) => avail / h,
        (false, false) => 1.0,
    };
    let ox = PADDING + (avail - w * s) / 2.0;
    let oy = PADDING + (avail - h * s) / 2.0;
    tiny_skia::Transform {
        sx: s,
        kx: 0.0,
        ky: 0.0,
        sy: -s, // flip Y
        tx: ox - s * content.x0 as f32,
        ty: oy + s * content.y1 as f32,
    }
}

fn drawing_bounds(drawing: &Drawing) -> Result<Rect, ShapeError> {
    let all: Vec<kurbo::Point> = drawing
        .subpaths()
        .flat_map(|(_, _, s)| s.points.iter().copied())
        .collect();
    bounds(&all).ok_or_else(|| ShapeError::Render("drawing has no points".to_string()))
}

fn blank_canvas(size: u32) -> Result<tiny_skia::Pixmap, ShapeError> {
    let mut pixmap = tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| ShapeError::Render(format!("invalid canvas size {}", size)))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    Ok(pixmap)
}

/// Encode a pixmap to PNG bytes.
fn encode_png(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>, ShapeError> {
    let mut buf = Vec::new();
    let mut encoder = png::Encoder::new(&mut buf, pixmap.width(), pixmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| ShapeError::Render(e.to_string()))?;
    writer
        .write_image_data(pixmap.data())
        .map_err(|e| ShapeError::Render(e.to_string()))?;
    drop(writer);
    Ok(buf)
}

/// Fill every accepted overlay hull, coloured by its source path.
///
/// The canvas is fitted to the whole drawing so rejected shapes leave
/// visible gaps where they would have been.
pub fn render_overlay(
    drawing: &Drawing,
    overlay: &CompositeOverlay,
    output_path: &Path,
    size: u32,
) -> Result<(), ShapeError> {
    let transform = fit_transform(drawing_bounds(drawing)?, size);
    let mut pixmap = blank_canvas(size)?;
    let mut paint = tiny_skia::Paint::default();
    paint.anti_alias = true;

    for shape in &overlay.shapes {
        paint.set_color(palette_color(shape.path_index));
        if let Some(sk_path) = kurbo_to_tinyskia(&shape.hull.to_bezpath(), transform) {
            pixmap.fill_path(
                &sk_path,
                &paint,
                tiny_skia::FillRule::Winding,
                tiny_skia::Transform::identity(),
                None,
            );
        }
    }

    std::fs::write(output_path, encode_png(&pixmap)?)?;
    Ok(())
}

/// Stroke each classified (closed) subpath, coloured by its source path.
pub fn render_classified(
    drawing: &Drawing,
    analysis: &Analysis,
    output_path: &Path,
    size: u32,
) -> Result<(), ShapeError> {
    let transform = fit_transform(drawing_bounds(drawing)?, size);
    let mut pixmap = blank_canvas(size)?;
    let mut paint = tiny_skia::Paint::default();
    paint.anti_alias = true;
    let stroke = tiny_skia::Stroke {
        width: STROKE_WIDTH,
        ..tiny_skia::Stroke::default()
    };

    for shape in &analysis.shapes {
        let Some(sub) = drawing
            .paths
            .get(shape.path_index)
            .and_then(|p| p.subpaths.get(shape.subpath_index))
        else {
            continue;
        };
        paint.set_color(palette_color(shape.path_index));
        if let Some(sk_path) = kurbo_to_tinyskia(&sub.to_bezpath(), transform) {
            pixmap.stroke_path(
                &sk_path,
                &paint,
                &stroke,
                tiny_skia::Transform::identity(),
                None,
            );
        }
    }

    std::fs::write(output_path, encode_png(&pixmap)?)?;
    Ok(())
}
