use super::layout::Color;
use super::scene::{Anchor, Point, Primitive, Scene};
use crate::error::{font_error, render_error, BoardResult};
use ab_glyph::{FontVec, PxScale};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut, draw_text_mut, text_size};
use imageproc::point::Point as PixelPoint;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Anything further away than this from the canvas is not drawn at all
const MAX_COORDINATE: f64 = 100_000.0;

/// DejaVu Sans, see `assets/fonts/LICENSE-DejaVu.txt`
static BUNDLED_FONT: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans.ttf");

/// The font compiled into the crate, used when no font file is configured
pub fn bundled_font() -> BoardResult<FontVec> {
    FontVec::try_from_vec(BUNDLED_FONT.to_vec())
        .map_err(|e| font_error(&format!("Invalid bundled font: {}", e)))
}

/// Read a TrueType/OpenType font from disk
pub fn load_font(path: &Path) -> BoardResult<FontVec> {
    let data = fs::read(path)
        .map_err(|e| font_error(&format!("Cannot read {}: {}", path.display(), e)))?;
    FontVec::try_from_vec(data)
        .map_err(|e| font_error(&format!("Invalid font {}: {}", path.display(), e)))
}

fn pixel(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

fn drawable(point: &Point) -> bool {
    point.is_finite() && point.x.abs() < MAX_COORDINATE && point.y.abs() < MAX_COORDINATE
}

fn to_pixel_point(point: &Point) -> PixelPoint<i32> {
    PixelPoint::new(point.x.round() as i32, point.y.round() as i32)
}

/// Fill a polygon, skipping shapes that collapse once snapped to the pixel grid
fn fill_polygon(canvas: &mut RgbaImage, points: &[Point], color: Rgba<u8>) {
    let mut corners: Vec<PixelPoint<i32>> = points.iter().map(to_pixel_point).collect();
    corners.dedup();
    while corners.len() > 1 && corners.first() == corners.last() {
        corners.pop();
    }
    if corners.len() < 3 {
        return;
    }
    draw_polygon_mut(canvas, &corners, color);
}

/// Draw a line segment with the given stroke width, as a filled rectangle when wide
fn stroke_line(canvas: &mut RgbaImage, from: Point, to: Point, width: f64, color: Rgba<u8>) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = (dx * dx + dy * dy).sqrt();

    if width <= 1.5 || length == 0.0 {
        draw_line_segment_mut(
            canvas,
            (from.x as f32, from.y as f32),
            (to.x as f32, to.y as f32),
            color,
        );
        return;
    }

    let half = width / 2.0;
    let (nx, ny) = (-dy / length * half, dx / length * half);
    let corners = [
        Point::new(from.x + nx, from.y + ny),
        Point::new(to.x + nx, to.y + ny),
        Point::new(to.x - nx, to.y - ny),
        Point::new(from.x - nx, from.y - ny),
    ];
    fill_polygon(canvas, &corners, color);
}

fn draw_label(
    canvas: &mut RgbaImage,
    font: &FontVec,
    at: Point,
    content: &str,
    size: f64,
    color: Rgba<u8>,
    anchor: Anchor,
) {
    if content.is_empty() {
        return;
    }
    let scale = PxScale::from(size as f32);
    let (width, height) = text_size(scale, font, content);
    let left = match anchor {
        Anchor::Start => at.x,
        Anchor::Middle => at.x - f64::from(width) / 2.0,
        Anchor::End => at.x - f64::from(width),
    };
    let top = at.y - f64::from(height) / 2.0;
    draw_text_mut(
        canvas,
        color,
        left.round() as i32,
        top.round() as i32,
        scale,
        font,
        content,
    );
}

/// Draw the scene into an RGBA canvas. Text is skipped when no font is available.
pub fn draw(scene: &Scene, font: Option<&FontVec>) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(scene.width, scene.height, pixel(scene.background));

    for primitive in &scene.primitives {
        match primitive {
            Primitive::Line {
                from,
                to,
                width,
                color,
                ..
            } => {
                if drawable(from) && drawable(to) {
                    stroke_line(&mut canvas, *from, *to, *width, pixel(*color));
                }
            }
            Primitive::Polygon { points, color, .. } => {
                if points.iter().all(drawable) {
                    fill_polygon(&mut canvas, points, pixel(*color));
                }
            }
            Primitive::Text {
                at,
                content,
                size,
                color,
                anchor,
                ..
            } => {
                if let Some(font) = font {
                    if drawable(at) && size.is_finite() && *size > 0.0 {
                        draw_label(&mut canvas, font, *at, content, *size, pixel(*color), *anchor);
                    }
                }
            }
        }
    }

    canvas
}

/// Render the scene as PNG bytes
pub fn rasterize(scene: &Scene, font: Option<&FontVec>) -> BoardResult<Vec<u8>> {
    if scene.width == 0 || scene.height == 0 {
        return Err(render_error("Cannot rasterize an empty canvas"));
    }
    if font.is_none() {
        debug!("Rasterizing without a font, text is skipped");
    }

    let canvas = draw(scene, font);
    let mut buffer = Vec::new();
    DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;

    debug!(
        "Rasterized {}x{} chart into {} bytes",
        scene.width,
        scene.height,
        buffer.len()
    );
    Ok(buffer)
}
