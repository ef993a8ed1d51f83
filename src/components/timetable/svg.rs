use super::scene::{Anchor, Point, Primitive, Scene};
use std::fmt::Write;

/// Escape text for use inside SVG elements and attributes
pub fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

struct SvgBuilder {
    elements: String,
}

impl SvgBuilder {
    fn new() -> Self {
        Self {
            elements: String::new(),
        }
    }

    fn line(&mut self, from: Point, to: Point, width: f64, color: &str) {
        let _ = writeln!(
            self.elements,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}" stroke-linecap="butt"/>"#,
            from.x, from.y, to.x, to.y, color, width
        );
    }

    fn text(&mut self, at: Point, content: &str, size: f64, color: &str, anchor: Anchor) {
        let anchor = match anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        let _ = writeln!(
            self.elements,
            r#"<text x="{:.2}" y="{:.2}" font-family="DejaVu Sans, Arial, sans-serif" font-size="{:.1}" fill="{}" text-anchor="{}" dominant-baseline="central">{}</text>"#,
            at.x,
            at.y,
            size,
            color,
            anchor,
            xml_escape(content)
        );
    }

    fn polygon(&mut self, points: &[Point], color: &str) {
        let coords: Vec<String> = points
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect();
        let _ = writeln!(
            self.elements,
            r#"<polygon points="{}" fill="{}"/>"#,
            coords.join(" "),
            color
        );
    }

    fn finish(self, width: u32, height: u32, background: &str) -> String {
        let mut svg = String::with_capacity(self.elements.len() + 256);
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        );
        let _ = writeln!(
            svg,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            width, height, background
        );
        svg.push_str(&self.elements);
        svg.push_str("</svg>\n");
        svg
    }
}

impl Scene {
    /// Serialise the scene as a standalone SVG document
    pub fn to_svg(&self) -> String {
        let mut svg = SvgBuilder::new();

        for primitive in &self.primitives {
            match primitive {
                Primitive::Line {
                    from,
                    to,
                    width,
                    color,
                    ..
                } => {
                    if from.is_finite() && to.is_finite() {
                        svg.line(*from, *to, *width, &color.to_hex());
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
                    if at.is_finite() {
                        svg.text(*at, content, *size, &color.to_hex(), *anchor);
                    }
                }
                Primitive::Polygon { points, color, .. } => {
                    if points.iter().all(Point::is_finite) {
                        svg.polygon(points, &color.to_hex());
                    }
                }
            }
        }

        svg.finish(self.width, self.height, &self.background.to_hex())
    }
}
