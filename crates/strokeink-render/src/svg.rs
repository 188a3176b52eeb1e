//! SVG output surface.

use crate::renderer::RenderResult;
use crate::surface::{CompositeMode, DrawingSurface};
use kurbo::{Arc, BezPath, Point, Rect, Size, Vec2};
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

/// Flattening tolerance for arcs, in canvas units.
const ARC_TOLERANCE: f64 = 0.1;

/// Writes drawing commands as an SVG document.
///
/// SVG has no destination-out blending, so erased regions are painted in
/// the background color instead.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    size: Size,
    background: String,
    stroke_color: String,
    fill_color: String,
    line_width: f64,
    font: String,
    composite: CompositeMode,
    path: BezPath,
    body: Vec<String>,
}

impl SvgSurface {
    pub fn new(size: Size, background: impl Into<String>) -> Self {
        Self {
            size,
            background: background.into(),
            stroke_color: "#000000".to_string(),
            fill_color: "#000000".to_string(),
            line_width: 1.0,
            font: "10px sans-serif".to_string(),
            composite: CompositeMode::SourceOver,
            path: BezPath::new(),
            body: Vec::new(),
        }
    }

    /// The complete SVG document.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.size.width,
            h = self.size.height
        );
        for line in &self.body {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    pub fn write_to(&self, mut writer: impl Write) -> RenderResult<()> {
        writer.write_all(self.to_svg_string().as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let file = std::fs::File::create(path.as_ref())?;
        self.write_to(std::io::BufWriter::new(file))?;
        log::debug!("wrote svg to {}", path.as_ref().display());
        Ok(())
    }

    fn paint<'a>(&'a self, color: &'a str) -> &'a str {
        match self.composite {
            CompositeMode::SourceOver => color,
            CompositeMode::DestinationOut => &self.background,
        }
    }
}

impl DrawingSurface for SvgSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, rect: Rect) {
        if rect.contains_rect(Rect::from_origin_size(Point::ZERO, self.size)) {
            self.body.clear();
        }
        self.body.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
            escape(&self.background)
        ));
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
    }

    fn move_to(&mut self, point: Point) {
        self.path.move_to(point);
    }

    fn line_to(&mut self, point: Point) {
        if self.path.elements().is_empty() {
            self.path.move_to(point);
        } else {
            self.path.line_to(point);
        }
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        let arc = Arc {
            center,
            radii: Vec2::new(radius, radius),
            start_angle,
            sweep_angle: end_angle - start_angle,
            x_rotation: 0.0,
        };
        let start = center + Vec2::from_angle(start_angle) * radius;
        self.line_to(start);
        for el in arc.append_iter(ARC_TOLERANCE) {
            self.path.push(el);
        }
    }

    fn stroke(&mut self) {
        if self.path.elements().is_empty() {
            return;
        }
        let line = format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            self.path.to_svg(),
            escape(self.paint(&self.stroke_color)),
            self.line_width
        );
        self.body.push(line);
    }

    fn fill(&mut self) {
        if self.path.elements().is_empty() {
            return;
        }
        let line = format!(
            r#"<path d="{}" fill="{}"/>"#,
            self.path.to_svg(),
            escape(self.paint(&self.fill_color))
        );
        self.body.push(line);
    }

    fn fill_text(&mut self, text: &str, position: Point) {
        let line = format!(
            r#"<text x="{}" y="{}" fill="{}" style="font: {}">{}</text>"#,
            position.x,
            position.y,
            escape(self.paint(&self.fill_color)),
            escape(&self.font),
            escape(text)
        );
        self.body.push(line);
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.stroke_color = color.to_string();
    }

    fn set_fill_color(&mut self, color: &str) {
        self.fill_color = color.to_string();
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.composite = mode;
    }
}

/// Escape text for use in XML content and attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
