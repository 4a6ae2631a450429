//! SVG generation from a computed patch layout

use crate::layout::{dial, ConnectionLayout, KnobLayout, ModuleLayout, PatchLayout, PortSide};

use super::options::RenderOptions;
use super::path::{connection_d, ring_arc_d};

/// Outline color shared by module borders, knob rims and indicator lines
const OUTLINE_COLOR: &str = "#333";
/// Progress ring stroke color
const RING_COLOR: &str = "#4CAF50";
/// Progress ring stroke width
const RING_WIDTH: f64 = 3.0;
/// The ring sits this far outside the dial circle
const RING_OFFSET: f64 = 3.0;
/// The indicator line stops this far inside the dial circle
const INDICATOR_INSET: f64 = 3.0;

/// Accumulates SVG elements in draw order and assembles the final document.
///
/// Shape elements and connection curves are collected separately so that
/// connections always draw on top, regardless of emission order.
pub struct SvgBuilder {
    elements: Vec<String>,
    connections: Vec<String>,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self {
            elements: vec![],
            connections: vec![],
        }
    }

    /// Add a rounded rectangle
    pub fn add_rect(&mut self, x: f64, y: f64, w: f64, h: f64, rx: f64, styles: &str) {
        self.elements.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}"{}/>"#,
            x, y, w, h, rx, styles
        ));
    }

    /// Add a circle
    pub fn add_circle(&mut self, cx: f64, cy: f64, r: f64, styles: &str) {
        self.elements.push(format!(
            r#"<circle cx="{}" cy="{}" r="{}"{}/>"#,
            cx, cy, r, styles
        ));
    }

    /// Add a line segment
    pub fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, styles: &str) {
        self.elements.push(format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"{}/>"#,
            x1, y1, x2, y2, styles
        ));
    }

    /// Add a text element; content is XML-escaped here
    pub fn add_text(&mut self, x: f64, y: f64, styles: &str, content: &str) {
        self.elements.push(format!(
            r#"<text x="{}" y="{}"{}>{}</text>"#,
            x,
            y,
            styles,
            escape_xml(content)
        ));
    }

    /// Add an open path (dial ring arc)
    pub fn add_path(&mut self, d: &str, styles: &str) {
        self.elements
            .push(format!(r#"<path d="{}" fill="none"{}/>"#, d, styles));
    }

    /// Add a connection curve, drawn after all shape elements
    pub fn add_connection_path(&mut self, d: &str, styles: &str) {
        self.connections
            .push(format!(r#"<path d="{}" fill="none"{}/>"#, d, styles));
    }

    /// Assemble the document with the computed canvas size and background
    pub fn build(self, width: f64, height: f64, background: &str) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        );
        svg.push_str(&format!(
            "\n  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            background
        ));
        for elem in self.elements.iter().chain(self.connections.iter()) {
            svg.push_str("\n  ");
            svg.push_str(elem);
        }
        svg.push_str("\n</svg>");
        svg
    }
}

impl Default for SvgBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a computed layout to an SVG string.
///
/// Element order is fixed: background, optional title, modules with their
/// ports and knobs in module order, then connection curves in connection
/// order. Later elements draw over earlier ones.
pub fn render_svg(layout: &PatchLayout, opts: &RenderOptions) -> String {
    let mut builder = SvgBuilder::new();

    if let Some(title) = &layout.title {
        builder.add_text(
            opts.padding,
            opts.padding + 20.0,
            r##" text-anchor="start" font-family="Arial" font-size="18" font-weight="bold" fill="#333""##,
            title,
        );
    }

    for module in &layout.modules {
        render_module(module, opts, &mut builder);
    }

    for conn in &layout.connections {
        render_connection(conn, &mut builder);
    }

    builder.build(layout.width, layout.height, &opts.background_color)
}

fn render_module(module: &ModuleLayout, opts: &RenderOptions, builder: &mut SvgBuilder) {
    let b = &module.bounds;

    builder.add_rect(
        b.x,
        b.y,
        b.width,
        b.height,
        5.0,
        &format!(
            r#" fill="{}" stroke="{}" stroke-width="{}""#,
            opts.module_color, OUTLINE_COLOR, opts.stroke_width
        ),
    );
    builder.add_text(
        b.x + b.width / 2.0,
        b.y + 20.0,
        r#" text-anchor="middle" font-family="Arial" font-size="14" font-weight="bold""#,
        &module.name,
    );

    for port in &module.ports {
        builder.add_circle(
            port.center.x,
            port.center.y,
            opts.port_radius,
            &format!(r#" fill="{}""#, opts.port_color),
        );
        // Port labels sit just inside the module edge
        match port.side {
            PortSide::Input => builder.add_text(
                port.center.x + 10.0,
                port.center.y + 4.0,
                r#" font-family="Arial" font-size="10""#,
                &port.name,
            ),
            PortSide::Output => builder.add_text(
                port.center.x - 10.0,
                port.center.y + 4.0,
                r#" text-anchor="end" font-family="Arial" font-size="10""#,
                &port.name,
            ),
        }
    }

    for knob in &module.knobs {
        render_knob(knob, builder);
    }
}

fn render_knob(knob: &KnobLayout, builder: &mut SvgBuilder) {
    let center = knob.center;
    let fraction = knob.dial.fraction;
    let ring_radius = knob.radius + RING_OFFSET;

    builder.add_circle(
        center.x,
        center.y,
        knob.radius,
        &format!(
            r##" fill="#fff" stroke="{}" stroke-width="2""##,
            OUTLINE_COLOR
        ),
    );

    // Progress ring: full circle at the top of the range, arc otherwise,
    // nothing at zero
    if fraction >= 1.0 {
        builder.add_circle(
            center.x,
            center.y,
            ring_radius,
            &format!(
                r#" fill="none" stroke="{}" stroke-width="{}""#,
                RING_COLOR, RING_WIDTH
            ),
        );
    } else if fraction > 0.0 {
        builder.add_path(
            &ring_arc_d(center, ring_radius, fraction),
            &format!(
                r#" stroke="{}" stroke-width="{}" stroke-linecap="round""#,
                RING_COLOR, RING_WIDTH
            ),
        );
    }

    // Indicator line points to the end of the ring
    let tip = dial::point_at(center, knob.radius - INDICATOR_INSET, fraction);
    builder.add_line(
        center.x,
        center.y,
        tip.x,
        tip.y,
        &format!(r#" stroke="{}" stroke-width="2""#, OUTLINE_COLOR),
    );

    builder.add_text(
        center.x,
        center.y - ring_radius - 4.0,
        r##" text-anchor="middle" font-family="Arial" font-size="9" fill="#666""##,
        &knob.dial.label,
    );
    builder.add_text(
        center.x,
        center.y + knob.radius + 12.0,
        r#" text-anchor="middle" font-family="Arial" font-size="9""#,
        &knob.name,
    );
}

fn render_connection(conn: &ConnectionLayout, builder: &mut SvgBuilder) {
    builder.add_connection_path(
        &connection_d(conn.from, conn.to),
        &format!(r#" stroke="{}" stroke-width="2" opacity="0.7""#, conn.color),
    );
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BoundingBox, DialGeometry, Point};

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_builder_draws_connections_last() {
        let mut builder = SvgBuilder::new();
        builder.add_connection_path("M0 0 L10 10", r##" stroke="#333""##);
        builder.add_rect(0.0, 0.0, 10.0, 10.0, 0.0, "");
        let svg = builder.build(100.0, 100.0, "#fff");

        let rect_at = svg.find("<rect x=").unwrap();
        let path_at = svg.find("<path").unwrap();
        assert!(rect_at < path_at, "connections must render on top");
    }

    #[test]
    fn test_build_canvas_attributes() {
        let svg = SvgBuilder::new().build(300.0, 200.0, "#f5f5f5");
        assert!(svg.contains(r#"width="300" height="200" viewBox="0 0 300 200""#));
        assert!(svg.contains(r##"<rect width="100%" height="100%" fill="#f5f5f5"/>"##));
    }

    #[test]
    fn test_full_knob_renders_ring_circle() {
        let knob = KnobLayout {
            name: "gain".to_string(),
            center: Point::new(50.0, 50.0),
            radius: 15.0,
            dial: DialGeometry {
                fraction: 1.0,
                label: "100".to_string(),
            },
        };
        let mut builder = SvgBuilder::new();
        render_knob(&knob, &mut builder);
        let svg = builder.build(100.0, 100.0, "#fff");

        assert!(svg.contains(r#"r="18""#), "ring circle at radius + 3");
        assert!(!svg.contains("<path"), "full ring is a circle, not an arc");
        assert!(svg.contains(">100<"));
        assert!(svg.contains(">gain<"));
    }

    #[test]
    fn test_zero_knob_renders_no_ring() {
        let knob = KnobLayout {
            name: "gain".to_string(),
            center: Point::new(50.0, 50.0),
            radius: 15.0,
            dial: DialGeometry {
                fraction: 0.0,
                label: "0".to_string(),
            },
        };
        let mut builder = SvgBuilder::new();
        render_knob(&knob, &mut builder);
        let svg = builder.build(100.0, 100.0, "#fff");

        assert!(!svg.contains(RING_COLOR), "no ring at zero");
        assert!(svg.contains("<line"), "indicator line still drawn");
    }

    #[test]
    fn test_module_rect_and_label() {
        let module = ModuleLayout {
            name: "Osc & Co".to_string(),
            bounds: BoundingBox::new(20.0, 20.0, 120.0, 250.0),
            ports: vec![],
            knobs: vec![],
        };
        let mut builder = SvgBuilder::new();
        render_module(&module, &RenderOptions::default(), &mut builder);
        let svg = builder.build(160.0, 290.0, "#fff");

        assert!(svg.contains(r#"<rect x="20" y="20" width="120" height="250" rx="5""#));
        assert!(svg.contains(">Osc &amp; Co<"));
    }
}
