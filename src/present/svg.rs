//! SVG Primitives
//!
//! Minimal string builder for the chart images.

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Text styling
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: f64,
    pub anchor: Anchor,
    pub fill: &'static str,
    /// Rotation in degrees around the text origin
    pub rotate: Option<f64>,
}

impl TextStyle {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            anchor: Anchor::Start,
            fill: "#262730",
            rotate: None,
        }
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }
}

/// An SVG document under construction
#[derive(Debug, Clone)]
pub struct Svg {
    width: f64,
    height: f64,
    body: String,
}

impl Svg {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) {
        self.body.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            x,
            y,
            width.max(0.0),
            height.max(0.0),
            fill
        ));
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str, width: f64) {
        self.body.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{}"/>"#,
            from.0, from.1, to.0, to.1, stroke, width
        ));
    }

    /// Dashed, translucent line (gridlines)
    pub fn dashed_line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str, opacity: f64) {
        self.body.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1" stroke-dasharray="6,4" opacity="{}"/>"#,
            from.0, from.1, to.0, to.1, stroke, opacity
        ));
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], stroke: &str, width: f64) {
        self.body.push_str(&format!(
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round"/>"#,
            join_points(points),
            stroke,
            width
        ));
    }

    pub fn polygon(&mut self, points: &[(f64, f64)], fill: &str, opacity: f64) {
        self.body.push_str(&format!(
            r#"<polygon points="{}" fill="{}" fill-opacity="{}"/>"#,
            join_points(points),
            fill,
            opacity
        ));
    }

    pub fn circle(&mut self, center: (f64, f64), radius: f64, fill: &str) {
        self.body.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="{}" fill="{}"/>"#,
            center.0, center.1, radius, fill
        ));
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: TextStyle) {
        let transform = style
            .rotate
            .map(|deg| format!(r#" transform="rotate({} {:.1} {:.1})""#, deg, x, y))
            .unwrap_or_default();

        self.body.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="{}" text-anchor="{}" fill="{}"{}>{}</text>"#,
            x,
            y,
            style.size,
            style.anchor.as_str(),
            style.fill,
            transform,
            escape(content)
        ));
    }

    /// Arrow marker definition, referenced as `url(#arrow)`
    pub fn arrow_marker(&mut self) {
        self.body.push_str(
            r#"<defs><marker id="arrow" viewBox="0 0 10 10" refX="9" refY="5" markerWidth="8" markerHeight="8" orient="auto-start-reverse"><path d="M 0 0 L 10 5 L 0 10 z" fill="black"/></marker></defs>"#,
        );
    }

    pub fn arrow(&mut self, from: (f64, f64), to: (f64, f64)) {
        self.body.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black" stroke-width="1.5" marker-end="url(#arrow)"/>"#,
            from.0, from.1, to.0, to.1
        ));
    }

    /// Embed another document at an offset
    pub fn nest(&mut self, x: f64, y: f64, inner: Svg) {
        self.body.push_str(&format!(
            r#"<svg x="{:.1}" y="{:.1}" width="{}" height="{}" viewBox="0 0 {} {}">{}</svg>"#,
            x, y, inner.width, inner.height, inner.width, inner.height, inner.body
        ));
    }

    pub fn finish(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" font-family="sans-serif" style="max-width:100%;height:auto">{body}</svg>"#,
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

fn join_points(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape text for SVG content and attributes
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
