/// Formats a coordinate with ten fractional digits, then trims trailing zeros
/// and a dangling `.`. `-0` becomes `0`.
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{value:.10}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Character data of a `<style>` element. Quotes stay literal so CSS
/// strings such as `"Fira Code"` survive unchanged.
pub fn escape_style(input: &str) -> String {
    input.replace('&', "&amp;").replace('<', "&lt;")
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_xml(value));
    out.push('"');
}

fn push_num_attr(out: &mut String, name: &str, value: f64) {
    push_attr(out, name, &fmt_num(value));
}

fn push_opt_attr(out: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        push_attr(out, name, value);
    }
}

fn push_positive_attr(out: &mut String, name: &str, value: f64) {
    if value > 0.0 {
        push_num_attr(out, name, value);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Group(Group),
    Rect(Rect),
    Text(Text),
    Path(Path),
    Line(Line),
}

impl Element {
    /// Wraps `self` in a translated group, or returns it unchanged when the
    /// offset is zero.
    pub fn translated(self, dx: f64, dy: f64) -> Element {
        if dx == 0.0 && dy == 0.0 {
            return self;
        }
        Element::Group(Group {
            class: None,
            translate: Some((dx, dy)),
            children: vec![self],
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    pub fn write_to(&self, out: &mut String) {
        match self {
            Element::Group(group) => group.write_to(out),
            Element::Rect(rect) => rect.write_to(out),
            Element::Text(text) => text.write_to(out),
            Element::Path(path) => path.write_to(out),
            Element::Line(line) => line.write_to(out),
        }
    }

    /// Number of elements in this subtree, this one included.
    pub fn count(&self) -> usize {
        match self {
            Element::Group(group) => 1 + group.children.iter().map(Element::count).sum::<usize>(),
            _ => 1,
        }
    }
}

/// `<g>`; renders bare when it has neither class nor offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub class: Option<String>,
    pub translate: Option<(f64, f64)>,
    pub children: Vec<Element>,
}

impl Group {
    pub fn new(children: Vec<Element>) -> Self {
        Self {
            class: None,
            translate: None,
            children,
        }
    }

    pub fn with_class(class: impl Into<String>, children: Vec<Element>) -> Self {
        Self {
            class: Some(class.into()),
            translate: None,
            children,
        }
    }

    fn write_to(&self, out: &mut String) {
        out.push_str("<g");
        push_opt_attr(out, "class", self.class.as_deref());
        if let Some((dx, dy)) = self.translate.filter(|(dx, dy)| *dx != 0.0 || *dy != 0.0) {
            push_attr(
                out,
                "transform",
                &format!("translate({},{})", fmt_num(dx), fmt_num(dy)),
            );
        }
        out.push('>');
        for child in &self.children {
            child.write_to(out);
        }
        out.push_str("</g>");
    }
}

impl From<Group> for Element {
    fn from(group: Group) -> Self {
        Element::Group(group)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rx: f64,
    pub ry: f64,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: f64,
}

impl Rect {
    /// A rounded rectangle at the origin with styling left to CSS.
    pub fn rounded(width: f64, height: f64, radius: f64) -> Self {
        Self {
            width,
            height,
            rx: radius,
            ry: radius,
            ..Self::default()
        }
    }

    fn write_to(&self, out: &mut String) {
        out.push_str("<rect");
        push_num_attr(out, "x", self.x);
        push_num_attr(out, "y", self.y);
        push_num_attr(out, "width", self.width);
        push_num_attr(out, "height", self.height);
        push_positive_attr(out, "rx", self.rx);
        push_positive_attr(out, "ry", self.ry);
        push_opt_attr(out, "fill", self.fill.as_deref());
        push_opt_attr(out, "stroke", self.stroke.as_deref());
        push_positive_attr(out, "stroke-width", self.stroke_width);
        out.push_str("/>");
    }
}

impl From<Rect> for Element {
    fn from(rect: Rect) -> Self {
        Element::Rect(rect)
    }
}

/// `<text>`; when `spans` is non-empty they replace `content`. Left aligned
/// at `x` unless `centered`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub font_family: Option<String>,
    pub font_size: f64,
    pub centered: bool,
    pub class: Option<String>,
    pub spans: Vec<TSpan>,
}

impl Text {
    fn write_to(&self, out: &mut String) {
        out.push_str("<text");
        push_num_attr(out, "x", self.x);
        push_num_attr(out, "y", self.y);
        push_opt_attr(out, "font-family", self.font_family.as_deref());
        push_positive_attr(out, "font-size", self.font_size);
        if self.centered {
            push_attr(out, "text-anchor", "middle");
        }
        push_opt_attr(out, "class", self.class.as_deref());
        out.push('>');
        if self.spans.is_empty() {
            out.push_str(&escape_xml(&self.content));
        } else {
            for span in &self.spans {
                span.write_to(out);
            }
        }
        out.push_str("</text>");
    }
}

impl From<Text> for Element {
    fn from(text: Text) -> Self {
        Element::Text(text)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TSpan {
    pub content: String,
    pub class: Option<String>,
}

impl TSpan {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn classed(content: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            class: Some(class.into()),
        }
    }

    fn write_to(&self, out: &mut String) {
        out.push_str("<tspan");
        push_opt_attr(out, "class", self.class.as_deref());
        out.push('>');
        out.push_str(&escape_xml(&self.content));
        out.push_str("</tspan>");
    }
}

/// `<path>`; always unfilled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub d: String,
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub class: Option<String>,
}

impl Path {
    pub fn stroked(d: impl Into<String>, stroke: &str, stroke_width: f64) -> Self {
        Self {
            d: d.into(),
            stroke: Some(stroke.to_string()),
            stroke_width,
            class: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    fn write_to(&self, out: &mut String) {
        out.push_str("<path");
        push_attr(out, "d", &self.d);
        push_attr(out, "fill", "none");
        push_opt_attr(out, "stroke", self.stroke.as_deref());
        push_positive_attr(out, "stroke-width", self.stroke_width);
        push_opt_attr(out, "class", self.class.as_deref());
        out.push_str("/>");
    }
}

impl From<Path> for Element {
    fn from(path: Path) -> Self {
        Element::Path(path)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Option<String>,
    pub stroke_width: f64,
}

impl Line {
    /// A horizontal connector at height `y`.
    pub fn horizontal(x1: f64, x2: f64, y: f64, stroke: &str, stroke_width: f64) -> Self {
        Self {
            x1,
            y1: y,
            x2,
            y2: y,
            stroke: Some(stroke.to_string()),
            stroke_width,
        }
    }

    fn write_to(&self, out: &mut String) {
        out.push_str("<line");
        push_num_attr(out, "x1", self.x1);
        push_num_attr(out, "y1", self.y1);
        push_num_attr(out, "x2", self.x2);
        push_num_attr(out, "y2", self.y2);
        push_opt_attr(out, "stroke", self.stroke.as_deref());
        push_positive_attr(out, "stroke-width", self.stroke_width);
        out.push_str("/>");
    }
}

impl From<Line> for Element {
    fn from(line: Line) -> Self {
        Element::Line(line)
    }
}

/// Root `<svg>` document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Svg {
    pub width: f64,
    pub height: f64,
    pub style: String,
    pub children: Vec<Element>,
}

impl Svg {
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(256 + 128 * self.children.len());
        out.push_str("<svg");
        push_attr(&mut out, "xmlns", "http://www.w3.org/2000/svg");
        push_positive_attr(&mut out, "width", self.width);
        push_positive_attr(&mut out, "height", self.height);
        push_attr(
            &mut out,
            "viewBox",
            &format!("0 0 {} {}", fmt_num(self.width), fmt_num(self.height)),
        );
        out.push('>');
        if !self.style.is_empty() {
            out.push_str("<style>");
            out.push_str(&escape_style(&self.style));
            out.push_str("</style>");
        }
        for child in &self.children {
            child.write_to(&mut out);
        }
        out.push_str("</svg>");
        out
    }
}
