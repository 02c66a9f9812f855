use crate::svg::{Element, Group, Line, Rect, TSpan, Text};

use super::text::{measure_label, measure_text};
use super::{BoundingBox, LayoutContext, RenderedNode};

fn text_at(ctx: LayoutContext<'_>, x: f64, y: f64, content: &str) -> Text {
    Text {
        x,
        y,
        content: content.to_string(),
        font_family: Some(ctx.config.font_family.clone()),
        font_size: ctx.config.font_size,
        centered: true,
        ..Text::default()
    }
}

fn heading(ctx: LayoutContext<'_>, content: &str, class: String) -> Element {
    let cfg = ctx.config;
    Element::Text(Text {
        x: cfg.padding,
        y: cfg.font_size,
        content: content.to_string(),
        font_family: Some(cfg.font_family.clone()),
        font_size: cfg.font_size - 2.0,
        class: Some(class),
        ..Text::default()
    })
}

/// Rounded box sized to its text, one centered line per `\n`-separated line.
pub(crate) fn label_box(ctx: LayoutContext<'_>, text: &str, class: &str) -> RenderedNode {
    let cfg = ctx.config;
    let pad = cfg.padding / 2.0;
    let block = measure_label(text, cfg);
    let width = block.width + 2.0 * pad;
    let height = block.height + 2.0 * pad;

    let mut children = vec![Rect::rounded(width, height, cfg.corner_radius).into()];
    for (i, line) in block.lines.iter().enumerate() {
        let top = pad + i as f64 * cfg.font_size;
        let y = top + cfg.font_size / 2.0 + cfg.font_size / 3.0;
        children.push(text_at(ctx, width / 2.0, y, line).into());
    }

    RenderedNode::new(
        Group::with_class(class, children),
        BoundingBox::new(0.0, 0.0, width, height),
    )
}

/// Label whose text is flanked by styled quote glyphs.
pub(crate) fn quoted_box(ctx: LayoutContext<'_>, text: &str, class: &str) -> RenderedNode {
    let cfg = ctx.config;
    let pad = cfg.padding / 2.0;
    let width = measure_text(&format!("\"{text}\""), cfg) + 2.0 * pad;
    let height = cfg.font_size + 2.0 * pad;

    let label = Text {
        spans: vec![
            TSpan::classed("\"", "quote"),
            TSpan::plain(text),
            TSpan::classed("\"", "quote"),
        ],
        ..text_at(ctx, width / 2.0, height / 2.0 + cfg.font_size / 3.0, "")
    };

    RenderedNode::new(
        Group::with_class(
            class,
            vec![Rect::rounded(width, height, cfg.corner_radius).into(), label.into()],
        ),
        BoundingBox::new(0.0, 0.0, width, height),
    )
}

/// Inline comment: `# text` in smaller type.
pub(crate) fn comment_box(ctx: LayoutContext<'_>, text: &str) -> RenderedNode {
    let cfg = ctx.config;
    let pad = cfg.padding / 2.0;
    let text = format!("# {text}");
    let width = measure_text(&text, cfg) + 2.0 * pad;
    let height = cfg.font_size + 2.0 * pad;

    let label = Text {
        font_size: cfg.font_size - 2.0,
        class: Some("comment-text".to_string()),
        ..text_at(ctx, width / 2.0, height / 2.0 + cfg.font_size / 3.0, &text)
    };

    RenderedNode::new(
        Group::with_class(
            "comment",
            vec![Rect::rounded(width, height, cfg.corner_radius).into(), label.into()],
        ),
        BoundingBox::new(0.0, 0.0, width, height),
    )
}

/// A heading line followed by one centered line per item; grows with the
/// item count. Used for character classes and the flags box.
pub(crate) fn boxed_list(
    ctx: LayoutContext<'_>,
    title: &str,
    items: &[String],
    class: &str,
) -> RenderedNode {
    let cfg = ctx.config;
    let padding = cfg.padding;

    let widest = items
        .iter()
        .map(|item| measure_text(item, cfg))
        .fold(0.0, f64::max);
    let content_width = (widest + 2.0 * padding).max(measure_text(title, cfg));
    let label_height = cfg.font_size + padding;
    let item_height = cfg.font_size + padding / 2.0;

    let width = content_width + 2.0 * padding;
    let height = label_height + items.len() as f64 * item_height + padding;

    let mut children = Vec::with_capacity(items.len() + 2);
    children.push(Rect::rounded(width, height, cfg.corner_radius).into());
    children.push(heading(ctx, title, format!("{class}-label")));
    let mut y = label_height + cfg.font_size;
    for item in items {
        children.push(text_at(ctx, width / 2.0, y, item).into());
        y += item_height;
    }

    RenderedNode::new(
        Group::with_class(class, children),
        BoundingBox::new(0.0, 0.0, width, height),
    )
}

/// How a titled frame around nested content is drawn.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame<'a> {
    pub title: &'a str,
    pub class: &'a str,
    /// Explicit fill and stroke; `None` leaves the fill to the style sheet.
    pub fill: Option<&'a str>,
    /// Draw connector stubs from the frame edges to the content anchors.
    pub connect: bool,
}

/// Wraps `content` in a rounded frame with a title above it. The content is
/// centered horizontally; the frame's connectors run at the content's height.
pub(crate) fn framed(ctx: LayoutContext<'_>, frame: Frame<'_>, content: RenderedNode) -> RenderedNode {
    let cfg = ctx.config;
    let padding = cfg.padding;
    let label_height = cfg.font_size + padding;

    let inner_width = content.bbox.width.max(measure_text(frame.title, cfg));
    let width = inner_width + 2.0 * padding;
    let height = label_height + content.bbox.height + padding;

    let dx = (width - content.bbox.width) / 2.0 - content.bbox.x;
    let dy = label_height - content.bbox.y;
    let content = content.translate(dx, dy);
    let anchor_y = content.bbox.anchor_y;

    let mut rect = Rect::rounded(width, height, cfg.corner_radius);
    if let Some(fill) = frame.fill {
        rect.fill = Some(fill.to_string());
        rect.stroke = Some(cfg.subexp_stroke.clone());
        rect.stroke_width = cfg.line_width;
    }

    let mut children = vec![
        rect.into(),
        heading(ctx, frame.title, format!("{}-label", frame.class)),
    ];
    if frame.connect {
        if content.bbox.anchor_left > 0.0 {
            children.push(
                Line::horizontal(0.0, content.bbox.anchor_left, anchor_y, &cfg.line_color, cfg.line_width)
                    .into(),
            );
        }
        if content.bbox.anchor_right < width {
            children.push(
                Line::horizontal(content.bbox.anchor_right, width, anchor_y, &cfg.line_color, cfg.line_width)
                    .into(),
            );
        }
    }
    children.push(content.element);

    RenderedNode::new(
        Group::with_class(frame.class, children),
        BoundingBox::with_anchor_y(width, height, anchor_y),
    )
}

/// Banner listing pattern start options, drawn above the diagram.
pub(crate) fn options_banner(ctx: LayoutContext<'_>, label: &str) -> RenderedNode {
    let cfg = ctx.config;
    let pad = cfg.padding / 2.0;
    let width = measure_text(label, cfg) + 2.0 * pad;
    let height = cfg.font_size + 2.0 * pad;

    let rect = Rect {
        fill: Some(cfg.options_fill.clone()),
        stroke: Some(cfg.options_stroke.clone()),
        stroke_width: cfg.line_width,
        ..Rect::rounded(width, height, cfg.corner_radius)
    };
    let text = Text {
        font_size: cfg.font_size - 2.0,
        class: Some("pattern-options-label".to_string()),
        ..text_at(ctx, width / 2.0, height / 2.0 + cfg.font_size / 3.0, label)
    };

    RenderedNode::new(
        Group::with_class("pattern-options", vec![rect.into(), text.into()]),
        BoundingBox::new(0.0, 0.0, width, height),
    )
}
