use crate::ast::Repeat;
use crate::svg::{Group, Line, Path, Text};

use super::labels::repeat_label;
use super::{BoundingBox, LayoutContext, PathBuilder, RenderedNode};

/// Wraps quantified content with a skip track above (`min == 0`) and a loop
/// track below (`max != 1`). The loop carries a direction arrow and, for
/// counted shapes, a label. A quantifier with neither track is the identity.
pub(super) fn layout_repeat(ctx: LayoutContext<'_>, content: RenderedNode, repeat: &Repeat) -> RenderedNode {
    let cfg = ctx.config;
    let has_skip = repeat.can_skip();
    let has_loop = repeat.can_loop();
    if !has_skip && !has_loop {
        return content;
    }

    let r = cfg.curve_radius;
    let skip_height = if has_skip { 2.0 * r } else { 0.0 };
    let loop_height = if has_loop { 2.0 * r } else { 0.0 };

    let (dx, dy) = (r - content.bbox.x, skip_height - content.bbox.y);
    let content = content.translate(dx, dy);
    let width = content.bbox.width + 2.0 * r;
    let mut height = content.bbox.height + skip_height + loop_height;
    let anchor_y = content.bbox.anchor_y;

    let mut children = Vec::new();

    if has_skip {
        let d = PathBuilder::new()
            .move_to(0.0, anchor_y)
            .quadratic_to(0.0, anchor_y - r, r, anchor_y - r)
            .horizontal_to(width - r)
            .quadratic_to(width, anchor_y - r, width, anchor_y)
            .build();
        children.push(Path::stroked(d, &cfg.line_color, cfg.line_width).with_class("skip-path").into());
    }

    if has_loop {
        let loop_y = content.bbox.y2() + r;
        let d = PathBuilder::new()
            .move_to(width, anchor_y)
            .quadratic_to(width, loop_y, width - r, loop_y)
            .horizontal_to(r)
            .quadratic_to(0.0, loop_y, 0.0, anchor_y)
            .build();
        children.push(Path::stroked(d, &cfg.line_color, cfg.line_width).with_class("loop-path").into());

        // Greedy points back toward the start, lazy points forward.
        let arrow_x = width / 2.0;
        let size = if repeat.greedy { cfg.arrow_size } else { -cfg.arrow_size };
        let arrow = PathBuilder::new()
            .move_to(arrow_x + size, loop_y - cfg.arrow_size)
            .line_to(arrow_x, loop_y)
            .line_to(arrow_x + size, loop_y + cfg.arrow_size)
            .build();
        children.push(Path::stroked(arrow, &cfg.line_color, cfg.line_width).into());

        let label = repeat_label(repeat);
        if !label.is_empty() {
            children.push(
                Text {
                    x: arrow_x,
                    y: loop_y + cfg.font_size,
                    content: label,
                    font_family: Some(cfg.font_family.clone()),
                    font_size: cfg.font_size - 2.0,
                    centered: true,
                    class: Some("repeat-label".to_string()),
                    ..Text::default()
                }
                .into(),
            );
            height += cfg.font_size;
        }
    }

    children.push(Line::horizontal(0.0, content.bbox.anchor_left, anchor_y, &cfg.line_color, cfg.line_width).into());
    children.push(
        Line::horizontal(content.bbox.anchor_right, width, anchor_y, &cfg.line_color, cfg.line_width).into(),
    );
    children.push(content.element);

    RenderedNode::new(
        Group::with_class("repeat", children),
        BoundingBox::with_anchor_y(width, height, anchor_y),
    )
}
