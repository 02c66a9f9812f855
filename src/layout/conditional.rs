use crate::ast::{Conditional, Regexp};
use crate::svg::Group;

use super::boxes::{Frame, framed, label_box};
use super::labels::condition_title;
use super::{BoundingBox, LayoutContext, RenderedNode, layout_regexp, space_horizontally};

fn branch(ctx: LayoutContext<'_>, label: &str, regexp: &Regexp, class: &str) -> RenderedNode {
    let items = vec![
        label_box(ctx, label, "condition-label"),
        layout_regexp(ctx, regexp),
    ];
    let (items, bbox) = space_horizontally(items, ctx.config.horizontal_gap);
    let children = items.into_iter().map(|item| item.element).collect();
    RenderedNode::new(Group::with_class(class, children), bbox)
}

/// `then` and `else` tracks stacked and centered inside a frame titled with
/// the condition. Connectors attach at the `then` track.
pub(super) fn layout_conditional(ctx: LayoutContext<'_>, conditional: &Conditional) -> RenderedNode {
    let cfg = ctx.config;
    let yes = branch(ctx, "then", &conditional.true_branch, "condition-yes");

    let content = match &conditional.false_branch {
        None => {
            let bbox = yes.bbox;
            yes.translate(-bbox.x, -bbox.y)
        }
        Some(false_branch) => {
            let no = branch(ctx, "else", false_branch, "condition-no");
            let width = yes.bbox.width.max(no.bbox.width);
            let yes_dx = (width - yes.bbox.width) / 2.0 - yes.bbox.x;
            let yes_dy = -yes.bbox.y;
            let yes = yes.translate(yes_dx, yes_dy);
            let no_dx = (width - no.bbox.width) / 2.0 - no.bbox.x;
            let no_dy = yes.bbox.y2() + cfg.vertical_gap - no.bbox.y;
            let no = no.translate(no_dx, no_dy);

            let bbox = BoundingBox {
                x: 0.0,
                y: 0.0,
                width,
                height: no.bbox.y2(),
                anchor_left: yes.bbox.anchor_left,
                anchor_right: yes.bbox.anchor_right,
                anchor_y: yes.bbox.anchor_y,
            };
            RenderedNode::new(Group::new(vec![yes.element, no.element]), bbox)
        }
    };

    let title = condition_title(&conditional.condition);
    framed(
        ctx,
        Frame {
            title: &title,
            class: "conditional",
            fill: None,
            connect: true,
        },
        content,
    )
}
