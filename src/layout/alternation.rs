use crate::ast::Match;
use crate::svg::{Group, Path};

use super::{BoundingBox, LayoutContext, PathBuilder, RenderedNode, layout_match, space_vertically};

/// Stacks the branches and routes an entry and an exit curve to each one.
/// A branch above the shared connector curves up, one below curves down, and
/// one level with it gets a straight segment.
pub(super) fn layout_alternation(ctx: LayoutContext<'_>, branches: &[Match]) -> RenderedNode {
    let cfg = ctx.config;
    let items = branches
        .iter()
        .map(|branch| layout_match(ctx, branch))
        .collect();
    let (items, stacked) = space_vertically(items, cfg.vertical_gap * 2.0);

    let r = cfg.curve_radius;
    let margin = cfg.connector_width;
    let width = stacked.width + 2.0 * margin;
    let height = stacked.height;
    let anchor_y = stacked.anchor_y;

    let mut children = Vec::with_capacity(items.len() * 3);
    for item in &items {
        let y = item.bbox.anchor_y;
        let entry_x = margin + item.bbox.anchor_left;
        let exit_x = margin + item.bbox.anchor_right;

        let mut entry = PathBuilder::new();
        entry.move_to(0.0, anchor_y);
        let mut exit = PathBuilder::new();
        exit.move_to(exit_x, y);
        if exit_x < width - margin {
            exit.horizontal_to(width - margin);
        }

        if y == anchor_y {
            entry.horizontal_to(entry_x);
            exit.horizontal_to(width);
        } else {
            // +1 when the branch lies below the shared connector.
            let dir = if y > anchor_y { 1.0 } else { -1.0 };
            entry
                .quadratic_to(r, anchor_y, r, anchor_y + dir * r)
                .vertical_to(y - dir * r)
                .quadratic_to(r, y, margin, y);
            if entry_x > margin {
                entry.horizontal_to(entry_x);
            }
            exit.quadratic_to(width - r, y, width - r, y - dir * r)
                .vertical_to(anchor_y + dir * r)
                .quadratic_to(width - r, anchor_y, width, anchor_y);
        }

        children.push(Path::stroked(entry.build(), &cfg.line_color, cfg.line_width).into());
        children.push(Path::stroked(exit.build(), &cfg.line_color, cfg.line_width).into());
    }
    children.extend(items.into_iter().map(|item| item.element.translated(margin, 0.0)));

    RenderedNode::new(
        Group::with_class("regexp", children),
        BoundingBox::with_anchor_y(width, height, anchor_y),
    )
}
