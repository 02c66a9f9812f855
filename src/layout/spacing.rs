use super::{BoundingBox, RenderedNode};

/// Lays `items` out left to right, `gap` apart, shifting each one down so
/// every connector runs along the lowest `anchor_y`.
pub fn space_horizontally(items: Vec<RenderedNode>, gap: f64) -> (Vec<RenderedNode>, BoundingBox) {
    if items.is_empty() {
        return (items, BoundingBox::default());
    }

    let max_anchor_y = items
        .iter()
        .map(|item| item.bbox.anchor_y)
        .fold(f64::MIN, f64::max);

    let mut placed = Vec::with_capacity(items.len());
    let mut x = 0.0;
    let mut min_y = f64::MAX;
    let mut max_y = f64::MIN;
    for item in items {
        let dx = x - item.bbox.x;
        let dy = max_anchor_y - item.bbox.anchor_y;
        let item = item.translate(dx, dy);
        min_y = min_y.min(item.bbox.y);
        max_y = max_y.max(item.bbox.y2());
        x = item.bbox.x2() + gap;
        placed.push(item);
    }

    let (Some(first), Some(last)) = (placed.first(), placed.last()) else {
        return (placed, BoundingBox::default());
    };
    let bbox = BoundingBox {
        x: 0.0,
        y: min_y,
        width: last.bbox.x2(),
        height: max_y - min_y,
        anchor_left: first.bbox.anchor_left,
        anchor_right: last.bbox.anchor_right,
        anchor_y: max_anchor_y,
    };
    (placed, bbox)
}

/// Stacks `items` top to bottom, `gap` apart, each centered in the widest.
/// The aggregate connects at its edges, half-way down.
pub fn space_vertically(items: Vec<RenderedNode>, gap: f64) -> (Vec<RenderedNode>, BoundingBox) {
    if items.is_empty() {
        return (items, BoundingBox::default());
    }

    let max_width = items
        .iter()
        .map(|item| item.bbox.width)
        .fold(0.0, f64::max);

    let mut placed = Vec::with_capacity(items.len());
    let mut y = 0.0;
    for item in items {
        let dx = (max_width - item.bbox.width) / 2.0 - item.bbox.x;
        let dy = y - item.bbox.y;
        let item = item.translate(dx, dy);
        y = item.bbox.y2() + gap;
        placed.push(item);
    }

    let height = placed.last().map_or(0.0, |last| last.bbox.y2());
    (placed, BoundingBox::new(0.0, 0.0, max_width, height))
}
