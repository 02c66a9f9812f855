use serde::Serialize;

use crate::svg::Element;

/// Extent of a laid-out node plus the points where connectors attach.
///
/// `anchor_left`/`anchor_right` are the x coordinates of the incoming and
/// outgoing connector; `anchor_y` is the height of both. A valid box always
/// satisfies `y <= anchor_y <= y + height`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub anchor_left: f64,
    pub anchor_right: f64,
    pub anchor_y: f64,
}

impl BoundingBox {
    /// A box whose connectors attach at its outer edges, half-way down.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            anchor_left: x,
            anchor_right: x + width,
            anchor_y: y + height / 2.0,
        }
    }

    /// A box at the origin with edge connectors at `anchor_y`.
    pub fn with_anchor_y(width: f64, height: f64, anchor_y: f64) -> Self {
        Self {
            anchor_y,
            ..Self::new(0.0, 0.0, width, height)
        }
    }

    pub fn x2(&self) -> f64 {
        self.x + self.width
    }

    pub fn y2(&self) -> f64 {
        self.y + self.height
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
            anchor_left: self.anchor_left + dx,
            anchor_right: self.anchor_right + dx,
            anchor_y: self.anchor_y + dy,
        }
    }

    pub fn anchor_in_bounds(&self) -> bool {
        self.y <= self.anchor_y && self.anchor_y <= self.y2()
    }
}

/// A drawable element paired with the box it occupies.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedNode {
    pub element: Element,
    pub bbox: BoundingBox,
}

impl RenderedNode {
    pub fn new(element: impl Into<Element>, bbox: BoundingBox) -> Self {
        Self {
            element: element.into(),
            bbox,
        }
    }

    /// Moves the node, wrapping its element in a translated group.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            element: self.element.translated(dx, dy),
            bbox: self.bbox.translate(dx, dy),
        }
    }
}

/// Measured text: one entry per line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f64,
    pub height: f64,
}

/// One box computed during a layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxRecord {
    pub kind: String,
    pub depth: u32,
    pub bbox: BoundingBox,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_box_anchors_at_edges() {
        let bbox = BoundingBox::new(2.0, 4.0, 10.0, 6.0);
        assert_eq!(bbox.anchor_left, 2.0);
        assert_eq!(bbox.anchor_right, 12.0);
        assert_eq!(bbox.anchor_y, 7.0);
        assert!(bbox.anchor_in_bounds());
    }

    #[test]
    fn translate_moves_anchors() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 6.0).translate(5.0, -1.0);
        assert_eq!((bbox.x, bbox.y), (5.0, -1.0));
        assert_eq!((bbox.anchor_left, bbox.anchor_right), (5.0, 15.0));
        assert_eq!(bbox.anchor_y, 2.0);
        assert_eq!(bbox.x2(), 15.0);
        assert_eq!(bbox.y2(), 5.0);
    }
}
