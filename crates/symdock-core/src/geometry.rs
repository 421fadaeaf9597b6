//! Axis-aligned box helpers on top of kurbo.
//!
//! Widgets use a local frame whose origin is their anchor: the left edge at
//! the vertical middle of the glyph box. Y grows downward.

use kurbo::{Point, Rect, Vec2};

/// A box of the given size anchored at its left-middle point.
pub fn anchored_box(width: f64, height: f64) -> Rect {
    Rect::new(0.0, -height / 2.0, width, height / 2.0)
}

/// Shift a rect by an offset.
pub fn translate_rect(rect: Rect, offset: Vec2) -> Rect {
    rect + offset
}

/// Union of every rect in the iterator, or `None` if it is empty.
pub fn union_all(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    rects.into_iter().reduce(|acc, r| acc.union(r))
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (a - b).hypot()
}

/// Horizontal advance of an extent measured from the anchor (never negative).
pub fn advance(extent: Option<Rect>) -> f64 {
    extent.map(|r| r.x1.max(0.0)).unwrap_or(0.0)
}
