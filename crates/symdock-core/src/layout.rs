//! Recursive layout ("shake") and structural normalization.
//!
//! Layout always runs over a whole tree from its root. Each widget first
//! propagates scale to its children and lays them out, then places its own
//! docking points left to right using the children's subtree extents.

use crate::config::EditorConfig;
use crate::docking::Slot;
use crate::forest::Forest;
use crate::geometry::{advance, anchored_box, translate_rect};
use crate::metrics::FontMetrics;
use crate::widgets::{BracketKind, Brackets, WidgetId, WidgetKind};
use kurbo::{Point, Rect};

/// Upper bound on normalization passes over one tree.
const MAX_NORMALIZE_PASSES: usize = 16;

/// Per-widget inputs to a placement rule.
pub struct LayoutContext<'a> {
    metrics: &'a dyn FontMetrics,
    config: &'a EditorConfig,
    scale: f64,
}

impl<'a> LayoutContext<'a> {
    pub fn new(metrics: &'a dyn FontMetrics, config: &'a EditorConfig, scale: f64) -> Self {
        Self {
            metrics,
            config,
            scale,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        self.config
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn font_size(&self) -> f64 {
        self.config.base_font_size() * self.scale
    }

    /// Spacing between adjacent items.
    pub fn gap(&self) -> f64 {
        self.font_size() * 0.1
    }

    /// Size of an empty docking point marker.
    pub fn dock_size(&self) -> f64 {
        self.font_size() / 3.0
    }

    /// Anchored box of `text` in the regular face.
    pub fn text_box(&self, text: &str) -> Rect {
        let r = self.metrics.text_bounds(text, self.font_size());
        anchored_box(r.width(), r.height())
    }

    /// Anchored box of `text` in the italic face.
    pub fn italic_box(&self, text: &str) -> Rect {
        let r = self.metrics.italic_text_bounds(text, self.font_size());
        anchored_box(r.width(), r.height())
    }

    /// Extent used in place of an empty slot's child.
    pub fn placeholder(&self) -> Rect {
        anchored_box(self.dock_size(), self.dock_size())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SlotEntry {
    slot: Slot,
    extent: Option<Rect>,
    position: Option<Point>,
}

/// Docking points of one widget during placement: child extents in, positions out.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotLayout {
    entries: Vec<SlotEntry>,
}

impl SlotLayout {
    /// `extent` is the child's subtree box in the child's own frame.
    pub fn new(entries: impl IntoIterator<Item = (Slot, Option<Rect>)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(slot, extent)| SlotEntry {
                    slot,
                    extent,
                    position: None,
                })
                .collect(),
        }
    }

    fn entry(&self, slot: Slot) -> Option<&SlotEntry> {
        self.entries.iter().find(|e| e.slot == slot)
    }

    /// Whether the widget has this docking point at all.
    pub fn has(&self, slot: Slot) -> bool {
        self.entry(slot).is_some()
    }

    pub fn extent(&self, slot: Slot) -> Option<Rect> {
        self.entry(slot).and_then(|e| e.extent)
    }

    pub fn extent_or(&self, slot: Slot, fallback: Rect) -> Rect {
        self.extent(slot).unwrap_or(fallback)
    }

    /// Horizontal room the child at `slot` takes to the right of its anchor.
    pub fn advance(&self, slot: Slot) -> f64 {
        advance(self.extent(slot))
    }

    /// Place the docking point (and any child) at `position`. Missing slots are ignored.
    pub fn place(&mut self, slot: Slot, position: Point) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.slot == slot) {
            entry.position = Some(position);
        }
    }

    pub fn position(&self, slot: Slot) -> Option<Point> {
        self.entry(slot).and_then(|e| e.position)
    }
}

/// Superscript above-right and subscript below-right of `own`.
///
/// Returns the x coordinate where the scripts end.
pub(crate) fn place_scripts(slots: &mut SlotLayout, own: Rect) -> f64 {
    slots.place(Slot::Superscript, Point::new(own.x1, own.y0));
    slots.place(Slot::Subscript, Point::new(own.x1, own.y1));
    own.x1 + slots.advance(Slot::Superscript).max(slots.advance(Slot::Subscript))
}

/// Mass number above-left and proton number below-left of `own`, right-aligned.
pub(crate) fn place_prescripts(ctx: &LayoutContext<'_>, slots: &mut SlotLayout, own: Rect) {
    for (slot, y) in [(Slot::MassNumber, own.y0), (Slot::ProtonNumber, own.y1)] {
        let extent = slots.extent_or(slot, ctx.placeholder());
        slots.place(slot, Point::new(own.x0 - ctx.gap() - extent.x1, y));
    }
}

/// The `right` continuation on the anchor line after `x`.
pub(crate) fn place_right(ctx: &LayoutContext<'_>, slots: &mut SlotLayout, x: f64) {
    slots.place(Slot::Right, Point::new(x + ctx.gap(), 0.0));
}

/// Numerator over denominator, centred on a bar as wide as the wider of the two.
///
/// Returns the bar's box.
pub(crate) fn place_fraction(ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
    let gap = ctx.gap();
    let numerator = slots.extent_or(Slot::Numerator, ctx.placeholder());
    let denominator = slots.extent_or(Slot::Denominator, ctx.placeholder());
    let width = numerator
        .width()
        .max(denominator.width())
        .max(ctx.font_size() * 0.5)
        + 2.0 * gap;
    let bar = Rect::new(0.0, -gap, width, gap);
    let cx = width / 2.0;
    slots.place(
        Slot::Numerator,
        Point::new(cx - numerator.center().x, bar.y0 - gap - numerator.y1),
    );
    slots.place(
        Slot::Denominator,
        Point::new(cx - denominator.center().x, bar.y1 + gap - denominator.y0),
    );
    place_right(ctx, slots, bar.x1);
    bar
}

/// Enclose the argument between two glyphs starting at `x`. Returns the enclosing box.
pub(crate) fn enclose_argument(
    ctx: &LayoutContext<'_>,
    slots: &mut SlotLayout,
    open: &str,
    close: &str,
    x: f64,
) -> Rect {
    let pad = ctx.gap() / 2.0;
    let argument = slots.extent_or(Slot::Argument, ctx.placeholder());
    let open_box = ctx.text_box(open);
    let close_box = ctx.text_box(close);
    let argument_x = x + open_box.width() + pad - argument.x0;
    slots.place(Slot::Argument, Point::new(argument_x, 0.0));
    let x1 = argument_x + argument.x1 + pad + close_box.width();
    Rect::new(
        x,
        argument.y0.min(open_box.y0),
        x1,
        argument.y1.max(open_box.y1),
    )
}

impl Forest {
    /// Re-lay-out the whole tree containing `id`, starting from its root.
    pub fn shake(&mut self, id: WidgetId) {
        let Some(root) = self.root_of(id) else {
            return;
        };
        self.normalize(root);
        self.layout_node(root);
    }

    /// Apply structural rewrites to the tree under `root` until none applies.
    ///
    /// The only rewrite: a fraction or derivative docked at the `right` of a
    /// number is moved into round brackets placed at that slot, so the number
    /// reads as multiplying the bracketed fraction. The result no longer
    /// matches the trigger, so one extra pass normally reaches the fixed point.
    pub fn normalize(&mut self, root: WidgetId) -> usize {
        let mut total = 0;
        for _ in 0..MAX_NORMALIZE_PASSES {
            let rewrites = self.normalize_pass(root);
            if rewrites == 0 {
                return total;
            }
            total += rewrites;
        }
        log::warn!(
            "Normalization of tree {} did not settle after {} passes",
            root,
            MAX_NORMALIZE_PASSES
        );
        total
    }

    fn normalize_pass(&mut self, root: WidgetId) -> usize {
        let matches: Vec<(WidgetId, WidgetId)> = self
            .descendants(root)
            .into_iter()
            .filter_map(|id| {
                let widget = self.get(id)?;
                if !matches!(widget.kind, WidgetKind::Num(_)) {
                    return None;
                }
                let right = widget.child(Slot::Right)?;
                let fraction_like = matches!(
                    self.get(right)?.kind,
                    WidgetKind::Fraction(_) | WidgetKind::Derivative(_)
                );
                fraction_like.then_some((id, right))
            })
            .collect();
        for &(number, fraction) in &matches {
            self.bracket_fraction(number, fraction);
        }
        matches.len()
    }

    fn bracket_fraction(&mut self, number: WidgetId, fraction: WidgetId) {
        let brackets = self.insert(Brackets::new(BracketKind::Round));
        let continuation = self
            .get(fraction)
            .and_then(|w| w.child(Slot::Right));
        if let Some(continuation) = continuation {
            self.detach_raw(continuation);
        }
        self.detach_raw(fraction);
        self.attach_raw(fraction, brackets, Slot::Argument);
        if let Some(continuation) = continuation {
            self.attach_raw(continuation, brackets, Slot::Right);
        }
        self.attach_raw(brackets, number, Slot::Right);
        log::debug!(
            "Bracketed widget {} after number {} as widget {}",
            fraction,
            number,
            brackets
        );
    }

    /// Lay out `id` and its subtree. Scale must already be set on `id`.
    fn layout_node(&mut self, id: WidgetId) {
        let Some(widget) = self.get(id) else {
            return;
        };
        let scale = widget.scale;
        let children: Vec<(WidgetId, f64)> = widget
            .docking_points()
            .iter()
            .filter_map(|dp| dp.child().map(|child| (child, dp.scale)))
            .collect();

        for &(child, slot_scale) in &children {
            if let Some(c) = self.get_mut(child) {
                c.scale = scale * slot_scale;
            }
            self.layout_node(child);
        }

        let Some(widget) = self.get(id) else {
            return;
        };
        let mut slots = SlotLayout::new(widget.docking_points().iter().map(|dp| {
            let extent = dp
                .child()
                .and_then(|c| self.get(c))
                .map(|c| c.subtree_bounds);
            (dp.slot, extent)
        }));
        let ctx = LayoutContext::new(self.metrics(), self.config(), scale);
        let own = widget.kind.layout(&ctx, &mut slots);

        let placements: Vec<(usize, Option<Point>, Option<WidgetId>)> = widget
            .docking_points()
            .iter()
            .enumerate()
            .map(|(i, dp)| (i, slots.position(dp.slot), dp.child()))
            .collect();

        let mut subtree = own;
        for &(_, position, child) in &placements {
            let (Some(position), Some(child)) = (position, child) else {
                continue;
            };
            if let Some(c) = self.get_mut(child) {
                c.position = position;
                subtree = subtree.union(translate_rect(c.subtree_bounds, position.to_vec2()));
            }
        }

        if let Some(widget) = self.get_mut(id) {
            widget.bounds = own;
            widget.subtree_bounds = subtree;
            for (i, position, _) in placements {
                if let Some(position) = position {
                    widget.docking_points[i].position = position;
                }
            }
        }
    }
}
