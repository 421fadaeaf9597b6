//! The widget forest: an arena of widgets plus the ordered list of roots.

use crate::config::EditorConfig;
use crate::docking::Slot;
use crate::error::{EditorError, EditorResult};
use crate::format::RenderOptions;
use crate::metrics::{ApproximateMetrics, FontMetrics};
use crate::widgets::{Widget, WidgetId, WidgetKind};
use kurbo::{Point, Rect};
use std::collections::HashMap;

/// All widgets of one editor, keyed by ID, and the roots in canvas order.
pub struct Forest {
    widgets: HashMap<WidgetId, Widget>,
    /// Roots, back to front.
    roots: Vec<WidgetId>,
    next_id: WidgetId,
    config: EditorConfig,
    metrics: Box<dyn FontMetrics>,
}

impl std::fmt::Debug for Forest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forest")
            .field("widgets", &self.widgets.len())
            .field("roots", &self.roots)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Forest {
    /// Create an empty forest measuring text with [`ApproximateMetrics`].
    pub fn new(config: EditorConfig) -> Self {
        Self::with_metrics(config, Box::new(ApproximateMetrics))
    }

    pub fn with_metrics(config: EditorConfig, metrics: Box<dyn FontMetrics>) -> Self {
        Self {
            widgets: HashMap::new(),
            roots: Vec::new(),
            next_id: 0,
            config,
            metrics,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub(crate) fn metrics(&self) -> &dyn FontMetrics {
        self.metrics.as_ref()
    }

    /// Rendering options derived from the configuration.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::from(&self.config)
    }

    /// Create a standalone widget. It is laid out but not yet a root.
    pub fn insert(&mut self, kind: impl Into<WidgetKind>) -> WidgetId {
        let id = self.next_id;
        self.next_id += 1;
        self.widgets.insert(id, Widget::new(id, kind.into(), &self.config));
        self.shake(id);
        id
    }

    /// Put a standalone widget on the canvas, in front of the other roots.
    pub fn add_root(&mut self, id: WidgetId) {
        let standalone = self.get(id).is_some_and(|w| w.parent.is_none());
        if standalone && !self.roots.contains(&id) {
            self.roots.push(id);
        }
    }

    /// Take a root off the canvas without deleting it.
    pub fn remove_root(&mut self, id: WidgetId) -> bool {
        let before = self.roots.len();
        self.roots.retain(|&root| root != id);
        self.roots.len() != before
    }

    /// Roots, back to front.
    pub fn roots(&self) -> &[WidgetId] {
        &self.roots
    }

    pub fn is_root(&self, id: WidgetId) -> bool {
        self.roots.contains(&id)
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(&id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.widgets.get_mut(&id)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    /// Number of widgets in the arena, on the canvas or not.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Drop every widget. IDs keep increasing.
    pub fn clear(&mut self) {
        self.widgets.clear();
        self.roots.clear();
    }

    /// Attach `child` at `slot` of `owner` and re-lay-out the tree.
    pub fn dock(&mut self, child: WidgetId, owner: WidgetId, slot: Slot) -> EditorResult<()> {
        let child_widget = self.get(child).ok_or(EditorError::UnknownWidget(child))?;
        if child_widget.parent.is_some() {
            return Err(EditorError::AlreadyDocked(child));
        }
        let docks_to = child_widget.docks_to();
        let owner_widget = self.get(owner).ok_or(EditorError::UnknownWidget(owner))?;
        let point = owner_widget
            .docking_point(slot)
            .ok_or(EditorError::MissingSlot { widget: owner, slot })?;
        if !point.is_empty() {
            return Err(EditorError::SlotOccupied { widget: owner, slot });
        }
        if !point.accepts(docks_to) {
            return Err(EditorError::Incompatible {
                child,
                widget: owner,
                slot,
            });
        }
        if owner == child || self.ancestors(owner).contains(&child) {
            return Err(EditorError::Cycle {
                child,
                widget: owner,
            });
        }

        self.roots.retain(|&root| root != child);
        self.attach_raw(child, owner, slot);
        log::debug!("Docked widget {} at '{}' of widget {}", child, slot, owner);
        self.shake(owner);
        Ok(())
    }

    /// Detach `child` from its parent, keeping its absolute position.
    ///
    /// Returns the former parent and slot, or `None` if it was not docked.
    /// The widget is left standalone; callers decide whether it becomes a root.
    pub fn undock(&mut self, child: WidgetId) -> EditorResult<Option<(WidgetId, Slot)>> {
        if !self.contains(child) {
            return Err(EditorError::UnknownWidget(child));
        }
        let absolute = self.absolute_position(child);
        let old_root = self.root_of(child);
        let Some((parent, slot)) = self.detach_raw(child) else {
            return Ok(None);
        };
        if let Some(widget) = self.get_mut(child) {
            widget.scale = 1.0;
            if let Some(absolute) = absolute {
                widget.position = absolute;
            }
        }
        log::debug!("Undocked widget {} from '{}' of widget {}", child, slot, parent);
        if let Some(old_root) = old_root {
            self.shake(old_root);
        }
        self.shake(child);
        Ok(Some((parent, slot)))
    }

    /// Set both sides of an attachment. No checks, no layout.
    pub(crate) fn attach_raw(&mut self, child: WidgetId, owner: WidgetId, slot: Slot) {
        if let Some(point) = self.widgets.get_mut(&owner).and_then(|w| w.docking_point_mut(slot)) {
            point.child = Some(child);
        }
        if let Some(widget) = self.widgets.get_mut(&child) {
            widget.parent = Some(owner);
            widget.docked_to = Some(slot);
        }
    }

    /// Clear both sides of an attachment. No layout.
    pub(crate) fn detach_raw(&mut self, child: WidgetId) -> Option<(WidgetId, Slot)> {
        let widget = self.widgets.get_mut(&child)?;
        let parent = widget.parent.take()?;
        let slot = widget.docked_to.take()?;
        if let Some(point) = self.widgets.get_mut(&parent).and_then(|w| w.docking_point_mut(slot)) {
            point.child = None;
        }
        Some((parent, slot))
    }

    /// Detach and delete a widget with all its descendants.
    pub fn remove_subtree(&mut self, id: WidgetId) -> Vec<WidgetId> {
        if !self.contains(id) {
            return Vec::new();
        }
        let old_root = self.detach_raw(id).and_then(|(parent, _)| self.root_of(parent));
        self.roots.retain(|&root| root != id);
        let removed = self.descendants(id);
        for widget in &removed {
            self.widgets.remove(widget);
        }
        if let Some(old_root) = old_root {
            self.shake(old_root);
        }
        log::debug!("Removed {} widgets under {}", removed.len(), id);
        removed
    }

    /// Topmost ancestor of `id` (itself when standalone).
    pub fn root_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.get(id)?;
        Some(self.ancestors(id).last().copied().unwrap_or(id))
    }

    /// Parent first, root last.
    pub fn ancestors(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut current = self.get(id).and_then(|w| w.parent);
        while let Some(parent) = current {
            // a corrupt parent chain must not loop forever
            if out.contains(&parent) {
                break;
            }
            out.push(parent);
            current = self.get(parent).and_then(|w| w.parent);
        }
        out
    }

    /// `id` and everything docked under it, pre-order in docking-point order.
    pub fn descendants(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(widget) = self.get(current) else {
                continue;
            };
            out.push(current);
            let children: Vec<WidgetId> = widget.children().map(|(_, child)| child).collect();
            stack.extend(children.into_iter().rev());
        }
        out
    }

    pub fn subtree_size(&self, id: WidgetId) -> usize {
        self.descendants(id).len()
    }

    /// Canvas position of the widget's anchor.
    pub fn absolute_position(&self, id: WidgetId) -> Option<Point> {
        let mut position = self.get(id)?.position;
        for ancestor in self.ancestors(id) {
            position += self.get(ancestor)?.position.to_vec2();
        }
        Some(position)
    }

    /// Canvas box of the widget itself.
    pub fn absolute_bounds(&self, id: WidgetId) -> Option<Rect> {
        let origin = self.absolute_position(id)?;
        Some(self.get(id)?.bounds + origin.to_vec2())
    }

    /// Canvas box of the widget and everything docked under it.
    pub fn absolute_subtree_bounds(&self, id: WidgetId) -> Option<Rect> {
        let origin = self.absolute_position(id)?;
        Some(self.get(id)?.subtree_bounds + origin.to_vec2())
    }

    /// Whether a drag may pull `id` out of its tree.
    ///
    /// Differentials built into a derivative, and the variables they
    /// differentiate by, stay put unless the user is privileged.
    pub fn is_detachable(&self, id: WidgetId, privileged: bool) -> bool {
        if privileged {
            return true;
        }
        let Some(widget) = self.get(id) else {
            return false;
        };
        match widget.kind {
            WidgetKind::Differential(_) => !self.in_derivative(id),
            WidgetKind::Symbol(_) => {
                let in_argument = widget.docked_to == Some(Slot::Argument);
                let embedded_parent = widget.parent.is_some_and(|p| {
                    matches!(self.get(p).map(|w| &w.kind), Some(WidgetKind::Differential(_)))
                        && self.in_derivative(p)
                });
                !(in_argument && embedded_parent)
            }
            _ => true,
        }
    }

    /// A differential is embedded when its chain of differential ancestors ends at a derivative.
    fn in_derivative(&self, id: WidgetId) -> bool {
        for ancestor in self.ancestors(id) {
            match self.get(ancestor).map(|w| &w.kind) {
                Some(WidgetKind::Derivative(_)) => return true,
                Some(WidgetKind::Differential(_)) => continue,
                _ => return false,
            }
        }
        false
    }

    /// Deepest widget whose own box contains `point`, front-most root first.
    pub fn hit_test(&self, point: Point) -> Option<WidgetId> {
        self.roots
            .iter()
            .rev()
            .find_map(|&root| self.hit_widget(root, Point::ZERO, point))
    }

    fn hit_widget(&self, id: WidgetId, origin: Point, point: Point) -> Option<WidgetId> {
        let widget = self.get(id)?;
        let anchor = origin + widget.position.to_vec2();
        if !(widget.subtree_bounds + anchor.to_vec2()).contains(point) {
            return None;
        }
        let children: Vec<WidgetId> = widget.children().map(|(_, child)| child).collect();
        children
            .into_iter()
            .rev()
            .find_map(|child| self.hit_widget(child, anchor, point))
            .or_else(|| (widget.bounds + anchor.to_vec2()).contains(point).then_some(id))
    }

    /// The root with the most widgets; the first one wins a tie.
    pub fn primary_root(&self) -> Option<WidgetId> {
        let mut best: Option<(WidgetId, usize)> = None;
        for &root in &self.roots {
            let size = self.subtree_size(root);
            if best.is_none_or(|(_, most)| size > most) {
                best = Some((root, size));
            }
        }
        best.map(|(root, _)| root)
    }

    /// Verify that every attachment is recorded on both sides and that no
    /// widget has two owners.
    pub fn check_consistency(&self) -> Result<(), String> {
        let mut owners: HashMap<WidgetId, WidgetId> = HashMap::new();
        for (&id, widget) in &self.widgets {
            for (slot, child) in widget.children() {
                let child_widget = self
                    .get(child)
                    .ok_or_else(|| format!("{} holds missing widget {} at '{}'", id, child, slot))?;
                if child_widget.parent != Some(id) || child_widget.docked_to != Some(slot) {
                    return Err(format!(
                        "{} holds {} at '{}' but {} points at {:?}/{:?}",
                        id, child, slot, child, child_widget.parent, child_widget.docked_to
                    ));
                }
                if let Some(other) = owners.insert(child, id) {
                    return Err(format!("{} is held by both {} and {}", child, other, id));
                }
            }
            if let Some(parent) = widget.parent {
                let held = widget
                    .docked_to
                    .and_then(|slot| self.get(parent)?.child(slot));
                if held != Some(id) {
                    return Err(format!("{} claims parent {} which does not hold it", id, parent));
                }
                if self.roots.contains(&id) {
                    return Err(format!("{} is docked but listed as a root", id));
                }
            }
        }
        Ok(())
    }

    /// Trimmed render with the forest's own options.
    #[cfg(test)]
    pub(crate) fn text(&self, id: WidgetId, format: crate::format::Format) -> String {
        self.render(id, format, self.render_options())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{
        BinaryOperation, Derivative, Differential, Fraction, Number, Relation, Symbol,
    };

    fn forest() -> Forest {
        Forest::new(EditorConfig::default())
    }

    fn root(f: &mut Forest, kind: impl Into<WidgetKind>) -> WidgetId {
        let id = f.insert(kind);
        f.add_root(id);
        id
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut f = forest();
        let a = f.insert(Symbol::new("a"));
        let b = f.insert(Symbol::new("b"));
        f.remove_subtree(a);
        let c = f.insert(Symbol::new("c"));
        assert!(a < b && b < c);
    }

    #[test]
    fn test_dock_updates_both_sides() {
        let mut f = forest();
        let x = root(&mut f, Symbol::new("x"));
        let two = root(&mut f, Number::new("2"));
        f.dock(two, x, Slot::Superscript).unwrap();
        assert_eq!(f.get(x).unwrap().child(Slot::Superscript), Some(two));
        assert_eq!(f.get(two).unwrap().parent(), Some(x));
        assert_eq!(f.get(two).unwrap().docked_to(), Some(Slot::Superscript));
        assert_eq!(f.roots(), &[x]);
        f.check_consistency().unwrap();
    }

    #[test]
    fn test_dock_refusals() {
        let mut f = forest();
        let x = root(&mut f, Symbol::new("x"));
        let y = f.insert(Symbol::new("y"));
        let z = f.insert(Symbol::new("z"));
        let plus = f.insert(BinaryOperation::new("+"));

        assert!(matches!(f.dock(99, x, Slot::Right), Err(EditorError::UnknownWidget(99))));
        assert!(matches!(
            f.dock(y, x, Slot::Numerator),
            Err(EditorError::MissingSlot { .. })
        ));
        assert!(matches!(
            f.dock(plus, x, Slot::Superscript),
            Err(EditorError::Incompatible { .. })
        ));
        f.dock(y, x, Slot::Right).unwrap();
        assert!(matches!(
            f.dock(z, x, Slot::Right),
            Err(EditorError::SlotOccupied { .. })
        ));
        assert!(matches!(f.dock(y, z, Slot::Right), Err(EditorError::AlreadyDocked(_))));
        assert!(matches!(f.dock(x, y, Slot::Right), Err(EditorError::Cycle { .. })));
        assert!(matches!(f.dock(z, z, Slot::Right), Err(EditorError::Cycle { .. })));
        f.check_consistency().unwrap();
    }

    #[test]
    fn test_undock_clears_both_sides_and_keeps_position() {
        let mut f = forest();
        let x = root(&mut f, Symbol::new("x"));
        f.get_mut(x).unwrap().position = Point::new(100.0, 100.0);
        let y = f.insert(Symbol::new("y"));
        f.dock(y, x, Slot::Right).unwrap();
        let before = f.absolute_position(y).unwrap();

        assert_eq!(f.undock(y).unwrap(), Some((x, Slot::Right)));
        assert_eq!(f.get(x).unwrap().child(Slot::Right), None);
        assert_eq!(f.get(y).unwrap().parent(), None);
        assert_eq!(f.get(y).unwrap().docked_to(), None);
        assert_eq!(f.absolute_position(y).unwrap(), before);
        assert_eq!(f.undock(y).unwrap(), None);
        f.check_consistency().unwrap();
    }

    #[test]
    fn test_undock_resets_scale() {
        let mut f = forest();
        let x = root(&mut f, Symbol::new("x"));
        let two = f.insert(Number::new("2"));
        f.dock(two, x, Slot::Superscript).unwrap();
        assert!(f.get(two).unwrap().scale < 1.0);
        f.undock(two).unwrap();
        assert_eq!(f.get(two).unwrap().scale, 1.0);
    }

    #[test]
    fn test_remove_subtree() {
        let mut f = forest();
        let x = root(&mut f, Symbol::new("x"));
        let frac = f.insert(Fraction::default());
        let n = f.insert(Number::new("1"));
        f.dock(n, frac, Slot::Numerator).unwrap();
        f.dock(frac, x, Slot::Right).unwrap();

        let removed = f.remove_subtree(frac);
        assert_eq!(removed, vec![frac, n]);
        assert!(f.get(n).is_none());
        assert_eq!(f.get(x).unwrap().child(Slot::Right), None);
        assert_eq!(f.len(), 1);
        f.check_consistency().unwrap();
    }

    #[test]
    fn test_tree_queries() {
        let mut f = forest();
        let a = root(&mut f, Symbol::new("a"));
        let eq = f.insert(Relation::new("="));
        let b = f.insert(Symbol::new("b"));
        let two = f.insert(Number::new("2"));
        f.dock(eq, a, Slot::Right).unwrap();
        f.dock(b, eq, Slot::Right).unwrap();
        f.dock(two, b, Slot::Superscript).unwrap();

        assert_eq!(f.root_of(two), Some(a));
        assert_eq!(f.ancestors(two), vec![b, eq, a]);
        assert_eq!(f.descendants(a), vec![a, eq, b, two]);
        assert_eq!(f.subtree_size(a), 4);
        assert_eq!(f.root_of(77), None);
    }

    #[test]
    fn test_absolute_position_sums_offsets() {
        let mut f = forest();
        let a = root(&mut f, Symbol::new("a"));
        f.get_mut(a).unwrap().position = Point::new(10.0, 20.0);
        let b = f.insert(Symbol::new("b"));
        f.dock(b, a, Slot::Right).unwrap();
        let local = f.get(b).unwrap().position;
        assert_eq!(f.absolute_position(b).unwrap(), Point::new(10.0 + local.x, 20.0 + local.y));
    }

    #[test]
    fn test_hit_test_prefers_deepest() {
        let mut f = forest();
        let a = root(&mut f, Symbol::new("a"));
        let b = f.insert(Symbol::new("b"));
        f.dock(b, a, Slot::Right).unwrap();
        let a_center = f.absolute_bounds(a).unwrap().center();
        let b_center = f.absolute_bounds(b).unwrap().center();
        assert_eq!(f.hit_test(a_center), Some(a));
        assert_eq!(f.hit_test(b_center), Some(b));
        assert_eq!(f.hit_test(Point::new(-500.0, -500.0)), None);
    }

    #[test]
    fn test_hit_test_front_root_first() {
        let mut f = forest();
        let back = root(&mut f, Symbol::new("a"));
        let front = root(&mut f, Symbol::new("b"));
        let center = f.absolute_bounds(back).unwrap().center();
        assert_eq!(f.hit_test(center), Some(front));
    }

    #[test]
    fn test_primary_root_first_maximum_wins() {
        let mut f = forest();
        let a = root(&mut f, Symbol::new("a"));
        let b = root(&mut f, Symbol::new("b"));
        assert_eq!(f.primary_root(), Some(a));
        let c = f.insert(Symbol::new("c"));
        f.dock(c, b, Slot::Right).unwrap();
        assert_eq!(f.primary_root(), Some(b));
        assert_eq!(forest().primary_root(), None);
    }

    fn embedded_derivative(f: &mut Forest) -> (WidgetId, WidgetId, WidgetId) {
        let der = root(f, Derivative::default());
        let d = f.insert(Differential::new("d"));
        let x = f.insert(Symbol::new("x"));
        f.dock(x, d, Slot::Argument).unwrap();
        f.dock(d, der, Slot::Denominator).unwrap();
        (der, d, x)
    }

    #[test]
    fn test_derivative_argument_not_detachable_unprivileged() {
        let mut f = forest();
        let (_, d, x) = embedded_derivative(&mut f);
        assert!(!f.is_detachable(x, false));
        assert!(!f.is_detachable(d, false));
        assert!(f.is_detachable(x, true));
        assert!(f.is_detachable(d, true));
    }

    #[test]
    fn test_chained_differential_is_embedded() {
        let mut f = forest();
        let (_, d, _) = embedded_derivative(&mut f);
        let dt = f.insert(Differential::new("d"));
        let t = f.insert(Symbol::new("t"));
        f.dock(t, dt, Slot::Argument).unwrap();
        f.dock(dt, d, Slot::Right).unwrap();
        assert!(!f.is_detachable(dt, false));
        assert!(!f.is_detachable(t, false));
    }

    #[test]
    fn test_free_differential_is_detachable() {
        let mut f = forest();
        let y = root(&mut f, Symbol::new("y"));
        let d = f.insert(Differential::new("d"));
        let x = f.insert(Symbol::new("x"));
        f.dock(x, d, Slot::Argument).unwrap();
        f.dock(d, y, Slot::Right).unwrap();
        assert!(f.is_detachable(d, false));
        assert!(f.is_detachable(x, false));
    }

    /// Small deterministic generator so the fuzz sequence is reproducible.
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self, bound: usize) -> usize {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((self.0 >> 33) as usize) % bound
        }
    }

    #[test]
    fn test_fuzzed_dock_undock_keeps_consistency() {
        let mut f = forest();
        let mut ids: Vec<WidgetId> = Vec::new();
        for i in 0..12 {
            let id = match i % 4 {
                0 => f.insert(Symbol::new("x")),
                1 => f.insert(Number::new("2")),
                2 => f.insert(BinaryOperation::new("+")),
                _ => f.insert(Fraction::default()),
            };
            f.add_root(id);
            ids.push(id);
        }
        let mut rng = Lcg(7);
        for _ in 0..500 {
            let child = ids[rng.next(ids.len())];
            if rng.next(3) == 0 {
                let _ = f.undock(child);
                f.add_root(child);
            } else {
                let owner = ids[rng.next(ids.len())];
                let slot = Slot::ALL[rng.next(Slot::ALL.len())];
                let _ = f.dock(child, owner, slot);
            }
            f.check_consistency().unwrap();
            for &id in &ids {
                let widget = f.get(id).unwrap();
                assert_eq!(widget.parent().is_none(), f.is_root(id));
            }
        }
    }
}
