//! Nearest-docking-point search used while dragging.

use crate::docking::{DockType, Slot, compatible};
use crate::forest::Forest;
use crate::geometry::distance;
use crate::widgets::WidgetId;
use kurbo::Point;

/// An empty docking point on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct DockingTarget {
    /// Widget owning the docking point.
    pub owner: WidgetId,
    pub slot: Slot,
    /// Canvas position.
    pub position: Point,
    pub types: Vec<DockType>,
}

impl DockingTarget {
    pub fn accepts(&self, docks_to: &[DockType]) -> bool {
        compatible(docks_to, &self.types)
    }
}

/// Nearest target compatible with `docks_to` within `threshold` of `position`.
///
/// Targets are scanned in order and only a strictly closer one replaces the
/// current best, so the first of several equidistant targets wins.
pub fn find_nearest<'a>(
    position: Point,
    docks_to: &[DockType],
    targets: &'a [DockingTarget],
    threshold: f64,
) -> Option<&'a DockingTarget> {
    let mut best: Option<(&DockingTarget, f64)> = None;
    for target in targets.iter().filter(|t| t.accepts(docks_to)) {
        let dist = distance(position, target.position);
        if dist > threshold {
            continue;
        }
        if best.is_none_or(|(_, best_dist)| dist < best_dist) {
            best = Some((target, dist));
        }
    }
    best.map(|(target, _)| target)
}

impl Forest {
    /// Every empty docking point reachable from the roots, left to right then
    /// top to bottom.
    pub fn empty_docking_points(&self) -> Vec<DockingTarget> {
        let mut targets = Vec::new();
        for &root in self.roots() {
            for id in self.descendants(root) {
                let (Some(widget), Some(origin)) = (self.get(id), self.absolute_position(id)) else {
                    continue;
                };
                targets.extend(widget.docking_points().iter().filter(|dp| dp.is_empty()).map(|dp| {
                    DockingTarget {
                        owner: id,
                        slot: dp.slot,
                        position: origin + dp.position.to_vec2(),
                        types: dp.types.clone(),
                    }
                }));
            }
        }
        targets.sort_by(|a, b| {
            a.position
                .x
                .total_cmp(&b.position.x)
                .then(a.position.y.total_cmp(&b.position.y))
        });
        targets
    }

    /// Where `moving` would dock if dropped with its anchor at `position`.
    pub fn nearest_docking_point(&self, moving: WidgetId, position: Point) -> Option<DockingTarget> {
        let docks_to = self.get(moving)?.docks_to();
        let own_tree = self.descendants(moving);
        let targets: Vec<DockingTarget> = self
            .empty_docking_points()
            .into_iter()
            .filter(|t| !own_tree.contains(&t.owner))
            .collect();
        find_nearest(position, docks_to, &targets, self.config().docking_threshold()).cloned()
    }

    /// Show every empty docking point a widget with these tags could use.
    pub fn highlight_docking_points(&mut self, docks_to: &[DockType]) {
        let ids: Vec<WidgetId> = self
            .roots()
            .iter()
            .flat_map(|&root| self.descendants(root))
            .collect();
        for id in ids {
            if let Some(widget) = self.get_mut(id) {
                for dp in &mut widget.docking_points {
                    dp.visible = dp.is_empty() && dp.accepts(docks_to);
                }
            }
        }
    }

    pub fn clear_highlights(&mut self) {
        let ids: Vec<WidgetId> = self.roots().iter().flat_map(|&root| self.descendants(root)).collect();
        for id in ids {
            if let Some(widget) = self.get_mut(id) {
                for dp in &mut widget.docking_points {
                    dp.visible = false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::widgets::{BinaryOperation, Fraction, Number, StateSymbol, Symbol, WidgetTrait};

    fn target(owner: WidgetId, x: f64, y: f64, types: &[DockType]) -> DockingTarget {
        DockingTarget {
            owner,
            slot: Slot::Right,
            position: Point::new(x, y),
            types: types.to_vec(),
        }
    }

    #[test]
    fn test_find_nearest_picks_minimum() {
        let targets = vec![
            target(1, 50.0, 0.0, &[DockType::Symbol]),
            target(2, 10.0, 0.0, &[DockType::Symbol]),
            target(3, 30.0, 0.0, &[DockType::Symbol]),
        ];
        let best = find_nearest(Point::new(12.0, 0.0), &[DockType::Symbol], &targets, 75.0).unwrap();
        assert_eq!(best.owner, 2);
    }

    #[test]
    fn test_find_nearest_respects_threshold() {
        let targets = vec![target(1, 100.0, 0.0, &[DockType::Symbol])];
        assert!(find_nearest(Point::ZERO, &[DockType::Symbol], &targets, 75.0).is_none());
        assert!(find_nearest(Point::ZERO, &[DockType::Symbol], &targets, 100.0).is_some());
    }

    #[test]
    fn test_find_nearest_filters_types() {
        let targets = vec![
            target(1, 1.0, 0.0, &[DockType::Exponent]),
            target(2, 60.0, 0.0, &[DockType::Symbol]),
        ];
        let best = find_nearest(Point::ZERO, &[DockType::Symbol], &targets, 75.0).unwrap();
        assert_eq!(best.owner, 2);
        assert!(find_nearest(Point::ZERO, &[DockType::Operator], &targets, 75.0).is_none());
    }

    #[test]
    fn test_find_nearest_tie_keeps_first() {
        let targets = vec![
            target(1, -10.0, 0.0, &[DockType::Symbol]),
            target(2, 10.0, 0.0, &[DockType::Symbol]),
        ];
        let best = find_nearest(Point::ZERO, &[DockType::Symbol], &targets, 75.0).unwrap();
        assert_eq!(best.owner, 1);
    }

    #[test]
    fn test_empty_docking_points_sorted() {
        let mut f = Forest::new(EditorConfig::default());
        let frac = f.insert(Fraction::default());
        f.add_root(frac);
        let points = f.empty_docking_points();
        assert_eq!(points.len(), 3);
        for pair in points.windows(2) {
            let (a, b) = (pair[0].position, pair[1].position);
            assert!(a.x < b.x || (a.x == b.x && a.y <= b.y));
        }
    }

    #[test]
    fn test_occupied_points_are_not_targets() {
        let mut f = Forest::new(EditorConfig::default());
        let x = f.insert(Symbol::new("x"));
        f.add_root(x);
        let y = f.insert(Symbol::new("y"));
        f.dock(y, x, Slot::Right).unwrap();
        let targets = f.empty_docking_points();
        assert!(!targets.iter().any(|t| t.owner == x && t.slot == Slot::Right));
        assert!(targets.iter().any(|t| t.owner == y && t.slot == Slot::Right));
    }

    #[test]
    fn test_incompatible_widget_never_finds_a_point() {
        let mut f = Forest::new(EditorConfig::default());
        let two = f.insert(Number::new("2"));
        f.add_root(two);
        let plus = f.insert(BinaryOperation::new("+"));
        let x = f.insert(Symbol::new("x"));
        f.dock(x, plus, Slot::Right).unwrap();
        f.dock(plus, two, Slot::Right).unwrap();

        // state symbols only dock in chemistry
        let state = f.insert(StateSymbol::new("aq"));
        for target in f.empty_docking_points() {
            assert_eq!(f.nearest_docking_point(state, target.position), None);
        }
    }

    #[test]
    fn test_nearest_docking_point_on_canvas() {
        let mut f = Forest::new(EditorConfig::default());
        let x = f.insert(Symbol::new("x"));
        f.add_root(x);
        let two = f.insert(Number::new("2"));
        let sup = f.get(x).unwrap().docking_point(Slot::Superscript).unwrap().position;
        let found = f.nearest_docking_point(two, sup).unwrap();
        assert_eq!((found.owner, found.slot), (x, Slot::Superscript));
    }

    #[test]
    fn test_highlights() {
        let mut f = Forest::new(EditorConfig::default());
        let x = f.insert(Symbol::new("x"));
        f.add_root(x);
        f.highlight_docking_points(BinaryOperation::new("+").docks_to());
        let visible: Vec<Slot> = f
            .get(x)
            .unwrap()
            .docking_points()
            .iter()
            .filter(|dp| dp.visible)
            .map(|dp| dp.slot)
            .collect();
        assert_eq!(visible, vec![Slot::Right]);
        f.clear_highlights();
        assert!(f.get(x).unwrap().docking_points().iter().all(|dp| !dp.visible));
    }
}
