//! Derivative: a fraction of differentials, `dy/dx`.

use super::{WidgetKind, WidgetTrait, operand_right};
use crate::config::EditorConfig;
use crate::docking::{DockType, DockingPoint, Slot};
use crate::format::{Format, NodeView, continuation};
use crate::layout::{LayoutContext, SlotLayout, place_fraction};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivative {}

impl Derivative {
    /// `Derivative(y, x, x, ...)` when numerator and denominator are plain
    /// differential chains; `None` otherwise.
    fn python(&self, node: &NodeView<'_>) -> Option<String> {
        let numerator = node.child(Slot::Numerator)?;
        if !matches!(numerator.kind(), WidgetKind::Differential(_)) {
            return None;
        }
        let function = numerator.render_child(Slot::Argument, Format::Python)?;

        let mut variables = Vec::new();
        let mut current = node.child(Slot::Denominator);
        while let Some(differential) = current {
            if !matches!(differential.kind(), WidgetKind::Differential(_)) {
                return None;
            }
            let variable = differential.child(Slot::Argument)?;
            // The argument's own continuation belongs to the chain, not the variable.
            let name = match variable.kind() {
                WidgetKind::Symbol(symbol) => symbol.key(&variable),
                _ => return None,
            };
            let order = match differential.child(Slot::Order) {
                Some(order) => match order.kind() {
                    WidgetKind::Num(number) => number.as_integer()?,
                    _ => return None,
                },
                None => 1,
            };
            for _ in 0..order {
                variables.push(name.clone());
            }
            current = differential.child(Slot::Right);
        }
        if variables.is_empty() {
            return None;
        }
        Some(format!("Derivative({}, {})", function, variables.join(", ")))
    }
}

impl WidgetTrait for Derivative {
    const TYPE_NAME: &'static str = "Derivative";

    fn docks_to(&self) -> &'static [DockType] {
        &[DockType::Symbol]
    }

    fn docking_points(&self, config: &EditorConfig) -> Vec<DockingPoint> {
        vec![
            DockingPoint::new(Slot::Numerator, &[DockType::Differential]).expanded(),
            DockingPoint::new(Slot::Denominator, &[DockType::Differential]).expanded(),
            operand_right(config),
        ]
    }

    fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
        place_fraction(ctx, slots)
    }

    fn format(&self, node: &NodeView<'_>, format: Format) -> String {
        let part = |slot| node.render_child(slot, format).unwrap_or_default();
        let (n, d) = (part(Slot::Numerator), part(Slot::Denominator));
        let body = match format {
            Format::Latex | Format::MhChem => format!("\\frac{{{}}}{{{}}}", n, d),
            Format::Python => self
                .python(node)
                .unwrap_or_else(|| format!("({})/({})", n, d)),
            Format::MathMl => format!("<mfrac><mrow>{}</mrow><mrow>{}</mrow></mfrac>", n, d),
            Format::Subscript => format!("({})/({})", n, d),
        };
        body + &continuation(node, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::Forest;
    use crate::widgets::{Differential, Number, Symbol, WidgetId};

    /// `d^order y / d^order x`, returning (derivative, numerator, denominator).
    fn derivative(f: &mut Forest, order: Option<&str>) -> (WidgetId, WidgetId, WidgetId) {
        let der = f.insert(Derivative::default());
        f.add_root(der);
        let top = f.insert(Differential::new("d"));
        let bottom = f.insert(Differential::new("d"));
        let y = f.insert(Symbol::new("y"));
        let x = f.insert(Symbol::new("x"));
        f.dock(y, top, Slot::Argument).unwrap();
        f.dock(x, bottom, Slot::Argument).unwrap();
        if let Some(order) = order {
            let a = f.insert(Number::new(order));
            let b = f.insert(Number::new(order));
            f.dock(a, top, Slot::Order).unwrap();
            f.dock(b, bottom, Slot::Order).unwrap();
        }
        f.dock(top, der, Slot::Numerator).unwrap();
        f.dock(bottom, der, Slot::Denominator).unwrap();
        (der, top, bottom)
    }

    #[test]
    fn test_first_derivative() {
        let mut f = Forest::new(EditorConfig::default());
        let (der, _, _) = derivative(&mut f, None);
        assert_eq!(f.text(der, Format::Latex), "\\frac{\\mathrm{d}y}{\\mathrm{d}x}");
        assert_eq!(f.text(der, Format::Python), "Derivative(y, x)");
    }

    #[test]
    fn test_second_derivative_repeats_variable() {
        let mut f = Forest::new(EditorConfig::default());
        let (der, _, _) = derivative(&mut f, Some("2"));
        assert_eq!(f.text(der, Format::Python), "Derivative(y, x, x)");
    }

    #[test]
    fn test_mixed_partials_follow_chain() {
        let mut f = Forest::new(EditorConfig::default());
        let (der, _, bottom) = derivative(&mut f, None);
        let dt = f.insert(Differential::new("d"));
        let t = f.insert(Symbol::new("t"));
        f.dock(t, dt, Slot::Argument).unwrap();
        f.dock(dt, bottom, Slot::Right).unwrap();
        assert_eq!(f.text(der, Format::Python), "Derivative(y, x, t)");
    }

    #[test]
    fn test_incomplete_derivative_falls_back_to_division() {
        let mut f = Forest::new(EditorConfig::default());
        let der = f.insert(Derivative::default());
        f.add_root(der);
        assert_eq!(f.text(der, Format::Python), "()/()");
    }

    #[test]
    fn test_only_differentials_dock() {
        let mut f = Forest::new(EditorConfig::default());
        let der = f.insert(Derivative::default());
        f.add_root(der);
        let y = f.insert(Symbol::new("y"));
        assert!(f.dock(y, der, Slot::Numerator).is_err());
    }
}
