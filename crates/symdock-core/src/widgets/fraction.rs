//! Fraction: numerator over denominator.

use super::{WidgetTrait, operand_right};
use crate::config::EditorConfig;
use crate::docking::{DockType, DockingPoint, Slot};
use crate::format::{Format, NodeView, continuation};
use crate::layout::{LayoutContext, SlotLayout, place_fraction};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {}

impl WidgetTrait for Fraction {
    const TYPE_NAME: &'static str = "Fraction";

    fn docks_to(&self) -> &'static [DockType] {
        &[DockType::Symbol, DockType::Exponent]
    }

    fn docking_points(&self, config: &EditorConfig) -> Vec<DockingPoint> {
        vec![
            DockingPoint::new(Slot::Numerator, &[DockType::Symbol]).expanded(),
            DockingPoint::new(Slot::Denominator, &[DockType::Symbol]).expanded(),
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
            Format::Python => format!("({})/({})", n, d),
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
    use crate::widgets::{Number, Symbol};

    #[test]
    fn test_fraction_formats() {
        let mut f = Forest::new(EditorConfig::default());
        let frac = f.insert(Fraction::default());
        f.add_root(frac);
        let one = f.insert(Number::new("1"));
        let x = f.insert(Symbol::new("x"));
        f.dock(one, frac, Slot::Numerator).unwrap();
        f.dock(x, frac, Slot::Denominator).unwrap();
        assert_eq!(f.text(frac, Format::Latex), "\\frac{1}{x}");
        assert_eq!(f.text(frac, Format::Python), "(1)/(x)");
        assert_eq!(
            f.text(frac, Format::MathMl),
            "<mfrac><mrow><mn>1</mn></mrow><mrow><mi>x</mi></mrow></mfrac>"
        );
    }

    #[test]
    fn test_empty_slots_are_expanded() {
        let points = Fraction::default().docking_points(&EditorConfig::default());
        assert!(points[0].must_expand && points[1].must_expand);
        assert!(!points[2].must_expand);
    }
}
