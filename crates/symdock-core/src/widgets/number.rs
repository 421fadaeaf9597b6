//! Numeric literal.

use super::{WidgetTrait, operand_right, superscript_point};
use crate::config::{EditorConfig, EditorMode};
use crate::docking::{DockType, DockingPoint, Slot};
use crate::format::{Format, NodeView, continuation, escape_xml, mathml_scripts, python_power, tex_scripts};
use crate::layout::{LayoutContext, SlotLayout, place_right, place_scripts};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Number {
    pub significand: String,
}

impl Number {
    pub fn new(significand: impl Into<String>) -> Self {
        Self {
            significand: significand.into(),
        }
    }

    /// The significand as a whole number, if it is one.
    pub fn as_integer(&self) -> Option<u32> {
        self.significand.trim().parse().ok()
    }
}

impl WidgetTrait for Number {
    const TYPE_NAME: &'static str = "Num";

    fn docks_to(&self) -> &'static [DockType] {
        &[
            DockType::Symbol,
            DockType::Exponent,
            DockType::Subscript,
            DockType::DifferentialOrder,
            DockType::TopLeft,
            DockType::BottomLeft,
        ]
    }

    fn docking_points(&self, config: &EditorConfig) -> Vec<DockingPoint> {
        let mut points = Vec::with_capacity(2);
        if config.mode == EditorMode::Maths {
            points.push(superscript_point());
        }
        points.push(operand_right(config));
        points
    }

    fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
        let own = ctx.text_box(&self.significand);
        let x = place_scripts(slots, own);
        place_right(ctx, slots, x);
        own
    }

    fn format(&self, node: &NodeView<'_>, format: Format) -> String {
        let sup = node.render_child(Slot::Superscript, format);
        let body = match format {
            Format::Latex | Format::MhChem => format!("{}{}", self.significand, tex_scripts(None, sup)),
            Format::Python => format!("{}{}", self.significand, python_power(sup)),
            Format::MathMl => mathml_scripts(format!("<mn>{}</mn>", escape_xml(&self.significand)), None, sup),
            Format::Subscript => self.significand.clone(),
        };
        body + &continuation(node, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::Forest;
    use crate::widgets::Symbol;

    #[test]
    fn test_number_times_symbol() {
        let mut f = Forest::new(EditorConfig::default());
        let two = f.insert(Number::new("2"));
        f.add_root(two);
        let x = f.insert(Symbol::new("x"));
        f.dock(x, two, Slot::Right).unwrap();
        assert_eq!(f.text(two, Format::Python), "2*x");
        assert_eq!(f.text(two, Format::Latex), "2 x");
    }

    #[test]
    fn test_number_times_number_uses_cdot() {
        let mut f = Forest::new(EditorConfig::default());
        let two = f.insert(Number::new("2"));
        f.add_root(two);
        let three = f.insert(Number::new("3"));
        f.dock(three, two, Slot::Right).unwrap();
        assert_eq!(f.text(two, Format::Latex), "2 \\cdot 3");
        assert_eq!(f.text(two, Format::Python), "2*3");
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(Number::new("3").as_integer(), Some(3));
        assert_eq!(Number::new("2.5").as_integer(), None);
    }
}
