//! Square root.

use super::{WidgetTrait, operand_right};
use crate::config::EditorConfig;
use crate::docking::{DockType, DockingPoint, Slot};
use crate::format::{Format, NodeView, continuation};
use crate::layout::{LayoutContext, SlotLayout, place_right};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Radix {}

impl WidgetTrait for Radix {
    const TYPE_NAME: &'static str = "Radix";

    fn docks_to(&self) -> &'static [DockType] {
        &[DockType::Symbol, DockType::Exponent]
    }

    fn docking_points(&self, config: &EditorConfig) -> Vec<DockingPoint> {
        vec![
            DockingPoint::new(Slot::Argument, &[DockType::Symbol]).expanded(),
            operand_right(config),
        ]
    }

    /// The radical sign sits left of the argument and its bar runs over the
    /// argument's full width, so the box grows with the argument.
    fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
        let gap = ctx.gap();
        let sign = ctx.text_box("√");
        let argument = slots.extent_or(Slot::Argument, ctx.placeholder());
        let argument_x = sign.x1 + gap - argument.x0;
        slots.place(Slot::Argument, Point::new(argument_x, 0.0));
        let own = Rect::new(
            0.0,
            (argument.y0 - gap).min(sign.y0),
            argument_x + argument.x1 + gap,
            argument.y1.max(sign.y1),
        );
        place_right(ctx, slots, own.x1);
        own
    }

    fn format(&self, node: &NodeView<'_>, format: Format) -> String {
        let argument = node.render_child(Slot::Argument, format).unwrap_or_default();
        let body = match format {
            Format::Latex | Format::MhChem => format!("\\sqrt{{{}}}", argument),
            Format::Python | Format::Subscript => format!("sqrt({})", argument),
            Format::MathMl => format!("<msqrt>{}</msqrt>", argument),
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
    fn test_radix_formats() {
        let mut f = Forest::new(EditorConfig::default());
        let root = f.insert(Radix::default());
        f.add_root(root);
        let x = f.insert(Symbol::new("x"));
        f.dock(x, root, Slot::Argument).unwrap();
        assert_eq!(f.text(root, Format::Latex), "\\sqrt{x}");
        assert_eq!(f.text(root, Format::Python), "sqrt(x)");
        assert_eq!(f.text(root, Format::MathMl), "<msqrt><mi>x</mi></msqrt>");
    }

    #[test]
    fn test_radical_widens_with_argument() {
        let mut f = Forest::new(EditorConfig::default());
        let narrow = f.insert(Radix::default());
        f.add_root(narrow);
        let wide = f.insert(Radix::default());
        f.add_root(wide);
        let x = f.insert(Symbol::new("x"));
        let xyz = f.insert(Symbol::new("xyz"));
        f.dock(x, narrow, Slot::Argument).unwrap();
        f.dock(xyz, wide, Slot::Argument).unwrap();
        assert!(f.get(wide).unwrap().bounds().width() > f.get(narrow).unwrap().bounds().width());
    }
}
