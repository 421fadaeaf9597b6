//! Absolute value bars.

use super::{WidgetTrait, operand_right, superscript_point};
use crate::config::EditorConfig;
use crate::docking::{DockType, DockingPoint, Slot};
use crate::format::{Format, NodeView, continuation, mathml_scripts, python_power, tex_scripts};
use crate::layout::{LayoutContext, SlotLayout, enclose_argument, place_right, place_scripts};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsoluteValue {}

impl WidgetTrait for AbsoluteValue {
    const TYPE_NAME: &'static str = "AbsoluteValue";

    fn docks_to(&self) -> &'static [DockType] {
        &[DockType::Symbol, DockType::Exponent]
    }

    fn docking_points(&self, config: &EditorConfig) -> Vec<DockingPoint> {
        vec![
            DockingPoint::new(Slot::Argument, &[DockType::Symbol]).expanded(),
            superscript_point(),
            operand_right(config),
        ]
    }

    fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
        let own = enclose_argument(ctx, slots, "|", "|", 0.0);
        let x = place_scripts(slots, own);
        place_right(ctx, slots, x);
        own
    }

    fn format(&self, node: &NodeView<'_>, format: Format) -> String {
        let argument = node.render_child(Slot::Argument, format).unwrap_or_default();
        let sup = node.render_child(Slot::Superscript, format);
        let body = match format {
            Format::Latex | Format::MhChem => {
                format!("\\left|{}\\right|{}", argument, tex_scripts(None, sup))
            }
            Format::Python => format!("abs({}){}", argument, python_power(sup)),
            Format::MathMl => mathml_scripts(
                format!("<mrow><mo>|</mo>{}<mo>|</mo></mrow>", argument),
                None,
                sup,
            ),
            Format::Subscript => format!("abs({})", argument),
        };
        body + &continuation(node, format)
    }
}
