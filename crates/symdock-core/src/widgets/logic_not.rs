//! Boolean negation.

use super::{WidgetTrait, operand_right};
use crate::config::{EditorConfig, LogicSyntax};
use crate::docking::{DockType, DockingPoint, Slot};
use crate::format::{Format, NodeView, continuation};
use crate::layout::{LayoutContext, SlotLayout, place_right};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicNot {}

impl WidgetTrait for LogicNot {
    const TYPE_NAME: &'static str = "LogicNot";

    fn docks_to(&self) -> &'static [DockType] {
        &[DockType::Symbol]
    }

    fn docking_points(&self, config: &EditorConfig) -> Vec<DockingPoint> {
        vec![
            DockingPoint::new(Slot::Argument, &[DockType::Symbol]).expanded(),
            operand_right(config),
        ]
    }

    /// `¬` before the argument, or a bar over it in binary syntax.
    fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
        let gap = ctx.gap();
        let argument = slots.extent_or(Slot::Argument, ctx.placeholder());
        let own = match ctx.config().logic_syntax {
            LogicSyntax::Logic => {
                let sign = ctx.text_box("¬");
                let argument_x = sign.x1 + gap / 2.0 - argument.x0;
                slots.place(Slot::Argument, Point::new(argument_x, 0.0));
                Rect::new(0.0, sign.y0.min(argument.y0), argument_x + argument.x1, sign.y1.max(argument.y1))
            }
            LogicSyntax::Binary => {
                slots.place(Slot::Argument, Point::new(-argument.x0, 0.0));
                Rect::new(0.0, argument.y0 - 2.0 * gap, argument.width(), argument.y1)
            }
        };
        place_right(ctx, slots, own.x1);
        own
    }

    fn format(&self, node: &NodeView<'_>, format: Format) -> String {
        let syntax = node.options().logic_syntax;
        let argument = node.render_child(Slot::Argument, format).unwrap_or_default();
        let body = match (format, syntax) {
            (Format::Latex | Format::MhChem, LogicSyntax::Logic) => format!("\\lnot{{{}}}", argument),
            (Format::Latex | Format::MhChem, LogicSyntax::Binary) => format!("\\overline{{{}}}", argument),
            (Format::Python | Format::Subscript, _) => format!("~({})", argument),
            (Format::MathMl, LogicSyntax::Logic) => {
                format!("<mrow><mo>&#x00AC;</mo><mrow>{}</mrow></mrow>", argument)
            }
            (Format::MathMl, LogicSyntax::Binary) => {
                format!("<mover><mrow>{}</mrow><mo>&#x00AF;</mo></mover>", argument)
            }
        };
        body + &continuation(node, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorMode;
    use crate::forest::Forest;
    use crate::widgets::Symbol;

    #[test]
    fn test_not_formats() {
        let mut f = Forest::new(EditorConfig::with_mode(EditorMode::Logic));
        let not = f.insert(LogicNot::default());
        f.add_root(not);
        let a = f.insert(Symbol::new("A"));
        f.dock(a, not, Slot::Argument).unwrap();
        assert_eq!(f.text(not, Format::Latex), "\\lnot{A}");
        assert_eq!(f.text(not, Format::Python), "~(A)");
    }

    #[test]
    fn test_overline_in_binary_syntax() {
        let config = EditorConfig {
            logic_syntax: LogicSyntax::Binary,
            ..EditorConfig::with_mode(EditorMode::Logic)
        };
        let mut f = Forest::new(config);
        let not = f.insert(LogicNot::default());
        f.add_root(not);
        let a = f.insert(Symbol::new("A"));
        f.dock(a, not, Slot::Argument).unwrap();
        assert_eq!(f.text(not, Format::Latex), "\\overline{A}");
        // the bar sits above the argument
        let bar_top = f.get(not).unwrap().bounds().y0;
        assert!(bar_top < f.get(a).unwrap().subtree_bounds().y0);
    }
}
