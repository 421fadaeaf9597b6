//! Boolean constants.

use super::{WidgetTrait, operand_right};
use crate::config::{EditorConfig, LogicSyntax};
use crate::docking::{DockType, DockingPoint};
use crate::format::{Format, NodeView, continuation};
use crate::layout::{LayoutContext, SlotLayout, place_right};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicLiteral {
    pub value: bool,
}

impl LogicLiteral {
    pub fn new(value: bool) -> Self {
        Self { value }
    }

    pub(crate) fn glyph(&self, syntax: LogicSyntax) -> &'static str {
        match (syntax, self.value) {
            (LogicSyntax::Logic, true) => "T",
            (LogicSyntax::Logic, false) => "F",
            (LogicSyntax::Binary, true) => "1",
            (LogicSyntax::Binary, false) => "0",
        }
    }
}

impl WidgetTrait for LogicLiteral {
    const TYPE_NAME: &'static str = "LogicLiteral";

    fn docks_to(&self) -> &'static [DockType] {
        &[DockType::Symbol]
    }

    fn docking_points(&self, config: &EditorConfig) -> Vec<DockingPoint> {
        vec![operand_right(config)]
    }

    fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
        let own = ctx.text_box(self.glyph(ctx.config().logic_syntax));
        place_right(ctx, slots, own.x1);
        own
    }

    fn format(&self, node: &NodeView<'_>, format: Format) -> String {
        let syntax = node.options().logic_syntax;
        let glyph = self.glyph(syntax);
        let body = match (format, syntax) {
            (Format::Latex | Format::MhChem, LogicSyntax::Logic) => format!("\\mathsf{{{}}}", glyph),
            (Format::Latex | Format::MhChem, LogicSyntax::Binary) => glyph.to_string(),
            (Format::Python | Format::Subscript, _) => {
                if self.value { "True".to_string() } else { "False".to_string() }
            }
            (Format::MathMl, LogicSyntax::Logic) => format!("<mi>{}</mi>", glyph),
            (Format::MathMl, LogicSyntax::Binary) => format!("<mn>{}</mn>", glyph),
        };
        body + &continuation(node, format)
    }
}
