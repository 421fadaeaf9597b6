//! Boolean connectives.

use super::WidgetTrait;
use crate::config::{EditorConfig, LogicSyntax};
use crate::docking::{DockType, DockingPoint, Slot};
use crate::format::{Format, NodeView};
use crate::layout::{LayoutContext, SlotLayout, place_right};
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicOperator {
    And,
    Or,
    Xor,
    Equiv,
}

impl LogicOperator {
    pub(crate) fn glyph(self, syntax: LogicSyntax) -> &'static str {
        match (self, syntax) {
            (LogicOperator::And, LogicSyntax::Logic) => "∧",
            (LogicOperator::And, LogicSyntax::Binary) => "·",
            (LogicOperator::Or, LogicSyntax::Logic) => "∨",
            (LogicOperator::Or, LogicSyntax::Binary) => "+",
            (LogicOperator::Xor, LogicSyntax::Logic) => "⊻",
            (LogicOperator::Xor, LogicSyntax::Binary) => "⊕",
            (LogicOperator::Equiv, _) => "≡",
        }
    }

    fn latex(self, syntax: LogicSyntax) -> &'static str {
        match (self, syntax) {
            (LogicOperator::And, LogicSyntax::Logic) => "\\land",
            (LogicOperator::And, LogicSyntax::Binary) => "\\cdot",
            (LogicOperator::Or, LogicSyntax::Logic) => "\\lor",
            (LogicOperator::Or, LogicSyntax::Binary) => "+",
            (LogicOperator::Xor, LogicSyntax::Logic) => "\\veebar",
            (LogicOperator::Xor, LogicSyntax::Binary) => "\\oplus",
            (LogicOperator::Equiv, _) => "\\equiv",
        }
    }

    fn python(self) -> &'static str {
        match self {
            LogicOperator::And => "&",
            LogicOperator::Or => "|",
            LogicOperator::Xor => "^",
            LogicOperator::Equiv => "==",
        }
    }

    fn mathml(self, syntax: LogicSyntax) -> &'static str {
        match (self, syntax) {
            (LogicOperator::And, LogicSyntax::Logic) => "&#x2227;",
            (LogicOperator::And, LogicSyntax::Binary) => "&#x22C5;",
            (LogicOperator::Or, LogicSyntax::Logic) => "&#x2228;",
            (LogicOperator::Or, LogicSyntax::Binary) => "+",
            (LogicOperator::Xor, LogicSyntax::Logic) => "&#x22BB;",
            (LogicOperator::Xor, LogicSyntax::Binary) => "&#x2295;",
            (LogicOperator::Equiv, _) => "&#x2261;",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicBinaryOperation {
    pub operation: LogicOperator,
}

impl LogicBinaryOperation {
    pub fn new(operation: LogicOperator) -> Self {
        Self { operation }
    }
}

impl WidgetTrait for LogicBinaryOperation {
    const TYPE_NAME: &'static str = "LogicBinaryOperation";

    fn docks_to(&self) -> &'static [DockType] {
        &[DockType::Operator]
    }

    fn docking_points(&self, _config: &EditorConfig) -> Vec<DockingPoint> {
        vec![DockingPoint::new(Slot::Right, &[DockType::Symbol])]
    }

    fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
        let glyph = self.operation.glyph(ctx.config().logic_syntax);
        let own = ctx.text_box(glyph).inflate(ctx.gap(), 0.0) + Vec2::new(ctx.gap(), 0.0);
        place_right(ctx, slots, own.x1);
        own
    }

    fn format(&self, node: &NodeView<'_>, format: Format) -> String {
        let syntax = node.options().logic_syntax;
        let right = node.render_child(Slot::Right, format).unwrap_or_default();
        match format {
            Format::Latex | Format::MhChem => format!(" {} {}", self.operation.latex(syntax), right),
            Format::Python => format!(" {} {}", self.operation.python(), right),
            Format::MathMl => format!("<mo>{}</mo>{}", self.operation.mathml(syntax), right),
            Format::Subscript => format!("{}{}", self.operation.python(), right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorMode;
    use crate::forest::Forest;
    use crate::widgets::{Symbol, WidgetId};

    fn a_op_b(f: &mut Forest, op: LogicOperator) -> WidgetId {
        let a = f.insert(Symbol::new("A"));
        f.add_root(a);
        let op = f.insert(LogicBinaryOperation::new(op));
        let b = f.insert(Symbol::new("B"));
        f.dock(op, a, Slot::Right).unwrap();
        f.dock(b, op, Slot::Right).unwrap();
        a
    }

    #[test]
    fn test_logic_syntax() {
        let mut f = Forest::new(EditorConfig::with_mode(EditorMode::Logic));
        let a = a_op_b(&mut f, LogicOperator::Or);
        assert_eq!(f.text(a, Format::Latex), "A \\lor B");
        assert_eq!(f.text(a, Format::Python), "A | B");
    }

    #[test]
    fn test_binary_syntax() {
        let config = EditorConfig {
            logic_syntax: LogicSyntax::Binary,
            ..EditorConfig::with_mode(EditorMode::Logic)
        };
        let mut f = Forest::new(config);
        let a = a_op_b(&mut f, LogicOperator::Xor);
        assert_eq!(f.text(a, Format::Latex), "A \\oplus B");
        assert_eq!(f.text(a, Format::Python), "A ^ B");
    }

    #[test]
    fn test_implicit_and_between_symbols() {
        let mut f = Forest::new(EditorConfig::with_mode(EditorMode::Logic));
        let a = f.insert(Symbol::new("A"));
        f.add_root(a);
        let b = f.insert(Symbol::new("B"));
        f.dock(b, a, Slot::Right).unwrap();
        assert_eq!(f.text(a, Format::Latex), "A \\land B");
        assert_eq!(f.text(a, Format::Python), "A & B");
    }
}
