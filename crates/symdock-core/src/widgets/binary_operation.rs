//! Arithmetic operator between two operands.

use super::WidgetTrait;
use crate::config::EditorConfig;
use crate::docking::{DockType, DockingPoint, Slot};
use crate::format::{Format, NodeView};
use crate::layout::{LayoutContext, SlotLayout, place_right};
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryOperation {
    pub operation: String,
}

impl BinaryOperation {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
        }
    }

    fn latex(&self) -> &str {
        match self.operation.as_str() {
            "−" | "-" => "-",
            "±" => "\\pm",
            "×" => "\\times",
            "÷" => "\\div",
            other => other,
        }
    }

    fn python(&self) -> &str {
        match self.operation.as_str() {
            "−" | "-" => "-",
            "×" => "*",
            "÷" => "/",
            other => other,
        }
    }

    fn mathml(&self) -> &str {
        match self.operation.as_str() {
            "−" | "-" => "&#x2212;",
            "±" => "&#x00B1;",
            "×" => "&#x00D7;",
            "÷" => "&#x00F7;",
            other => other,
        }
    }

    pub(crate) fn glyph(&self) -> &str {
        match self.operation.as_str() {
            "-" => "−",
            other => other,
        }
    }
}

impl WidgetTrait for BinaryOperation {
    const TYPE_NAME: &'static str = "BinaryOperation";

    fn docks_to(&self) -> &'static [DockType] {
        &[DockType::Operator]
    }

    fn docking_points(&self, _config: &EditorConfig) -> Vec<DockingPoint> {
        vec![DockingPoint::new(Slot::Right, &[DockType::Symbol])]
    }

    fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
        let glyph = ctx.text_box(self.glyph());
        let own = glyph.inflate(ctx.gap(), 0.0) + Vec2::new(ctx.gap(), 0.0);
        place_right(ctx, slots, own.x1);
        own
    }

    fn format(&self, node: &NodeView<'_>, format: Format) -> String {
        let right = node.render_child(Slot::Right, format).unwrap_or_default();
        match format {
            Format::Latex | Format::MhChem => format!(" {} {}", self.latex(), right),
            Format::Python => format!(" {} {}", self.python(), right),
            Format::MathMl => format!("<mo>{}</mo>{}", self.mathml(), right),
            Format::Subscript => format!("{}{}", self.python(), right),
        }
    }
}
