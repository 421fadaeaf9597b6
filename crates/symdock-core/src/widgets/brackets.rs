//! Grouping brackets.

use super::{WidgetTrait, operand_right, subscript_point, superscript_point};
use crate::config::{EditorConfig, EditorMode};
use crate::docking::{DockType, DockingPoint, Slot};
use crate::format::{Format, NodeView, continuation, mathml_scripts, python_power, tex_scripts};
use crate::layout::{LayoutContext, SlotLayout, enclose_argument, place_right, place_scripts};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketKind {
    #[default]
    Round,
    Square,
    Curly,
}

impl BracketKind {
    pub(crate) fn glyphs(self) -> (&'static str, &'static str) {
        match self {
            BracketKind::Round => ("(", ")"),
            BracketKind::Square => ("[", "]"),
            BracketKind::Curly => ("{", "}"),
        }
    }

    fn latex(self) -> (&'static str, &'static str) {
        match self {
            BracketKind::Round => ("(", ")"),
            BracketKind::Square => ("[", "]"),
            BracketKind::Curly => ("\\{", "\\}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brackets {
    #[serde(rename = "type", default)]
    pub kind: BracketKind,
}

impl Brackets {
    pub fn new(kind: BracketKind) -> Self {
        Self { kind }
    }
}

impl WidgetTrait for Brackets {
    const TYPE_NAME: &'static str = "Brackets";

    fn docks_to(&self) -> &'static [DockType] {
        &[
            DockType::Symbol,
            DockType::Exponent,
            DockType::DifferentialArgument,
        ]
    }

    fn docking_points(&self, config: &EditorConfig) -> Vec<DockingPoint> {
        let mut points = vec![
            DockingPoint::new(Slot::Argument, &[DockType::Symbol]).expanded(),
            superscript_point(),
        ];
        if config.mode == EditorMode::Chemistry {
            points.push(subscript_point());
        }
        points.push(operand_right(config));
        points
    }

    fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
        let (open, close) = self.kind.glyphs();
        let own = enclose_argument(ctx, slots, open, close, 0.0);
        let x = place_scripts(slots, own);
        place_right(ctx, slots, x);
        own
    }

    fn format(&self, node: &NodeView<'_>, format: Format) -> String {
        let argument = node.render_child(Slot::Argument, format).unwrap_or_default();
        let sub = node.render_child(Slot::Subscript, format);
        let sup = node.render_child(Slot::Superscript, format);
        let body = match format {
            Format::Latex => {
                let (open, close) = self.kind.latex();
                format!("\\left{}{}\\right{}{}", open, argument, close, tex_scripts(sub, sup))
            }
            Format::MhChem => {
                let (open, close) = self.kind.glyphs();
                let sup = sup.map(|s| format!("^{{{}}}", s)).unwrap_or_default();
                format!("{}{}{}{}{}", open, argument, close, sub.unwrap_or_default(), sup)
            }
            Format::Python => format!("({}){}", argument, python_power(sup)),
            Format::MathMl => {
                let (open, close) = self.kind.glyphs();
                let base = format!("<mrow><mo>{}</mo>{}<mo>{}</mo></mrow>", open, argument, close);
                mathml_scripts(base, sub, sup)
            }
            Format::Subscript => format!("({})", argument),
        };
        body + &continuation(node, format)
    }
}
