//! Differential: `d`, `∆` or `δ` applied to an argument.

use super::{WidgetTrait, operand_right};
use crate::config::EditorConfig;
use crate::docking::{DockType, DockingPoint, Slot};
use crate::format::{Format, NodeView, continuation, escape_xml, mathml_scripts, python_power, tex_scripts};
use crate::layout::{LayoutContext, SlotLayout, place_right};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Differential {
    pub letter: String,
}

impl Differential {
    pub fn new(letter: impl Into<String>) -> Self {
        Self {
            letter: letter.into(),
        }
    }

    fn latex_letter(&self) -> &'static str {
        match self.letter.as_str() {
            "∆" | "Δ" => "\\Delta",
            "δ" => "\\delta",
            _ => "\\mathrm{d}",
        }
    }

    fn python_letter(&self) -> &'static str {
        match self.letter.as_str() {
            "∆" | "Δ" => "Delta",
            "δ" => "delta",
            _ => "d",
        }
    }
}

impl WidgetTrait for Differential {
    const TYPE_NAME: &'static str = "Differential";

    fn docks_to(&self) -> &'static [DockType] {
        &[DockType::Differential]
    }

    fn docking_points(&self, config: &EditorConfig) -> Vec<DockingPoint> {
        vec![
            DockingPoint::new(Slot::Order, &[DockType::DifferentialOrder]),
            DockingPoint::new(Slot::Argument, &[DockType::DifferentialArgument]).expanded(),
            operand_right(config),
        ]
    }

    fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
        let own = ctx.text_box(&self.letter);
        slots.place(Slot::Order, Point::new(own.x1, own.y0));
        let argument = slots.extent_or(Slot::Argument, ctx.placeholder());
        let argument_x = own.x1 + slots.advance(Slot::Order) + ctx.gap() / 2.0 - argument.x0;
        slots.place(Slot::Argument, Point::new(argument_x, 0.0));
        place_right(ctx, slots, argument_x + argument.x1);
        own
    }

    fn format(&self, node: &NodeView<'_>, format: Format) -> String {
        let order = node.render_child(Slot::Order, format);
        let argument = node.render_child(Slot::Argument, format).unwrap_or_default();
        let body = match format {
            Format::Latex | Format::MhChem => {
                format!("{}{}{}", self.latex_letter(), tex_scripts(None, order), argument)
            }
            Format::Python => format!("{}{}{}", self.python_letter(), argument, python_power(order)),
            Format::MathMl => {
                let letter = format!("<mi>{}</mi>", escape_xml(&self.letter));
                format!("{}{}", mathml_scripts(letter, None, order), argument)
            }
            Format::Subscript => format!("{}{}", self.python_letter(), argument),
        };
        body + &continuation(node, format)
    }
}
