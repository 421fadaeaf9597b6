//! Letter symbol.

use super::{WidgetTrait, operand_right, subscript_point, superscript_point};
use crate::config::EditorConfig;
use crate::docking::{DockType, DockingPoint, Slot};
use crate::format::{Format, NodeView, continuation, escape_xml, mathml_scripts, python_power, tex_scripts};
use crate::greek;
use crate::layout::{LayoutContext, SlotLayout, place_right, place_scripts};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

const PRIME: &str = "prime";

/// A single letter, optionally primed, with scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub letter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
}

impl Symbol {
    pub fn new(letter: impl Into<String>) -> Self {
        Self {
            letter: letter.into(),
            modifier: None,
        }
    }

    /// The primed form of `letter`, e.g. `x'`.
    pub fn primed(letter: impl Into<String>) -> Self {
        Self {
            letter: letter.into(),
            modifier: Some(PRIME.to_string()),
        }
    }

    pub fn is_primed(&self) -> bool {
        self.modifier.as_deref() == Some(PRIME)
    }

    /// Text drawn on the canvas.
    pub fn display(&self) -> String {
        if self.is_primed() {
            format!("{}′", self.letter)
        } else {
            self.letter.clone()
        }
    }

    fn latex_letter(&self) -> String {
        let letter = greek::to_latex(&self.letter);
        if self.is_primed() { format!("{}'", letter) } else { letter }
    }

    fn python_letter(&self) -> String {
        let letter = greek::to_python(&self.letter);
        if self.is_primed() { format!("{}_prime", letter) } else { letter }
    }

    /// Flattened comparison key: letter plus flattened subscript.
    pub(crate) fn key(&self, node: &NodeView<'_>) -> String {
        let mut key = self.python_letter();
        if let Some(sub) = node.render_child(Slot::Subscript, Format::Subscript) {
            key.push('_');
            key.push_str(&sub);
        }
        key
    }
}

impl WidgetTrait for Symbol {
    const TYPE_NAME: &'static str = "Symbol";

    fn docks_to(&self) -> &'static [DockType] {
        &[
            DockType::Symbol,
            DockType::Exponent,
            DockType::Subscript,
            DockType::DifferentialArgument,
        ]
    }

    fn docking_points(&self, config: &EditorConfig) -> Vec<DockingPoint> {
        vec![superscript_point(), subscript_point(), operand_right(config)]
    }

    fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
        let own = ctx.italic_box(&self.display());
        let x = place_scripts(slots, own);
        place_right(ctx, slots, x);
        own
    }

    fn format(&self, node: &NodeView<'_>, format: Format) -> String {
        let sub = |f| node.render_child(Slot::Subscript, f);
        let sup = |f| node.render_child(Slot::Superscript, f);
        let body = match format {
            Format::Latex | Format::MhChem => {
                format!("{}{}", self.latex_letter(), tex_scripts(sub(format), sup(format)))
            }
            Format::Python => format!("{}{}", self.key(node), python_power(sup(format))),
            Format::MathMl => mathml_scripts(
                format!("<mi>{}</mi>", escape_xml(&self.display())),
                sub(format),
                sup(format),
            ),
            Format::Subscript => self.key(node),
        };
        body + &continuation(node, format)
    }
}
