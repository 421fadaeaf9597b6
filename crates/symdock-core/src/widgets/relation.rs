//! Relations and reaction arrows.

use super::WidgetTrait;
use crate::config::EditorConfig;
use crate::docking::{DockType, DockingPoint, Slot};
use crate::format::{Format, NodeView};
use crate::layout::{LayoutContext, SlotLayout, place_right};
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// One relation in every notation.
struct Spelling {
    inputs: &'static [&'static str],
    glyph: &'static str,
    latex: &'static str,
    python: &'static str,
    mhchem: &'static str,
    mathml: &'static str,
}

const SPELLINGS: &[Spelling] = &[
    Spelling { inputs: &["="], glyph: "=", latex: "=", python: "==", mhchem: "=", mathml: "=" },
    Spelling { inputs: &["<"], glyph: "<", latex: "<", python: "<", mhchem: "<", mathml: "&lt;" },
    Spelling { inputs: &[">"], glyph: ">", latex: ">", python: ">", mhchem: ">", mathml: "&gt;" },
    Spelling { inputs: &["≤", "<="], glyph: "≤", latex: "\\leq", python: "<=", mhchem: "\\leq", mathml: "&#x2264;" },
    Spelling { inputs: &["≥", ">="], glyph: "≥", latex: "\\geq", python: ">=", mhchem: "\\geq", mathml: "&#x2265;" },
    Spelling { inputs: &["→", "->", "rightarrow"], glyph: "→", latex: "\\rightarrow", python: "->", mhchem: "->", mathml: "&#x2192;" },
    Spelling { inputs: &["⇌", "<=>", "equilibrium"], glyph: "⇌", latex: "\\rightleftharpoons", python: "<=>", mhchem: "<=>", mathml: "&#x21CC;" },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub relation: String,
}

impl Relation {
    pub fn new(relation: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
        }
    }

    fn spelling(&self) -> Option<&'static Spelling> {
        SPELLINGS
            .iter()
            .find(|s| s.inputs.iter().any(|input| *input == self.relation))
    }

    pub(crate) fn glyph(&self) -> &str {
        self.spelling().map_or(self.relation.as_str(), |s| s.glyph)
    }
}

impl WidgetTrait for Relation {
    const TYPE_NAME: &'static str = "Relation";

    fn docks_to(&self) -> &'static [DockType] {
        &[DockType::Relation]
    }

    fn docking_points(&self, _config: &EditorConfig) -> Vec<DockingPoint> {
        vec![DockingPoint::new(
            Slot::Right,
            &[DockType::Symbol, DockType::Operator],
        )]
    }

    fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
        let own = ctx.text_box(self.glyph()).inflate(ctx.gap(), 0.0) + Vec2::new(ctx.gap(), 0.0);
        place_right(ctx, slots, own.x1);
        own
    }

    fn format(&self, node: &NodeView<'_>, format: Format) -> String {
        let right = node.render_child(Slot::Right, format).unwrap_or_default();
        let raw = self.relation.as_str();
        let spelling = self.spelling();
        let op = match format {
            Format::Latex => spelling.map_or(raw, |s| s.latex),
            Format::Python | Format::Subscript => spelling.map_or(raw, |s| s.python),
            Format::MhChem => spelling.map_or(raw, |s| s.mhchem),
            Format::MathMl => return format!("<mo>{}</mo>{}", spelling.map_or(raw, |s| s.mathml), right),
        };
        if format == Format::Subscript {
            format!("{}{}", op, right)
        } else {
            format!(" {} {}", op, right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorMode;
    use crate::forest::Forest;
    use crate::widgets::{ChemicalElement, Symbol};

    #[test]
    fn test_equation() {
        let mut f = Forest::new(EditorConfig::default());
        let y = f.insert(Symbol::new("y"));
        f.add_root(y);
        let eq = f.insert(Relation::new("="));
        let x = f.insert(Symbol::new("x"));
        f.dock(eq, y, Slot::Right).unwrap();
        f.dock(x, eq, Slot::Right).unwrap();
        assert_eq!(f.text(y, Format::Latex), "y = x");
        assert_eq!(f.text(y, Format::Python), "y == x");
        assert_eq!(f.text(y, Format::MathMl), "<mi>y</mi><mo>=</mo><mi>x</mi>");
    }

    #[test]
    fn test_ascii_and_unicode_spellings_agree() {
        assert_eq!(
            Relation::new("<=").spelling().map(|s| s.latex),
            Relation::new("≤").spelling().map(|s| s.latex)
        );
    }

    #[test]
    fn test_reaction_arrow() {
        let mut f = Forest::new(EditorConfig::with_mode(EditorMode::Chemistry));
        let h = f.insert(ChemicalElement::new("H"));
        f.add_root(h);
        let arrow = f.insert(Relation::new("→"));
        let o = f.insert(ChemicalElement::new("O"));
        f.dock(arrow, h, Slot::Right).unwrap();
        f.dock(o, arrow, Slot::Right).unwrap();
        assert_eq!(f.text(h, Format::MhChem), "H -> O");
        assert_eq!(f.text(h, Format::Latex), "\\mathrm{H} \\rightarrow \\mathrm{O}");
    }
}
