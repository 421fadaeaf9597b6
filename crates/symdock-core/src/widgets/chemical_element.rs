//! Chemical element, with optional isotope prescripts and charge.

use super::{WidgetTrait, operand_right, subscript_point, superscript_point};
use crate::config::EditorConfig;
use crate::docking::{DockType, DockingPoint, Slot};
use crate::format::{Format, NodeView, continuation, escape_xml, mathml_scripts, tex_scripts};
use crate::layout::{LayoutContext, SlotLayout, place_prescripts, place_right, place_scripts};
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Docking points shared by elements and particles.
pub(super) fn nuclide_points(config: &EditorConfig) -> Vec<DockingPoint> {
    vec![
        DockingPoint::new(Slot::MassNumber, &[DockType::TopLeft]),
        DockingPoint::new(Slot::ProtonNumber, &[DockType::BottomLeft]),
        superscript_point(),
        subscript_point(),
        operand_right(config),
    ]
}

/// Shift `glyph` right far enough for the prescripts, then place every slot.
pub(super) fn layout_nuclide(ctx: &LayoutContext<'_>, slots: &mut SlotLayout, glyph: Rect) -> Rect {
    let pre = slots.advance(Slot::MassNumber).max(slots.advance(Slot::ProtonNumber));
    let own = if pre > 0.0 {
        glyph + Vec2::new(pre + ctx.gap(), 0.0)
    } else {
        glyph
    };
    place_prescripts(ctx, slots, own);
    let x = place_scripts(slots, own);
    place_right(ctx, slots, x);
    own
}

/// Spellings of a nuclide base in each notation.
pub(super) struct NuclideBase {
    pub latex: String,
    pub mhchem: String,
    pub mathml: String,
    pub plain: String,
}

/// Render a nuclide (`^{A}_{Z}X_{n}^{q}`) in `format`, followed by its continuation.
pub(super) fn render_nuclide(node: &NodeView<'_>, format: Format, base: NuclideBase) -> String {
    let child = |slot| node.render_child(slot, format);
    let (mass, proton) = (child(Slot::MassNumber), child(Slot::ProtonNumber));
    let (sub, sup) = (child(Slot::Subscript), child(Slot::Superscript));
    let body = match format {
        Format::MhChem | Format::Python => {
            let mut out = String::new();
            if let Some(mass) = mass {
                out.push_str(&format!("^{{{}}}", mass));
            }
            if let Some(proton) = proton {
                out.push_str(&format!("_{{{}}}", proton));
            }
            out.push_str(&base.mhchem);
            out.push_str(&sub.unwrap_or_default());
            if let Some(sup) = sup {
                out.push_str(&format!("^{{{}}}", sup));
            }
            out
        }
        Format::Latex => {
            let prescripts = if mass.is_some() || proton.is_some() {
                format!("{{}}{}", tex_scripts(proton, mass))
            } else {
                String::new()
            };
            format!("{}{}{}", prescripts, base.latex, tex_scripts(sub, sup))
        }
        Format::MathMl => {
            if mass.is_some() || proton.is_some() {
                let or_none = |s: Option<String>| s.unwrap_or_else(|| "<none/>".to_string());
                format!(
                    "<mmultiscripts>{}{}{}<mprescripts/>{}{}</mmultiscripts>",
                    base.mathml,
                    or_none(sub),
                    or_none(sup),
                    or_none(proton),
                    or_none(mass)
                )
            } else {
                mathml_scripts(base.mathml, sub, sup)
            }
        }
        Format::Subscript => format!("{}{}", base.plain, sub.unwrap_or_default()),
    };
    body + &continuation(node, format)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChemicalElement {
    pub element: String,
}

impl ChemicalElement {
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
        }
    }
}

impl WidgetTrait for ChemicalElement {
    const TYPE_NAME: &'static str = "ChemicalElement";

    fn docks_to(&self) -> &'static [DockType] {
        &[DockType::Symbol, DockType::ChemicalElement]
    }

    fn docking_points(&self, config: &EditorConfig) -> Vec<DockingPoint> {
        nuclide_points(config)
    }

    fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
        layout_nuclide(ctx, slots, ctx.text_box(&self.element))
    }

    fn format(&self, node: &NodeView<'_>, format: Format) -> String {
        let base = NuclideBase {
            latex: format!("\\mathrm{{{}}}", self.element),
            mhchem: self.element.clone(),
            mathml: format!("<mi mathvariant=\"normal\">{}</mi>", escape_xml(&self.element)),
            plain: self.element.clone(),
        };
        render_nuclide(node, format, base)
    }
}
