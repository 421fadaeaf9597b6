//! Nuclear particles.

use super::WidgetTrait;
use super::chemical_element::{NuclideBase, layout_nuclide, nuclide_points, render_nuclide};
use crate::config::EditorConfig;
use crate::docking::{DockType, DockingPoint};
use crate::format::{Format, NodeView};
use crate::layout::{LayoutContext, SlotLayout};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Alpha,
    Beta,
    Gamma,
    Neutrino,
    Antineutrino,
    Proton,
    Neutron,
    Electron,
    Positron,
}

impl ParticleKind {
    /// Text drawn on the canvas.
    pub fn glyph(self) -> &'static str {
        match self {
            ParticleKind::Alpha => "α",
            ParticleKind::Beta => "β",
            ParticleKind::Gamma => "γ",
            ParticleKind::Neutrino => "νe",
            ParticleKind::Antineutrino => "ν̄e",
            ParticleKind::Proton => "p",
            ParticleKind::Neutron => "n",
            ParticleKind::Electron => "e",
            ParticleKind::Positron => "e+",
        }
    }

    fn latex(self) -> &'static str {
        match self {
            ParticleKind::Alpha => "\\alpha",
            ParticleKind::Beta => "\\beta",
            ParticleKind::Gamma => "\\gamma",
            ParticleKind::Neutrino => "\\nu_{e}",
            ParticleKind::Antineutrino => "\\bar{\\nu}_{e}",
            ParticleKind::Proton => "\\text{p}",
            ParticleKind::Neutron => "\\text{n}",
            ParticleKind::Electron => "\\text{e}",
            ParticleKind::Positron => "\\text{e}^{+}",
        }
    }

    fn mhchem(self) -> &'static str {
        match self {
            ParticleKind::Alpha => "\\alpha",
            ParticleKind::Beta => "\\beta",
            ParticleKind::Gamma => "\\gamma",
            ParticleKind::Neutrino => "\\nu_{e}",
            ParticleKind::Antineutrino => "\\bar{\\nu}_{e}",
            ParticleKind::Proton => "p",
            ParticleKind::Neutron => "n",
            ParticleKind::Electron => "e",
            ParticleKind::Positron => "e^{+}",
        }
    }

    fn mathml(self) -> &'static str {
        match self {
            ParticleKind::Alpha => "<mi>&#x03B1;</mi>",
            ParticleKind::Beta => "<mi>&#x03B2;</mi>",
            ParticleKind::Gamma => "<mi>&#x03B3;</mi>",
            ParticleKind::Neutrino => "<msub><mi>&#x03BD;</mi><mi>e</mi></msub>",
            ParticleKind::Antineutrino => {
                "<msub><mover><mi>&#x03BD;</mi><mo>&#x00AF;</mo></mover><mi>e</mi></msub>"
            }
            ParticleKind::Proton => "<mi mathvariant=\"normal\">p</mi>",
            ParticleKind::Neutron => "<mi mathvariant=\"normal\">n</mi>",
            ParticleKind::Electron => "<mi mathvariant=\"normal\">e</mi>",
            ParticleKind::Positron => "<msup><mi mathvariant=\"normal\">e</mi><mo>+</mo></msup>",
        }
    }

    fn name(self) -> &'static str {
        match self {
            ParticleKind::Alpha => "alpha",
            ParticleKind::Beta => "beta",
            ParticleKind::Gamma => "gamma",
            ParticleKind::Neutrino => "neutrino",
            ParticleKind::Antineutrino => "antineutrino",
            ParticleKind::Proton => "proton",
            ParticleKind::Neutron => "neutron",
            ParticleKind::Electron => "electron",
            ParticleKind::Positron => "positron",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Particle {
    pub particle: ParticleKind,
}

impl Particle {
    pub fn new(particle: ParticleKind) -> Self {
        Self { particle }
    }
}

impl WidgetTrait for Particle {
    const TYPE_NAME: &'static str = "Particle";

    fn docks_to(&self) -> &'static [DockType] {
        &[DockType::Symbol, DockType::Particle]
    }

    fn docking_points(&self, config: &EditorConfig) -> Vec<DockingPoint> {
        nuclide_points(config)
    }

    fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
        layout_nuclide(ctx, slots, ctx.italic_box(self.particle.glyph()))
    }

    fn format(&self, node: &NodeView<'_>, format: Format) -> String {
        let base = NuclideBase {
            latex: self.particle.latex().to_string(),
            mhchem: self.particle.mhchem().to_string(),
            mathml: self.particle.mathml().to_string(),
            plain: self.particle.name().to_string(),
        };
        render_nuclide(node, format, base)
    }
}
