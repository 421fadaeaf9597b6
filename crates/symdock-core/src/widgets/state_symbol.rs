//! State of matter annotation: (s), (l), (g), (aq).

use super::{WidgetTrait, operand_right};
use crate::config::EditorConfig;
use crate::docking::{DockType, DockingPoint};
use crate::format::{Format, NodeView, continuation};
use crate::layout::{LayoutContext, SlotLayout, place_right};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSymbol {
    pub state: String,
}

impl StateSymbol {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
        }
    }

    pub(crate) fn text(&self) -> String {
        format!("({})", self.state)
    }
}

impl WidgetTrait for StateSymbol {
    const TYPE_NAME: &'static str = "StateSymbol";

    fn docks_to(&self) -> &'static [DockType] {
        &[DockType::StateSymbol]
    }

    fn docking_points(&self, config: &EditorConfig) -> Vec<DockingPoint> {
        vec![operand_right(config)]
    }

    fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
        let own = ctx.text_box(&self.text());
        place_right(ctx, slots, own.x1);
        own
    }

    fn format(&self, node: &NodeView<'_>, format: Format) -> String {
        let body = match format {
            Format::Latex => format!("\\text{{{}}}", self.text()),
            Format::MathMl => format!("<mtext>{}</mtext>", self.text()),
            Format::MhChem | Format::Python | Format::Subscript => self.text(),
        };
        body + &continuation(node, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorMode;
    use crate::docking::Slot;
    use crate::forest::Forest;
    use crate::widgets::ChemicalElement;

    #[test]
    fn test_state_after_element() {
        let mut f = Forest::new(EditorConfig::with_mode(EditorMode::Chemistry));
        let na = f.insert(ChemicalElement::new("Na"));
        f.add_root(na);
        let aq = f.insert(StateSymbol::new("aq"));
        f.dock(aq, na, Slot::Right).unwrap();
        assert_eq!(f.text(na, Format::MhChem), "Na(aq)");
        assert_eq!(f.text(na, Format::Latex), "\\mathrm{Na}\\text{(aq)}");
    }

    #[test]
    fn test_state_needs_chemistry_right_slot() {
        let mut f = Forest::new(EditorConfig::default());
        let x = f.insert(crate::widgets::Symbol::new("x"));
        f.add_root(x);
        let aq = f.insert(StateSymbol::new("aq"));
        assert!(f.dock(aq, x, Slot::Right).is_err());
    }
}
