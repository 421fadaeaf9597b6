//! Docking points: named, typed attachment slots owned by a widget.

use crate::widgets::WidgetId;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scale applied to anything docked in a script-like slot.
pub const SCRIPT_SCALE: f64 = 0.6;

/// Name of a docking point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Right,
    Superscript,
    Subscript,
    Argument,
    Numerator,
    Denominator,
    Order,
    MassNumber,
    ProtonNumber,
}

impl Slot {
    pub const ALL: [Slot; 9] = [
        Slot::Right,
        Slot::Superscript,
        Slot::Subscript,
        Slot::Argument,
        Slot::Numerator,
        Slot::Denominator,
        Slot::Order,
        Slot::MassNumber,
        Slot::ProtonNumber,
    ];

    /// Wire name of the slot.
    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Right => "right",
            Slot::Superscript => "superscript",
            Slot::Subscript => "subscript",
            Slot::Argument => "argument",
            Slot::Numerator => "numerator",
            Slot::Denominator => "denominator",
            Slot::Order => "order",
            Slot::MassNumber => "mass_number",
            Slot::ProtonNumber => "proton_number",
        }
    }

    /// Scale factor applied to a child docked here.
    pub fn scale(self) -> f64 {
        match self {
            Slot::Superscript
            | Slot::Subscript
            | Slot::Order
            | Slot::MassNumber
            | Slot::ProtonNumber => SCRIPT_SCALE,
            _ => 1.0,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slot::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| format!("unknown docking point '{}'", s))
    }
}

/// Compatibility tag shared by docking points and the widgets that dock into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockType {
    Symbol,
    Operator,
    Relation,
    Exponent,
    Subscript,
    Differential,
    DifferentialOrder,
    DifferentialArgument,
    ChemicalElement,
    StateSymbol,
    Particle,
    #[serde(rename = "top-left")]
    TopLeft,
    #[serde(rename = "bottom-left")]
    BottomLeft,
}

impl DockType {
    pub fn as_str(self) -> &'static str {
        match self {
            DockType::Symbol => "symbol",
            DockType::Operator => "operator",
            DockType::Relation => "relation",
            DockType::Exponent => "exponent",
            DockType::Subscript => "subscript",
            DockType::Differential => "differential",
            DockType::DifferentialOrder => "differential_order",
            DockType::DifferentialArgument => "differential_argument",
            DockType::ChemicalElement => "chemical_element",
            DockType::StateSymbol => "state_symbol",
            DockType::Particle => "particle",
            DockType::TopLeft => "top-left",
            DockType::BottomLeft => "bottom-left",
        }
    }
}

impl fmt::Display for DockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A widget may occupy a docking point iff their tag lists intersect.
pub fn compatible(docks_to: &[DockType], accepts: &[DockType]) -> bool {
    docks_to.iter().any(|t| accepts.contains(t))
}

/// A named, typed slot on a widget.
#[derive(Debug, Clone, PartialEq)]
pub struct DockingPoint {
    pub slot: Slot,
    /// Position relative to the owning widget's anchor. Overwritten by layout.
    pub position: Point,
    /// Scale applied to whatever docks here.
    pub scale: f64,
    /// Tags this slot accepts.
    pub types: Vec<DockType>,
    pub(crate) child: Option<WidgetId>,
    /// Highlighted during a drag.
    pub visible: bool,
    /// Rendering hint: draw the empty slot at full size.
    pub must_expand: bool,
}

impl DockingPoint {
    /// Create an empty docking point accepting the given tags.
    pub fn new(slot: Slot, types: &[DockType]) -> Self {
        Self {
            slot,
            position: Point::ZERO,
            scale: slot.scale(),
            types: types.to_vec(),
            child: None,
            visible: false,
            must_expand: false,
        }
    }

    /// Mark the slot as one that should be drawn at full size when empty.
    pub fn expanded(mut self) -> Self {
        self.must_expand = true;
        self
    }

    /// The attached child, if any.
    pub fn child(&self) -> Option<WidgetId> {
        self.child
    }

    pub fn is_empty(&self) -> bool {
        self.child.is_none()
    }

    /// Check whether a widget with these tags may dock here.
    pub fn accepts(&self, docks_to: &[DockType]) -> bool {
        compatible(docks_to, &self.types)
    }
}
