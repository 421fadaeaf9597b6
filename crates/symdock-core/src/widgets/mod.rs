//! Widget catalogue: the typed nodes of an expression tree.
//!
//! Every kind of widget differs only in its docking points, its placement
//! rule and its renderers. `WidgetKind` is the closed set of kinds; each
//! kind's payload lives in its own module.

mod absolute_value;
mod binary_operation;
mod brackets;
mod chemical_element;
mod derivative;
mod differential;
mod fraction;
mod function;
mod logic_binary_operation;
mod logic_literal;
mod logic_not;
mod number;
mod particle;
mod radix;
mod relation;
mod state_symbol;
mod symbol;

pub use absolute_value::AbsoluteValue;
pub use binary_operation::BinaryOperation;
pub use brackets::{BracketKind, Brackets};
pub use chemical_element::ChemicalElement;
pub use derivative::Derivative;
pub use differential::Differential;
pub use fraction::Fraction;
pub use function::Function;
pub use logic_binary_operation::{LogicBinaryOperation, LogicOperator};
pub use logic_literal::LogicLiteral;
pub use logic_not::LogicNot;
pub use number::Number;
pub use particle::{Particle, ParticleKind};
pub use radix::Radix;
pub use relation::Relation;
pub use state_symbol::StateSymbol;
pub use symbol::Symbol;

use crate::config::{EditorConfig, EditorMode};
use crate::docking::{DockType, DockingPoint, Slot};
use crate::error::SpecError;
use crate::format::{Format, NodeView};
use crate::layout::{LayoutContext, SlotLayout};
use kurbo::{Point, Rect};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Unique identifier for widgets, allocated monotonically by the forest.
pub type WidgetId = u32;

/// Right-hand continuation accepted after an operand in maths and logic.
pub(crate) const OPERAND_RIGHT: &[DockType] = &[
    DockType::Symbol,
    DockType::Operator,
    DockType::Relation,
    DockType::Differential,
];

/// Right-hand continuation accepted after an operand in chemistry.
pub(crate) const CHEMISTRY_RIGHT: &[DockType] = &[
    DockType::Symbol,
    DockType::ChemicalElement,
    DockType::Particle,
    DockType::StateSymbol,
    DockType::Operator,
    DockType::Relation,
];

/// The `right` docking point of an operand for the current mode.
pub(crate) fn operand_right(config: &EditorConfig) -> DockingPoint {
    match config.mode {
        EditorMode::Chemistry => DockingPoint::new(Slot::Right, CHEMISTRY_RIGHT),
        _ => DockingPoint::new(Slot::Right, OPERAND_RIGHT),
    }
}

pub(crate) fn superscript_point() -> DockingPoint {
    DockingPoint::new(Slot::Superscript, &[DockType::Exponent])
}

pub(crate) fn subscript_point() -> DockingPoint {
    DockingPoint::new(Slot::Subscript, &[DockType::Subscript])
}

/// Behaviour shared by every widget kind.
pub trait WidgetTrait: Serialize + DeserializeOwned {
    /// Type tag used on the wire.
    const TYPE_NAME: &'static str;

    /// Tags describing where this widget may dock.
    fn docks_to(&self) -> &'static [DockType];

    /// Docking points, in placement order. Fixed for the widget's lifetime.
    fn docking_points(&self, config: &EditorConfig) -> Vec<DockingPoint>;

    /// Compute the widget's own box and place every docking point in `slots`.
    ///
    /// Children have already been laid out; their extents are in `slots`.
    fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect;

    /// Render this widget and its occupied docking points.
    fn format(&self, node: &NodeView<'_>, format: Format) -> String;
}

fn to_properties<W: Serialize>(widget: &W) -> Map<String, Value> {
    match serde_json::to_value(widget) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn from_properties<W: WidgetTrait>(properties: &Map<String, Value>) -> Result<W, SpecError> {
    serde_json::from_value(Value::Object(properties.clone())).map_err(|e| SpecError::InvalidProperties {
        kind: W::TYPE_NAME.to_string(),
        reason: e.to_string(),
    })
}

macro_rules! widget_kinds {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// Closed set of widget kinds.
        #[derive(Debug, Clone, PartialEq)]
        pub enum WidgetKind {
            $($variant($ty),)*
        }

        impl WidgetKind {
            /// Type tag used on the wire.
            pub fn type_name(&self) -> &'static str {
                match self {
                    $(WidgetKind::$variant(_) => <$ty as WidgetTrait>::TYPE_NAME,)*
                }
            }

            pub fn docks_to(&self) -> &'static [DockType] {
                match self {
                    $(WidgetKind::$variant(w) => w.docks_to(),)*
                }
            }

            pub fn docking_points(&self, config: &EditorConfig) -> Vec<DockingPoint> {
                match self {
                    $(WidgetKind::$variant(w) => w.docking_points(config),)*
                }
            }

            pub(crate) fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
                match self {
                    $(WidgetKind::$variant(w) => w.layout(ctx, slots),)*
                }
            }

            pub(crate) fn format(&self, node: &NodeView<'_>, format: Format) -> String {
                match self {
                    $(WidgetKind::$variant(w) => w.format(node, format),)*
                }
            }

            /// Per-kind property bag for the wire format.
            pub fn properties(&self) -> Map<String, Value> {
                match self {
                    $(WidgetKind::$variant(w) => to_properties(w),)*
                }
            }

            /// Build a kind from its type tag and property bag.
            ///
            /// Unknown tags yield `Ok(None)`.
            pub fn from_spec(type_name: &str, properties: &Map<String, Value>) -> Result<Option<Self>, SpecError> {
                $(
                    if type_name == <$ty as WidgetTrait>::TYPE_NAME {
                        return from_properties::<$ty>(properties).map(|w| Some(WidgetKind::$variant(w)));
                    }
                )*
                Ok(None)
            }
        }

        $(
            impl From<$ty> for WidgetKind {
                fn from(widget: $ty) -> Self {
                    WidgetKind::$variant(widget)
                }
            }
        )*
    };
}

widget_kinds! {
    Symbol(Symbol),
    Num(Number),
    BinaryOperation(BinaryOperation),
    Relation(Relation),
    Fraction(Fraction),
    Brackets(Brackets),
    AbsoluteValue(AbsoluteValue),
    Radix(Radix),
    Fn(Function),
    Differential(Differential),
    Derivative(Derivative),
    LogicBinaryOperation(LogicBinaryOperation),
    LogicNot(LogicNot),
    LogicLiteral(LogicLiteral),
    ChemicalElement(ChemicalElement),
    StateSymbol(StateSymbol),
    Particle(Particle),
}

impl WidgetKind {
    /// Operators carry their own spacing; anything else juxtaposed to an
    /// operand is an implicit multiplication.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            WidgetKind::BinaryOperation(_) | WidgetKind::Relation(_) | WidgetKind::LogicBinaryOperation(_)
        )
    }
}

/// A node of the expression forest.
#[derive(Debug, Clone)]
pub struct Widget {
    pub(crate) id: WidgetId,
    pub kind: WidgetKind,
    /// Relative to the parent's anchor; canvas position for roots.
    pub position: Point,
    pub scale: f64,
    pub(crate) docking_points: Vec<DockingPoint>,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) docked_to: Option<Slot>,
    pub(crate) bounds: Rect,
    pub(crate) subtree_bounds: Rect,
}

impl Widget {
    pub(crate) fn new(id: WidgetId, kind: WidgetKind, config: &EditorConfig) -> Self {
        let docking_points = kind.docking_points(config);
        Self {
            id,
            kind,
            position: Point::ZERO,
            scale: 1.0,
            docking_points,
            parent: None,
            docked_to: None,
            bounds: Rect::ZERO,
            subtree_bounds: Rect::ZERO,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn docks_to(&self) -> &'static [DockType] {
        self.kind.docks_to()
    }

    /// Owning widget, `None` for roots and detached widgets.
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// Slot of the parent this widget occupies.
    pub fn docked_to(&self) -> Option<Slot> {
        self.docked_to
    }

    pub fn docking_points(&self) -> &[DockingPoint] {
        &self.docking_points
    }

    pub fn docking_point(&self, slot: Slot) -> Option<&DockingPoint> {
        self.docking_points.iter().find(|dp| dp.slot == slot)
    }

    pub(crate) fn docking_point_mut(&mut self, slot: Slot) -> Option<&mut DockingPoint> {
        self.docking_points.iter_mut().find(|dp| dp.slot == slot)
    }

    /// Child docked at `slot`.
    pub fn child(&self, slot: Slot) -> Option<WidgetId> {
        self.docking_point(slot).and_then(|dp| dp.child)
    }

    /// Occupied docking points, in placement order.
    pub fn children(&self) -> impl Iterator<Item = (Slot, WidgetId)> + '_ {
        self.docking_points
            .iter()
            .filter_map(|dp| dp.child.map(|child| (dp.slot, child)))
    }

    /// Own box in the local frame (excludes children).
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Box of the whole subtree in the local frame.
    pub fn subtree_bounds(&self) -> Rect {
        self.subtree_bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_from_spec_known_tag() {
        let kind = WidgetKind::from_spec("Symbol", &props(json!({"letter": "x"})))
            .unwrap()
            .unwrap();
        assert_eq!(kind.type_name(), "Symbol");
        assert_eq!(kind.properties().get("letter"), Some(&json!("x")));
    }

    #[test]
    fn test_from_spec_unknown_tag() {
        assert!(WidgetKind::from_spec("Bogus", &Map::new()).unwrap().is_none());
    }

    #[test]
    fn test_from_spec_bad_properties() {
        let err = WidgetKind::from_spec("Symbol", &Map::new()).unwrap_err();
        assert!(matches!(err, SpecError::InvalidProperties { .. }));
    }

    #[test]
    fn test_number_superscript_only_in_maths() {
        let kind = WidgetKind::from(Number::new("2"));
        let maths = kind.docking_points(&EditorConfig::with_mode(EditorMode::Maths));
        let chem = kind.docking_points(&EditorConfig::with_mode(EditorMode::Chemistry));
        assert!(maths.iter().any(|dp| dp.slot == Slot::Superscript));
        assert!(!chem.iter().any(|dp| dp.slot == Slot::Superscript));
    }

    #[test]
    fn test_every_kind_has_a_right_slot() {
        let config = EditorConfig::default();
        let kinds: Vec<WidgetKind> = vec![
            Symbol::new("x").into(),
            Number::new("1").into(),
            BinaryOperation::new("+").into(),
            Relation::new("=").into(),
            Fraction::default().into(),
            Brackets::new(BracketKind::Round).into(),
            AbsoluteValue::default().into(),
            Radix::default().into(),
            Function::builtin("sin").into(),
            Differential::new("d").into(),
            Derivative::default().into(),
            LogicBinaryOperation::new(LogicOperator::And).into(),
            LogicNot::default().into(),
            LogicLiteral::new(true).into(),
            ChemicalElement::new("H").into(),
            StateSymbol::new("aq").into(),
            Particle::new(ParticleKind::Alpha).into(),
        ];
        for kind in kinds {
            let points = kind.docking_points(&config);
            assert!(
                points.iter().any(|dp| dp.slot == Slot::Right),
                "{} has no right slot",
                kind.type_name()
            );
        }
    }
}
