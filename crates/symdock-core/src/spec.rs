//! Tree wire format.
//!
//! A `WidgetSpec` is one node: its type tag, property bag and the occupied
//! docking points by name. Roots additionally carry their canvas position and
//! a cache of the rendered expression.

use crate::docking::Slot;
use crate::error::SpecError;
use crate::forest::Forest;
use crate::format::Format;
use crate::widgets::{WidgetId, WidgetKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Serialized widget subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSpec {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WidgetId>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Occupied docking points only.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, WidgetSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<SpecPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<SpecExpression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecPosition {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for SpecPosition {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<SpecPosition> for Point {
    fn from(p: SpecPosition) -> Self {
        Point::new(p.x, p.y)
    }
}

/// Rendered forms cached on a root record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecExpression {
    pub latex: String,
    pub python: String,
}

impl WidgetSpec {
    /// A bare record for `kind` with no children.
    pub fn new(kind: &WidgetKind) -> Self {
        Self {
            type_name: kind.type_name().to_string(),
            id: None,
            properties: kind.properties(),
            children: BTreeMap::new(),
            position: None,
            expression: None,
        }
    }

    /// Attach a child record under `slot`.
    pub fn with_child(mut self, slot: Slot, child: WidgetSpec) -> Self {
        self.children.insert(slot.to_string(), child);
        self
    }

    pub fn at(mut self, position: Point) -> Self {
        self.position = Some(position.into());
        self
    }

    /// Number of records in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(WidgetSpec::node_count).sum::<usize>()
    }
}

/// Parse a document holding either one record or an array of records.
pub fn parse_specs(json: &str) -> Result<Vec<WidgetSpec>, SpecError> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(SpecError::from))
            .collect(),
        single => Ok(vec![serde_json::from_value(single)?]),
    }
}

impl Forest {
    /// Serialize the subtree rooted at `id`.
    pub fn serialize(&self, id: WidgetId) -> Option<WidgetSpec> {
        let widget = self.get(id)?;
        let mut spec = WidgetSpec::new(&widget.kind);
        spec.id = Some(id);
        for (slot, child) in widget.children() {
            if let Some(child_spec) = self.serialize(child) {
                spec.children.insert(slot.to_string(), child_spec);
            }
        }
        Some(spec)
    }

    /// Serialize every root with its canvas position and rendered expression.
    pub fn serialize_roots(&self) -> Vec<WidgetSpec> {
        let options = self.render_options();
        self.roots()
            .iter()
            .filter_map(|&root| {
                let mut spec = self.serialize(root)?;
                spec.position = self.get(root).map(|w| w.position.into());
                spec.expression = Some(SpecExpression {
                    latex: self.render(root, Format::Latex, options)?,
                    python: self.render(root, Format::Python, options)?,
                });
                Some(spec)
            })
            .collect()
    }

    /// Instantiate a record and its children as a standalone widget.
    ///
    /// Unknown type tags are skipped and yield `Ok(None)`; so are children
    /// under unknown slot names or that refuse to dock. Invalid properties
    /// abort the whole subtree.
    pub fn deserialize(&mut self, spec: &WidgetSpec) -> Result<Option<WidgetId>, SpecError> {
        let Some(kind) = WidgetKind::from_spec(&spec.type_name, &spec.properties)? else {
            log::warn!("Skipping widget of unknown type '{}'", spec.type_name);
            return Ok(None);
        };
        let id = self.insert(kind);

        for (name, child_spec) in &spec.children {
            let slot: Slot = match name.parse() {
                Ok(slot) => slot,
                Err(e) => {
                    log::warn!("Skipping child of {}: {}", spec.type_name, e);
                    continue;
                }
            };
            let child = match self.deserialize(child_spec) {
                Ok(Some(child)) => child,
                Ok(None) => continue,
                Err(e) => {
                    self.remove_subtree(id);
                    return Err(e);
                }
            };
            if let Err(e) = self.dock(child, id, slot) {
                log::warn!("Dropping child '{}' of {}: {}", name, spec.type_name, e);
                self.remove_subtree(child);
            }
        }

        if let Some(position) = spec.position {
            if let Some(widget) = self.get_mut(id) {
                widget.position = position.into();
            }
        }
        Ok(Some(id))
    }

    /// Replace the forest with the given root records.
    ///
    /// Input that cannot be read leaves an empty forest.
    pub fn load(&mut self, specs: &[WidgetSpec]) {
        self.clear();
        for spec in specs {
            match self.deserialize(spec) {
                Ok(Some(id)) => self.add_root(id),
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Failed to load expression, starting empty: {}", e);
                    self.clear();
                    return;
                }
            }
        }
        log::debug!("Loaded {} roots", self.roots().len());
    }

    /// Like [`Forest::load`], reading the records from JSON.
    pub fn load_json(&mut self, json: &str) {
        match parse_specs(json) {
            Ok(specs) => self.load(&specs),
            Err(e) => {
                log::warn!("Failed to parse expression, starting empty: {}", e);
                self.clear();
            }
        }
    }
}
