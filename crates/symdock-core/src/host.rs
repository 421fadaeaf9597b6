//! Collaborator interface the session calls back into.

use crate::docking::Slot;
use crate::session::EditorState;
use crate::spec::WidgetSpec;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Kinds of user action recorded in the action log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionEvent {
    DragStart,
    DockSymbol,
    UndockSymbol,
    TrashSymbol,
    DropSymbol,
    CentreSymbols,
    DragPotentialSymbol,
    AbortPotentialSymbol,
}

/// One entry of the append-only action log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEntry {
    pub event: ActionEvent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<WidgetSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<WidgetSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docking_point: Option<Slot>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl ActionEntry {
    pub fn new(event: ActionEvent, symbol: Option<WidgetSpec>) -> Self {
        Self {
            event,
            symbol,
            parent: None,
            docking_point: None,
            timestamp: now_millis(),
        }
    }

    /// Record where the symbol was docked or undocked.
    pub fn with_parent(mut self, parent: Option<WidgetSpec>, slot: Slot) -> Self {
        self.parent = parent;
        self.docking_point = Some(slot);
        self
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Everything outside the editor that the session consults or notifies.
///
/// Every method has a default so hosts only implement what they use.
pub trait EditorHost {
    /// Privileged users may detach widgets that are otherwise locked in place.
    fn is_user_privileged(&self) -> bool {
        false
    }

    /// Whether a widget dropped away from any docking point is discarded.
    fn is_trash_active(&self) -> bool {
        false
    }

    fn close_menus(&mut self) {}

    /// Pointer position of an ongoing drag.
    fn notify_symbol_drag(&mut self, _point: Point) {}

    /// Called after every structural change.
    fn on_new_editor_state(&mut self, _state: &EditorState) {}

    fn log_action(&mut self, _entry: ActionEntry) {}
}

/// Host that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl EditorHost for NullHost {}

/// Host that keeps everything it is told, for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub privileged: bool,
    pub trash_active: bool,
    pub states: Vec<EditorState>,
    pub actions: Vec<ActionEntry>,
    pub drag_points: Vec<Point>,
    pub menu_closes: usize,
}

impl RecordingHost {
    /// Logged event kinds, oldest first.
    pub fn events(&self) -> Vec<ActionEvent> {
        self.actions.iter().map(|a| a.event).collect()
    }

    pub fn last_state(&self) -> Option<&EditorState> {
        self.states.last()
    }
}

impl EditorHost for RecordingHost {
    fn is_user_privileged(&self) -> bool {
        self.privileged
    }

    fn is_trash_active(&self) -> bool {
        self.trash_active
    }

    fn close_menus(&mut self) {
        self.menu_closes += 1;
    }

    fn notify_symbol_drag(&mut self, point: Point) {
        self.drag_points.push(point);
    }

    fn on_new_editor_state(&mut self, state: &EditorState) {
        self.states.push(state.clone());
    }

    fn log_action(&mut self, entry: ActionEntry) {
        log::debug!("Action {:?}", entry.event);
        self.actions.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Symbol;
    use serde_json::json;

    #[test]
    fn test_event_names() {
        assert_eq!(serde_json::to_value(ActionEvent::DragStart).unwrap(), json!("DRAG_START"));
        assert_eq!(
            serde_json::to_value(ActionEvent::AbortPotentialSymbol).unwrap(),
            json!("ABORT_POTENTIAL_SYMBOL")
        );
    }

    #[test]
    fn test_entry_shape() {
        let symbol = WidgetSpec::new(&Symbol::new("x").into());
        let entry = ActionEntry::new(ActionEvent::DockSymbol, Some(symbol.clone()))
            .with_parent(Some(symbol), Slot::Superscript);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["event"], json!("DOCK_SYMBOL"));
        assert_eq!(value["dockingPoint"], json!("superscript"));
        assert_eq!(value["symbol"]["type"], json!("Symbol"));
        assert!(value["timestamp"].as_u64().unwrap() > 0);

        let bare = serde_json::to_value(ActionEntry::new(ActionEvent::CentreSymbols, None)).unwrap();
        assert!(bare.get("parent").is_none());
        assert!(bare.get("symbol").is_none());
    }

    #[test]
    fn test_null_host_defaults() {
        let host = NullHost;
        assert!(!host.is_user_privileged());
        assert!(!host.is_trash_active());
    }
}
