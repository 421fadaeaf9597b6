//! Error types for the editor core.

use crate::docking::Slot;
use crate::widgets::WidgetId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by structural operations on the forest and by startup.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Failed to load font {path:?}: {reason}")]
    FontLoad { path: PathBuf, reason: String },
    #[error("Unknown widget: {0}")]
    UnknownWidget(WidgetId),
    #[error("Widget {widget} has no '{slot}' docking point")]
    MissingSlot { widget: WidgetId, slot: Slot },
    #[error("Docking point '{slot}' on widget {widget} is already occupied")]
    SlotOccupied { widget: WidgetId, slot: Slot },
    #[error("Widget {0} is already docked")]
    AlreadyDocked(WidgetId),
    #[error("Widget {child} cannot dock at '{slot}' on widget {widget}")]
    Incompatible {
        child: WidgetId,
        widget: WidgetId,
        slot: Slot,
    },
    #[error("Docking widget {child} under widget {widget} would create a cycle")]
    Cycle { child: WidgetId, widget: WidgetId },
    #[error(transparent)]
    Spec(#[from] SpecError),
}

/// Errors raised while reading the tree wire format.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("Invalid properties for {kind}: {reason}")]
    InvalidProperties { kind: String, reason: String },
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
