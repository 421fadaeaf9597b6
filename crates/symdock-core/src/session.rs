//! Session controller: drag state machine, potential symbols and output.

use crate::config::EditorConfig;
use crate::error::EditorResult;
use crate::forest::Forest;
use crate::format::ExpressionResult;
use crate::host::{ActionEntry, ActionEvent, EditorHost};
use crate::input::PointerEvent;
use crate::metrics::{ApproximateMetrics, FontMetrics, FontdueMetrics};
use crate::paint::Painter;
use crate::search::DockingTarget;
use crate::spec::WidgetSpec;
use crate::widgets::WidgetId;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Redraw interval while nothing moves.
pub const IDLE_FRAME_INTERVAL: Duration = Duration::from_millis(100);
/// Redraw interval while a widget follows the pointer.
pub const DRAG_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Output emitted after every structural change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    /// Renders of the primary expression; `None` when the canvas is empty.
    pub result: Option<ExpressionResult>,
    pub symbols: Vec<WidgetSpec>,
    pub text_entry: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_input: Option<String>,
}

/// Pointer drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        widget: WidgetId,
        /// Pointer position relative to the widget's anchor at pointer-down.
        offset: Vec2,
    },
}

/// One editor: the forest plus the interaction state around it.
pub struct Session<H: EditorHost> {
    forest: Forest,
    host: H,
    drag: DragState,
    potential: Option<WidgetId>,
    active_docking_point: Option<DockingTarget>,
    primary_root: Option<WidgetId>,
    user_input: Option<String>,
}

impl<H: EditorHost> std::fmt::Debug for Session<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("forest", &self.forest)
            .field("drag", &self.drag)
            .field("potential", &self.potential)
            .field("primary_root", &self.primary_root)
            .finish_non_exhaustive()
    }
}

impl<H: EditorHost> Session<H> {
    /// Start a session. When both font paths are configured the fonts are
    /// loaded and any failure is fatal; otherwise text is measured approximately.
    pub fn new(config: EditorConfig, host: H) -> EditorResult<Self> {
        let metrics: Box<dyn FontMetrics> = match (&config.italic_font, &config.regular_font) {
            (Some(italic), Some(regular)) => Box::new(FontdueMetrics::load(italic, regular)?),
            _ => Box::new(ApproximateMetrics),
        };
        log::info!("Starting {:?} editor", config.mode);
        Ok(Self::with_forest(Forest::with_metrics(config, metrics), host))
    }

    pub fn with_forest(forest: Forest, host: H) -> Self {
        Self {
            forest,
            host,
            drag: DragState::Idle,
            potential: None,
            active_docking_point: None,
            primary_root: None,
            user_input: None,
        }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn forest_mut(&mut self) -> &mut Forest {
        &mut self.forest
    }

    pub fn config(&self) -> &EditorConfig {
        self.forest.config()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn potential_symbol(&self) -> Option<WidgetId> {
        self.potential
    }

    /// Docking point the dragged widget would land on right now.
    pub fn active_docking_point(&self) -> Option<&DockingTarget> {
        self.active_docking_point.as_ref()
    }

    pub fn primary_root(&self) -> Option<WidgetId> {
        self.primary_root
    }

    pub fn user_input(&self) -> Option<&str> {
        self.user_input.as_deref()
    }

    /// Replace the canvas with the given records and emit the new state.
    pub fn load(&mut self, specs: &[WidgetSpec]) -> EditorState {
        self.drag = DragState::Idle;
        self.potential = None;
        self.active_docking_point = None;
        self.forest.load(specs);
        self.update_state()
    }

    /// Feed one pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position } => self.pointer_up(position),
        }
    }

    /// Pick up the widget under the pointer, detaching it from its tree.
    pub fn pointer_down(&mut self, point: Point) {
        if self.config().text_entry || self.drag != DragState::Idle {
            return;
        }
        self.host.close_menus();
        let Some(widget) = self.forest.hit_test(point) else {
            return;
        };
        if !self.forest.is_detachable(widget, self.host.is_user_privileged()) {
            log::debug!("Widget {} is locked in place", widget);
            return;
        }
        let Some(anchor) = self.forest.absolute_position(widget) else {
            return;
        };

        let parent_spec = self.forest.get(widget).and_then(|w| w.parent()).and_then(|p| self.forest.serialize(p));
        match self.forest.undock(widget) {
            Ok(Some((_, slot))) => {
                let entry = ActionEntry::new(ActionEvent::UndockSymbol, self.forest.serialize(widget))
                    .with_parent(parent_spec, slot);
                self.host.log_action(entry);
            }
            Ok(None) => {}
            Err(e) => {
                log::warn!("Failed to pick up widget {}: {}", widget, e);
                return;
            }
        }
        // off the canvas until dropped
        self.forest.remove_root(widget);

        let symbol = self.forest.serialize(widget);
        self.host.log_action(ActionEntry::new(ActionEvent::DragStart, symbol));
        self.drag = DragState::Dragging {
            widget,
            offset: point - anchor,
        };
        self.update_state();
    }

    /// Move the dragged widget and track the docking point it would land on.
    pub fn pointer_move(&mut self, point: Point) {
        if self.config().text_entry {
            return;
        }
        let DragState::Dragging { widget, offset } = self.drag else {
            return;
        };
        self.move_widget(widget, point - offset);
        self.host.notify_symbol_drag(point);
    }

    /// Drop the dragged widget: dock it, trash it, or leave it on the canvas.
    pub fn pointer_up(&mut self, point: Point) {
        if self.config().text_entry {
            return;
        }
        let DragState::Dragging { widget, offset } = std::mem::take(&mut self.drag) else {
            return;
        };
        self.move_widget(widget, point - offset);
        let target = self.active_docking_point.take();
        self.forest.clear_highlights();

        if let Some(target) = target {
            self.dock_at(widget, &target);
        } else if self.host.is_trash_active() {
            let symbol = self.forest.serialize(widget);
            self.forest.remove_subtree(widget);
            self.host.log_action(ActionEntry::new(ActionEvent::TrashSymbol, symbol));
        } else {
            self.forest.add_root(widget);
            let symbol = self.forest.serialize(widget);
            self.host.log_action(ActionEntry::new(ActionEvent::DropSymbol, symbol));
        }
        self.update_state();
    }

    /// Track a symbol dragged in from outside the canvas.
    ///
    /// The first call instantiates `spec`; later calls only move it.
    pub fn update_potential_symbol(&mut self, spec: &WidgetSpec, point: Point) {
        let widget = match self.potential {
            Some(widget) => widget,
            None => match self.forest.deserialize(spec) {
                Ok(Some(widget)) => {
                    self.potential = Some(widget);
                    self.host
                        .log_action(ActionEntry::new(ActionEvent::DragPotentialSymbol, Some(spec.clone())));
                    widget
                }
                Ok(None) => return,
                Err(e) => {
                    log::warn!("Ignoring potential symbol: {}", e);
                    return;
                }
            },
        };
        self.move_widget(widget, point);
        self.host.notify_symbol_drag(point);
    }

    /// Put the potential symbol on the canvas, docked if a point is active.
    pub fn commit_potential_symbol(&mut self) -> Option<WidgetId> {
        let widget = self.potential.take()?;
        let target = self.active_docking_point.take();
        self.forest.clear_highlights();
        match target {
            Some(target) => self.dock_at(widget, &target),
            None => {
                self.forest.add_root(widget);
                let symbol = self.forest.serialize(widget);
                self.host.log_action(ActionEntry::new(ActionEvent::DropSymbol, symbol));
            }
        }
        self.update_state();
        Some(widget)
    }

    /// Discard the potential symbol without it ever reaching the canvas.
    pub fn abort_potential_symbol(&mut self) {
        let Some(widget) = self.potential.take() else {
            return;
        };
        let symbol = self.forest.serialize(widget);
        self.forest.remove_subtree(widget);
        self.active_docking_point = None;
        self.forest.clear_highlights();
        self.host.log_action(ActionEntry::new(ActionEvent::AbortPotentialSymbol, symbol));
    }

    /// Stack the roots vertically, centred on the canvas.
    pub fn centre(&mut self, canvas: Size) {
        let gap = self.config().base_font_size();
        let boxes: Vec<(WidgetId, kurbo::Rect)> = self
            .forest
            .roots()
            .iter()
            .filter_map(|&root| Some((root, self.forest.get(root)?.subtree_bounds())))
            .collect();
        if boxes.is_empty() {
            return;
        }
        let total: f64 = boxes.iter().map(|(_, b)| b.height()).sum::<f64>() + gap * (boxes.len() - 1) as f64;
        let mut top = (canvas.height - total) / 2.0;
        for (root, bounds) in boxes {
            if let Some(widget) = self.forest.get_mut(root) {
                widget.position = Point::new((canvas.width - bounds.width()) / 2.0 - bounds.x0, top - bounds.y0);
            }
            top += bounds.height() + gap;
        }
        self.host.log_action(ActionEntry::new(ActionEvent::CentreSymbols, None));
        self.update_state();
    }

    /// Where `moving` would dock with its anchor at `position`.
    pub fn find_nearest_docking_point(&self, moving: WidgetId, position: Point) -> Option<DockingTarget> {
        self.forest.nearest_docking_point(moving, position)
    }

    /// Recompute the primary expression and notify the host.
    pub fn update_state(&mut self) -> EditorState {
        self.primary_root = self.forest.primary_root();
        let options = self.forest.render_options();
        let state = EditorState {
            result: self
                .primary_root
                .and_then(|root| self.forest.expression_result(root, options)),
            symbols: self.forest.serialize_roots(),
            text_entry: self.config().text_entry,
            user_input: self.user_input.clone(),
        };
        self.host.on_new_editor_state(&state);
        state
    }

    pub fn set_user_input(&mut self, text: impl Into<String>) -> EditorState {
        self.user_input = Some(text.into());
        self.update_state()
    }

    /// How long the host should wait before the next redraw.
    pub fn frame_interval(&self) -> Duration {
        if self.drag == DragState::Idle && self.potential.is_none() {
            IDLE_FRAME_INTERVAL
        } else {
            DRAG_FRAME_INTERVAL
        }
    }

    /// Paint the canvas, then the dragged widget and the potential symbol on top.
    pub fn paint(&self, painter: &mut dyn Painter) {
        self.forest.paint(painter);
        if let DragState::Dragging { widget, .. } = self.drag {
            self.forest.paint_widget(widget, painter);
        }
        if let Some(widget) = self.potential {
            self.forest.paint_widget(widget, painter);
        }
    }

    /// Place a standalone widget and refresh the highlighted docking points.
    fn move_widget(&mut self, widget: WidgetId, anchor: Point) {
        if let Some(w) = self.forest.get_mut(widget) {
            w.position = anchor;
        }
        self.forest.shake(widget);

        let Some(docks_to) = self.forest.get(widget).map(|w| w.docks_to()) else {
            return;
        };
        self.forest.highlight_docking_points(docks_to);
        for id in self.forest.descendants(widget) {
            if let Some(w) = self.forest.get_mut(id) {
                w.docking_points.iter_mut().for_each(|dp| dp.visible = false);
            }
        }
        self.active_docking_point = self.find_nearest_docking_point(widget, anchor);
    }

    fn dock_at(&mut self, widget: WidgetId, target: &DockingTarget) {
        match self.forest.dock(widget, target.owner, target.slot) {
            Ok(()) => {
                let entry = ActionEntry::new(ActionEvent::DockSymbol, self.forest.serialize(widget))
                    .with_parent(self.forest.serialize(target.owner), target.slot);
                self.host.log_action(entry);
            }
            Err(e) => {
                log::warn!("Dropping widget {} instead of docking: {}", widget, e);
                self.forest.add_root(widget);
                let symbol = self.forest.serialize(widget);
                self.host.log_action(ActionEntry::new(ActionEvent::DropSymbol, symbol));
            }
        }
    }
}
