//! Interaction controller: the single owner of builder state.
//!
//! Pointer and keyboard input, palette drops and properties-editor updates
//! all go through here. Every committed mutation records exactly one history
//! snapshot and emits [`BuilderEvent::ElementsChanged`]. Gestures only touch
//! live state until the pointer is released or another committing call
//! settles them first.

use crate::capture::{CaptureTarget, PointerCapture};
use crate::clipboard::{self, Clipboard};
use crate::config::BuilderConfig;
use crate::content::ElementContent;
use crate::document::{LayerDirection, PageRemoval, ProjectDocument};
use crate::element::{Element, ElementId, ElementPatch, Geometry, PageId, StyleMap};
use crate::event::{BuilderEvent, EventBus, ListenerId, Notification};
use crate::geometry::{self, Alignment, NudgeDirection};
use crate::history::History;
use crate::input::{KeyEvent, Modifiers, MouseButton, PointerEvent, PointerId};
use crate::palette::PaletteItem;
use crate::selection::{ManipulationState, Selection, hit_test_handles};
use crate::shortcuts::{ShortcutAction, ShortcutRegistry};
use crate::viewport::{CanvasPreset, Viewport, clamp_canvas_height};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// One history entry: the full element sequence.
pub type Snapshot = Vec<Element>;

/// Where the pointer state machine is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    /// Pressed on an element, not moved yet.
    Selecting,
    Dragging,
    Resizing,
}

/// Entries of the element context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContextMenuAction {
    Copy,
    Duplicate,
    ToggleLock,
    Delete,
}

/// An open context menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenu {
    /// Anchor in viewport coordinates.
    pub anchor: Point,
    pub element: ElementId,
}

struct ActiveGesture {
    phase: GesturePhase,
    manip: ManipulationState,
    capture: Option<PointerCapture>,
}

/// Owns the document, selection, clipboard and history, and turns input
/// into committed edits.
pub struct InteractionController {
    document: ProjectDocument,
    active_page: PageId,
    selection: Selection,
    history: History<Snapshot>,
    clipboard: Clipboard,
    config: BuilderConfig,
    viewport: Viewport,
    gesture: Option<ActiveGesture>,
    context_menu: Option<ContextMenu>,
    capture_target: Option<Rc<dyn CaptureTarget>>,
    events: EventBus,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}

impl InteractionController {
    /// Controller over a fresh one-page project.
    pub fn new(config: BuilderConfig) -> Self {
        Self::with_document(ProjectDocument::new(), config)
    }

    /// Controller over an existing project, with every element pulled
    /// inside the canvas. History starts at that state.
    pub fn with_document(mut document: ProjectDocument, config: BuilderConfig) -> Self {
        clamp_elements(&mut document, config.canvas_size());
        let history = History::with_limit(document.elements().to_vec(), config.history_limit);
        Self {
            active_page: document.first_page(),
            document,
            selection: Selection::new(),
            history,
            clipboard: Clipboard::new(),
            config,
            viewport: Viewport::default(),
            gesture: None,
            context_menu: None,
            capture_target: None,
            events: EventBus::new(),
        }
    }

    // ---- accessors ----

    pub fn document(&self) -> &ProjectDocument {
        &self.document
    }

    pub fn into_document(self) -> ProjectDocument {
        self.document
    }

    pub fn active_page(&self) -> PageId {
        self.active_page
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The primary selected element.
    pub fn selected_element(&self) -> Option<&Element> {
        self.selection.primary().and_then(|id| self.document.get(id))
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The shell updates the canvas origin here when it scrolls.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn history(&self) -> &History<Snapshot> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.as_ref().map_or(GesturePhase::Idle, |g| g.phase)
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    pub fn canvas_size(&self) -> Size {
        self.config.canvas_size()
    }

    /// Active snap grid, if snapping is on.
    pub fn grid(&self) -> Option<f64> {
        self.config.snap_to_grid.then_some(self.config.grid_size)
    }

    // ---- wiring ----

    pub fn subscribe(&mut self, listener: impl FnMut(&BuilderEvent<'_>) + 'static) -> ListenerId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Surface that receives pointer capture for drags and resizes.
    pub fn set_capture_target(&mut self, target: Rc<dyn CaptureTarget>) {
        self.capture_target = Some(target);
    }

    // ---- commit plumbing ----

    fn commit(&mut self, notification: Option<Notification>) {
        self.history.record(self.document.elements().to_vec());
        self.events.emit(BuilderEvent::ElementsChanged(self.document.elements()));
        if let Some(notification) = notification {
            self.notify(notification);
        }
    }

    fn notify(&mut self, notification: Notification) {
        log::debug!("Notify {:?}: {}", notification.kind, notification.message);
        self.events.emit(BuilderEvent::Notification(&notification));
    }

    fn emit_selection(&mut self) {
        let primary = self.selection.primary().and_then(|id| self.document.get(id));
        self.events.emit(BuilderEvent::SelectionChanged {
            primary,
            multi: self.selection.multi(),
        });
    }

    fn select(&mut self, id: ElementId) {
        if self.selection.primary() == Some(id) && self.selection.multi().is_empty() {
            return;
        }
        self.selection.select(id);
        self.emit_selection();
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.emit_selection();
    }

    /// Drop selection and menu references to elements that are gone or not
    /// on the active page.
    fn prune_selection(&mut self) {
        let page = self.active_page;
        let doc = &self.document;
        let changed = self
            .selection
            .retain(|id| doc.get(id).is_some_and(|e| e.page_id == page));
        if self.context_menu.is_some_and(|m| !doc.contains(m.element)) {
            self.context_menu = None;
        }
        if changed {
            self.emit_selection();
        }
    }

    /// Primary selection if it may be moved, resized or deleted.
    fn editable_primary(&self) -> Option<(ElementId, Geometry)> {
        let element = self.selected_element()?;
        if element.locked {
            log::debug!("Element {} is locked", element.id());
            return None;
        }
        Some((element.id(), element.geometry))
    }

    fn set_origin(&mut self, id: ElementId, origin: Point) {
        if let Some(element) = self.document.get_mut(id) {
            element.geometry = element.geometry.with_origin(origin);
        }
    }

    // ---- pointer state machine ----

    /// Feed one pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
                pointer,
            } => self.pointer_down(position, button, modifiers, pointer),
            PointerEvent::Move { position } => self.pointer_move(position),
            // Release commits the last computed geometry, not the release point.
            PointerEvent::Up { .. } | PointerEvent::Cancel => self.finish_gesture(),
            PointerEvent::Leave => {
                if self.context_menu.take().is_some() {
                    log::debug!("Context menu dismissed");
                }
            }
        }
    }

    fn pointer_down(&mut self, position: Point, button: MouseButton, modifiers: Modifiers, pointer: PointerId) {
        // A press while a gesture is open means the host lost the release.
        self.finish_gesture();

        if button == MouseButton::Right {
            if let Some(element) = self.selection.primary() {
                self.context_menu = Some(ContextMenu {
                    anchor: position,
                    element,
                });
                log::debug!("Context menu opened for {element}");
            }
            return;
        }
        self.context_menu = None;
        if button != MouseButton::Left {
            return;
        }

        let point = self.viewport.screen_to_canvas(position);

        if !modifiers.any() {
            let tolerance = self.viewport.screen_len_to_canvas(self.config.handle_tolerance);
            let handle = self
                .editable_primary()
                .filter(|(id, _)| self.document.get(*id).is_some_and(|e| e.page_id == self.active_page))
                .and_then(|(id, geometry)| hit_test_handles(&geometry, point, tolerance).map(|h| (id, geometry, h)));
            if let Some((id, original, handle)) = handle {
                let manip = ManipulationState::new(id, Some(handle), point, original);
                self.begin_gesture(GesturePhase::Resizing, manip, pointer);
                return;
            }
        }

        match self.document.element_at_point(self.active_page, point) {
            Some(id) if modifiers.any() => {
                if self.selection.toggle_multi(id) {
                    self.emit_selection();
                }
            }
            Some(id) => {
                self.select(id);
                if let Some((id, original)) = self.editable_primary() {
                    let manip = ManipulationState::new(id, None, point, original);
                    self.begin_gesture(GesturePhase::Selecting, manip, pointer);
                }
            }
            None => self.clear_selection(),
        }
    }

    fn begin_gesture(&mut self, phase: GesturePhase, manip: ManipulationState, pointer: PointerId) {
        log::debug!("{phase:?} {} at {:?}", manip.element_id, manip.start_point);
        let capture = self
            .capture_target
            .clone()
            .map(|target| PointerCapture::acquire(target, pointer));
        self.gesture = Some(ActiveGesture { phase, manip, capture });
    }

    fn pointer_move(&mut self, position: Point) {
        let point = self.viewport.screen_to_canvas(position);
        let canvas = self.canvas_size();
        let grid = self.grid();
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        if gesture.phase == GesturePhase::Selecting {
            gesture.phase = GesturePhase::Dragging;
            log::debug!("Dragging {}", gesture.manip.element_id);
        }
        let manip = &mut gesture.manip;
        manip.current_point = point;

        let Some(element) = self.document.get_mut(manip.element_id).filter(|e| !e.locked) else {
            return;
        };
        element.geometry = match manip.handle {
            Some(handle) => geometry::resize(manip.original, handle, manip.delta(), canvas),
            None => {
                let origin = geometry::drag_origin(manip.anchor(), point, manip.original.size(), canvas, grid);
                manip.original.with_origin(origin)
            }
        };
    }

    fn finish_gesture(&mut self) {
        let Some(ActiveGesture { phase, manip, capture }) = self.gesture.take() else {
            return;
        };
        drop(capture);

        let Some(element) = self.document.get(manip.element_id) else {
            return;
        };
        if element.geometry == manip.original {
            log::debug!("{phase:?} ended without change");
            return;
        }
        let message = if phase == GesturePhase::Resizing {
            "Element resized"
        } else {
            "Element moved"
        };
        log::info!("{message}: {} -> {:?}", manip.element_id, element.geometry);
        self.commit(Some(Notification::success(message)));
    }

    // ---- keyboard ----

    /// Run the shortcut bound to a key press. Returns false if unbound.
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        let Some(action) = ShortcutRegistry::lookup(&event) else {
            return false;
        };
        log::debug!("Shortcut {action:?}");
        match action {
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::Redo => {
                self.redo();
            }
            ShortcutAction::Duplicate => {
                self.duplicate_selected();
            }
            ShortcutAction::Copy => {
                self.copy_selected();
            }
            ShortcutAction::Paste => {
                self.paste();
            }
            ShortcutAction::Delete => {
                self.delete_selected();
            }
            ShortcutAction::Nudge { direction, large } => {
                self.nudge_selected(direction, large);
            }
            ShortcutAction::Dismiss => {
                if self.context_menu.take().is_none() {
                    self.clear_selection();
                }
            }
        }
        true
    }

    // ---- element creation ----

    /// Drop a palette item at a viewport position. The new element is selected.
    pub fn drop_item(&mut self, item: &PaletteItem, position: Point) -> Option<ElementId> {
        let point = self.viewport.screen_to_canvas(position);
        let geometry = geometry::place(item.kind, point, item.default_size, self.canvas_size(), self.grid());
        self.insert_item(item, geometry)
    }

    /// Add a palette item without a drop, centred in the first screenful.
    pub fn quick_add(&mut self, item: &PaletteItem) -> Option<ElementId> {
        let geometry = geometry::place_centered(item.kind, item.default_size, self.canvas_size(), self.config.fold_height);
        self.insert_item(item, geometry)
    }

    fn insert_item(&mut self, item: &PaletteItem, geometry: Geometry) -> Option<ElementId> {
        self.finish_gesture();
        let content = if item.default_content.kind() == item.kind {
            item.default_content.clone()
        } else {
            ElementContent::empty(item.kind)
        };
        let element = Element::new(geometry, content, item.default_styles.clone(), self.active_page);
        let id = self.document.push(element)?;
        log::info!("Added {} {id} at {:?}", item.kind, geometry);
        self.select(id);
        self.commit(Some(Notification::success(format!("{} added", item.label))));
        Some(id)
    }

    /// Create an element directly. Geometry is clamped to the canvas.
    /// Returns None if the page does not exist.
    pub fn create(
        &mut self,
        geometry: Geometry,
        content: ElementContent,
        styles: StyleMap,
        page: PageId,
    ) -> Option<ElementId> {
        self.finish_gesture();
        let kind = content.kind();
        let geometry = geometry::clamp_geometry(geometry, self.canvas_size());
        let id = self.document.create(geometry, content, styles, page)?;
        log::info!("Created {kind} {id}");
        self.commit(Some(Notification::success(format!("{kind} added"))));
        Some(id)
    }

    // ---- editing ----

    /// Properties-editor entry point. Returns true if anything changed.
    ///
    /// Content of a different type is ignored, as is geometry on a locked
    /// element. Geometry is floored at the minimum size and clamped.
    pub fn update(&mut self, id: ElementId, mut patch: ElementPatch) -> bool {
        self.finish_gesture();
        let canvas = self.canvas_size();
        let Some(element) = self.document.get(id) else {
            return false;
        };
        if patch.content.as_ref().is_some_and(|c| c.kind() != element.kind()) {
            log::warn!("Ignoring content of another type for {} {id}", element.kind());
            patch.content = None;
        }
        if element.locked {
            patch.geometry = None;
        }
        patch.geometry = patch.geometry.map(|g| geometry::sanitize(g, canvas));
        if patch.is_empty() {
            return false;
        }

        let before = element.clone();
        self.document.update(id, patch);
        if self.document.get(id) == Some(&before) {
            return false;
        }
        log::info!("Updated {id}");
        if self.selection.primary() == Some(id) {
            self.emit_selection();
        }
        self.commit(None);
        true
    }

    /// Delete an element. Locked or unknown elements are left alone.
    pub fn delete(&mut self, id: ElementId) -> bool {
        self.finish_gesture();
        if self.document.get(id).is_none_or(|e| e.locked) {
            return false;
        }
        self.document.remove(id);
        log::info!("Deleted {id}");
        self.prune_selection();
        self.commit(Some(Notification::success("Element deleted")));
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selection.primary() {
            Some(id) => self.delete(id),
            None => false,
        }
    }

    /// Duplicate the selection above itself, offset and selected.
    pub fn duplicate_selected(&mut self) -> Option<ElementId> {
        self.finish_gesture();
        let canvas = self.canvas_size();
        let source = self.selected_element()?;
        let source_id = source.id();
        let mut copy = clipboard::duplicate(source, self.config.paste_offset);
        copy.geometry = geometry::clamp_geometry(copy.geometry, canvas);

        let id = self.document.insert_after(source_id, copy)?;
        log::info!("Duplicated {source_id} as {id}");
        self.select(id);
        self.commit(Some(Notification::success("Element duplicated")));
        Some(id)
    }

    /// Copy the selection to the clipboard.
    pub fn copy_selected(&mut self) -> bool {
        let Some(element) = self.selection.primary().and_then(|id| self.document.get(id)) else {
            return false;
        };
        self.clipboard.copy(element);
        log::debug!("Copied {}", element.id());
        self.notify(Notification::info("Copied to clipboard"));
        true
    }

    /// Paste the clipboard onto the active page, offset and selected.
    pub fn paste(&mut self) -> Option<ElementId> {
        self.finish_gesture();
        let mut element = self.clipboard.paste(self.active_page, self.config.paste_offset)?;
        element.geometry = geometry::clamp_geometry(element.geometry, self.canvas_size());
        let id = self.document.push(element)?;
        log::info!("Pasted {id}");
        self.select(id);
        self.commit(Some(Notification::success("Element pasted")));
        Some(id)
    }

    /// Move the selection one step in z-order.
    pub fn reorder_selected(&mut self, direction: LayerDirection) -> bool {
        self.finish_gesture();
        let Some(id) = self.selection.primary() else {
            return false;
        };
        if !self.document.reorder(id, direction) {
            return false;
        }
        let message = match direction {
            LayerDirection::Up => "Brought forward",
            LayerDirection::Down => "Sent backward",
        };
        log::info!("{message}: {id}");
        self.commit(Some(Notification::success(message)));
        true
    }

    /// Lock or unlock the selection. Always allowed.
    pub fn toggle_lock_selected(&mut self) -> bool {
        self.finish_gesture();
        let Some(element) = self.selection.primary().and_then(|id| self.document.get_mut(id)) else {
            return false;
        };
        element.locked = !element.locked;
        let message = if element.locked {
            "Element locked"
        } else {
            "Element unlocked"
        };
        log::info!("{message}: {}", element.id());
        self.emit_selection();
        self.commit(Some(Notification::success(message)));
        true
    }

    /// Align the selection to a canvas edge or centre.
    pub fn align_selected(&mut self, alignment: Alignment) -> bool {
        self.finish_gesture();
        let Some((id, current)) = self.editable_primary() else {
            return false;
        };
        let origin = geometry::align(current, alignment, self.canvas_size());
        if origin == current.origin() {
            return false;
        }
        self.set_origin(id, origin);
        log::info!("Aligned {id} {alignment:?}");
        self.commit(Some(Notification::success("Element aligned")));
        true
    }

    /// Arrow-key nudge. Commits without a notification.
    pub fn nudge_selected(&mut self, direction: NudgeDirection, large: bool) -> bool {
        self.finish_gesture();
        let Some((id, current)) = self.editable_primary() else {
            return false;
        };
        let step = if large {
            self.config.large_nudge_step
        } else {
            self.config.nudge_step
        };
        let origin = geometry::nudge(current, direction, step, self.canvas_size());
        if origin == current.origin() {
            return false;
        }
        self.set_origin(id, origin);
        self.commit(None);
        true
    }

    /// Run a context menu entry on its element and close the menu.
    pub fn context_menu_action(&mut self, action: ContextMenuAction) -> bool {
        let Some(menu) = self.context_menu.take() else {
            return false;
        };
        if self.selection.primary() != Some(menu.element) {
            return false;
        }
        match action {
            ContextMenuAction::Copy => self.copy_selected(),
            ContextMenuAction::Duplicate => self.duplicate_selected().is_some(),
            ContextMenuAction::ToggleLock => self.toggle_lock_selected(),
            ContextMenuAction::Delete => self.delete_selected(),
        }
    }

    // ---- history ----

    /// Step back one commit. Ignored while a gesture is in flight.
    pub fn undo(&mut self) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.document.restore_elements(snapshot.clone());
        log::info!("Undo to {}", self.history.cursor());
        self.after_restore();
        true
    }

    /// Step forward one commit. Ignored while a gesture is in flight.
    pub fn redo(&mut self) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.document.restore_elements(snapshot.clone());
        log::info!("Redo to {}", self.history.cursor());
        self.after_restore();
        true
    }

    fn after_restore(&mut self) {
        self.prune_selection();
        if self.selection.primary().is_some() {
            self.emit_selection();
        }
        self.events.emit(BuilderEvent::ElementsChanged(self.document.elements()));
    }

    // ---- pages ----

    /// Add a page and make it active. Unnamed pages are called "Page N".
    pub fn add_page(&mut self, name: Option<String>) -> PageId {
        let name = name.unwrap_or_else(|| format!("Page {}", self.document.pages().len() + 1));
        let id = self.document.add_page(name.clone());
        log::info!("Added page {name} ({id})");
        self.set_active_page(id);
        self.notify(Notification::success(format!("Page \"{name}\" added")));
        id
    }

    pub fn rename_page(&mut self, id: PageId, name: impl Into<String>) -> bool {
        self.document.rename_page(id, name)
    }

    /// Delete a page and its elements, also purging them from history.
    /// The last page is refused with a warning.
    pub fn delete_page(&mut self, id: PageId) -> bool {
        self.finish_gesture();
        match self.document.remove_page(id) {
            PageRemoval::NotFound => false,
            PageRemoval::LastPage => {
                log::warn!("Refusing to delete the last page {id}");
                self.notify(Notification::warning("A project needs at least one page"));
                false
            }
            PageRemoval::Removed { elements } => {
                log::info!("Deleted page {id} with {elements} elements");
                self.history.rewrite(|snapshot| snapshot.retain(|e| e.page_id != id));
                if self.active_page == id {
                    self.active_page = self.document.first_page();
                }
                self.prune_selection();
                self.events.emit(BuilderEvent::ElementsChanged(self.document.elements()));
                self.notify(Notification::success("Page deleted"));
                true
            }
        }
    }

    /// Switch pages. The selection is cleared.
    pub fn set_active_page(&mut self, id: PageId) -> bool {
        if !self.document.has_page(id) {
            return false;
        }
        if self.active_page != id {
            self.finish_gesture();
            self.active_page = id;
            self.context_menu = None;
            self.clear_selection();
        }
        true
    }

    // ---- canvas & view ----

    /// Resize the canvas and pull every element back inside it.
    pub fn set_canvas_size(&mut self, size: Size) -> bool {
        if !(size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0) {
            log::warn!("Ignoring canvas size {size:?}");
            return false;
        }
        self.finish_gesture();
        self.config.canvas_width = size.width;
        self.config.canvas_height = size.height;

        let moved = clamp_elements(&mut self.document, size);
        log::info!("Canvas is now {}x{}, {moved} elements re-clamped", size.width, size.height);
        if moved > 0 {
            self.commit(None);
        }
        true
    }

    /// Change only the height, clamped to the adjustable range.
    pub fn set_canvas_height(&mut self, height: f64) -> bool {
        let size = Size::new(self.config.canvas_width, clamp_canvas_height(height));
        self.set_canvas_size(size)
    }

    pub fn apply_preset(&mut self, preset: CanvasPreset) -> bool {
        self.set_canvas_size(preset.size())
    }

    /// Toggle the visual grid. Returns the new state.
    pub fn toggle_grid(&mut self) -> bool {
        self.config.show_grid = !self.config.show_grid;
        self.config.show_grid
    }

    /// Toggle snap-to-grid. Returns the new state.
    pub fn toggle_snap(&mut self) -> bool {
        self.config.snap_to_grid = !self.config.snap_to_grid;
        self.config.snap_to_grid
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn set_zoom(&mut self, scale: f64) {
        self.viewport.set_scale(scale);
    }

    // ---- project ----

    /// Replace the whole project, e.g. after loading. Elements are pulled
    /// inside the canvas and history restarts.
    pub fn load_document(&mut self, mut document: ProjectDocument) {
        clamp_elements(&mut document, self.canvas_size());
        self.gesture = None;
        self.context_menu = None;
        self.active_page = document.first_page();
        self.history.reset(document.elements().to_vec());
        self.document = document;
        self.clear_selection();
        log::info!("Loaded project with {} pages, {} elements", self.document.pages().len(), self.document.len());
    }
}

/// Pull every element inside `canvas`. Returns how many moved.
fn clamp_elements(document: &mut ProjectDocument, canvas: Size) -> usize {
    let mut moved = 0;
    for element in document.elements_mut() {
        let clamped = geometry::clamp_geometry(element.geometry, canvas);
        if clamped != element.geometry {
            element.geometry = clamped;
            moved += 1;
        }
    }
    if moved > 0 {
        log::debug!("Clamped {moved} elements into {}x{}", canvas.width, canvas.height);
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureLog;
    use crate::element::ElementKind;
    use crate::event::NotificationKind;
    use crate::input::Key;
    use crate::palette::default_item;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Seen {
        Selection(Option<ElementId>, usize),
        Elements(usize),
        Note(NotificationKind, String),
    }

    fn recording(controller: &mut InteractionController) -> Rc<RefCell<Vec<Seen>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        controller.subscribe(move |event| {
            sink.borrow_mut().push(match event {
                BuilderEvent::SelectionChanged { primary, multi } => {
                    Seen::Selection(primary.map(|e| e.id()), multi.len())
                }
                BuilderEvent::ElementsChanged(elements) => Seen::Elements(elements.len()),
                BuilderEvent::Notification(n) => Seen::Note(n.kind, n.message.clone()),
            })
        });
        seen
    }

    fn place(c: &mut InteractionController, kind: ElementKind, x: f64, y: f64, w: f64, h: f64) -> ElementId {
        let page = c.active_page();
        c.create(Geometry::new(x, y, w, h), ElementContent::empty(kind), StyleMap::new(), page)
            .unwrap()
    }

    fn down(p: (f64, f64)) -> PointerEvent {
        PointerEvent::down(Point::new(p.0, p.1))
    }

    fn mv(p: (f64, f64)) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(p.0, p.1),
        }
    }

    fn up(p: (f64, f64)) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(p.0, p.1),
        }
    }

    fn geometry_of(c: &InteractionController, id: ElementId) -> Geometry {
        c.document().get(id).unwrap().geometry
    }

    #[test]
    fn test_drop_selects_and_commits() {
        let mut c = InteractionController::default();
        let seen = recording(&mut c);
        let id = c.drop_item(&default_item(ElementKind::Text), Point::new(137.0, 204.0)).unwrap();

        assert_eq!(geometry_of(&c, id), Geometry::new(140.0, 200.0, 300.0, 60.0));
        assert_eq!(c.selection().primary(), Some(id));
        assert_eq!(c.history().len(), 2);
        assert_eq!(
            *seen.borrow(),
            vec![
                Seen::Selection(Some(id), 0),
                Seen::Elements(1),
                Seen::Note(NotificationKind::Success, "Text added".into()),
            ]
        );
    }

    #[test]
    fn test_drop_respects_viewport() {
        let mut c = InteractionController::default();
        c.viewport_mut().set_origin(Point::new(100.0, 50.0));
        c.set_zoom(0.5);
        let id = c.drop_item(&default_item(ElementKind::Button), Point::new(150.0, 150.0)).unwrap();
        assert_eq!(geometry_of(&c, id).origin(), Point::new(100.0, 200.0));
    }

    #[test]
    fn test_drag_commits_once_on_release() {
        let mut c = InteractionController::default();
        let id = place(&mut c, ElementKind::Card, 100.0, 100.0, 200.0, 200.0);
        let seen = recording(&mut c);
        let history_before = c.history().len();

        c.handle_pointer(down((150.0, 150.0)));
        assert_eq!(c.gesture_phase(), GesturePhase::Selecting);
        c.handle_pointer(mv((163.0, 171.0)));
        assert_eq!(c.gesture_phase(), GesturePhase::Dragging);
        c.handle_pointer(mv((253.0, 254.0)));
        assert_eq!(c.history().len(), history_before);
        c.handle_pointer(up((999.0, 999.0)));

        assert_eq!(c.gesture_phase(), GesturePhase::Idle);
        assert_eq!(geometry_of(&c, id), Geometry::new(200.0, 200.0, 200.0, 200.0));
        assert_eq!(c.history().len(), history_before + 1);
        let commits = seen.borrow().iter().filter(|s| matches!(s, Seen::Elements(_))).count();
        assert_eq!(commits, 1);
    }

    #[test]
    fn test_click_without_move_commits_nothing() {
        let mut c = InteractionController::default();
        place(&mut c, ElementKind::Card, 100.0, 100.0, 200.0, 200.0);
        let before = c.history().len();
        c.handle_pointer(down((150.0, 150.0)));
        c.handle_pointer(up((150.0, 150.0)));
        assert_eq!(c.history().len(), before);
    }

    #[test]
    fn test_resize_via_handle() {
        let mut c = InteractionController::default();
        let id = place(&mut c, ElementKind::Container, 0.0, 0.0, 100.0, 100.0);
        c.handle_pointer(down((50.0, 50.0)));
        c.handle_pointer(up((50.0, 50.0)));

        c.handle_pointer(down((1.0, 1.0)));
        assert_eq!(c.gesture_phase(), GesturePhase::Resizing);
        c.handle_pointer(mv((31.0, 21.0)));
        c.handle_pointer(PointerEvent::Cancel);
        assert_eq!(geometry_of(&c, id), Geometry::new(30.0, 20.0, 70.0, 80.0));
        assert!(c.can_undo());
        c.undo();
        assert_eq!(geometry_of(&c, id), Geometry::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_locked_element_rejects_move_resize_delete() {
        let mut c = InteractionController::default();
        let id = place(&mut c, ElementKind::Image, 100.0, 100.0, 200.0, 200.0);
        c.handle_pointer(down((150.0, 150.0)));
        c.handle_pointer(up((150.0, 150.0)));
        assert!(c.toggle_lock_selected());
        let before = c.history().len();

        c.handle_pointer(down((150.0, 150.0)));
        assert_eq!(c.gesture_phase(), GesturePhase::Idle);
        c.handle_pointer(mv((400.0, 400.0)));
        c.handle_pointer(up((400.0, 400.0)));
        c.handle_pointer(down((250.0, 250.0)));
        c.handle_pointer(mv((500.0, 500.0)));
        c.handle_pointer(up((500.0, 500.0)));
        assert!(!c.delete_selected());
        assert!(!c.nudge_selected(NudgeDirection::Left, false));
        assert!(!c.align_selected(Alignment::Left));
        assert!(!c.update(id, ElementPatch::geometry(Geometry::new(0.0, 0.0, 60.0, 60.0))));

        assert_eq!(geometry_of(&c, id), Geometry::new(100.0, 100.0, 200.0, 200.0));
        assert_eq!(c.history().len(), before);

        assert!(c.toggle_lock_selected());
        assert!(c.delete_selected());
        assert!(c.document().is_empty());
    }

    #[test]
    fn test_modifier_click_toggles_multi() {
        let mut c = InteractionController::default();
        let a = place(&mut c, ElementKind::Text, 0.0, 0.0, 100.0, 100.0);
        let b = place(&mut c, ElementKind::Text, 200.0, 0.0, 100.0, 100.0);
        c.handle_pointer(down((50.0, 50.0)));
        c.handle_pointer(up((50.0, 50.0)));

        let shift_down = PointerEvent::Down {
            position: Point::new(250.0, 50.0),
            button: MouseButton::Left,
            modifiers: Modifiers::SHIFT,
            pointer: PointerId(0),
        };
        c.handle_pointer(shift_down.clone());
        assert_eq!(c.selection().primary(), Some(a));
        assert_eq!(c.selection().multi(), &[b]);
        assert_eq!(c.gesture_phase(), GesturePhase::Idle);
        c.handle_pointer(shift_down);
        assert!(c.selection().multi().is_empty());

        c.handle_pointer(down((800.0, 800.0)));
        assert!(c.selection().is_empty());
    }

    #[test]
    fn test_context_menu() {
        let mut c = InteractionController::default();
        let id = place(&mut c, ElementKind::Button, 0.0, 0.0, 150.0, 50.0);
        let right = PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Right,
            modifiers: Modifiers::NONE,
            pointer: PointerId(0),
        };
        c.handle_pointer(right.clone());
        assert!(c.context_menu().is_none());

        c.handle_pointer(down((10.0, 10.0)));
        c.handle_pointer(up((10.0, 10.0)));
        c.handle_pointer(right.clone());
        assert_eq!(c.context_menu().map(|m| m.element), Some(id));
        c.handle_pointer(PointerEvent::Leave);
        assert!(c.context_menu().is_none());

        c.handle_pointer(right);
        assert!(c.context_menu_action(ContextMenuAction::Duplicate));
        assert!(c.context_menu().is_none());
        assert_eq!(c.document().len(), 2);
        assert!(!c.context_menu_action(ContextMenuAction::Delete));
    }

    #[test]
    fn test_duplicate_inserts_after_source() {
        let mut c = InteractionController::default();
        let a = place(&mut c, ElementKind::Text, 100.0, 100.0, 100.0, 100.0);
        let b = place(&mut c, ElementKind::Text, 500.0, 500.0, 100.0, 100.0);
        c.handle_pointer(down((150.0, 150.0)));
        c.handle_pointer(up((150.0, 150.0)));

        let dup = c.duplicate_selected().unwrap();
        let order: Vec<_> = c.document().elements().iter().map(|e| e.id()).collect();
        assert_eq!(order, vec![a, dup, b]);
        assert_eq!(geometry_of(&c, dup).origin(), Point::new(120.0, 120.0));
        assert_eq!(geometry_of(&c, a).origin(), Point::new(100.0, 100.0));
        assert_eq!(c.selection().primary(), Some(dup));
    }

    #[test]
    fn test_paste_across_pages_and_clamped() {
        let mut c = InteractionController::default();
        let a = place(&mut c, ElementKind::Text, 1340.0, 0.0, 100.0, 100.0);
        assert!(!c.copy_selected());
        c.handle_pointer(down((1390.0, 50.0)));
        c.handle_pointer(up((1390.0, 50.0)));
        assert!(c.copy_selected());

        let second = c.add_page(None);
        assert_eq!(c.document().page(second).unwrap().name, "Page 2");
        assert_eq!(c.active_page(), second);
        let pasted = c.paste().unwrap();
        let el = c.document().get(pasted).unwrap();
        assert_eq!(el.page_id, second);
        assert_ne!(pasted, a);
        assert_eq!(el.geometry, Geometry::new(1340.0, 20.0, 100.0, 100.0));
    }

    #[test]
    fn test_paste_empty_is_noop() {
        let mut c = InteractionController::default();
        assert!(c.paste().is_none());
        assert_eq!(c.history().len(), 1);
    }

    #[test]
    fn test_keyboard_shortcuts() {
        let mut c = InteractionController::default();
        let id = place(&mut c, ElementKind::Text, 100.0, 100.0, 100.0, 100.0);
        c.handle_pointer(down((150.0, 150.0)));
        c.handle_pointer(up((150.0, 150.0)));

        assert!(c.handle_key(KeyEvent::new(Key::ArrowRight, Modifiers::NONE)));
        assert!(c.handle_key(KeyEvent::new(Key::ArrowDown, Modifiers::SHIFT)));
        assert_eq!(geometry_of(&c, id).origin(), Point::new(101.0, 110.0));

        assert!(c.handle_key(KeyEvent::command('z')));
        assert_eq!(geometry_of(&c, id).origin(), Point::new(101.0, 100.0));
        assert!(c.handle_key(KeyEvent::command('y')));
        assert_eq!(geometry_of(&c, id).origin(), Point::new(101.0, 110.0));

        assert!(c.handle_key(KeyEvent::command('d')));
        assert_eq!(c.document().len(), 2);
        assert!(c.handle_key(KeyEvent::new(Key::Delete, Modifiers::NONE)));
        assert_eq!(c.document().len(), 1);
        assert!(c.selection().is_empty());

        assert!(!c.handle_key(KeyEvent::new(Key::Char('q'), Modifiers::NONE)));
    }

    #[test]
    fn test_update_commits_without_notification() {
        let mut c = InteractionController::default();
        let id = place(&mut c, ElementKind::Text, 0.0, 0.0, 100.0, 100.0);
        let seen = recording(&mut c);
        let styles = StyleMap::from([("color".to_string(), "#f00".to_string())]);
        assert!(c.update(id, ElementPatch::styles(styles.clone())));
        assert!(!c.update(id, ElementPatch::styles(styles)));
        assert!(!c.update(ElementId::new(), ElementPatch::default()));
        assert!(!c.update(id, ElementPatch::content(ElementContent::Divider)));
        assert_eq!(*seen.borrow(), vec![Seen::Elements(1)]);

        assert!(c.update(id, ElementPatch::geometry(Geometry::new(-5.0, 10.0, 10.0, 10.0))));
        assert_eq!(geometry_of(&c, id), Geometry::new(0.0, 10.0, 50.0, 50.0));

        c.undo();
        c.undo();
        assert!(c.document().get(id).unwrap().styles.is_empty());
    }

    #[test]
    fn test_reorder_and_align() {
        let mut c = InteractionController::default();
        let a = place(&mut c, ElementKind::Text, 0.0, 0.0, 200.0, 100.0);
        let b = place(&mut c, ElementKind::Text, 300.0, 300.0, 100.0, 100.0);
        c.handle_pointer(down((50.0, 50.0)));
        c.handle_pointer(up((50.0, 50.0)));

        assert!(c.reorder_selected(LayerDirection::Up));
        assert!(!c.reorder_selected(LayerDirection::Up));
        let order: Vec<_> = c.document().elements().iter().map(|e| e.id()).collect();
        assert_eq!(order, vec![b, a]);

        assert!(c.align_selected(Alignment::Center));
        assert!(!c.align_selected(Alignment::Center));
        assert_eq!(geometry_of(&c, a).origin(), Point::new(620.0, 0.0));
    }

    #[test]
    fn test_delete_last_page_warns() {
        let mut c = InteractionController::default();
        let seen = recording(&mut c);
        let only = c.active_page();
        assert!(!c.delete_page(only));
        assert_eq!(c.document().pages().len(), 1);
        assert_eq!(
            *seen.borrow(),
            vec![Seen::Note(NotificationKind::Warning, "A project needs at least one page".into())]
        );
    }

    #[test]
    fn test_delete_page_purges_history() {
        let mut c = InteractionController::default();
        let home = c.active_page();
        let keep = place(&mut c, ElementKind::Text, 0.0, 0.0, 100.0, 100.0);
        let other = c.add_page(Some("About".into()));
        let gone = place(&mut c, ElementKind::Text, 0.0, 0.0, 100.0, 100.0);

        assert!(c.delete_page(other));
        assert_eq!(c.active_page(), home);
        assert!(!c.document().contains(gone));
        assert!(c.document().contains(keep));
        while c.undo() {}
        assert!(c.redo());
        assert!(c.redo());
        assert!(!c.document().contains(gone));
        assert!(c.history().current().iter().all(|e| e.page_id == home));
    }

    #[test]
    fn test_canvas_resize_reclamps() {
        let mut c = InteractionController::default();
        let id = place(&mut c, ElementKind::Video, 1000.0, 100.0, 400.0, 300.0);
        let before = c.history().len();
        assert!(c.apply_preset(CanvasPreset::Mobile));
        assert_eq!(geometry_of(&c, id), Geometry::new(0.0, 100.0, 375.0, 300.0));
        assert_eq!(c.history().len(), before + 1);

        assert!(c.set_canvas_height(100.0));
        assert_eq!(c.canvas_size(), Size::new(375.0, 500.0));
        assert!(!c.set_canvas_size(Size::new(0.0, 100.0)));
    }

    #[test]
    fn test_toggles_and_zoom() {
        let mut c = InteractionController::default();
        assert!(!c.toggle_snap());
        assert_eq!(c.grid(), None);
        assert!(!c.toggle_grid());
        c.zoom_in();
        assert_eq!(c.viewport().zoom_percent(), 125);
        c.zoom_out();
        c.zoom_out();
        assert_eq!(c.viewport().zoom_percent(), 75);
    }

    #[test]
    fn test_capture_released_on_release_and_teardown() {
        let log = Rc::new(CaptureLog::new());
        let mut c = InteractionController::default();
        c.set_capture_target(log.clone());
        place(&mut c, ElementKind::Text, 0.0, 0.0, 100.0, 100.0);

        c.handle_pointer(down((50.0, 50.0)));
        assert_eq!(log.held().len(), 1);
        c.handle_pointer(up((50.0, 50.0)));
        assert!(log.held().is_empty());

        c.handle_pointer(down((50.0, 50.0)));
        assert_eq!(log.held().len(), 1);
        drop(c);
        assert!(log.held().is_empty());
    }

    #[test]
    fn test_undo_ignored_mid_gesture() {
        let mut c = InteractionController::default();
        place(&mut c, ElementKind::Text, 0.0, 0.0, 100.0, 100.0);
        c.handle_pointer(down((50.0, 50.0)));
        c.handle_pointer(mv((80.0, 80.0)));
        assert!(!c.undo());
        c.handle_pointer(up((80.0, 80.0)));
        assert!(c.undo());
    }

    #[test]
    fn test_load_document_resets() {
        let mut c = InteractionController::default();
        place(&mut c, ElementKind::Text, 0.0, 0.0, 100.0, 100.0);
        let mut doc = ProjectDocument::new();
        let page = doc.first_page();
        doc.create(Geometry::new(0.0, 0.0, 60.0, 60.0), ElementContent::Divider, StyleMap::new(), page);
        c.load_document(doc.clone());
        assert_eq!(c.document(), &doc);
        assert_eq!(c.active_page(), page);
        assert!(!c.can_undo());
    }

    #[test]
    fn test_key_during_drag_settles_gesture() {
        let mut c = InteractionController::default();
        let id = place(&mut c, ElementKind::Card, 100.0, 100.0, 200.0, 200.0);
        let before = c.history().len();

        c.handle_pointer(down((150.0, 150.0)));
        c.handle_pointer(mv((250.0, 250.0)));
        assert!(c.handle_key(KeyEvent::new(Key::ArrowRight, Modifiers::NONE)));
        assert_eq!(c.gesture_phase(), GesturePhase::Idle);
        // drag and nudge are separate steps
        assert_eq!(c.history().len(), before + 2);

        c.handle_pointer(mv((400.0, 400.0)));
        c.handle_pointer(up((400.0, 400.0)));
        assert_eq!(c.history().len(), before + 2);
        assert_eq!(geometry_of(&c, id), Geometry::new(201.0, 200.0, 200.0, 200.0));

        c.undo();
        assert_eq!(geometry_of(&c, id), Geometry::new(200.0, 200.0, 200.0, 200.0));
    }

    #[test]
    fn test_lock_during_drag_stops_move() {
        let mut c = InteractionController::default();
        let id = place(&mut c, ElementKind::Image, 100.0, 100.0, 200.0, 200.0);
        let log = Rc::new(CaptureLog::new());
        c.set_capture_target(log.clone());
        let before = c.history().len();

        c.handle_pointer(down((150.0, 150.0)));
        c.handle_pointer(mv((250.0, 250.0)));
        assert!(c.toggle_lock_selected());
        assert!(log.held().is_empty());

        c.handle_pointer(mv((500.0, 500.0)));
        c.handle_pointer(up((500.0, 500.0)));
        let element = c.document().get(id).unwrap();
        assert!(element.locked);
        assert_eq!(element.geometry, Geometry::new(200.0, 200.0, 200.0, 200.0));
        assert_eq!(c.history().len(), before + 2);
    }

    #[test]
    fn test_loaded_elements_are_clamped() {
        let mut doc = ProjectDocument::new();
        let page = doc.first_page();
        let id = doc
            .create(Geometry::new(5000.0, -40.0, 10.0, 10.0), ElementContent::Divider, StyleMap::new(), page)
            .unwrap();
        let doc = ProjectDocument::from_json(&doc.to_json().unwrap()).unwrap();

        let c = InteractionController::with_document(doc.clone(), BuilderConfig::default());
        assert_eq!(geometry_of(&c, id), Geometry::new(1430.0, 0.0, 10.0, 10.0));
        assert_eq!(c.history().current().as_slice(), c.document().elements());

        let mut c = InteractionController::default();
        c.load_document(doc);
        assert!(c.document().get(id).unwrap().geometry.fits_within(c.canvas_size()));
        assert!(!c.can_undo());
    }

    #[test]
    fn test_resize_from_corner_handle() {
        let mut c = InteractionController::default();
        let id = place(&mut c, ElementKind::Text, 100.0, 100.0, 100.0, 100.0);
        c.handle_pointer(down((150.0, 150.0)));
        c.handle_pointer(up((150.0, 150.0)));
        c.handle_pointer(down((200.0, 200.0)));
        c.handle_pointer(mv((260.0, 230.0)));
        c.handle_pointer(up((260.0, 230.0)));
        let g = geometry_of(&c, id);
        assert_eq!(g, Geometry::new(100.0, 100.0, 160.0, 130.0));
    }
}
