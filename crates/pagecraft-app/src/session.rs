//! Recorded builder sessions and their replay through the controller.
//!
//! A session is a JSON document with an optional builder config and an
//! ordered list of steps. Each step is one thing a user did in the builder
//! shell: a pointer or key event, a palette drop, a menu command.

use kurbo::{Point, Vec2};
use pagecraft_core::{
    Alignment, BuilderConfig, BuilderEvent, CanvasPreset, CaptureLog, ConfigError, ContextMenuAction, ElementContent,
    ElementId, ElementKind, ElementPatch, Geometry, InteractionController, Key, KeyEvent, LayerDirection, ModelError,
    Modifiers, Notification, NudgeDirection, PageId, PointerEvent, ProjectDocument, StorageError, StyleMap,
    palette::default_item,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

/// Errors raised while loading or replaying a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid session: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A page step referenced a page index past the end of the project.
    #[error("Step {step}: no page at index {index}")]
    UnknownPage { step: usize, index: usize },

    #[error("{0}")]
    Usage(String),
}

/// One recorded user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionStep {
    Pointer {
        event: PointerEvent,
    },
    Key {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Palette item dropped at a viewport position.
    Drop {
        kind: ElementKind,
        at: Point,
    },
    QuickAdd {
        kind: ElementKind,
    },
    /// Properties-editor change to the selected element. `content` is
    /// decoded against the element's own type.
    Update {
        #[serde(default)]
        styles: Option<StyleMap>,
        #[serde(default)]
        content: Option<serde_json::Value>,
        #[serde(default)]
        geometry: Option<Geometry>,
    },
    Undo,
    Redo,
    Copy,
    Paste,
    Duplicate,
    Delete,
    Layer {
        direction: LayerDirection,
    },
    ToggleLock,
    Align {
        alignment: Alignment,
    },
    Nudge {
        direction: NudgeDirection,
        #[serde(default)]
        large: bool,
    },
    /// Pick an entry from the open context menu.
    Menu {
        action: ContextMenuAction,
    },
    AddPage {
        #[serde(default)]
        name: Option<String>,
    },
    RenamePage {
        page: usize,
        name: String,
    },
    SelectPage {
        page: usize,
    },
    DeletePage {
        page: usize,
    },
    Preset {
        preset: CanvasPreset,
    },
    CanvasHeight {
        height: f64,
    },
    ToggleGrid,
    ToggleSnap,
    Zoom {
        scale: f64,
    },
    Pan {
        by: Vec2,
    },
}

/// A recorded session file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub config: Option<BuilderConfig>,
    pub steps: Vec<SessionStep>,
}

impl Session {
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        let session: Session = serde_json::from_str(json)?;
        if let Some(config) = &session.config {
            config.validate()?;
        }
        Ok(session)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded session from {}", path.display());
        Self::from_json(&json)
    }
}

/// What the controller reported while a session ran.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
    pub commits: usize,
    pub notifications: Vec<Notification>,
    pub selection: Option<ElementId>,
}

/// Replays steps against an owned controller and records its events.
pub struct SessionRunner {
    controller: InteractionController,
    report: Rc<RefCell<SessionReport>>,
    capture: Rc<CaptureLog>,
}

impl SessionRunner {
    pub fn new(config: BuilderConfig) -> Self {
        Self::with_document(ProjectDocument::new(), config)
    }

    pub fn with_document(document: ProjectDocument, config: BuilderConfig) -> Self {
        let mut controller = InteractionController::with_document(document, config);
        let capture = Rc::new(CaptureLog::new());
        controller.set_capture_target(capture.clone());

        let report = Rc::new(RefCell::new(SessionReport::default()));
        let sink = report.clone();
        controller.subscribe(move |event| {
            let mut report = sink.borrow_mut();
            match event {
                BuilderEvent::ElementsChanged(elements) => {
                    report.commits += 1;
                    log::debug!("Commit #{}: {} elements", report.commits, elements.len());
                }
                BuilderEvent::SelectionChanged { primary, multi } => {
                    report.selection = primary.map(|e| e.id());
                    log::debug!("Selection: {:?} (+{} more)", report.selection, multi.len());
                }
                BuilderEvent::Notification(n) => {
                    log::info!("[{:?}] {}", n.kind, n.message);
                    report.notifications.push((*n).clone());
                }
            }
        });

        Self {
            controller,
            report,
            capture,
        }
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut InteractionController {
        &mut self.controller
    }

    pub fn report(&self) -> SessionReport {
        self.report.borrow().clone()
    }

    /// Pointers currently captured by an open gesture.
    pub fn captured_pointers(&self) -> usize {
        self.capture.held().len()
    }

    pub fn into_document(self) -> ProjectDocument {
        self.controller.into_document()
    }

    /// Apply every step in order, stopping at the first failing one.
    pub fn run(&mut self, steps: &[SessionStep]) -> Result<(), SessionError> {
        for (index, step) in steps.iter().enumerate() {
            self.apply(index, step)?;
        }
        Ok(())
    }

    fn page_at(&self, step: usize, index: usize) -> Result<PageId, SessionError> {
        self.controller
            .document()
            .pages()
            .get(index)
            .map(|p| p.id)
            .ok_or(SessionError::UnknownPage { step, index })
    }

    /// Apply one step. Only malformed steps fail; a step the controller
    /// ignores (paste with an empty clipboard, say) is not an error.
    pub fn apply(&mut self, index: usize, step: &SessionStep) -> Result<(), SessionError> {
        log::trace!("Step {index}: {step:?}");
        let c = &mut self.controller;
        match step {
            SessionStep::Pointer { event } => c.handle_pointer(event.clone()),
            SessionStep::Key { key, modifiers } => {
                if !c.handle_key(KeyEvent::new(*key, *modifiers)) {
                    log::debug!("Step {index}: key {key:?} had no effect");
                }
            }
            SessionStep::Drop { kind, at } => {
                c.drop_item(&default_item(*kind), *at);
            }
            SessionStep::QuickAdd { kind } => {
                c.quick_add(&default_item(*kind));
            }
            SessionStep::Update {
                styles,
                content,
                geometry,
            } => {
                let Some(element) = c.selected_element() else {
                    log::warn!("Step {index}: update without a selection");
                    return Ok(());
                };
                let id = element.id();
                let content = content
                    .clone()
                    .map(|value| ElementContent::from_value(element.kind(), value))
                    .transpose()?;
                c.update(
                    id,
                    ElementPatch {
                        styles: styles.clone(),
                        content,
                        geometry: *geometry,
                    },
                );
            }
            SessionStep::Undo => {
                c.undo();
            }
            SessionStep::Redo => {
                c.redo();
            }
            SessionStep::Copy => {
                c.copy_selected();
            }
            SessionStep::Paste => {
                c.paste();
            }
            SessionStep::Duplicate => {
                c.duplicate_selected();
            }
            SessionStep::Delete => {
                c.delete_selected();
            }
            SessionStep::Layer { direction } => {
                c.reorder_selected(*direction);
            }
            SessionStep::ToggleLock => {
                c.toggle_lock_selected();
            }
            SessionStep::Align { alignment } => {
                c.align_selected(*alignment);
            }
            SessionStep::Nudge { direction, large } => {
                c.nudge_selected(*direction, *large);
            }
            SessionStep::Menu { action } => {
                c.context_menu_action(*action);
            }
            SessionStep::AddPage { name } => {
                c.add_page(name.clone());
            }
            SessionStep::RenamePage { page, name } => {
                let id = self.page_at(index, *page)?;
                self.controller.rename_page(id, name.clone());
            }
            SessionStep::SelectPage { page } => {
                let id = self.page_at(index, *page)?;
                self.controller.set_active_page(id);
            }
            SessionStep::DeletePage { page } => {
                let id = self.page_at(index, *page)?;
                self.controller.delete_page(id);
            }
            SessionStep::Preset { preset } => {
                c.apply_preset(*preset);
            }
            SessionStep::CanvasHeight { height } => {
                c.set_canvas_height(*height);
            }
            SessionStep::ToggleGrid => {
                c.toggle_grid();
            }
            SessionStep::ToggleSnap => {
                c.toggle_snap();
            }
            SessionStep::Zoom { scale } => c.set_zoom(*scale),
            SessionStep::Pan { by } => c.viewport_mut().pan(*by),
        }
        Ok(())
    }
}
