//! Pagecraft Core Library
//!
//! Platform-agnostic engine for the Pagecraft visual page builder: the
//! element model, placement geometry, the interaction controller with its
//! undo history and clipboard, and project storage.

pub mod capture;
pub mod clipboard;
pub mod config;
pub mod content;
pub mod controller;
pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod geometry;
pub mod history;
pub mod input;
pub mod palette;
pub mod render;
pub mod selection;
pub mod shortcuts;
pub mod snap;
pub mod storage;
pub mod viewport;

pub use capture::{CaptureLog, CaptureTarget, PointerCapture};
pub use clipboard::Clipboard;
pub use config::BuilderConfig;
pub use content::ElementContent;
pub use controller::{ContextMenu, ContextMenuAction, GesturePhase, InteractionController};
pub use document::{LayerDirection, PageRemoval, ProjectDocument};
pub use element::{EdgeAnchor, Element, ElementId, ElementKind, ElementPatch, Geometry, Page, PageId, StyleMap};
pub use error::{ConfigError, ModelError};
pub use event::{BuilderEvent, ListenerId, Notification, NotificationKind};
pub use geometry::{Alignment, NudgeDirection};
pub use history::History;
pub use input::{Key, KeyEvent, Modifiers, MouseButton, PointerEvent, PointerId};
pub use palette::{PaletteItem, default_catalog};
pub use render::{ElementRenderer, render_page};
pub use selection::{ResizeHandle, Selection};
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry};
pub use snap::{GRID_SIZE, SnapResult, snap_point, snap_to_grid};
pub use storage::{AutoSaveManager, FileStorage, MemoryStorage, Storage, StorageError, StorageResult};
pub use viewport::{CanvasPreset, Viewport};
