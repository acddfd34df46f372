//! Periodic project saving driven by controller commits.

use crate::controller::InteractionController;
use crate::document::ProjectDocument;
use crate::event::{BuilderEvent, ListenerId};
use crate::storage::{Storage, StorageResult};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default auto-save interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Key holding a copy of the most recently saved project.
pub const LAST_PROJECT_KEY: &str = "__last_project__";

/// ID used until the shell names the project.
const UNTITLED: &str = "untitled";

/// Shared "has unsaved changes" bit. Cloning shares the same bit, so a
/// controller listener can set it while the manager reads it.
#[derive(Debug, Clone, Default)]
pub struct DirtyFlag(Rc<Cell<bool>>);

impl DirtyFlag {
    pub fn set(&self) {
        self.0.set(true);
    }

    pub fn clear(&self) {
        self.0.set(false);
    }

    pub fn get(&self) -> bool {
        self.0.get()
    }
}

/// Saves the open project at most once per interval, and only when a
/// commit has happened since the last save.
pub struct AutoSaveManager<S: Storage> {
    storage: Arc<S>,
    interval: Duration,
    last_save: Option<Instant>,
    dirty: DirtyFlag,
    project_id: String,
}

impl<S: Storage> AutoSaveManager<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            last_save: None,
            dirty: DirtyFlag::default(),
            project_id: UNTITLED.to_string(),
        }
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn mark_dirty(&self) {
        self.dirty.set();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Handle to the dirty bit for wiring into other listeners.
    pub fn dirty_flag(&self) -> DirtyFlag {
        self.dirty.clone()
    }

    /// Mark dirty on every committed mutation of `controller`.
    pub fn watch(&self, controller: &mut InteractionController) -> ListenerId {
        let dirty = self.dirty_flag();
        controller.subscribe(move |event| {
            if let BuilderEvent::ElementsChanged(_) = event {
                dirty.set();
            }
        })
    }

    pub fn set_project_id(&mut self, id: impl Into<String>) {
        self.project_id = id.into();
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Dirty, and either never saved or the interval has elapsed.
    pub fn should_save(&self) -> bool {
        if !self.dirty.get() {
            return false;
        }
        match self.last_save {
            Some(last) => last.elapsed() >= self.interval,
            None => true,
        }
    }

    /// Save if [`should_save`](Self::should_save). Returns whether it did.
    pub async fn maybe_save(&mut self, project: &ProjectDocument) -> StorageResult<bool> {
        if !self.should_save() {
            return Ok(false);
        }
        self.save(project).await?;
        Ok(true)
    }

    /// Save now, under the project ID and as the last project.
    pub async fn save(&mut self, project: &ProjectDocument) -> StorageResult<()> {
        self.storage.save(&self.project_id, project).await?;
        self.storage.save(LAST_PROJECT_KEY, project).await?;
        self.last_save = Some(Instant::now());
        self.dirty.clear();
        log::info!("Auto-saved project '{}'", self.project_id);
        Ok(())
    }

    /// Load a project and make it the one being saved.
    pub async fn load(&mut self, id: &str) -> StorageResult<ProjectDocument> {
        let project = self.storage.load(id).await?;
        self.project_id = id.to_string();
        self.dirty.clear();
        self.last_save = Some(Instant::now());
        Ok(project)
    }

    /// The last saved project, if one exists and still parses.
    pub async fn load_last(&mut self) -> Option<ProjectDocument> {
        match self.storage.load(LAST_PROJECT_KEY).await {
            Ok(project) => {
                self.dirty.clear();
                self.last_save = Some(Instant::now());
                Some(project)
            }
            Err(e) => {
                log::debug!("No last project to restore: {e}");
                None
            }
        }
    }

    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        self.storage.delete(id).await
    }

    /// Saved project IDs, without the last-project copy.
    pub async fn list_projects(&self) -> StorageResult<Vec<String>> {
        let mut ids = self.storage.list().await?;
        ids.retain(|id| id != LAST_PROJECT_KEY);
        Ok(ids)
    }

    pub async fn exists(&self, id: &str) -> StorageResult<bool> {
        self.storage.exists(id).await
    }
}
