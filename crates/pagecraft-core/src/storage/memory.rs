//! In-memory project storage.

use super::{BoxFuture, Storage, StorageError, StorageResult, decode};
use crate::document::ProjectDocument;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Keeps serialized projects in a map. Nothing survives the process, but
/// every save still goes through the JSON shape so loads behave like the
/// file backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    projects: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_err() -> StorageError {
        StorageError::Other("Storage lock poisoned".to_string())
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, project: &ProjectDocument) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let json = project.to_json().map_err(|e| StorageError::Serialization(e.to_string()));
        Box::pin(async move {
            let json = json?;
            self.projects.write().map_err(|_| Self::lock_err())?.insert(id, json);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<ProjectDocument>> {
        let id = id.to_string();
        Box::pin(async move {
            let projects = self.projects.read().map_err(|_| Self::lock_err())?;
            let json = projects.get(&id).ok_or(StorageError::NotFound(id.clone()))?;
            decode(json)
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.projects.write().map_err(|_| Self::lock_err())?.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let projects = self.projects.read().map_err(|_| Self::lock_err())?;
            Ok(projects.keys().cloned().collect())
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move {
            let projects = self.projects.read().map_err(|_| Self::lock_err())?;
            Ok(projects.contains_key(&id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ElementContent;
    use crate::element::{ElementKind, Geometry, StyleMap};
    use crate::storage::block_on;

    #[test]
    fn test_save_load_keeps_elements() {
        let storage = MemoryStorage::new();
        let mut doc = ProjectDocument::new();
        let page = doc.first_page();
        let id = doc.create(
            Geometry::new(10.0, 20.0, 200.0, 80.0),
            ElementContent::empty(ElementKind::Heading),
            StyleMap::new(),
            page,
        )
        .unwrap();

        block_on(storage.save("landing", &doc)).unwrap();
        let loaded = block_on(storage.load("landing")).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(id).map(|e| e.geometry), Some(Geometry::new(10.0, 20.0, 200.0, 80.0)));
    }

    #[test]
    fn test_missing_project() {
        let storage = MemoryStorage::new();
        assert!(matches!(block_on(storage.load("nope")), Err(StorageError::NotFound(id)) if id == "nope"));
        assert!(!block_on(storage.exists("nope")).unwrap());
        // deleting something absent is fine
        block_on(storage.delete("nope")).unwrap();
    }

    #[test]
    fn test_list_sorted() {
        let storage = MemoryStorage::new();
        let doc = ProjectDocument::new();
        for id in ["b", "a", "c"] {
            block_on(storage.save(id, &doc)).unwrap();
        }
        assert_eq!(block_on(storage.list()).unwrap(), vec!["a", "b", "c"]);
        block_on(storage.delete("b")).unwrap();
        assert_eq!(block_on(storage.list()).unwrap(), vec!["a", "c"]);
    }
}
