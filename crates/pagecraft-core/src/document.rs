//! Project document: pages plus the ordered element sequence.

use crate::content::ElementContent;
use crate::element::{Element, ElementId, ElementPatch, Geometry, Page, PageId, StyleMap};
use crate::error::ModelError;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name given to the page of a fresh project.
pub const DEFAULT_PAGE_NAME: &str = "Home";

/// Direction for a one-step layer change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerDirection {
    /// Towards the front (later in the sequence).
    Up,
    /// Towards the back (earlier in the sequence).
    Down,
}

/// Outcome of a page deletion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRemoval {
    /// Page removed together with this many elements.
    Removed { elements: usize },
    /// Refused because it is the only page left.
    LastPage,
    /// No page with that ID.
    NotFound,
}

/// A project containing pages and all their elements.
///
/// The element sequence is shared by every page; stacking order is the
/// position in that sequence (back to front).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProjectRecord")]
pub struct ProjectDocument {
    pages: Vec<Page>,
    elements: Vec<Element>,
}

/// Unvalidated persisted shape.
#[derive(Deserialize)]
struct ProjectRecord {
    pages: Vec<Page>,
    #[serde(default)]
    elements: Vec<Element>,
}

impl TryFrom<ProjectRecord> for ProjectDocument {
    type Error = ModelError;

    fn try_from(record: ProjectRecord) -> Result<Self, Self::Error> {
        let doc = Self {
            pages: record.pages,
            elements: record.elements,
        };
        doc.validate()?;
        Ok(doc)
    }
}

impl Default for ProjectDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectDocument {
    /// Create a project with a single empty page.
    pub fn new() -> Self {
        Self {
            pages: vec![Page::new(DEFAULT_PAGE_NAME)],
            elements: Vec::new(),
        }
    }

    /// Check the referential invariants of a loaded project.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.pages.is_empty() {
            return Err(ModelError::NoPages);
        }
        let pages: HashSet<PageId> = self.pages.iter().map(|p| p.id).collect();
        let mut seen = HashSet::new();
        for element in &self.elements {
            if !seen.insert(element.id()) {
                return Err(ModelError::DuplicateElement(element.id()));
            }
            if !pages.contains(&element.page_id) {
                return Err(ModelError::MissingPage {
                    element: element.id(),
                    page: element.page_id,
                });
            }
        }
        Ok(())
    }

    /// Serialize the project to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize and validate a project from JSON.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    // ---- pages ----

    /// All pages in creation order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn has_page(&self, id: PageId) -> bool {
        self.page(id).is_some()
    }

    /// The first page. There is always one.
    pub fn first_page(&self) -> PageId {
        self.pages[0].id
    }

    /// Append a new page.
    pub fn add_page(&mut self, name: impl Into<String>) -> PageId {
        let page = Page::new(name);
        let id = page.id;
        self.pages.push(page);
        id
    }

    /// Rename a page. Returns false if the page does not exist.
    pub fn rename_page(&mut self, id: PageId, name: impl Into<String>) -> bool {
        match self.pages.iter_mut().find(|p| p.id == id) {
            Some(page) => {
                page.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Delete a page and every element on it. The last page is never removed.
    pub fn remove_page(&mut self, id: PageId) -> PageRemoval {
        if !self.has_page(id) {
            return PageRemoval::NotFound;
        }
        if self.pages.len() == 1 {
            return PageRemoval::LastPage;
        }
        self.pages.retain(|p| p.id != id);
        let before = self.elements.len();
        self.elements.retain(|e| e.page_id != id);
        PageRemoval::Removed {
            elements: before - self.elements.len(),
        }
    }

    // ---- elements ----

    /// All elements in z-order (back to front).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Elements on one page in z-order.
    pub fn elements_on_page(&self, page: PageId) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.page_id == page)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Position of an element in the sequence.
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Create an element on the top of the stack.
    /// Returns None if the page does not exist.
    pub fn create(
        &mut self,
        geometry: Geometry,
        content: ElementContent,
        styles: StyleMap,
        page_id: PageId,
    ) -> Option<ElementId> {
        self.push(Element::new(geometry, content, styles, page_id))
    }

    /// Append an existing element. Rejected if its page is missing or its ID
    /// is already present.
    pub fn push(&mut self, element: Element) -> Option<ElementId> {
        if !self.has_page(element.page_id) || self.contains(element.id()) {
            return None;
        }
        let id = element.id();
        self.elements.push(element);
        Some(id)
    }

    /// Insert directly above `anchor` in z-order, or on top if the anchor is gone.
    pub fn insert_after(&mut self, anchor: ElementId, element: Element) -> Option<ElementId> {
        if !self.has_page(element.page_id) || self.contains(element.id()) {
            return None;
        }
        let id = element.id();
        match self.index_of(anchor) {
            Some(idx) => self.elements.insert(idx + 1, element),
            None => self.elements.push(element),
        }
        Some(id)
    }

    /// Apply a partial update. Returns false when the ID is unknown.
    pub fn update(&mut self, id: ElementId, patch: ElementPatch) -> bool {
        let Some(element) = self.get_mut(id) else {
            return false;
        };
        if let Some(styles) = patch.styles {
            element.styles = styles;
        }
        if let Some(content) = patch.content {
            element.content = content;
        }
        if let Some(geometry) = patch.geometry {
            element.geometry = geometry;
        }
        true
    }

    /// Remove an element.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let idx = self.index_of(id)?;
        Some(self.elements.remove(idx))
    }

    /// Swap an element with the nearest element on the same page in the
    /// given direction. Elements of other pages keep their positions.
    /// Returns true if the element moved; no-op at either end of its page.
    pub fn reorder(&mut self, id: ElementId, direction: LayerDirection) -> bool {
        let Some(pos) = self.index_of(id) else {
            return false;
        };
        let page = self.elements[pos].page_id;
        let target = match direction {
            LayerDirection::Up => self.elements[pos + 1..]
                .iter()
                .position(|e| e.page_id == page)
                .map(|offset| pos + 1 + offset),
            LayerDirection::Down => self.elements[..pos].iter().rposition(|e| e.page_id == page),
        };
        match target {
            Some(target) => {
                self.elements.swap(pos, target);
                true
            }
            None => false,
        }
    }

    /// Replace the whole element sequence (history restore).
    pub(crate) fn restore_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }

    /// Mutable access for bulk geometry passes.
    pub(crate) fn elements_mut(&mut self) -> &mut [Element] {
        &mut self.elements
    }

    /// Topmost element on a page under a canvas-space point.
    pub fn element_at_point(&self, page: PageId, point: Point) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.page_id == page && e.hit_test(point))
            .map(|e| e.id())
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements across all pages.
    pub fn len(&self) -> usize {
        self.elements.len()
    }
}
