//! Single-slot element clipboard.

use crate::element::{Element, PageId};
use kurbo::Vec2;

/// Holds at most one copied element. Copying again overwrites the slot.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    slot: Option<Element>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a deep copy of `element`.
    pub fn copy(&mut self, element: &Element) {
        self.slot = Some(element.clone());
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// The copied element, untouched.
    pub fn peek(&self) -> Option<&Element> {
        self.slot.as_ref()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// A fresh element from the slot, shifted by `offset` on both axes and
    /// assigned to `page`. The slot keeps its copy, so pasting repeatedly
    /// yields distinct elements at the same spot.
    pub fn paste(&self, page: PageId, offset: f64) -> Option<Element> {
        let mut element = duplicate(self.slot.as_ref()?, offset);
        element.page_id = page;
        Some(element)
    }
}

/// Copy of `source` with a new ID, shifted by `offset` on both axes.
/// Clamping is the caller's job.
pub fn duplicate(source: &Element, offset: f64) -> Element {
    let mut element = source.clone_with_new_id();
    let origin = element.geometry.origin() + Vec2::new(offset, offset);
    element.geometry = element.geometry.with_origin(origin);
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ElementContent;
    use crate::element::{Geometry, StyleMap};

    fn sample(page: PageId) -> Element {
        Element::new(
            Geometry::new(100.0, 100.0, 200.0, 80.0),
            ElementContent::Divider,
            StyleMap::new(),
            page,
        )
    }

    #[test]
    fn test_paste_empty() {
        assert!(Clipboard::new().paste(PageId::new(), 20.0).is_none());
    }

    #[test]
    fn test_paste_to_other_page() {
        let (src_page, dst_page) = (PageId::new(), PageId::new());
        let source = sample(src_page);
        let mut clip = Clipboard::new();
        clip.copy(&source);

        let pasted = clip.paste(dst_page, 20.0).unwrap();
        assert_ne!(pasted.id(), source.id());
        assert_eq!(pasted.page_id, dst_page);
        assert_eq!(pasted.geometry, Geometry::new(120.0, 120.0, 200.0, 80.0));

        let again = clip.paste(dst_page, 20.0).unwrap();
        assert_ne!(again.id(), pasted.id());
        assert_eq!(clip.peek(), Some(&source));
    }

    #[test]
    fn test_copy_overwrites() {
        let page = PageId::new();
        let (a, b) = (sample(page), sample(page));
        let mut clip = Clipboard::new();
        clip.copy(&a);
        clip.copy(&b);
        assert_eq!(clip.peek().map(|e| e.id()), Some(b.id()));
        clip.clear();
        assert!(clip.is_empty());
    }

    #[test]
    fn test_duplicate_leaves_source() {
        let source = sample(PageId::new());
        let before = source.clone();
        let dup = duplicate(&source, 20.0);
        assert_eq!(source, before);
        assert_ne!(dup.id(), source.id());
        assert_eq!(dup.page_id, source.page_id);
        assert_eq!(dup.geometry.origin(), kurbo::Point::new(120.0, 120.0));
    }
}
