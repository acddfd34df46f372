//! Renderer seam. The engine never draws; shells implement this.

use crate::content::ElementContent;
use crate::document::ProjectDocument;
use crate::element::{Element, ElementKind, PageId, StyleMap};

/// Turns one element's type, content and styles into visual output.
///
/// Implementations must be pure: the same input always yields the same
/// output, and the engine never inspects what comes back.
pub trait ElementRenderer {
    type Output;

    fn render(&self, kind: ElementKind, content: &ElementContent, styles: &StyleMap) -> Self::Output;

    fn render_element(&self, element: &Element) -> Self::Output {
        self.render(element.kind(), &element.content, &element.styles)
    }
}

/// Render every element of a page, back to front.
pub fn render_page<R: ElementRenderer>(
    renderer: &R,
    document: &ProjectDocument,
    page: PageId,
) -> Vec<(ElementKind, R::Output)> {
    document
        .elements_on_page(page)
        .map(|e| (e.kind(), renderer.render_element(e)))
        .collect()
}
