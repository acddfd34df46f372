//! Element definitions for the page builder.

use crate::content::ElementContent;
use crate::error::ModelError;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Minimum width and height an element can be resized to.
pub const MIN_ELEMENT_SIZE: f64 = 50.0;

/// Open bag of CSS-like style properties.
pub type StyleMap = BTreeMap<String, String>;

/// Unique identifier for an element. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(Uuid);

impl PageId {
    /// Create a new unique page ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed vocabulary of element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Heading,
    Button,
    Image,
    Video,
    Icon,
    Divider,
    Container,
    Section,
    Header,
    Footer,
    Navbar,
    Hero,
    Card,
    Grid,
    Testimonial,
    Pricing,
    Team,
    Cta,
    Contact,
    Stats,
    Features,
    List,
}

/// Where a full-bleed element anchors vertically when placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeAnchor {
    /// Pinned to the top of the canvas.
    Top,
    /// Pinned to the bottom of the canvas.
    Bottom,
    /// Keeps the vertical position it was dropped at.
    Free,
}

impl ElementKind {
    /// Every element type, in palette order.
    pub const ALL: [ElementKind; 23] = [
        ElementKind::Text,
        ElementKind::Heading,
        ElementKind::Button,
        ElementKind::Image,
        ElementKind::Video,
        ElementKind::Icon,
        ElementKind::Container,
        ElementKind::Section,
        ElementKind::Divider,
        ElementKind::Header,
        ElementKind::Footer,
        ElementKind::Navbar,
        ElementKind::Hero,
        ElementKind::Card,
        ElementKind::Grid,
        ElementKind::Testimonial,
        ElementKind::Pricing,
        ElementKind::Team,
        ElementKind::Cta,
        ElementKind::Contact,
        ElementKind::Stats,
        ElementKind::Features,
        ElementKind::List,
    ];

    /// The wire name of this type.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Heading => "heading",
            ElementKind::Button => "button",
            ElementKind::Image => "image",
            ElementKind::Video => "video",
            ElementKind::Icon => "icon",
            ElementKind::Divider => "divider",
            ElementKind::Container => "container",
            ElementKind::Section => "section",
            ElementKind::Header => "header",
            ElementKind::Footer => "footer",
            ElementKind::Navbar => "navbar",
            ElementKind::Hero => "hero",
            ElementKind::Card => "card",
            ElementKind::Grid => "grid",
            ElementKind::Testimonial => "testimonial",
            ElementKind::Pricing => "pricing",
            ElementKind::Team => "team",
            ElementKind::Cta => "cta",
            ElementKind::Contact => "contact",
            ElementKind::Stats => "stats",
            ElementKind::Features => "features",
            ElementKind::List => "list",
        }
    }

    /// Parse a wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Full-bleed types always span the canvas width when placed.
    pub fn is_full_bleed(self) -> bool {
        matches!(
            self,
            ElementKind::Header
                | ElementKind::Navbar
                | ElementKind::Footer
                | ElementKind::Hero
                | ElementKind::Section
        )
    }

    /// Vertical anchor applied to full-bleed types on placement.
    pub fn edge_anchor(self) -> EdgeAnchor {
        match self {
            ElementKind::Header | ElementKind::Navbar => EdgeAnchor::Top,
            ElementKind::Footer => EdgeAnchor::Bottom,
            _ => EdgeAnchor::Free,
        }
    }

    /// Default size used by the built-in palette.
    pub fn default_size(self) -> Size {
        let (w, h) = match self {
            ElementKind::Text => (300.0, 60.0),
            ElementKind::Heading => (400.0, 80.0),
            ElementKind::Button => (150.0, 50.0),
            ElementKind::Image => (300.0, 200.0),
            ElementKind::Video => (560.0, 315.0),
            ElementKind::Icon => (80.0, 80.0),
            ElementKind::Divider => (800.0, 2.0),
            ElementKind::Container => (600.0, 300.0),
            ElementKind::Section => (1200.0, 500.0),
            ElementKind::Header => (1200.0, 80.0),
            ElementKind::Footer => (1200.0, 300.0),
            ElementKind::Navbar => (1200.0, 70.0),
            ElementKind::Hero => (1200.0, 500.0),
            ElementKind::Card => (350.0, 450.0),
            ElementKind::Grid => (1000.0, 400.0),
            ElementKind::Testimonial => (600.0, 250.0),
            ElementKind::Pricing => (350.0, 500.0),
            ElementKind::Team => (300.0, 400.0),
            ElementKind::Cta => (1000.0, 300.0),
            ElementKind::Contact => (500.0, 400.0),
            ElementKind::Stats => (1000.0, 200.0),
            ElementKind::Features => (1000.0, 400.0),
            ElementKind::List => (400.0, 300.0),
        };
        Size::new(w, h)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position and size of an element in canvas-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Build from an origin and a size.
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Get the geometry as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Copy with a different origin.
    pub fn with_origin(self, origin: Point) -> Self {
        Self { x: origin.x, y: origin.y, ..self }
    }

    /// Whether the geometry lies entirely inside a canvas of the given size.
    pub fn fits_within(&self, canvas: Size) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= canvas.width
            && self.y + self.height <= canvas.height
    }
}

/// A page of the project. Elements reference pages through `page_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub name: String,
}

impl Page {
    /// Create a page with a fresh ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PageId::new(),
            name: name.into(),
        }
    }
}

/// An element placed on the canvas.
///
/// Stacking order is not stored here; it is the element's position in the
/// document's element sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ElementRecord", into = "ElementRecord")]
pub struct Element {
    pub(crate) id: ElementId,
    pub geometry: Geometry,
    pub styles: StyleMap,
    pub content: ElementContent,
    pub page_id: PageId,
    pub locked: bool,
}

impl Element {
    /// Create an unlocked element with a fresh ID.
    pub fn new(geometry: Geometry, content: ElementContent, styles: StyleMap, page_id: PageId) -> Self {
        Self {
            id: ElementId::new(),
            geometry,
            styles,
            content,
            page_id,
            locked: false,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The element type, derived from its content variant.
    pub fn kind(&self) -> ElementKind {
        self.content.kind()
    }

    /// Clone under a fresh ID, leaving the source untouched.
    pub fn clone_with_new_id(&self) -> Self {
        Self {
            id: ElementId::new(),
            ..self.clone()
        }
    }

    /// Check if a canvas-space point lies within the element.
    pub fn hit_test(&self, point: Point) -> bool {
        self.geometry.as_rect().contains(point)
    }
}

/// Partial update issued by the properties editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub styles: Option<StyleMap>,
    pub content: Option<ElementContent>,
    pub geometry: Option<Geometry>,
}

impl ElementPatch {
    pub fn styles(styles: StyleMap) -> Self {
        Self {
            styles: Some(styles),
            ..Self::default()
        }
    }

    pub fn content(content: ElementContent) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }

    pub fn geometry(geometry: Geometry) -> Self {
        Self {
            geometry: Some(geometry),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_none() && self.content.is_none() && self.geometry.is_none()
    }
}

/// Flat persisted shape of an element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ElementRecord {
    id: ElementId,
    #[serde(rename = "type")]
    kind: ElementKind,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    styles: StyleMap,
    #[serde(default)]
    content: serde_json::Value,
    page_id: PageId,
    #[serde(default)]
    locked: bool,
}

impl TryFrom<ElementRecord> for Element {
    type Error = ModelError;

    fn try_from(record: ElementRecord) -> Result<Self, Self::Error> {
        let content = ElementContent::from_value(record.kind, record.content)?;
        Ok(Self {
            id: record.id,
            geometry: Geometry::new(record.x, record.y, record.width, record.height),
            styles: record.styles,
            content,
            page_id: record.page_id,
            locked: record.locked,
        })
    }
}

impl From<Element> for ElementRecord {
    fn from(element: Element) -> Self {
        Self {
            id: element.id,
            kind: element.kind(),
            x: element.geometry.x,
            y: element.geometry.y,
            width: element.geometry.width,
            height: element.geometry.height,
            content: element.content.to_value(),
            styles: element.styles,
            page_id: element.page_id,
            locked: element.locked,
        }
    }
}
