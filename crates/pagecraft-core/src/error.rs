//! Error types for model loading and configuration.
//!
//! Editing operations never fail; these only surface from parsing, loading
//! and validating data that comes from outside the engine.

use crate::element::{ElementId, ElementKind, PageId};
use thiserror::Error;

/// Errors raised while decoding or validating a project.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Content payload does not match the element type.
    #[error("Invalid content for {kind} element: {source}")]
    InvalidContent {
        kind: ElementKind,
        #[source]
        source: serde_json::Error,
    },

    /// Element references a page that is not in the project.
    #[error("Element {element} references missing page {page}")]
    MissingPage { element: ElementId, page: PageId },

    /// Two elements share one ID.
    #[error("Duplicate element id: {0}")]
    DuplicateElement(ElementId),

    /// A project must have at least one page.
    #[error("Project has no pages")]
    NoPages,

    /// Project serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while loading a builder configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}
