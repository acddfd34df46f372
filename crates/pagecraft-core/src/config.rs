//! Builder configuration.

use crate::error::ConfigError;
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::selection::HANDLE_HIT_TOLERANCE;
use crate::snap::GRID_SIZE;
use crate::viewport::CanvasPreset;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the interaction controller. Every field has a default, so a
/// config file only needs to list what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub grid_size: f64,
    pub snap_to_grid: bool,
    pub show_grid: bool,
    /// Offset applied to duplicates and pastes, on both axes.
    pub paste_offset: f64,
    pub nudge_step: f64,
    /// Nudge step with Shift held.
    pub large_nudge_step: f64,
    /// Resize handle hit radius in screen pixels.
    pub handle_tolerance: f64,
    /// Max snapshots kept (None = unbounded).
    pub history_limit: Option<usize>,
    /// Height of the first screenful, used to centre quick-added elements.
    pub fold_height: f64,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        let canvas = CanvasPreset::Desktop.size();
        Self {
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            grid_size: GRID_SIZE,
            snap_to_grid: true,
            show_grid: true,
            paste_offset: 20.0,
            nudge_step: 1.0,
            large_nudge_step: 10.0,
            handle_tolerance: HANDLE_HIT_TOLERANCE,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            fold_height: 1024.0,
        }
    }
}

impl BuilderConfig {
    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded builder config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("canvasWidth", self.canvas_width),
            ("canvasHeight", self.canvas_height),
            ("gridSize", self.grid_size),
            ("handleTolerance", self.handle_tolerance),
            ("foldHeight", self.fold_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        for (name, value) in [
            ("pasteOffset", self.paste_offset),
            ("nudgeStep", self.nudge_step),
            ("largeNudgeStep", self.large_nudge_step),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }
        if self.history_limit == Some(0) {
            return Err(ConfigError::Invalid("historyLimit must be at least 1".into()));
        }
        Ok(())
    }
}
