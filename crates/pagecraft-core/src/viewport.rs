//! Viewport transform between pointer coordinates and canvas space.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest zoom level.
pub const MIN_SCALE: f64 = 0.25;
/// Largest zoom level.
pub const MAX_SCALE: f64 = 2.0;
/// Zoom change per zoom-in/zoom-out step.
pub const SCALE_STEP: f64 = 0.25;

/// Smallest adjustable canvas height.
pub const MIN_CANVAS_HEIGHT: f64 = 500.0;
/// Largest adjustable canvas height.
pub const MAX_CANVAS_HEIGHT: f64 = 20000.0;

/// Viewport manages where the canvas sits on screen and how it is scaled.
///
/// Pointer events arrive in viewport coordinates; the engine works in
/// canvas-space pixels independent of scroll and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Canvas top-left corner in viewport coordinates.
    pub origin: Point,
    /// Current zoom level (1.0 = 100%).
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(origin: Point, scale: f64) -> Self {
        Self {
            origin,
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
        }
    }

    /// Transform from canvas space to viewport coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.origin.to_vec2()) * Affine::scale(self.scale)
    }

    /// Transform from viewport coordinates to canvas space.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.origin.to_vec2())
    }

    /// `(viewportPos - canvasOrigin) / scale`
    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        self.transform() * canvas_point
    }

    /// Convert a viewport-space length (e.g. a hit tolerance) to canvas space.
    pub fn screen_len_to_canvas(&self, len: f64) -> f64 {
        len / self.scale
    }

    /// Move the canvas origin (e.g. after the shell scrolled).
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.origin += delta;
    }

    /// Set the zoom level, clamped to the allowed range.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale + SCALE_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale - SCALE_STEP);
    }

    /// Zoom as a whole percentage for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }
}

/// Named canvas sizes offered by the builder shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanvasPreset {
    Desktop,
    DesktopShort,
    Laptop,
    Tablet,
    Mobile,
}

impl CanvasPreset {
    pub const ALL: [CanvasPreset; 5] = [
        CanvasPreset::Desktop,
        CanvasPreset::DesktopShort,
        CanvasPreset::Laptop,
        CanvasPreset::Tablet,
        CanvasPreset::Mobile,
    ];

    pub fn size(self) -> Size {
        match self {
            CanvasPreset::Desktop => Size::new(1440.0, 2000.0),
            CanvasPreset::DesktopShort => Size::new(1440.0, 1024.0),
            CanvasPreset::Laptop => Size::new(1024.0, 768.0),
            CanvasPreset::Tablet => Size::new(768.0, 1024.0),
            CanvasPreset::Mobile => Size::new(375.0, 812.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CanvasPreset::Desktop => "Desktop (Full)",
            CanvasPreset::DesktopShort => "Desktop (Short)",
            CanvasPreset::Laptop => "Laptop",
            CanvasPreset::Tablet => "Tablet",
            CanvasPreset::Mobile => "Mobile",
        }
    }
}

/// Clamp a requested canvas height to the adjustable range, in whole pixels.
pub fn clamp_canvas_height(height: f64) -> f64 {
    height.round().clamp(MIN_CANVAS_HEIGHT, MAX_CANVAS_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport() {
        let vp = Viewport::default();
        assert_eq!(vp.origin, Point::ZERO);
        assert!((vp.scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_canvas_with_origin_and_scale() {
        let vp = Viewport::new(Point::new(100.0, 50.0), 0.5);
        let canvas = vp.screen_to_canvas(Point::new(150.0, 150.0));
        assert!((canvas.x - 100.0).abs() < 1e-10);
        assert!((canvas.y - 200.0).abs() < 1e-10);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let vp = Viewport::new(Point::new(30.0, -20.0), 1.5);
        let original = Point::new(123.0, 456.0);
        let back = vp.canvas_to_screen(vp.screen_to_canvas(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_steps_clamp() {
        let mut vp = Viewport::default();
        for _ in 0..10 {
            vp.zoom_in();
        }
        assert!((vp.scale - MAX_SCALE).abs() < f64::EPSILON);
        for _ in 0..10 {
            vp.zoom_out();
        }
        assert!((vp.scale - MIN_SCALE).abs() < f64::EPSILON);
        assert_eq!(vp.zoom_percent(), 25);
    }

    #[test]
    fn test_canvas_height_clamp() {
        assert_eq!(clamp_canvas_height(100.0), MIN_CANVAS_HEIGHT);
        assert_eq!(clamp_canvas_height(1234.4), 1234.0);
        assert_eq!(clamp_canvas_height(1e9), MAX_CANVAS_HEIGHT);
    }

    #[test]
    fn test_presets() {
        assert_eq!(CanvasPreset::Desktop.size(), Size::new(1440.0, 2000.0));
        assert_eq!(CanvasPreset::Mobile.size(), Size::new(375.0, 812.0));
        assert_eq!(CanvasPreset::ALL.len(), 5);
    }
}
