//! Scoped pointer capture for drag and resize gestures.

use crate::input::PointerId;
use std::fmt;
use std::rc::Rc;

/// Host surface that can route all events of one pointer to the canvas.
pub trait CaptureTarget {
    fn set_capture(&self, pointer: PointerId);
    fn release_capture(&self, pointer: PointerId);
}

/// Capture held for the lifetime of a gesture; released on drop.
pub struct PointerCapture {
    target: Rc<dyn CaptureTarget>,
    pointer: PointerId,
}

impl PointerCapture {
    pub fn acquire(target: Rc<dyn CaptureTarget>, pointer: PointerId) -> Self {
        target.set_capture(pointer);
        log::trace!("Captured pointer {}", pointer.0);
        Self { target, pointer }
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        self.target.release_capture(self.pointer);
        log::trace!("Released pointer {}", self.pointer.0);
    }
}

impl fmt::Debug for PointerCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerCapture").field("pointer", &self.pointer).finish()
    }
}

/// Capture target that only tracks which pointers are held. Useful for
/// headless shells and tests.
#[derive(Debug, Default)]
pub struct CaptureLog {
    held: std::cell::RefCell<Vec<PointerId>>,
}

impl CaptureLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Vec<PointerId> {
        self.held.borrow().clone()
    }
}

impl CaptureTarget for CaptureLog {
    fn set_capture(&self, pointer: PointerId) {
        self.held.borrow_mut().push(pointer);
    }

    fn release_capture(&self, pointer: PointerId) {
        self.held.borrow_mut().retain(|&p| p != pointer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_on_drop() {
        let log = Rc::new(CaptureLog::new());
        {
            let capture = PointerCapture::acquire(log.clone(), PointerId(3));
            assert_eq!(capture.pointer(), PointerId(3));
            assert_eq!(log.held(), vec![PointerId(3)]);
        }
        assert!(log.held().is_empty());
    }
}
