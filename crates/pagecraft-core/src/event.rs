//! Events the controller emits to the shell.

use crate::element::{Element, ElementId};
use serde::{Deserialize, Serialize};

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
}

/// A short message for a toast, owned by the shell once emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Warning,
            message: message.into(),
        }
    }
}

/// Controller output. Borrowed views are only valid during the callback.
#[derive(Debug, Clone, Copy)]
pub enum BuilderEvent<'a> {
    /// Primary selection (if any) and the multi-select set changed.
    SelectionChanged {
        primary: Option<&'a Element>,
        multi: &'a [ElementId],
    },
    /// A mutation was committed; the full ordered element sequence.
    ElementsChanged(&'a [Element]),
    /// Something the user should be told about.
    Notification(&'a Notification),
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&BuilderEvent<'_>)>;

/// Ordered list of event listeners.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; called in subscription order.
    pub fn subscribe(&mut self, listener: impl FnMut(&BuilderEvent<'_>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: BuilderEvent<'_>) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_in_order_and_unsubscribe() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let l = log.clone();
        let first = bus.subscribe(move |e| {
            if let BuilderEvent::Notification(n) = e {
                l.borrow_mut().push(format!("a:{}", n.message));
            }
        });
        let l = log.clone();
        bus.subscribe(move |e| {
            if let BuilderEvent::ElementsChanged(els) = e {
                l.borrow_mut().push(format!("b:{}", els.len()));
            }
        });

        bus.emit(BuilderEvent::Notification(&Notification::success("Saved")));
        bus.emit(BuilderEvent::ElementsChanged(&[]));
        assert_eq!(*log.borrow(), vec!["a:Saved".to_string(), "b:0".to_string()]);

        assert!(bus.unsubscribe(first));
        assert!(!bus.unsubscribe(first));
        assert_eq!(bus.len(), 1);
    }
}
