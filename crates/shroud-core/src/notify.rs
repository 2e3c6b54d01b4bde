#![forbid(unsafe_code)]

//! Cancelable lifecycle notifications.
//!
//! A dialog announces its lifecycle through four notifications. The two
//! pre-transition kinds ([`DialogEventKind::Show`], [`DialogEventKind::Hide`])
//! are cancelable: any observer may call [`Notification::prevent_default`],
//! and the emitter reports the final state back to the dialog after every
//! observer has run.
//!
//! # Invariants
//!
//! 1. Observers run synchronously, in registration order, before `emit` returns.
//! 2. An observer registered for one kind never sees another kind.
//! 3. `prevent_default` on a non-cancelable notification has no effect.
//! 4. Removing an observer takes effect for the next `emit`.

use crate::dom::ListenerId;
use std::fmt;

/// The four lifecycle notifications a dialog emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogEventKind {
    /// About to open. Cancelable.
    Show,
    /// Opened and the opacity transition finished.
    AfterShow,
    /// About to close. Cancelable.
    Hide,
    /// Closed and the opacity transition finished.
    AfterHide,
}

impl DialogEventKind {
    /// Whether observers may cancel this notification.
    #[inline]
    pub const fn is_cancelable(self) -> bool {
        matches!(self, Self::Show | Self::Hide)
    }

    /// Host-facing notification name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::AfterShow => "after-show",
            Self::Hide => "hide",
            Self::AfterHide => "after-hide",
        }
    }
}

impl fmt::Display for DialogEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single notification instance handed to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    kind: DialogEventKind,
    source: String,
    default_prevented: bool,
}

impl Notification {
    /// Create an un-canceled notification from `source` (the dialog identity).
    pub fn new(kind: DialogEventKind, source: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
            default_prevented: false,
        }
    }

    pub fn kind(&self) -> DialogEventKind {
        self.kind
    }

    /// Identity of the emitting dialog.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn cancelable(&self) -> bool {
        self.kind.is_cancelable()
    }

    /// Request cancellation. Ignored unless the notification is cancelable.
    pub fn prevent_default(&mut self) {
        if self.kind.is_cancelable() {
            self.default_prevented = true;
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

type Observer = Box<dyn FnMut(&mut Notification)>;

/// Synchronous, ordered notification dispatcher.
#[derive(Default)]
pub struct EventEmitter {
    observers: Vec<(ListenerId, DialogEventKind, Observer)>,
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for notifications of `kind`.
    pub fn on(
        &mut self,
        kind: DialogEventKind,
        callback: impl FnMut(&mut Notification) + 'static,
    ) -> ListenerId {
        let id = ListenerId::next();
        self.observers.push((id, kind, Box::new(callback)));
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _, _)| *oid != id);
        self.observers.len() != before
    }

    /// Number of observers registered for `kind`.
    pub fn observer_count(&self, kind: DialogEventKind) -> usize {
        self.observers.iter().filter(|(_, k, _)| *k == kind).count()
    }

    /// Dispatch a notification and return it after every observer has run.
    pub fn emit(&mut self, kind: DialogEventKind, source: &str) -> Notification {
        let mut notification = Notification::new(kind, source);
        for (_, observed, callback) in &mut self.observers {
            if *observed == kind {
                callback(&mut notification);
            }
        }
        notification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn observers_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = EventEmitter::new();
        let l1 = Rc::clone(&log);
        emitter.on(DialogEventKind::Show, move |_| l1.borrow_mut().push(1));
        let l2 = Rc::clone(&log);
        emitter.on(DialogEventKind::Show, move |_| l2.borrow_mut().push(2));
        let l3 = Rc::clone(&log);
        emitter.on(DialogEventKind::Hide, move |_| l3.borrow_mut().push(3));

        let n = emitter.emit(DialogEventKind::Show, "dialog-1");
        assert!(!n.default_prevented());
        assert_eq!(n.source(), "dialog-1");
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn cancel_only_affects_cancelable_kinds() {
        let mut emitter = EventEmitter::new();
        emitter.on(DialogEventKind::Show, |n| n.prevent_default());
        emitter.on(DialogEventKind::AfterShow, |n| n.prevent_default());

        assert!(emitter.emit(DialogEventKind::Show, "d").default_prevented());
        let after = emitter.emit(DialogEventKind::AfterShow, "d");
        assert!(!after.cancelable());
        assert!(!after.default_prevented());
    }

    #[test]
    fn off_removes_observer() {
        let mut emitter = EventEmitter::new();
        let id = emitter.on(DialogEventKind::Hide, |n| n.prevent_default());
        assert_eq!(emitter.observer_count(DialogEventKind::Hide), 1);
        assert!(emitter.off(id));
        assert!(!emitter.off(id));
        assert!(!emitter.emit(DialogEventKind::Hide, "d").default_prevented());
    }

    #[test]
    fn names_match_host_surface() {
        assert_eq!(DialogEventKind::AfterShow.to_string(), "after-show");
        assert_eq!(DialogEventKind::Hide.name(), "hide");
    }
}
