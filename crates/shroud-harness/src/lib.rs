#![forbid(unsafe_code)]

//! Test harness for shroud dialogs.
//!
//! - [`HeadlessDocument`]: an in-memory [`Document`] that records every
//!   mutation a dialog makes (overflow writes, layout flushes, focus moves,
//!   focus subscriptions).
//! - [`mount_dialog_parts`]: builds the standard dialog subtree and returns
//!   its handles.
//! - [`NotificationLog`]: records lifecycle notifications in emission order.

use ahash::{AHashMap, AHashSet};
use shroud_core::dom::{DialogParts, Document, ElementId, ListenerId, Overflow};
use shroud_core::notify::{DialogEventKind, EventEmitter, Notification};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone)]
struct Node {
    parent: Option<ElementId>,
    tag: String,
    hidden: bool,
    classes: Vec<String>,
}

/// In-memory document.
///
/// Element 1 is `<body>`. Focus moves are applied immediately; the harness
/// does not dispatch events on its own, tests route them to the dialog.
#[derive(Debug, Clone)]
pub struct HeadlessDocument {
    nodes: AHashMap<ElementId, Node>,
    next_id: u64,
    body: ElementId,
    active: Option<ElementId>,
    overflow: Overflow,
    overflow_writes: usize,
    layout_flushes: usize,
    focus_listeners: AHashSet<ListenerId>,
    focus_history: Vec<ElementId>,
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDocument {
    pub fn new() -> Self {
        let body = ElementId::new(1);
        let mut nodes = AHashMap::new();
        nodes.insert(
            body,
            Node {
                parent: None,
                tag: "body".to_owned(),
                hidden: false,
                classes: Vec::new(),
            },
        );
        Self {
            nodes,
            next_id: 2,
            body,
            active: None,
            overflow: Overflow::Unset,
            overflow_writes: 0,
            layout_flushes: 0,
            focus_listeners: AHashSet::new(),
            focus_history: Vec::new(),
        }
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Append a new element under `parent`.
    pub fn create_element(&mut self, parent: ElementId, tag: &str) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                parent: Some(parent),
                tag: tag.to_owned(),
                hidden: false,
                classes: Vec::new(),
            },
        );
        id
    }

    /// Append a new element carrying `class`.
    pub fn create_with_class(&mut self, parent: ElementId, tag: &str, class: &str) -> ElementId {
        let id = self.create_element(parent, tag);
        self.set_class(id, class, true);
        id
    }

    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(&element).map(|n| n.tag.as_str())
    }

    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.get(&element).and_then(|n| n.parent)
    }

    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes
            .get(&element)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    /// Number of `set_overflow` calls so far.
    pub fn overflow_writes(&self) -> usize {
        self.overflow_writes
    }

    /// Number of `force_layout` calls so far.
    pub fn layout_flushes(&self) -> usize {
        self.layout_flushes
    }

    /// Number of installed focus subscriptions.
    pub fn focus_listener_count(&self) -> usize {
        self.focus_listeners.len()
    }

    /// Every element that received focus, in order.
    pub fn focus_history(&self) -> &[ElementId] {
        &self.focus_history
    }
}

impl Document for HeadlessDocument {
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    fn focus(&mut self, element: ElementId) {
        if !self.nodes.contains_key(&element) {
            tracing::warn!(element = element.get(), "focus on unknown element");
            return;
        }
        self.active = Some(element);
        self.focus_history.push(element);
    }

    fn set_hidden(&mut self, element: ElementId, hidden: bool) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.hidden = hidden;
        }
    }

    fn is_hidden(&self, element: ElementId) -> bool {
        self.nodes.get(&element).is_some_and(|n| n.hidden)
    }

    fn set_class(&mut self, element: ElementId, class: &str, enabled: bool) {
        let Some(node) = self.nodes.get_mut(&element) else {
            return;
        };
        let present = node.classes.iter().position(|c| c == class);
        match (enabled, present) {
            (true, None) => node.classes.push(class.to_owned()),
            (false, Some(idx)) => {
                node.classes.remove(idx);
            }
            _ => {}
        }
    }

    fn force_layout(&mut self, _element: ElementId) {
        self.layout_flushes += 1;
    }

    fn overflow(&self) -> Overflow {
        self.overflow
    }

    fn set_overflow(&mut self, overflow: Overflow) {
        self.overflow = overflow;
        self.overflow_writes += 1;
    }

    fn add_focus_listener(&mut self) -> ListenerId {
        let id = ListenerId::next();
        self.focus_listeners.insert(id);
        id
    }

    fn remove_focus_listener(&mut self, id: ListenerId) -> bool {
        self.focus_listeners.remove(&id)
    }
}

/// Build the standard dialog subtree under `<body>`.
///
/// ```text
/// div.dialog
/// ├── div.dialog__overlay
/// └── div.dialog__panel
///     ├── header.dialog__header          (with_header)
///     │   ├── span.dialog__title
///     │   └── button.dialog__close > span.icon
///     ├── div.dialog__body
///     └── footer.dialog__footer
/// ```
pub fn mount_dialog_parts(doc: &mut HeadlessDocument, with_header: bool) -> DialogParts {
    let body = doc.body();
    let container = doc.create_with_class(body, "div", "dialog");
    let overlay = doc.create_with_class(container, "div", "dialog__overlay");
    let panel = doc.create_with_class(container, "div", "dialog__panel");
    let mut parts = DialogParts::new(container, overlay, panel);

    if with_header {
        let header = doc.create_with_class(panel, "header", "dialog__header");
        let title = doc.create_with_class(header, "span", "dialog__title");
        let close = doc.create_with_class(header, "button", "dialog__close");
        doc.create_with_class(close, "span", "icon");
        parts = parts.with_header(title, close);
    }
    doc.create_with_class(panel, "div", "dialog__body");
    doc.create_with_class(panel, "footer", "dialog__footer");
    parts
}

/// Shared, ordered record of lifecycle notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Rc<RefCell<Vec<(DialogEventKind, String)>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe all four notification kinds on `emitter`.
    pub fn attach(&self, emitter: &mut EventEmitter) -> Vec<ListenerId> {
        [
            DialogEventKind::Show,
            DialogEventKind::AfterShow,
            DialogEventKind::Hide,
            DialogEventKind::AfterHide,
        ]
        .into_iter()
        .map(|kind| emitter.on(kind, self.recorder()))
        .collect()
    }

    /// An observer callback that appends to this log.
    pub fn recorder(&self) -> impl FnMut(&mut Notification) + 'static {
        let entries = Rc::clone(&self.entries);
        move |n: &mut Notification| entries.borrow_mut().push((n.kind(), n.source().to_owned()))
    }

    /// Recorded kinds in emission order.
    pub fn kinds(&self) -> Vec<DialogEventKind> {
        self.entries.borrow().iter().map(|(k, _)| *k).collect()
    }

    /// Recorded kinds emitted by `source`.
    pub fn kinds_from(&self, source: &str) -> Vec<DialogEventKind> {
        self.entries
            .borrow()
            .iter()
            .filter(|(_, s)| s == source)
            .map(|(k, _)| *k)
            .collect()
    }

    pub fn count(&self, kind: DialogEventKind) -> usize {
        self.entries.borrow().iter().filter(|(k, _)| *k == kind).count()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_walks_ancestors() {
        let mut doc = HeadlessDocument::new();
        let parts = mount_dialog_parts(&mut doc, true);
        let close = parts.close_button.unwrap();
        assert!(doc.contains(parts.container, close));
        assert!(doc.contains(parts.panel, parts.panel));
        assert!(!doc.contains(parts.panel, parts.overlay));
        assert!(!doc.contains(parts.container, doc.body()));
    }

    #[test]
    fn headerless_parts_have_no_title() {
        let mut doc = HeadlessDocument::new();
        let parts = mount_dialog_parts(&mut doc, false);
        assert!(parts.title.is_none());
        assert!(parts.close_button.is_none());
        assert!(doc.has_class(parts.panel, "dialog__panel"));
    }

    #[test]
    fn class_toggle_is_idempotent() {
        let mut doc = HeadlessDocument::new();
        let el = doc.create_element(doc.body(), "div");
        doc.set_class(el, "a", true);
        doc.set_class(el, "a", true);
        assert!(doc.has_class(el, "a"));
        doc.set_class(el, "a", false);
        assert!(!doc.has_class(el, "a"));
    }

    #[test]
    fn focus_listeners_tracked() {
        let mut doc = HeadlessDocument::new();
        let id = doc.add_focus_listener();
        assert_eq!(doc.focus_listener_count(), 1);
        assert!(doc.remove_focus_listener(id));
        assert!(!doc.remove_focus_listener(id));
    }

    #[test]
    fn log_records_in_order() {
        let log = NotificationLog::new();
        let mut emitter = EventEmitter::new();
        log.attach(&mut emitter);
        emitter.emit(DialogEventKind::Show, "dialog-1");
        emitter.emit(DialogEventKind::AfterShow, "dialog-2");
        assert_eq!(
            log.kinds(),
            vec![DialogEventKind::Show, DialogEventKind::AfterShow]
        );
        assert_eq!(log.kinds_from("dialog-2"), vec![DialogEventKind::AfterShow]);
        assert_eq!(log.count(DialogEventKind::Hide), 0);
    }
}
