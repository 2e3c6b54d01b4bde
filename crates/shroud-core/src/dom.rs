#![forbid(unsafe_code)]

//! DOM-like collaborator interface.
//!
//! A dialog never touches a concrete DOM. Everything it needs from the page
//! is expressed through [`Document`]: subtree membership, focus, the
//! "not rendered" flag, class toggles, a synchronous layout flush, the
//! document-level overflow style, and the document-wide focus subscription.
//!
//! # Invariants
//!
//! - `contains(a, a)` is always true (an element is inside its own subtree).
//! - `remove_focus_listener` for an unknown id is a no-op returning `false`.
//! - `set_overflow` is the only mutation point for page scrolling.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque handle to an element owned by the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Wrap a raw host-assigned id.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw id value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Global counter for listener ids handed out by documents and emitters.
static LISTENER_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifier for an installed listener (focus subscription or notification observer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Allocate a fresh, process-unique listener id.
    pub fn next() -> Self {
        Self(LISTENER_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw id value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Document-level overflow style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Overflow {
    /// No inline style set; the stylesheet decides.
    #[default]
    Unset,
    Visible,
    Hidden,
    Clip,
    Scroll,
    Auto,
}

impl Overflow {
    /// CSS keyword for this value (empty for [`Overflow::Unset`]).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Visible => "visible",
            Self::Hidden => "hidden",
            Self::Clip => "clip",
            Self::Scroll => "scroll",
            Self::Auto => "auto",
        }
    }

    /// Whether this value prevents the page from scrolling.
    #[inline]
    pub const fn suppresses_scroll(self) -> bool {
        matches!(self, Self::Hidden | Self::Clip)
    }
}

/// The DOM-like environment a dialog runs in.
///
/// All calls happen on the single UI event loop; implementations need no
/// internal synchronization.
pub trait Document {
    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;

    /// The element that currently has keyboard focus, if any.
    fn active_element(&self) -> Option<ElementId>;

    /// Move keyboard focus to `element`.
    fn focus(&mut self, element: ElementId);

    /// Set or clear the "not rendered" flag.
    fn set_hidden(&mut self, element: ElementId, hidden: bool);

    /// Whether the element is currently flagged as not rendered.
    fn is_hidden(&self, element: ElementId) -> bool;

    /// Add or remove a class on `element`.
    fn set_class(&mut self, element: ElementId, class: &str, enabled: bool);

    /// Flush pending style and layout work so the next class change animates.
    fn force_layout(&mut self, element: ElementId);

    /// Current document-level overflow style.
    fn overflow(&self) -> Overflow;

    /// Replace the document-level overflow style.
    fn set_overflow(&mut self, overflow: Overflow);

    /// Install a document-wide "focus moved" subscription.
    ///
    /// The id only tracks registration; it carries no callback. Hosts must
    /// route every [`DomEvent::FocusIn`](crate::event::DomEvent::FocusIn) to
    /// each mounted dialog's `handle_event`, and a dialog redirects focus
    /// only while its subscription is installed.
    fn add_focus_listener(&mut self) -> ListenerId;

    /// Remove a focus subscription. Returns `false` if it was not installed.
    fn remove_focus_listener(&mut self, id: ListenerId) -> bool;
}

/// Element handles owned by one dialog instance.
///
/// Created once at mount and released at unmount. `title` and
/// `close_button` are absent when the header is not rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogParts {
    /// Top-level container; carries the "not rendered" flag and open class.
    pub container: ElementId,
    /// Full-screen overlay behind the panel.
    pub overlay: ElementId,
    /// The focusable panel (`role="dialog"`).
    pub panel: ElementId,
    /// Header title element.
    pub title: Option<ElementId>,
    /// Header close button.
    pub close_button: Option<ElementId>,
}

impl DialogParts {
    /// Handles without header elements.
    pub const fn new(container: ElementId, overlay: ElementId, panel: ElementId) -> Self {
        Self {
            container,
            overlay,
            panel,
            title: None,
            close_button: None,
        }
    }

    /// Attach header handles.
    pub fn with_header(mut self, title: ElementId, close_button: ElementId) -> Self {
        self.title = Some(title);
        self.close_button = Some(close_button);
        self
    }
}
