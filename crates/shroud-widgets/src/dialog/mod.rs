#![forbid(unsafe_code)]

//! Modal dialog lifecycle.
//!
//! [`Dialog`] owns the `open` state of one dialog instance and sequences
//! everything that hangs off it: cancelable show/hide notifications, the
//! container's "not rendered" flag and open class, the page scroll lock,
//! focus containment, and the after-show/after-hide notifications that wait
//! for the panel's opacity transition.
//!
//! # Lifecycle
//!
//! ```text
//!            show() ok                  opacity end
//!  Closed ─────────────▶ Opening ─────────────────▶ Open
//!    ▲                                               │
//!    │ opacity end                        hide() ok  │
//!    └──────────────── Closing ◀─────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. The cancelable notification runs to completion before any visible
//!    change; cancellation leaves the document untouched.
//! 2. The scroll lock is held exactly while the phase is `Opening` or `Open`.
//! 3. The focus subscription is installed exactly while the phase is
//!    `Opening` or `Open`.
//! 4. Each successful `show`/`hide` yields at most one after-* notification.
//! 5. `dispose` releases the lock and the focus subscription in any phase.
//!
//! # Failure Modes
//!
//! - `show()`/`hide()` outside their valid phase return
//!   [`TransitionOutcome::Ignored`]; requests during a transition are not queued.
//! - A missing transition end leaves the dialog in `Opening`/`Closing` with
//!   the correct `open` flag, lock, and focus state; the after-* notification
//!   and the refocus step are skipped until [`Dialog::settle`] is called.
//!
//! # Example
//!
//! ```ignore
//! let mut dialog = Dialog::new(DialogProps::new().label("Delete file?"));
//! dialog.on(DialogEventKind::AfterHide, |_| println!("closed"));
//! dialog.initialize(parts, &mut doc);
//!
//! dialog.show(&mut doc);
//! // host forwards input
//! dialog.handle_event(&DomEvent::transition_end(parts.panel, "opacity"), &mut doc);
//! assert_eq!(dialog.phase(), DialogPhase::Open);
//! ```

mod phase;
mod props;
mod view;

pub use phase::{DialogPhase, TransitionOutcome};
pub use props::{DialogFlags, DialogProps, EMPTY_TITLE};
pub use view::{CONTAINER_CLASS, DialogView, OPEN_CLASS, OVERLAY_CLASS, PANEL_CLASS, Slot};

use crate::focus_trap::FocusContainment;
use crate::scroll_lock::{self, LockToken};
use crate::transition::TransitionWatch;
use shroud_core::config::DialogConfig;
use shroud_core::dom::{DialogParts, Document, ListenerId};
use shroud_core::event::{DomEvent, Key};
use shroud_core::notify::{DialogEventKind, EventEmitter, Notification};
use shroud_core::reactive::{Observable, ReadOnly};
use std::sync::atomic::{AtomicU64, Ordering};
use web_time::Instant;

/// Global counter for dialog identities.
static DIALOG_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_identity() -> String {
    format!("dialog-{}", DIALOG_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// What a routed input event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    /// Focus escaped the dialog and was pulled back to the panel.
    FocusRedirected,
    /// Escape was pressed inside the dialog.
    EscapePressed(TransitionOutcome),
    /// The overlay was clicked and overlay dismissal is enabled.
    OverlayClicked(TransitionOutcome),
    /// The header close button was activated.
    CloseClicked(TransitionOutcome),
    /// The panel's opacity transition finished; the dialog is now in this phase.
    Settled(DialogPhase),
}

/// A modal dialog instance.
///
/// Hosts must call [`Dialog::dispose`] before dropping a mounted dialog.
/// `Drop` has no document to restore, so a dialog dropped while opening or
/// open leaves its token in the scroll lock: the lock count never returns
/// to 0 and the body overflow stays `hidden`. Only a warning is logged.
pub struct Dialog {
    id: String,
    props: DialogProps,
    phase: DialogPhase,
    open: Observable<bool>,
    requested_open: bool,
    events: EventEmitter,
    parts: Option<DialogParts>,
    focus: FocusContainment,
    transition: Option<TransitionWatch>,
    transition_started: Option<Instant>,
    lock: LockToken,
    disposed: bool,
}

impl std::fmt::Debug for Dialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dialog")
            .field("id", &self.id)
            .field("phase", &self.phase)
            .field("open", &self.open.get())
            .field("props", &self.props)
            .field("mounted", &self.parts.is_some())
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl Dialog {
    /// Create an unmounted, closed dialog.
    pub fn new(props: impl Into<DialogProps>) -> Self {
        Self {
            id: next_identity(),
            props: props.into(),
            phase: DialogPhase::Closed,
            open: Observable::new(false),
            requested_open: false,
            events: EventEmitter::new(),
            parts: None,
            focus: FocusContainment::new(),
            transition: None,
            transition_started: None,
            lock: LockToken::new(),
            disposed: false,
        }
    }

    /// Create a dialog from configuration; `config.open` opens it on initialization.
    pub fn from_config(config: &DialogConfig) -> Self {
        let mut dialog = Self::new(config);
        dialog.requested_open = config.open;
        dialog
    }

    /// Request that the dialog open as soon as it is initialized.
    pub fn open_on_init(mut self, open: bool) -> Self {
        self.requested_open = open;
        self
    }

    // --- Accessors ---

    /// Stable identity (`dialog-N`).
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn props(&self) -> &DialogProps {
        &self.props
    }

    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    /// Current value of the `open` flag.
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Read-only view of the `open` flag; subscribe to follow changes.
    ///
    /// Writes go through [`Dialog::set_open`].
    pub fn open_flag(&self) -> ReadOnly<bool> {
        self.open.read_only()
    }

    pub fn parts(&self) -> Option<&DialogParts> {
        self.parts.as_ref()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether this instance currently holds the page scroll lock.
    pub fn holds_scroll_lock(&self) -> bool {
        scroll_lock::is_held(self.lock)
    }

    /// Whether the focus containment subscription is installed.
    pub fn is_containing_focus(&self) -> bool {
        self.focus.is_engaged()
    }

    // --- Properties ---

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.props.set_label(label.into());
    }

    pub fn set_no_overlay_dismiss(&mut self, value: bool) {
        self.props.set_flag(DialogFlags::NO_OVERLAY_DISMISS, value);
    }

    /// Toggle the header. Pass the re-rendered handles via [`Dialog::set_parts`].
    pub fn set_no_header(&mut self, value: bool) {
        self.props.set_flag(DialogFlags::NO_HEADER, value);
    }

    pub fn set_no_footer(&mut self, value: bool) {
        self.props.set_flag(DialogFlags::NO_FOOTER, value);
    }

    pub fn set_reduced_motion(&mut self, value: bool) {
        self.props.set_flag(DialogFlags::REDUCED_MOTION, value);
    }

    /// Replace element handles after the view layer re-rendered the chrome.
    ///
    /// Container and panel identity are expected to be stable.
    pub fn set_parts(&mut self, parts: DialogParts) {
        if self.parts.is_some() {
            self.parts = Some(parts);
        }
    }

    // --- Notifications ---

    /// Observe a lifecycle notification.
    pub fn on(
        &mut self,
        kind: DialogEventKind,
        callback: impl FnMut(&mut Notification) + 'static,
    ) -> ListenerId {
        self.events.on(kind, callback)
    }

    /// Stop observing.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    pub fn events_mut(&mut self) -> &mut EventEmitter {
        &mut self.events
    }

    /// Render inputs for the view layer.
    pub fn view(&self) -> DialogView {
        DialogView::build(
            &self.id,
            &self.props,
            self.open.get(),
            !self.phase.is_visible(),
        )
    }

    // --- Lifecycle ---

    /// Mount: take ownership of the element handles.
    ///
    /// The container starts out not rendered. If the dialog was created open
    /// (or `set_open(true)` was called before mounting) the show sequence
    /// runs immediately and its outcome is returned.
    pub fn initialize<D: Document + ?Sized>(
        &mut self,
        parts: DialogParts,
        doc: &mut D,
    ) -> TransitionOutcome {
        if self.disposed || self.parts.is_some() {
            return TransitionOutcome::Ignored;
        }
        doc.set_hidden(parts.container, true);
        self.parts = Some(parts);
        self.transition = Some(TransitionWatch::opacity(parts.panel));
        tracing::debug!(dialog = %self.id, "dialog initialized");

        if std::mem::take(&mut self.requested_open) {
            self.show(doc)
        } else {
            TransitionOutcome::Ignored
        }
    }

    /// Unmount: release the scroll lock and focus subscription in any phase.
    ///
    /// No notifications are emitted. Idempotent.
    pub fn dispose<D: Document + ?Sized>(&mut self, doc: &mut D) {
        if self.disposed {
            return;
        }
        let released = scroll_lock::release(self.lock, doc);
        let disengaged = self.focus.disengage(doc);
        if let Some(watch) = self.transition.as_mut() {
            watch.disarm();
        }
        tracing::debug!(
            dialog = %self.id,
            phase = %self.phase,
            released,
            disengaged,
            "dialog disposed"
        );
        self.phase = DialogPhase::Closed;
        self.transition_started = None;
        self.parts = None;
        self.disposed = true;
    }

    /// Open the dialog.
    ///
    /// Valid from `Closed`. Emits the cancelable `show` notification first;
    /// if an observer cancels it, nothing else happens.
    pub fn show<D: Document + ?Sized>(&mut self, doc: &mut D) -> TransitionOutcome {
        if self.disposed {
            return TransitionOutcome::Ignored;
        }
        let Some(parts) = self.parts else {
            self.requested_open = true;
            return TransitionOutcome::Ignored;
        };
        if self.phase != DialogPhase::Closed {
            tracing::debug!(dialog = %self.id, phase = %self.phase, "show ignored");
            return TransitionOutcome::Ignored;
        }

        let _span = tracing::debug_span!("dialog_transition", dialog = %self.id, op = "show")
            .entered();

        if self.events.emit(DialogEventKind::Show, &self.id).default_prevented() {
            tracing::debug!(dialog = %self.id, "show canceled");
            return TransitionOutcome::Canceled;
        }

        self.set_phase(DialogPhase::Opening);
        doc.set_hidden(parts.container, false);
        doc.force_layout(parts.container);
        doc.set_class(parts.container, OPEN_CLASS, true);
        self.open.set(true);
        scroll_lock::acquire(self.lock, doc);
        self.focus.engage(parts.panel, parts.container, doc);
        self.begin_transition();

        if self.props.is_reduced_motion() {
            self.complete_transition(doc);
        }
        TransitionOutcome::Started
    }

    /// Close the dialog.
    ///
    /// Valid from `Open`. Emits the cancelable `hide` notification first;
    /// if an observer cancels it, the dialog stays open.
    pub fn hide<D: Document + ?Sized>(&mut self, doc: &mut D) -> TransitionOutcome {
        if self.disposed {
            return TransitionOutcome::Ignored;
        }
        let Some(parts) = self.parts else {
            self.requested_open = false;
            return TransitionOutcome::Ignored;
        };
        if self.phase != DialogPhase::Open {
            tracing::debug!(dialog = %self.id, phase = %self.phase, "hide ignored");
            return TransitionOutcome::Ignored;
        }

        let _span = tracing::debug_span!("dialog_transition", dialog = %self.id, op = "hide")
            .entered();

        if self.events.emit(DialogEventKind::Hide, &self.id).default_prevented() {
            tracing::debug!(dialog = %self.id, "hide canceled");
            return TransitionOutcome::Canceled;
        }

        self.set_phase(DialogPhase::Closing);
        doc.set_class(parts.container, OPEN_CLASS, false);
        self.open.set(false);
        scroll_lock::release(self.lock, doc);
        self.focus.disengage(doc);
        self.begin_transition();

        if self.props.is_reduced_motion() {
            self.complete_transition(doc);
        }
        TransitionOutcome::Started
    }

    /// Host write to the bound `open` property.
    ///
    /// `true` while closed runs [`Dialog::show`]; `false` while open runs
    /// [`Dialog::hide`]; anything else is ignored. Before mounting, the value
    /// is recorded and applied by [`Dialog::initialize`].
    pub fn set_open<D: Document + ?Sized>(&mut self, open: bool, doc: &mut D) -> TransitionOutcome {
        if self.disposed {
            return TransitionOutcome::Ignored;
        }
        if self.parts.is_none() {
            // Unmounted: the last write wins on initialize.
            self.requested_open = open;
            return TransitionOutcome::Ignored;
        }
        match (open, self.phase) {
            (true, DialogPhase::Closed) => self.show(doc),
            (false, DialogPhase::Open) => self.hide(doc),
            _ => TransitionOutcome::Ignored,
        }
    }

    /// Finish an in-flight transition as if the panel's opacity transition ended.
    ///
    /// Returns `true` if a transition was completed.
    pub fn settle<D: Document + ?Sized>(&mut self, doc: &mut D) -> bool {
        if self.disposed {
            tracing::warn!(dialog = %self.id, "settle on disposed dialog");
            return false;
        }
        self.complete_transition(doc)
    }

    /// Route a host input event.
    ///
    /// Focus-in events must be delivered to every mounted dialog; only those
    /// currently containing focus act on them.
    pub fn handle_event<D: Document + ?Sized>(
        &mut self,
        event: &DomEvent,
        doc: &mut D,
    ) -> Option<DialogAction> {
        if self.disposed {
            if matches!(event, DomEvent::TransitionEnd { .. }) {
                tracing::warn!(dialog = %self.id, "transition end after dispose ignored");
            }
            return None;
        }
        let parts = self.parts?;

        match event {
            DomEvent::FocusIn { target } => self
                .focus
                .handle_focus_in(*target, doc)
                .then_some(DialogAction::FocusRedirected),
            DomEvent::KeyDown {
                target,
                key: Key::Escape,
            } if self.phase.is_visible() && doc.contains(parts.container, *target) => {
                Some(DialogAction::EscapePressed(self.hide(doc)))
            }
            DomEvent::Click { target } if self.phase.is_visible() => {
                if parts
                    .close_button
                    .is_some_and(|button| doc.contains(button, *target))
                {
                    Some(DialogAction::CloseClicked(self.hide(doc)))
                } else if *target == parts.overlay && self.props.overlay_dismiss() {
                    Some(DialogAction::OverlayClicked(self.hide(doc)))
                } else {
                    None
                }
            }
            DomEvent::TransitionEnd { .. } => {
                let matched = self
                    .transition
                    .as_mut()
                    .is_some_and(|watch| watch.observe(event));
                (matched && self.complete_transition(doc))
                    .then_some(DialogAction::Settled(self.phase))
            }
            _ => None,
        }
    }

    // --- Internals ---

    fn set_phase(&mut self, to: DialogPhase) {
        tracing::debug!(dialog = %self.id, from = %self.phase, to = %to, "dialog phase");
        self.phase = to;
    }

    fn begin_transition(&mut self) {
        if let Some(watch) = self.transition.as_mut() {
            watch.arm();
        }
        self.transition_started = Some(Instant::now());
    }

    fn complete_transition<D: Document + ?Sized>(&mut self, doc: &mut D) -> bool {
        let Some(parts) = self.parts else {
            return false;
        };
        let next = match self.phase {
            DialogPhase::Opening => DialogPhase::Open,
            DialogPhase::Closing => DialogPhase::Closed,
            DialogPhase::Open | DialogPhase::Closed => return false,
        };
        if let Some(watch) = self.transition.as_mut() {
            watch.disarm();
        }
        if let Some(started) = self.transition_started.take() {
            tracing::trace!(
                dialog = %self.id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "transition finished"
            );
        }

        self.set_phase(next);
        if next == DialogPhase::Open {
            self.events.emit(DialogEventKind::AfterShow, &self.id);
            doc.focus(parts.panel);
        } else {
            doc.set_hidden(parts.container, true);
            self.events.emit(DialogEventKind::AfterHide, &self.id);
        }
        true
    }
}

impl Drop for Dialog {
    fn drop(&mut self) {
        if !self.disposed && scroll_lock::is_held(self.lock) {
            tracing::warn!(dialog = %self.id, "dialog dropped without dispose; scroll lock still held");
        }
    }
}
