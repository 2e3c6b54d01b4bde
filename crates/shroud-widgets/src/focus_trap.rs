#![forbid(unsafe_code)]

//! Focus containment for an open dialog.
//!
//! While engaged, the controller holds one document-wide focus subscription.
//! Every focus movement the host reports is checked against the dialog's
//! container; focus that lands outside it is pulled back to the panel.
//!
//! # Invariants
//!
//! - At most one focus subscription is installed per controller.
//! - A disengaged controller never redirects focus.
//! - `disengage` is safe to call any number of times, engaged or not.

use shroud_core::dom::{Document, ElementId, ListenerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Engagement {
    listener: ListenerId,
    panel: ElementId,
    container: ElementId,
}

/// Keeps keyboard focus inside a dialog while it is open.
#[derive(Debug, Clone, Default)]
pub struct FocusContainment {
    engaged: Option<Engagement>,
}

impl FocusContainment {
    pub const fn new() -> Self {
        Self { engaged: None }
    }

    /// Install the document-wide focus subscription.
    ///
    /// Re-engaging an engaged controller only retargets it; no second
    /// subscription is installed.
    pub fn engage<D: Document + ?Sized>(
        &mut self,
        panel: ElementId,
        container: ElementId,
        doc: &mut D,
    ) {
        let listener = match self.engaged {
            Some(engagement) => engagement.listener,
            None => doc.add_focus_listener(),
        };
        self.engaged = Some(Engagement {
            listener,
            panel,
            container,
        });
    }

    /// Remove the focus subscription. Returns `true` if one was installed.
    pub fn disengage<D: Document + ?Sized>(&mut self, doc: &mut D) -> bool {
        match self.engaged.take() {
            Some(engagement) => {
                doc.remove_focus_listener(engagement.listener);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn is_engaged(&self) -> bool {
        self.engaged.is_some()
    }

    /// The installed subscription, if engaged.
    pub fn listener(&self) -> Option<ListenerId> {
        self.engaged.map(|e| e.listener)
    }

    /// React to focus landing on `target`.
    ///
    /// Returns `true` if focus was redirected to the panel.
    pub fn handle_focus_in<D: Document + ?Sized>(&self, target: ElementId, doc: &mut D) -> bool {
        let Some(engagement) = self.engaged else {
            return false;
        };
        if doc.contains(engagement.container, target) {
            return false;
        }
        tracing::trace!(
            target = target.get(),
            panel = engagement.panel.get(),
            "focus escaped dialog; redirecting"
        );
        doc.focus(engagement.panel);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shroud_harness::HeadlessDocument;

    struct Fixture {
        doc: HeadlessDocument,
        container: ElementId,
        panel: ElementId,
        inside: ElementId,
        outside: ElementId,
    }

    fn fixture() -> Fixture {
        let mut doc = HeadlessDocument::new();
        let body = doc.body();
        let container = doc.create_element(body, "div");
        let panel = doc.create_element(container, "div");
        let inside = doc.create_element(panel, "button");
        let outside = doc.create_element(body, "input");
        Fixture {
            doc,
            container,
            panel,
            inside,
            outside,
        }
    }

    #[test]
    fn redirects_focus_from_outside() {
        let mut f = fixture();
        let mut trap = FocusContainment::new();
        trap.engage(f.panel, f.container, &mut f.doc);

        f.doc.focus(f.outside);
        assert!(trap.handle_focus_in(f.outside, &mut f.doc));
        assert_eq!(f.doc.active_element(), Some(f.panel));
    }

    #[test]
    fn leaves_inside_focus_alone() {
        let mut f = fixture();
        let mut trap = FocusContainment::new();
        trap.engage(f.panel, f.container, &mut f.doc);

        f.doc.focus(f.inside);
        assert!(!trap.handle_focus_in(f.inside, &mut f.doc));
        assert_eq!(f.doc.active_element(), Some(f.inside));
    }

    #[test]
    fn engage_twice_installs_one_listener() {
        let mut f = fixture();
        let mut trap = FocusContainment::new();
        trap.engage(f.panel, f.container, &mut f.doc);
        trap.engage(f.panel, f.container, &mut f.doc);
        assert_eq!(f.doc.focus_listener_count(), 1);

        assert!(trap.disengage(&mut f.doc));
        assert_eq!(f.doc.focus_listener_count(), 0);
    }

    #[test]
    fn disengaged_trap_is_inert() {
        let mut f = fixture();
        let mut trap = FocusContainment::new();
        assert!(!trap.disengage(&mut f.doc));

        f.doc.focus(f.outside);
        assert!(!trap.handle_focus_in(f.outside, &mut f.doc));
        assert_eq!(f.doc.active_element(), Some(f.outside));
        assert!(trap.listener().is_none());
    }
}
