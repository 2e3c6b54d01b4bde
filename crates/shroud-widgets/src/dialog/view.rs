#![forbid(unsafe_code)]

//! Declarative view model.
//!
//! [`DialogView`] is everything the view layer needs to (re-)render a dialog:
//! class flags, ARIA attributes, which chrome is present, and which content
//! slots are projected. It is derived from state on demand and never cached.

use super::props::DialogProps;

/// Class on the top-level container.
pub const CONTAINER_CLASS: &str = "dialog";
/// Class toggled on the container while the dialog is open; drives the styling transition.
pub const OPEN_CLASS: &str = "dialog--open";
/// Class on the overlay element.
pub const OVERLAY_CLASS: &str = "dialog__overlay";
/// Class on the panel element.
pub const PANEL_CLASS: &str = "dialog__panel";

/// A content projection point consumed from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The dialog body.
    Default,
    /// Footer actions.
    Footer,
}

impl Slot {
    /// Slot name as the host addresses it (empty for the default slot).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Footer => "footer",
        }
    }
}

/// Render inputs derived from a dialog's state and properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    /// Whether [`OPEN_CLASS`] is applied.
    pub open: bool,
    /// Whether the container carries the "not rendered" flag.
    pub hidden: bool,
    pub role: &'static str,
    pub aria_modal: bool,
    pub aria_hidden: bool,
    /// Set when the header is suppressed.
    pub aria_label: Option<String>,
    /// Set when the header is rendered; points at [`DialogView::title_id`].
    pub aria_labelledby: Option<String>,
    pub tab_index: i32,
    pub title_id: String,
    /// Header title; `None` without a header.
    pub title_text: Option<String>,
    pub show_header: bool,
    pub show_close_button: bool,
    pub show_footer: bool,
    pub slots: Vec<Slot>,
}

impl DialogView {
    pub(crate) fn build(id: &str, props: &DialogProps, open: bool, hidden: bool) -> Self {
        let title_id = format!("{id}-title");
        let header = props.has_header();
        let mut slots = vec![Slot::Default];
        if props.has_footer() {
            slots.push(Slot::Footer);
        }

        Self {
            open,
            hidden,
            role: "dialog",
            aria_modal: true,
            aria_hidden: !open,
            aria_label: (!header).then(|| props.label_text().to_owned()),
            aria_labelledby: header.then(|| title_id.clone()),
            tab_index: 0,
            title_text: header.then(|| props.title_text().to_owned()),
            title_id,
            show_header: header,
            show_close_button: header,
            show_footer: props.has_footer(),
            slots,
        }
    }

    /// Container class list.
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec![CONTAINER_CLASS];
        if self.open {
            classes.push(OPEN_CLASS);
        }
        classes
    }
}
