#![forbid(unsafe_code)]

//! shroud public facade.
//!
//! Re-exports the collaborator interfaces from `shroud-core` and the dialog
//! widgets from `shroud-widgets`. Most applications only need the
//! [`prelude`].

pub use shroud_core::{
    ConfigError, DialogConfig, DialogEventKind, DialogParts, Document, DomEvent, ElementId, Key,
    Notification, Observable, Overflow, ReadOnly, StyleProperty,
};
pub use shroud_widgets::{
    Dialog, DialogAction, DialogPhase, DialogProps, DialogView, TransitionOutcome,
};

#[cfg(feature = "tracing-json")]
pub use shroud_core::logging::init_json;

pub mod prelude {
    //! Common imports for hosting dialogs.

    pub use crate::{
        Dialog, DialogAction, DialogConfig, DialogEventKind, DialogParts, DialogPhase,
        DialogProps, Document, DomEvent, ElementId, TransitionOutcome,
    };
}
