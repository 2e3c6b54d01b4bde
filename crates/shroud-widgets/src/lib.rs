#![forbid(unsafe_code)]

//! Modal dialog widgets for shroud.
//!
//! - [`dialog`]: the lifecycle state machine ([`Dialog`]).
//! - [`scroll_lock`]: reference-counted page scroll suppression.
//! - [`focus_trap`]: focus containment while a dialog is open.
//! - [`transition`]: one-shot transition-end correlation.

pub mod dialog;
pub mod focus_trap;
pub mod scroll_lock;
pub mod transition;

pub use dialog::{
    Dialog, DialogAction, DialogFlags, DialogPhase, DialogProps, DialogView, Slot,
    TransitionOutcome,
};
pub use focus_trap::FocusContainment;
pub use scroll_lock::LockToken;
pub use transition::TransitionWatch;
