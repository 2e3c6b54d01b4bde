#![forbid(unsafe_code)]

//! Core collaborator interfaces for shroud dialogs.
//!
//! This crate defines everything a dialog needs from its host environment
//! without committing to a concrete DOM:
//!
//! - [`dom`]: the [`Document`](dom::Document) trait, element handles, and the
//!   handle bundle a dialog owns.
//! - [`event`]: typed input events routed from the host to a dialog.
//! - [`notify`]: cancelable lifecycle notifications and their emitter.
//! - [`reactive`]: single-threaded observable values used for bound properties.
//! - [`config`]: plain-data dialog configuration (optionally serde/TOML backed).
//! - [`logging`]: structured logging bootstrap.

pub mod config;
pub mod dom;
pub mod event;
pub mod logging;
pub mod notify;
pub mod reactive;

pub use config::{ConfigError, DialogConfig};
pub use dom::{DialogParts, Document, ElementId, ListenerId, Overflow};
pub use event::{DomEvent, Key, StyleProperty};
pub use notify::{DialogEventKind, EventEmitter, Notification};
pub use reactive::{Observable, ReadOnly, Subscription};
