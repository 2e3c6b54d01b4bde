#![forbid(unsafe_code)]

//! Transition-end correlation.
//!
//! A [`TransitionWatch`] is a one-shot registration keyed by
//! `(element, property)`. The dialog arms it when a visible-state change
//! starts; the first matching transition-end disarms it and reports a hit.
//! Transition ends for other properties or from other elements (nested
//! animated children, the overlay) never match.

use shroud_core::dom::ElementId;
use shroud_core::event::{DomEvent, StyleProperty};

/// One-shot watch for a single element's property transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionWatch {
    element: ElementId,
    property: StyleProperty,
    armed: bool,
}

impl TransitionWatch {
    /// Create a disarmed watch.
    pub fn new(element: ElementId, property: StyleProperty) -> Self {
        Self {
            element,
            property,
            armed: false,
        }
    }

    /// Watch `element`'s opacity transition.
    pub fn opacity(element: ElementId) -> Self {
        Self::new(element, StyleProperty::Opacity)
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn property(&self) -> &StyleProperty {
        &self.property
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Start waiting for the next matching transition end.
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Stop waiting. Returns `true` if the watch was armed.
    pub fn disarm(&mut self) -> bool {
        std::mem::replace(&mut self.armed, false)
    }

    /// Whether `target`/`property` is the watched transition.
    pub fn matches(&self, target: ElementId, property: &StyleProperty) -> bool {
        target == self.element && *property == self.property
    }

    /// Feed an event; returns `true` exactly once per arm for a matching end.
    pub fn observe(&mut self, event: &DomEvent) -> bool {
        match event {
            DomEvent::TransitionEnd { target, property }
                if self.armed && self.matches(*target, property) =>
            {
                self.armed = false;
                true
            }
            _ => false,
        }
    }
}
