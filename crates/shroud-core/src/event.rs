#![forbid(unsafe_code)]

//! Typed input events routed from the host to a dialog.
//!
//! Hosts translate their native events (focusin, keydown, click,
//! transitionend) into [`DomEvent`] values. Property names are typed through
//! [`StyleProperty`] so transition correlation never relies on string
//! comparison at the call site.

use crate::dom::ElementId;
use std::fmt;

/// Keyboard key carried by [`DomEvent::KeyDown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Char(char),
    /// Any other key, by its host-reported name.
    Other(String),
}

impl Key {
    /// Map a host key name (`KeyboardEvent.key` style) to a [`Key`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other(other.to_owned()),
                }
            }
        }
    }
}

/// A style property whose transition the host reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Opacity,
    Transform,
    Visibility,
    Other(String),
}

impl StyleProperty {
    /// Parse a CSS property name. Unknown names are kept verbatim.
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "opacity" => Self::Opacity,
            "transform" => Self::Transform,
            "visibility" => Self::Visibility,
            other => Self::Other(other.to_owned()),
        }
    }

    /// CSS property name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Opacity => "opacity",
            Self::Transform => "transform",
            Self::Visibility => "visibility",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input event delivered to a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Focus landed on `target` (document-wide, bubbles).
    FocusIn { target: ElementId },
    /// A key was pressed while `target` had focus.
    KeyDown { target: ElementId, key: Key },
    /// `target` was activated by a pointer click.
    Click { target: ElementId },
    /// A style transition on `target` finished.
    TransitionEnd {
        target: ElementId,
        property: StyleProperty,
    },
}

impl DomEvent {
    /// The element the event was dispatched to.
    pub fn target(&self) -> ElementId {
        match self {
            Self::FocusIn { target }
            | Self::KeyDown { target, .. }
            | Self::Click { target }
            | Self::TransitionEnd { target, .. } => *target,
        }
    }

    /// Short event name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FocusIn { .. } => "focusin",
            Self::KeyDown { .. } => "keydown",
            Self::Click { .. } => "click",
            Self::TransitionEnd { .. } => "transitionend",
        }
    }

    /// Convenience constructor for a key press by host key name.
    pub fn key(target: ElementId, name: &str) -> Self {
        Self::KeyDown {
            target,
            key: Key::from_name(name),
        }
    }

    /// Convenience constructor for a transition end by CSS property name.
    pub fn transition_end(target: ElementId, property: &str) -> Self {
        Self::TransitionEnd {
            target,
            property: StyleProperty::parse(property),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names() {
        assert_eq!(Key::from_name("Escape"), Key::Escape);
        assert_eq!(Key::from_name("Esc"), Key::Escape);
        assert_eq!(Key::from_name("a"), Key::Char('a'));
        assert_eq!(Key::from_name("ArrowUp"), Key::Other("ArrowUp".into()));
    }

    #[test]
    fn property_parse_is_typed() {
        assert_eq!(StyleProperty::parse("opacity"), StyleProperty::Opacity);
        assert_eq!(StyleProperty::parse(" opacity "), StyleProperty::Opacity);
        assert_eq!(
            StyleProperty::parse("background-color"),
            StyleProperty::Other("background-color".into())
        );
        assert_eq!(StyleProperty::Transform.to_string(), "transform");
    }

    #[test]
    fn event_target_and_name() {
        let el = ElementId::new(9);
        let ev = DomEvent::transition_end(el, "opacity");
        assert_eq!(ev.target(), el);
        assert_eq!(ev.name(), "transitionend");
        assert_eq!(DomEvent::key(el, "Escape").name(), "keydown");
    }
}
