#![forbid(unsafe_code)]

//! Host-settable dialog properties.

use bitflags::bitflags;
use shroud_core::config::DialogConfig;

/// Placeholder title used when the label is empty, so the header keeps its height.
pub const EMPTY_TITLE: &str = "\u{FEFF}";

bitflags! {
    /// Presentation and behavior toggles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DialogFlags: u8 {
        /// Overlay clicks do not dismiss.
        const NO_OVERLAY_DISMISS = 1 << 0;
        /// Header (title + close button) is not rendered.
        const NO_HEADER          = 1 << 1;
        /// Footer slot is not rendered.
        const NO_FOOTER          = 1 << 2;
        /// Transitions settle synchronously.
        const REDUCED_MOTION     = 1 << 3;
    }
}

/// Live properties of a dialog instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogProps {
    label: String,
    flags: DialogFlags,
}

impl DialogProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn no_overlay_dismiss(mut self, value: bool) -> Self {
        self.flags.set(DialogFlags::NO_OVERLAY_DISMISS, value);
        self
    }

    pub fn no_header(mut self, value: bool) -> Self {
        self.flags.set(DialogFlags::NO_HEADER, value);
        self
    }

    pub fn no_footer(mut self, value: bool) -> Self {
        self.flags.set(DialogFlags::NO_FOOTER, value);
        self
    }

    pub fn reduced_motion(mut self, value: bool) -> Self {
        self.flags.set(DialogFlags::REDUCED_MOTION, value);
        self
    }

    /// The raw label (may be empty).
    pub fn label_text(&self) -> &str {
        &self.label
    }

    /// Header title text; never empty.
    pub fn title_text(&self) -> &str {
        if self.label.is_empty() {
            EMPTY_TITLE
        } else {
            &self.label
        }
    }

    pub fn flags(&self) -> DialogFlags {
        self.flags
    }

    #[inline]
    pub fn overlay_dismiss(&self) -> bool {
        !self.flags.contains(DialogFlags::NO_OVERLAY_DISMISS)
    }

    #[inline]
    pub fn has_header(&self) -> bool {
        !self.flags.contains(DialogFlags::NO_HEADER)
    }

    #[inline]
    pub fn has_footer(&self) -> bool {
        !self.flags.contains(DialogFlags::NO_FOOTER)
    }

    #[inline]
    pub fn is_reduced_motion(&self) -> bool {
        self.flags.contains(DialogFlags::REDUCED_MOTION)
    }

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = label;
    }

    pub(crate) fn set_flag(&mut self, flag: DialogFlags, value: bool) {
        self.flags.set(flag, value);
    }
}

impl From<&DialogConfig> for DialogProps {
    fn from(config: &DialogConfig) -> Self {
        Self::new()
            .label(config.label.clone())
            .no_overlay_dismiss(config.no_overlay_dismiss)
            .no_header(config.no_header)
            .no_footer(config.no_footer)
            .reduced_motion(config.reduced_motion)
    }
}

impl From<DialogConfig> for DialogProps {
    fn from(config: DialogConfig) -> Self {
        Self::from(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_label_uses_placeholder() {
        let props = DialogProps::new();
        assert_eq!(props.title_text(), EMPTY_TITLE);
        assert_eq!(props.label_text(), "");
        assert_eq!(props.label("Hi").title_text(), "Hi");
    }

    #[test]
    fn flags_from_config() {
        let config = DialogConfig::default()
            .no_overlay_dismiss(true)
            .no_footer(true);
        let props = DialogProps::from(&config);
        assert!(!props.overlay_dismiss());
        assert!(props.has_header());
        assert!(!props.has_footer());
        assert_eq!(
            props.flags(),
            DialogFlags::NO_OVERLAY_DISMISS | DialogFlags::NO_FOOTER
        );
    }
}
