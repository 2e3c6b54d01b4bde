#![forbid(unsafe_code)]

//! Plain-data dialog configuration.
//!
//! [`DialogConfig`] carries the host-settable properties of a dialog. It is
//! plain data: the widget layer converts it into live properties. With the
//! `serde` feature it (de)serializes with every field optional; with the
//! `config` feature it can be loaded from a TOML document.
//!
//! # Example
//!
//! ```
//! use shroud_core::DialogConfig;
//!
//! let config = DialogConfig::default()
//!     .label("Delete file?")
//!     .no_overlay_dismiss(true);
//! assert!(!config.open);
//! ```

use std::fmt;

/// Errors from configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The document could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid dialog config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Host-settable dialog properties.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct DialogConfig {
    /// Accessible name shown in the header.
    pub label: String,
    /// Ignore clicks on the overlay.
    pub no_overlay_dismiss: bool,
    /// Do not render the header (title and close button).
    pub no_header: bool,
    /// Do not render the footer slot.
    pub no_footer: bool,
    /// Open immediately on initialization.
    pub open: bool,
    /// Settle transitions synchronously instead of waiting for transition end.
    pub reduced_motion: bool,
}

impl DialogConfig {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn no_overlay_dismiss(mut self, value: bool) -> Self {
        self.no_overlay_dismiss = value;
        self
    }

    pub fn no_header(mut self, value: bool) -> Self {
        self.no_header = value;
        self
    }

    pub fn no_footer(mut self, value: bool) -> Self {
        self.no_footer = value;
        self
    }

    pub fn open(mut self, value: bool) -> Self {
        self.open = value;
        self
    }

    pub fn reduced_motion(mut self, value: bool) -> Self {
        self.reduced_motion = value;
        self
    }

    /// Parse a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if the document is not valid TOML or a key has
    /// the wrong type.
    #[cfg(feature = "config")]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_closed_and_dismissible() {
        let config = DialogConfig::default();
        assert!(!config.open);
        assert!(!config.no_overlay_dismiss);
        assert!(config.label.is_empty());
    }

    #[test]
    fn builder_sets_fields() {
        let config = DialogConfig::default()
            .label("Settings")
            .no_header(true)
            .no_footer(true)
            .open(true)
            .reduced_motion(true);
        assert_eq!(config.label, "Settings");
        assert!(config.no_header && config.no_footer && config.open && config.reduced_motion);
    }

    #[test]
    fn error_display() {
        let err = ConfigError::Parse("expected boolean".into());
        assert_eq!(err.to_string(), "invalid dialog config: expected boolean");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_uses_kebab_case_and_defaults() {
        let config: DialogConfig =
            serde_json::from_str(r#"{"label":"Hi","no-overlay-dismiss":true}"#).unwrap();
        assert_eq!(config.label, "Hi");
        assert!(config.no_overlay_dismiss);
        assert!(!config.no_footer);
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_round_trip_of_known_keys() {
        let config = DialogConfig::from_toml_str("label = \"Confirm\"\nopen = true\n").unwrap();
        assert_eq!(config.label, "Confirm");
        assert!(config.open);

        let err = DialogConfig::from_toml_str("open = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
