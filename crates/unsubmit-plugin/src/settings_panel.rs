//! Per-survey settings panel description.
//!
//! The host renders its settings pages from a generic form description; the
//! plugin only declares one select field for the reset setting. Everything
//! here is serializable so the host UI can consume it as plain data.

use serde::{Deserialize, Serialize};
use unsubmit_core::SettingValue;

/// The settings section this plugin contributes to a survey's settings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPanel {
    /// Section heading, the plugin name.
    pub name: String,

    pub fields: Vec<SettingsField>,
}

/// One form field in the settings panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsField {
    /// Setting key the field round-trips.
    pub key: String,

    /// Translated label shown next to the input.
    pub label: String,

    /// Translated help text shown under the input.
    pub help: String,

    pub input: FieldInput,
}

/// The input widget of a settings field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldInput {
    /// A select with an extra empty option meaning "use the global default".
    Select {
        options: Vec<SelectOption>,

        /// Label of the empty option, e.g. `Use default (Yes)`.
        empty_label: String,

        /// Currently stored per-survey value; `Unset` selects the empty
        /// option.
        current: SettingValue,
    },
}

/// One selectable option, stored value plus translated label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}
