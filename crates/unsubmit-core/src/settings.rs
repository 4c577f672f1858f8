//! Tri-state reset setting and its resolution.
//!
//! The setting lives in the host's key-value settings store twice: once at
//! survey scope (may be unset) and once at global scope (always has a value,
//! falling back to the compiled-in default). Resolution is pure: the survey
//! override wins when set, otherwise the global default applies.

use serde::{Deserialize, Serialize};

/// One stored value of the reset setting, as the host's settings store
/// round-trips it.
///
/// The host UI persists an empty string for "use default", so `Unset` must
/// survive both a missing key and an empty stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingValue {
    Enabled,
    Disabled,
    #[default]
    Unset,
}

impl SettingValue {
    /// Parse the host's stored representation: `"1"`/`"0"` from the select
    /// field, an empty string for the "use default" option.
    pub fn from_stored(raw: &str) -> Self {
        match raw.trim() {
            "" => Self::Unset,
            "0" => Self::Disabled,
            _ => Self::Enabled,
        }
    }

    /// The representation handed back to the settings store.
    pub fn to_stored(self) -> &'static str {
        match self {
            Self::Enabled => "1",
            Self::Disabled => "0",
            Self::Unset => "",
        }
    }

    pub fn as_override(self) -> Option<bool> {
        match self {
            Self::Enabled => Some(true),
            Self::Disabled => Some(false),
            Self::Unset => None,
        }
    }
}

impl From<Option<bool>> for SettingValue {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Enabled,
            Some(false) => Self::Disabled,
            None => Self::Unset,
        }
    }
}

/// The per-survey override composed with the global default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyToggle {
    /// Explicit per-survey setting, `None` when the survey uses the default.
    pub survey_override: Option<bool>,

    /// Global default applied when no override is set.
    pub global_default: bool,
}

impl PolicyToggle {
    pub fn new(survey_override: Option<bool>, global_default: bool) -> Self {
        Self {
            survey_override,
            global_default,
        }
    }

    /// The effective value: override when set, global default otherwise.
    /// No other field of the context has a fallback.
    pub fn effective(&self) -> bool {
        self.survey_override.unwrap_or(self.global_default)
    }
}
