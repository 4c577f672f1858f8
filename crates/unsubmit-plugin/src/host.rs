//! Host collaborator interfaces.
//!
//! The surrounding survey application owns sessions, settings storage,
//! survey metadata, and localization. This plugin only consumes them, so
//! each collaborator is a narrow trait the host implements. Injecting them
//! per hook call keeps the policy free of ambient request-scoped state.

use std::borrow::Cow;

use serde_json::Value;
use unsubmit_core::{SettingValue, SurveyFlags, SurveyId};

/// What the host's session holds for one survey, under `survey_<id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurveySession {
    /// Id of the response the participant is working on, if one was stored.
    pub response_id: Option<unsubmit_core::ResponseId>,

    /// Whether a participant token is bound to this session. Checked before
    /// any token-table lookup the host might otherwise do.
    pub has_token: bool,
}

/// Read-only view of the host's session mechanism.
pub trait SessionStore {
    /// The session entry for one survey, `None` when the participant has no
    /// session for it.
    fn survey_session(&self, survey_id: SurveyId) -> Option<SurveySession>;
}

/// Scope of a stored setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingScope {
    Global,
    Survey(SurveyId),
}

/// The host's generic key-value settings store, scoped per survey with a
/// global level underneath.
pub trait SettingsStore {
    /// Stored value for a key at a scope, `None` when never written.
    fn get(&self, key: &str, scope: SettingScope) -> Option<Value>;

    /// Store a value for a key at a scope, replacing any previous value.
    fn set(&mut self, key: &str, value: Value, scope: SettingScope);
}

/// Survey metadata lookup by id.
pub trait SurveyRepository {
    /// Configuration flags of a survey, `None` when the id is unknown.
    fn flags(&self, survey_id: SurveyId) -> Option<SurveyFlags>;
}

/// The host's localization function for user-facing labels.
pub trait Translator {
    fn translate<'a>(&self, text: &'a str) -> Cow<'a, str>;
}

/// Pass-through translator for hosts without localization.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}

/// Decode a stored settings value into the tri-state setting.
///
/// The settings UI persists strings (`"1"`, `"0"`, `""` for "use default"),
/// but hosts are free to store booleans or numbers; a missing key and a JSON
/// null both mean unset.
pub fn setting_from_value(value: Option<&Value>) -> SettingValue {
    match value {
        None | Some(Value::Null) => SettingValue::Unset,
        Some(Value::String(raw)) => SettingValue::from_stored(raw),
        Some(Value::Bool(flag)) => SettingValue::from(Some(*flag)),
        Some(Value::Number(number)) => {
            SettingValue::from(Some(number.as_f64().unwrap_or(0.0) != 0.0))
        }
        // Arrays and objects are not valid for a checkbox setting.
        Some(_) => SettingValue::Unset,
    }
}
