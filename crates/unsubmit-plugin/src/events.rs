//! Hook events delivered by the host's dispatcher.
//!
//! The host passes one event object per hook invocation. Handlers receive it
//! as an explicit immutable payload; nothing here is ambient or mutable.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use unsubmit_core::SurveyId;

/// The hooks this plugin subscribes to at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hook {
    /// Fired before a survey page is rendered.
    PageRender,

    /// Fired while the host builds the per-survey settings page.
    SettingsPanel,

    /// Fired after the per-survey settings form was submitted.
    SettingsSaved,
}

impl Hook {
    /// The event name used when registering with the dispatcher.
    pub fn name(self) -> &'static str {
        match self {
            Self::PageRender => "page_render",
            Self::SettingsPanel => "settings_panel",
            Self::SettingsSaved => "settings_saved",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// HTTP method of the request that triggered the page render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    Get,
    Post,
    Head,
    Put,
    Patch,
    Delete,
    Options,
}

impl RequestMethod {
    /// Only POST counts as a submit request for the reset policy.
    pub fn is_post(self) -> bool {
        matches!(self, Self::Post)
    }
}

/// Payload of the [`Hook::PageRender`] event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRenderEvent {
    pub survey_id: SurveyId,
    pub method: RequestMethod,
}

/// Payload of the [`Hook::SettingsPanel`] event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPanelEvent {
    pub survey_id: SurveyId,
}

/// Payload of the [`Hook::SettingsSaved`] event: the submitted form values,
/// keyed by setting name.
///
/// Ordered map so the passthrough writes settings in a deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSavedEvent {
    pub survey_id: SurveyId,
    pub settings: BTreeMap<String, serde_json::Value>,
}
