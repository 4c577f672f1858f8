//! The plugin itself: three hook handlers wired to the core policy.

use thiserror::Error;
use tracing::debug;

use unsubmit_core::{
    ResetContext, ResetOutcome, ResponseStore, SettingValue, StoreError, SubmissionResetPolicy,
    SurveyId,
};

use crate::events::{Hook, PageRenderEvent, SettingsPanelEvent, SettingsSavedEvent};
use crate::host::{
    setting_from_value, SessionStore, SettingScope, SettingsStore, SurveyRepository, Translator,
};
use crate::manifest::PluginManifest;
use crate::settings_panel::{FieldInput, SelectOption, SettingsField, SettingsPanel};

/// Settings-store key of the reset setting.
pub const ACTIVE_SETTING: &str = "active";

/// Errors surfaced to the host from a hook handler.
#[derive(Error, Debug)]
pub enum HookError {
    /// The dispatcher invoked a handler without its event payload. A
    /// precondition violation, not a recoverable case.
    #[error("hook {hook} invoked without an event context")]
    MissingEvent { hook: Hook },

    #[error("unknown survey {0}")]
    UnknownSurvey(SurveyId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl HookError {
    /// HTTP status the host should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MissingEvent { .. } => 403,
            Self::UnknownSurvey(_) => 404,
            Self::Store(_) => 500,
        }
    }
}

/// The host collaborators a hook handler may touch, borrowed for one call.
pub struct HostContext<'h> {
    pub session: &'h dyn SessionStore,
    pub settings: &'h mut dyn SettingsStore,
    pub surveys: &'h dyn SurveyRepository,
    pub responses: &'h dyn ResponseStore,
    pub translator: &'h dyn Translator,
}

/// Survey plugin that reopens a previously submitted response when it is
/// reloaded for editing.
pub struct UnsubmitPlugin {
    manifest: PluginManifest,
    policy: SubmissionResetPolicy,
}

impl UnsubmitPlugin {
    pub fn new(manifest: PluginManifest) -> Self {
        Self {
            manifest,
            policy: SubmissionResetPolicy::new(),
        }
    }

    pub fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    /// The hooks to register with the dispatcher at initialization.
    pub fn hooks(&self) -> &'static [Hook] {
        &[Hook::PageRender, Hook::SettingsPanel, Hook::SettingsSaved]
    }

    /// Page-render hook: evaluate the reset policy and, when it applies,
    /// clear the submission timestamp of the session's response.
    pub fn on_page_render(
        &self,
        host: &mut HostContext<'_>,
        event: Option<&PageRenderEvent>,
    ) -> Result<ResetOutcome, HookError> {
        let event = event.ok_or(HookError::MissingEvent {
            hook: Hook::PageRender,
        })?;

        let context = self.build_context(host, event)?;
        debug!(survey_id = %event.survey_id, "evaluating submission reset");
        Ok(self.policy.run(&context, host.responses)?)
    }

    /// Settings-panel hook: declare the select field for the reset setting.
    pub fn on_settings_panel(
        &self,
        host: &mut HostContext<'_>,
        event: Option<&SettingsPanelEvent>,
    ) -> Result<SettingsPanel, HookError> {
        let event = event.ok_or(HookError::MissingEvent {
            hook: Hook::SettingsPanel,
        })?;

        let t = host.translator;
        let yes = t.translate("Yes").into_owned();
        let no = t.translate("No").into_owned();

        let default_label = if self.global_default(host.settings) {
            &yes
        } else {
            &no
        };
        let current = setting_from_value(
            host.settings
                .get(ACTIVE_SETTING, SettingScope::Survey(event.survey_id))
                .as_ref(),
        );

        Ok(SettingsPanel {
            name: self.manifest.name.clone(),
            fields: vec![SettingsField {
                key: ACTIVE_SETTING.to_string(),
                label: t
                    .translate(
                        "Reset submitted date when reloading a previously submitted response.",
                    )
                    .into_owned(),
                help: t
                    .translate(
                        "If the survey allows reloading a response with token answer \
                         persistence, the response is set back to unsubmitted when reloaded.",
                    )
                    .into_owned(),
                input: FieldInput::Select {
                    options: vec![
                        SelectOption::new(SettingValue::Enabled.to_stored(), yes.clone()),
                        SelectOption::new(SettingValue::Disabled.to_stored(), no.clone()),
                    ],
                    empty_label: format!("{} ({})", t.translate("Use default"), default_label),
                    current,
                },
            }],
        })
    }

    /// Settings-save hook: copy every submitted key/value pair into the
    /// settings store at survey scope, unfiltered.
    pub fn on_settings_saved(
        &self,
        host: &mut HostContext<'_>,
        event: Option<&SettingsSavedEvent>,
    ) -> Result<(), HookError> {
        let event = event.ok_or(HookError::MissingEvent {
            hook: Hook::SettingsSaved,
        })?;

        for (name, value) in &event.settings {
            host.settings.set(
                name,
                value.clone(),
                SettingScope::Survey(event.survey_id),
            );
        }
        debug!(
            survey_id = %event.survey_id,
            count = event.settings.len(),
            "survey settings saved"
        );
        Ok(())
    }

    /// Snapshot request, session, settings, and survey state for one
    /// evaluation.
    fn build_context(
        &self,
        host: &HostContext<'_>,
        event: &PageRenderEvent,
    ) -> Result<ResetContext, HookError> {
        let survey_id = event.survey_id;
        let session = host.session.survey_session(survey_id).unwrap_or_default();

        let survey_override = setting_from_value(
            host.settings
                .get(ACTIVE_SETTING, SettingScope::Survey(survey_id))
                .as_ref(),
        )
        .as_override();

        let flags = host
            .surveys
            .flags(survey_id)
            .ok_or(HookError::UnknownSurvey(survey_id))?;

        Ok(ResetContext {
            survey_id,
            is_post_request: event.method.is_post(),
            response_id: session.response_id,
            session_has_token: session.has_token,
            flags,
            toggle: unsubmit_core::PolicyToggle::new(
                survey_override,
                self.global_default(host.settings),
            ),
        })
    }

    /// Global value of the reset setting, falling back to the manifest
    /// default when the store holds nothing.
    fn global_default(&self, settings: &dyn SettingsStore) -> bool {
        setting_from_value(settings.get(ACTIVE_SETTING, SettingScope::Global).as_ref())
            .as_override()
            .unwrap_or(self.manifest.active_default)
    }
}

impl Default for UnsubmitPlugin {
    fn default() -> Self {
        Self::new(PluginManifest::default())
    }
}
