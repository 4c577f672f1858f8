//! In-memory host fakes for tests.
//!
//! Hosts embedding the plugin get real implementations of the collaborator
//! traits from their framework; these fakes exist so the plugin and its
//! policy can be exercised end to end without one.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use unsubmit_core::{ResponseId, ResponseStore, StoreError, SurveyFlags, SurveyId};

use crate::host::{
    IdentityTranslator, SessionStore, SettingScope, SettingsStore, SurveyRepository, SurveySession,
};
use crate::plugin::{HostContext, ACTIVE_SETTING};

/// Session entries keyed by survey.
#[derive(Debug, Default)]
pub struct FakeSessionStore {
    entries: HashMap<SurveyId, SurveySession>,
}

impl FakeSessionStore {
    pub fn insert(&mut self, survey_id: SurveyId, session: SurveySession) {
        self.entries.insert(survey_id, session);
    }
}

impl SessionStore for FakeSessionStore {
    fn survey_session(&self, survey_id: SurveyId) -> Option<SurveySession> {
        self.entries.get(&survey_id).copied()
    }
}

/// Scoped key-value settings, flat map keyed by (scope, name).
#[derive(Debug, Default)]
pub struct FakeSettingsStore {
    values: HashMap<(SettingScope, String), Value>,
}

impl SettingsStore for FakeSettingsStore {
    fn get(&self, key: &str, scope: SettingScope) -> Option<Value> {
        self.values.get(&(scope, key.to_string())).cloned()
    }

    fn set(&mut self, key: &str, value: Value, scope: SettingScope) {
        self.values.insert((scope, key.to_string()), value);
    }
}

/// Survey flags keyed by survey id.
#[derive(Debug, Default)]
pub struct FakeSurveyRepository {
    surveys: HashMap<SurveyId, SurveyFlags>,
}

impl FakeSurveyRepository {
    pub fn insert(&mut self, survey_id: SurveyId, flags: SurveyFlags) {
        self.surveys.insert(survey_id, flags);
    }
}

impl SurveyRepository for FakeSurveyRepository {
    fn flags(&self, survey_id: SurveyId) -> Option<SurveyFlags> {
        self.surveys.get(&survey_id).copied()
    }
}

/// One stored response row. Carries a second field so tests can check the
/// update leaves everything but the timestamp untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRow {
    pub token: String,
    pub submitted: Option<DateTime<Utc>>,
}

/// Response table with a call counter on the clear operation.
#[derive(Debug, Default)]
pub struct InMemoryResponseStore {
    rows: RefCell<HashMap<(SurveyId, ResponseId), ResponseRow>>,
    clear_calls: Cell<u32>,
}

impl InMemoryResponseStore {
    /// Insert a row already marked as submitted.
    pub fn insert_submitted(&self, survey_id: SurveyId, response_id: ResponseId, token: &str) {
        let submitted = Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap();
        self.rows.borrow_mut().insert(
            (survey_id, response_id),
            ResponseRow {
                token: token.to_string(),
                submitted: Some(submitted),
            },
        );
    }

    pub fn row(&self, survey_id: SurveyId, response_id: ResponseId) -> Option<ResponseRow> {
        self.rows.borrow().get(&(survey_id, response_id)).cloned()
    }

    pub fn clear_calls(&self) -> u32 {
        self.clear_calls.get()
    }
}

impl ResponseStore for InMemoryResponseStore {
    fn clear_submission_timestamp(
        &self,
        survey_id: SurveyId,
        response_id: ResponseId,
    ) -> Result<(), StoreError> {
        self.clear_calls.set(self.clear_calls.get() + 1);
        let mut rows = self.rows.borrow_mut();
        let row = rows
            .get_mut(&(survey_id, response_id))
            .ok_or(StoreError::ResponseNotFound {
                survey_id,
                response_id,
            })?;
        row.submitted = None;
        Ok(())
    }

    fn submission_timestamp(
        &self,
        survey_id: SurveyId,
        response_id: ResponseId,
    ) -> Result<Option<DateTime<Utc>>, StoreError> {
        self.rows
            .borrow()
            .get(&(survey_id, response_id))
            .map(|row| row.submitted)
            .ok_or(StoreError::ResponseNotFound {
                survey_id,
                response_id,
            })
    }
}

/// All collaborators bundled, with a borrow helper for hook calls.
#[derive(Debug, Default)]
pub struct FakeHost {
    pub session: FakeSessionStore,
    pub settings: FakeSettingsStore,
    pub surveys: FakeSurveyRepository,
    pub responses: InMemoryResponseStore,
    pub translator: IdentityTranslator,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host where every policy guard holds for the given survey and
    /// response: active setting on at survey scope, a non-anonymized survey
    /// with persistence and edit-after-completion, a session carrying the
    /// response id and a token, and a submitted row in the response table.
    pub fn eligible(survey_id: SurveyId, response_id: ResponseId) -> Self {
        let mut host = Self::new();
        host.session.insert(
            survey_id,
            SurveySession {
                response_id: Some(response_id),
                has_token: true,
            },
        );
        host.settings
            .set(ACTIVE_SETTING, json!("1"), SettingScope::Survey(survey_id));
        host.surveys.insert(
            survey_id,
            SurveyFlags {
                is_anonymized: false,
                token_answers_persistence: true,
                allow_edit_after_completion: true,
            },
        );
        host.responses
            .insert_submitted(survey_id, response_id, "FJKq2N8SvsSxrVu");
        host
    }

    /// Borrow every collaborator for one hook invocation.
    pub fn context(&mut self) -> HostContext<'_> {
        HostContext {
            session: &self.session,
            settings: &mut self.settings,
            surveys: &self.surveys,
            responses: &self.responses,
            translator: &self.translator,
        }
    }
}
