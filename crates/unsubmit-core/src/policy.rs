//! The submission-reset eligibility rule.
//!
//! A single-shot guarded decision, not a state machine. The guard order is
//! significant and fixed: the first failing check wins, and later checks are
//! not evaluated. Request-level checks come first, then the setting, then
//! survey configuration, and the session token check last as a cheap
//! pre-check before the host would touch its token table.

use tracing::{debug, info, warn};

use crate::store::{ResponseStore, StoreError};
use crate::types::{NoActionReason, ResetContext, ResetOutcome};

/// Decides whether a previously submitted response should be set back to
/// unsubmitted when it is reloaded for editing.
pub struct SubmissionResetPolicy;

impl SubmissionResetPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the context. Pure: no side effects, cannot fail.
    ///
    /// Returns `ClearSubmissionTimestamp` only when every guard holds:
    /// a POST request, a response id in session, the effective setting on,
    /// a non-anonymized survey with token answer persistence and edit after
    /// completion, and a token in session.
    pub fn evaluate(&self, context: &ResetContext) -> ResetOutcome {
        if !context.is_post_request {
            return self.skip(context, NoActionReason::NotSubmitRequest);
        }

        let Some(response_id) = context.response_id else {
            return self.skip(context, NoActionReason::NoResponseInSession);
        };

        if !context.toggle.effective() {
            return self.skip(context, NoActionReason::PolicyDisabled);
        }

        if context.flags.is_anonymized {
            return self.skip(context, NoActionReason::AnonymizedSurvey);
        }

        if !context.flags.token_answers_persistence {
            return self.skip(context, NoActionReason::NoAnswerPersistence);
        }

        if !context.flags.allow_edit_after_completion {
            return self.skip(context, NoActionReason::EditAfterCompletionDisallowed);
        }

        if !context.session_has_token {
            return self.skip(context, NoActionReason::NoTokenInSession);
        }

        ResetOutcome::ClearSubmissionTimestamp { response_id }
    }

    /// Evaluate and apply: on a clear outcome, issue exactly one update
    /// through the injected store.
    ///
    /// The update is best-effort and unverified beyond the store's own error
    /// reporting; a failing write is propagated for the host's error channel
    /// but never retried. The `NoAction` path stays silent.
    pub fn run(
        &self,
        context: &ResetContext,
        store: &dyn ResponseStore,
    ) -> Result<ResetOutcome, StoreError> {
        let outcome = self.evaluate(context);

        if let ResetOutcome::ClearSubmissionTimestamp { response_id } = outcome {
            if let Err(error) = store.clear_submission_timestamp(context.survey_id, response_id) {
                warn!(
                    survey_id = %context.survey_id,
                    response_id = %response_id,
                    %error,
                    "failed to clear submission timestamp"
                );
                return Err(error);
            }
            info!(
                survey_id = %context.survey_id,
                response_id = %response_id,
                "submission timestamp cleared, response reopened"
            );
        }

        Ok(outcome)
    }

    fn skip(&self, context: &ResetContext, reason: NoActionReason) -> ResetOutcome {
        debug!(survey_id = %context.survey_id, %reason, "submission reset skipped");
        ResetOutcome::no_action(reason)
    }
}

impl Default for SubmissionResetPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;

    use super::*;
    use crate::settings::PolicyToggle;
    use crate::types::{ResponseId, SurveyFlags, SurveyId};

    /// In-memory response table keyed by (survey, response).
    struct FakeResponseStore {
        rows: RefCell<HashMap<(SurveyId, ResponseId), Option<DateTime<Utc>>>>,
        clear_calls: RefCell<u32>,
    }

    impl FakeResponseStore {
        fn with_submitted(survey_id: SurveyId, response_id: ResponseId) -> Self {
            let submitted = Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap();
            let mut rows = HashMap::new();
            rows.insert((survey_id, response_id), Some(submitted));
            Self {
                rows: RefCell::new(rows),
                clear_calls: RefCell::new(0),
            }
        }

        fn clear_calls(&self) -> u32 {
            *self.clear_calls.borrow()
        }
    }

    impl ResponseStore for FakeResponseStore {
        fn clear_submission_timestamp(
            &self,
            survey_id: SurveyId,
            response_id: ResponseId,
        ) -> Result<(), StoreError> {
            *self.clear_calls.borrow_mut() += 1;
            let mut rows = self.rows.borrow_mut();
            let row = rows
                .get_mut(&(survey_id, response_id))
                .ok_or(StoreError::ResponseNotFound {
                    survey_id,
                    response_id,
                })?;
            *row = None;
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
                .copied()
                .ok_or(StoreError::ResponseNotFound {
                    survey_id,
                    response_id,
                })
        }
    }

    /// A context where every guard holds.
    fn eligible_context() -> ResetContext {
        ResetContext {
            survey_id: SurveyId(123456),
            is_post_request: true,
            response_id: Some(ResponseId(42)),
            session_has_token: true,
            flags: SurveyFlags {
                is_anonymized: false,
                token_answers_persistence: true,
                allow_edit_after_completion: true,
            },
            toggle: PolicyToggle::new(Some(true), false),
        }
    }

    #[test]
    fn test_eligible_context_clears_response() {
        let outcome = SubmissionResetPolicy::new().evaluate(&eligible_context());
        assert_eq!(
            outcome,
            ResetOutcome::ClearSubmissionTimestamp {
                response_id: ResponseId(42)
            }
        );
    }

    #[test]
    fn test_non_post_request_short_circuits() {
        let mut context = eligible_context();
        context.is_post_request = false;

        let outcome = SubmissionResetPolicy::new().evaluate(&context);
        assert_eq!(
            outcome,
            ResetOutcome::no_action(NoActionReason::NotSubmitRequest)
        );
    }

    #[test]
    fn test_missing_response_id_before_survey_flags() {
        // Survey flags would all fail here; the session check must win.
        let mut context = eligible_context();
        context.response_id = None;
        context.flags = SurveyFlags {
            is_anonymized: true,
            token_answers_persistence: false,
            allow_edit_after_completion: false,
        };

        let outcome = SubmissionResetPolicy::new().evaluate(&context);
        assert_eq!(
            outcome,
            ResetOutcome::no_action(NoActionReason::NoResponseInSession)
        );
    }

    #[test]
    fn test_survey_override_beats_global_default() {
        let mut context = eligible_context();
        context.toggle = PolicyToggle::new(Some(false), true);

        let outcome = SubmissionResetPolicy::new().evaluate(&context);
        assert_eq!(
            outcome,
            ResetOutcome::no_action(NoActionReason::PolicyDisabled)
        );
    }

    #[test]
    fn test_global_default_applies_when_unset() {
        let mut context = eligible_context();
        context.toggle = PolicyToggle::new(None, true);

        let outcome = SubmissionResetPolicy::new().evaluate(&context);
        assert!(!outcome.is_no_action());
    }

    #[test]
    fn test_anonymized_survey_is_skipped() {
        let mut context = eligible_context();
        context.flags.is_anonymized = true;

        let outcome = SubmissionResetPolicy::new().evaluate(&context);
        assert_eq!(
            outcome,
            ResetOutcome::no_action(NoActionReason::AnonymizedSurvey)
        );
    }

    #[test]
    fn test_guard_order_is_fixed() {
        // Break every guard at once; peel them off one by one and check the
        // reported reason follows the documented order.
        let mut context = ResetContext {
            survey_id: SurveyId(1),
            is_post_request: false,
            response_id: None,
            session_has_token: false,
            flags: SurveyFlags {
                is_anonymized: true,
                token_answers_persistence: false,
                allow_edit_after_completion: false,
            },
            toggle: PolicyToggle::new(Some(false), true),
        };
        let policy = SubmissionResetPolicy::new();

        let expect = |context: &ResetContext, reason| {
            assert_eq!(policy.evaluate(context), ResetOutcome::no_action(reason));
        };

        expect(&context, NoActionReason::NotSubmitRequest);
        context.is_post_request = true;
        expect(&context, NoActionReason::NoResponseInSession);
        context.response_id = Some(ResponseId(7));
        expect(&context, NoActionReason::PolicyDisabled);
        context.toggle = PolicyToggle::new(Some(true), false);
        expect(&context, NoActionReason::AnonymizedSurvey);
        context.flags.is_anonymized = false;
        expect(&context, NoActionReason::NoAnswerPersistence);
        context.flags.token_answers_persistence = true;
        expect(&context, NoActionReason::EditAfterCompletionDisallowed);
        context.flags.allow_edit_after_completion = true;
        expect(&context, NoActionReason::NoTokenInSession);
        context.session_has_token = true;
        assert!(!policy.evaluate(&context).is_no_action());
    }

    #[test]
    fn test_run_clears_exactly_one_record() {
        let context = eligible_context();
        let store = FakeResponseStore::with_submitted(context.survey_id, ResponseId(42));

        let outcome = SubmissionResetPolicy::new().run(&context, &store).unwrap();

        assert!(!outcome.is_no_action());
        assert_eq!(store.clear_calls(), 1);
        assert_eq!(
            store
                .submission_timestamp(context.survey_id, ResponseId(42))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_run_skips_store_on_no_action() {
        let mut context = eligible_context();
        context.flags.is_anonymized = true;
        let store = FakeResponseStore::with_submitted(context.survey_id, ResponseId(42));

        let outcome = SubmissionResetPolicy::new().run(&context, &store).unwrap();

        assert!(outcome.is_no_action());
        assert_eq!(store.clear_calls(), 0);
        // Record untouched.
        assert!(store
            .submission_timestamp(context.survey_id, ResponseId(42))
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_clearing_twice_matches_clearing_once() {
        let context = eligible_context();
        let store = FakeResponseStore::with_submitted(context.survey_id, ResponseId(42));
        let policy = SubmissionResetPolicy::new();

        policy.run(&context, &store).unwrap();
        policy.run(&context, &store).unwrap();

        assert_eq!(store.clear_calls(), 2);
        assert_eq!(
            store
                .submission_timestamp(context.survey_id, ResponseId(42))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_store_failure_is_surfaced() {
        let context = eligible_context();
        // Empty store: the targeted row does not exist.
        let store = FakeResponseStore {
            rows: RefCell::new(HashMap::new()),
            clear_calls: RefCell::new(0),
        };

        let result = SubmissionResetPolicy::new().run(&context, &store);
        assert!(matches!(result, Err(StoreError::ResponseNotFound { .. })));
    }

    fn arb_flags() -> impl Strategy<Value = SurveyFlags> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(is_anonymized, token_answers_persistence, allow_edit_after_completion)| SurveyFlags {
                is_anonymized,
                token_answers_persistence,
                allow_edit_after_completion,
            },
        )
    }

    fn arb_context() -> impl Strategy<Value = ResetContext> {
        (
            any::<bool>(),
            proptest::option::of(any::<u64>()),
            any::<bool>(),
            arb_flags(),
            proptest::option::of(any::<bool>()),
            any::<bool>(),
        )
            .prop_map(
                |(is_post, response, has_token, flags, survey_override, global_default)| {
                    ResetContext {
                        survey_id: SurveyId(563168),
                        is_post_request: is_post,
                        response_id: response.map(ResponseId),
                        session_has_token: has_token,
                        flags,
                        toggle: PolicyToggle::new(survey_override, global_default),
                    }
                },
            )
    }

    proptest! {
        /// With the effective setting off, no combination of the remaining
        /// fields produces an action.
        #[test]
        fn prop_disabled_toggle_never_acts(mut context in arb_context()) {
            context.toggle = PolicyToggle::new(Some(false), context.toggle.global_default);
            let outcome = SubmissionResetPolicy::new().evaluate(&context);
            prop_assert!(outcome.is_no_action());
        }

        /// A clear outcome always names the response id stored in session.
        #[test]
        fn prop_clear_targets_session_response(context in arb_context()) {
            if let ResetOutcome::ClearSubmissionTimestamp { response_id } =
                SubmissionResetPolicy::new().evaluate(&context)
            {
                prop_assert_eq!(Some(response_id), context.response_id);
            }
        }
    }
}
