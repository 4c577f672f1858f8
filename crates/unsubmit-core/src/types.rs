//! Core types for submission-reset evaluation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::settings::PolicyToggle;

/// Identifier of a survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyId(pub u64);

impl fmt::Display for SurveyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a stored survey response (the record whose submission
/// timestamp may be cleared).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseId(pub u64);

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The three survey configuration flags the policy consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyFlags {
    /// Responses are stored without any link to a participant.
    pub is_anonymized: bool,

    /// Answers are persisted against the participant token, allowing a
    /// response to be reloaded later.
    pub token_answers_persistence: bool,

    /// Participants may reopen a response they already submitted.
    pub allow_edit_after_completion: bool,
}

/// Snapshot of request, session, and survey state for one page-render hook
/// invocation.
///
/// Built fresh for every invocation, read once by
/// [`SubmissionResetPolicy::evaluate`](crate::SubmissionResetPolicy::evaluate),
/// then discarded. The policy never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetContext {
    /// Survey the incoming request targets.
    pub survey_id: SurveyId,

    /// Whether the incoming request is a write-type (POST) request.
    pub is_post_request: bool,

    /// Response id previously stored in the survey session, if any.
    pub response_id: Option<ResponseId>,

    /// Whether the survey session carries a participant token.
    pub session_has_token: bool,

    /// Survey configuration flags.
    pub flags: SurveyFlags,

    /// Per-survey override plus global default for the reset setting.
    pub toggle: PolicyToggle,
}

/// Why the policy decided to leave the response untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoActionReason {
    /// The request is not a POST-equivalent submit request.
    NotSubmitRequest,

    /// The session holds no response id for this survey.
    NoResponseInSession,

    /// The effective reset setting is off.
    PolicyDisabled,

    /// Anonymized surveys have no participant to hand the response back to.
    AnonymizedSurvey,

    /// Token-based answer persistence is off, so nothing is ever reloaded.
    NoAnswerPersistence,

    /// The survey forbids editing after completion.
    EditAfterCompletionDisallowed,

    /// The session carries no participant token.
    NoTokenInSession,
}

impl fmt::Display for NoActionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotSubmitRequest => "not a submit request",
            Self::NoResponseInSession => "no response in session",
            Self::PolicyDisabled => "policy disabled",
            Self::AnonymizedSurvey => "anonymized survey",
            Self::NoAnswerPersistence => "no answer persistence",
            Self::EditAfterCompletionDisallowed => "edit after completion disallowed",
            Self::NoTokenInSession => "no token in session",
        };
        f.write_str(text)
    }
}

/// Decision produced by one policy evaluation.
///
/// Exactly one outcome per evaluation; a `ClearSubmissionTimestamp` outcome
/// names exactly one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResetOutcome {
    /// Leave the response untouched.
    NoAction { reason: NoActionReason },

    /// Clear the submission timestamp of this one response.
    ClearSubmissionTimestamp { response_id: ResponseId },
}

impl ResetOutcome {
    pub fn no_action(reason: NoActionReason) -> Self {
        Self::NoAction { reason }
    }

    pub fn is_no_action(&self) -> bool {
        matches!(self, Self::NoAction { .. })
    }
}
