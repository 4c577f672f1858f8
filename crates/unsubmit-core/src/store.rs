//! Response-record capability injected into the policy's apply step.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::{ResponseId, SurveyId};

/// Errors from the host's response persistence layer.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("response {response_id} not found in survey {survey_id}")]
    ResponseNotFound {
        survey_id: SurveyId,
        response_id: ResponseId,
    },

    #[error("persistence failure: {0}")]
    Backend(String),
}

/// Write access to survey response records.
///
/// # Contract
/// `clear_submission_timestamp` targets exactly one record by primary key,
/// sets its submission timestamp to unset, and leaves every other field
/// untouched. The operation is idempotent: clearing an already-cleared
/// timestamp is a no-op in effect.
pub trait ResponseStore {
    /// Clear the submission timestamp of one response.
    fn clear_submission_timestamp(
        &self,
        survey_id: SurveyId,
        response_id: ResponseId,
    ) -> Result<(), StoreError>;

    /// Current submission timestamp of a response, `None` when unsubmitted.
    ///
    /// Read-side companion used by the host and by tests; the policy itself
    /// never reads it.
    fn submission_timestamp(
        &self,
        survey_id: SurveyId,
        response_id: ResponseId,
    ) -> Result<Option<DateTime<Utc>>, StoreError>;
}
