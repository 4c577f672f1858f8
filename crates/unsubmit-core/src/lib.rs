//! # unsubmit-core
//!
//! Deterministic submission-reset policy engine.
//!
//! When a survey allows participants to reload a previously submitted
//! response, the host keeps the response marked as submitted. This crate
//! decides, per page-render hook invocation, whether that submission
//! timestamp should be cleared so the response counts as in-progress again.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: same [`ResetContext`] always produces the same
//!    [`ResetOutcome`]
//! 2. **Single record**: a clear outcome targets exactly one response by
//!    primary key, never a bulk update
//! 3. **Idempotent effect**: clearing an already-cleared timestamp changes
//!    nothing
//! 4. **No ambient state**: everything the policy reads arrives in the
//!    context; the only side effect goes through the injected
//!    [`ResponseStore`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use unsubmit_core::{ResetContext, ResetOutcome, SubmissionResetPolicy};
//!
//! let policy = SubmissionResetPolicy::new();
//! match policy.evaluate(&context) {
//!     ResetOutcome::ClearSubmissionTimestamp { response_id } => {
//!         store.clear_submission_timestamp(context.survey_id, response_id)?;
//!     }
//!     ResetOutcome::NoAction { reason } => tracing::debug!(%reason, "left untouched"),
//! }
//! ```

pub mod policy;
pub mod settings;
pub mod store;
pub mod types;

// Re-export main types at crate root
pub use policy::SubmissionResetPolicy;
pub use settings::{PolicyToggle, SettingValue};
pub use store::{ResponseStore, StoreError};
pub use types::{NoActionReason, ResetContext, ResetOutcome, ResponseId, SurveyFlags, SurveyId};
