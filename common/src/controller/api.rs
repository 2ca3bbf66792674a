use thiserror::Error;

use crate::model::snapshot::StaffPayload;
use crate::requests::{
    ActionResponse, ChangeCohortRequest, SubmitLinkRequest, ValidateSubmissionRequest,
};

/// Failure of a request before an application-level reply was read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Transport for the four widget handlers.
///
/// The widget runs on a single thread, so implementations are not required
/// to return `Send` futures.
#[allow(async_fn_in_trait)]
pub trait WidgetApi {
    /// `GET load_submissions?cohort=`. The cohort is always sent; an empty
    /// one lists every learner.
    async fn load_submissions(&self, cohort: &str) -> Result<StaffPayload, ApiError>;

    /// `POST change_cohort`. The reply body is opaque.
    async fn change_cohort(&self, request: &ChangeCohortRequest) -> Result<(), ApiError>;

    async fn submit_link(&self, request: &SubmitLinkRequest) -> Result<ActionResponse, ApiError>;

    async fn validate_submission(
        &self,
        request: &ValidateSubmissionRequest,
    ) -> Result<ActionResponse, ApiError>;
}
