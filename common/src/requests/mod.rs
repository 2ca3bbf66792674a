//! Request and response bodies for the widget handlers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Base path under which the host mounts every widget instance.
pub const API_PATH: &str = "/api/forum_task";

pub const LOAD_SUBMISSIONS: &str = "load_submissions";
pub const CHANGE_COHORT: &str = "change_cohort";
pub const SUBMIT_LINK: &str = "submit_link";
pub const VALIDATE_SUBMISSION: &str = "validate_submission";

pub const RESULT_OK: &str = "ok";
pub const RESULT_ERROR: &str = "error";

/// Shown when the server reports an error without a message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Ocorreu um erro. Tenta novamente.";

/// Where the mount-time context of `user_id` on `block_id` is served.
pub fn context_url(block_id: &str, user_id: &str) -> String {
    format!("{API_PATH}/{block_id}/users/{user_id}/context")
}

/// Base URL that handler names are appended to.
pub fn handler_base(block_id: &str, user_id: &str) -> String {
    format!("{API_PATH}/{block_id}/users/{user_id}/handler")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCohortRequest {
    pub cohort: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitLinkRequest {
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateSubmissionRequest {
    pub user_id: String,
}

/// Query string accepted by `load_submissions`. `Some("")` asks for every
/// learner; `None` falls back to the stored preference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSubmissionsQuery {
    #[serde(default)]
    pub cohort: Option<String>,
}

/// Reply of the mutating handlers.
///
/// Only `result == "error"` marks a failure; any other value of any JSON
/// type, or no value at all, is a success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionResponse {
    pub fn ok() -> Self {
        Self {
            result: Some(Value::from(RESULT_OK)),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            result: Some(Value::from(RESULT_ERROR)),
            message: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.result.as_ref().and_then(Value::as_str) == Some(RESULT_ERROR)
    }

    /// Turns the reply into the server-supplied error message, if any.
    pub fn into_result(self) -> Result<(), String> {
        if self.is_error() {
            Err(self
                .message
                .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()))
        } else {
            Ok(())
        }
    }
}
