use thiserror::Error;

use super::api::ApiError;
use crate::link::LinkError;
use crate::model::context::Role;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Rejected before any request was sent.
    #[error(transparent)]
    InvalidLink(#[from] LinkError),
    /// The server answered `result: "error"`; holds its message.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("action not available to the {0:?} role")]
    WrongRole(Role),
    #[error("course is not cohorted")]
    NotCohorted,
}

impl ActionError {
    /// Message to put in front of the user, if this failure has one.
    pub fn user_message(&self) -> Option<String> {
        match self {
            ActionError::InvalidLink(_) | ActionError::Rejected(_) => Some(self.to_string()),
            ActionError::Api(_) | ActionError::WrongRole(_) | ActionError::NotCohorted => None,
        }
    }
}
