use serde::{Deserialize, Serialize};

/// One learner's submission as listed for course staff.
///
/// Produced by the `load_submissions` handler. Once `validated` is true the
/// record is final from the widget's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub submission_id: String,
    /// Anonymous id of the submitting learner.
    pub user_id: String,
    /// Submission time, formatted as `dd/mm/YYYY HH:MM:SS`.
    pub timestamp: String,
    pub link: String,
    #[serde(default)]
    pub validated: bool,
    /// Username of the staff member who validated the submission.
    #[serde(default)]
    pub validated_by: Option<String>,
}

impl SubmissionRecord {
    /// Whether the row should expose a validate action.
    pub fn is_actionable(&self) -> bool {
        !self.validated
    }
}

/// The learner's own submission, seen from the learner side.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LearnerSubmission {
    #[default]
    Unsubmitted,
    Submitted {
        link: String,
    },
    Validated {
        link: String,
    },
}

impl LearnerSubmission {
    pub fn link(&self) -> Option<&str> {
        match self {
            LearnerSubmission::Unsubmitted => None,
            LearnerSubmission::Submitted { link } | LearnerSubmission::Validated { link } => {
                Some(link)
            }
        }
    }

    /// Only an unsubmitted learner gets the submission form.
    pub fn shows_form(&self) -> bool {
        matches!(self, LearnerSubmission::Unsubmitted)
    }
}
