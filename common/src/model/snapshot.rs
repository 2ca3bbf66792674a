//! The view-state for one render pass.
//!
//! A `Snapshot` is built fresh on every sync and discarded after rendering.
//! Role-specific data lives in `RoleView`, so a staff snapshot can never carry
//! a learner link and a learner snapshot can never carry a submission list.
//! Cohort data lives in `Cohorting`, which has no current cohort at all for
//! courses that are not cohorted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::context::{Role, WidgetContext};
use super::submission::{LearnerSubmission, SubmissionRecord};

/// Body returned by the `load_submissions` handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffPayload {
    #[serde(default)]
    pub submissions: Vec<SubmissionRecord>,
    /// Learners in the selected cohort without a submission.
    #[serde(default)]
    pub not_submitted: Vec<String>,
    /// Display names keyed by user id.
    #[serde(default)]
    pub names: BTreeMap<String, String>,
    #[serde(default)]
    pub cohorts: Vec<String>,
    #[serde(default)]
    pub is_course_cohorted: bool,
    #[serde(default)]
    pub cohort: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cohorting {
    Uncohorted,
    Cohorted {
        /// Selected cohort; `None` lists every learner.
        current: Option<String>,
        available: Vec<String>,
    },
}

impl Cohorting {
    /// Normalizes wire values: a stale cohort on an uncohorted course is
    /// dropped and an empty cohort name means no filter.
    pub fn new(is_cohorted: bool, current: Option<String>, available: Vec<String>) -> Self {
        if !is_cohorted {
            return Cohorting::Uncohorted;
        }
        Cohorting::Cohorted {
            current: current.filter(|c| !c.is_empty()),
            available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnerView {
    pub prompt: String,
    pub submission: LearnerSubmission,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffView {
    pub submissions: Vec<SubmissionRecord>,
    pub not_submitted: Vec<String>,
    pub names: BTreeMap<String, String>,
}

impl StaffView {
    /// Display name for a learner, falling back to the raw id.
    pub fn display_name<'a>(&'a self, user_id: &'a str) -> &'a str {
        self.names.get(user_id).map_or(user_id, String::as_str)
    }

    pub fn record(&self, user_id: &str) -> Option<&SubmissionRecord> {
        self.submissions.iter().find(|r| r.user_id == user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleView {
    Learner(LearnerView),
    Staff(StaffView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub xblock_id: String,
    pub cohorting: Cohorting,
    pub view: RoleView,
}

impl Snapshot {
    pub fn for_learner(context: &WidgetContext) -> Self {
        Self {
            xblock_id: context.xblock_id.clone(),
            cohorting: Cohorting::new(
                context.is_course_cohorted,
                context.cohort.clone(),
                Vec::new(),
            ),
            view: RoleView::Learner(LearnerView {
                prompt: context.messages.for_submission(&context.submission).to_string(),
                submission: context.submission.clone(),
            }),
        }
    }

    pub fn for_staff(xblock_id: impl Into<String>, payload: StaffPayload) -> Self {
        Self {
            xblock_id: xblock_id.into(),
            cohorting: Cohorting::new(payload.is_course_cohorted, payload.cohort, payload.cohorts),
            view: RoleView::Staff(StaffView {
                submissions: payload.submissions,
                not_submitted: payload.not_submitted,
                names: payload.names,
            }),
        }
    }

    pub fn role(&self) -> Role {
        match self.view {
            RoleView::Learner(_) => Role::Learner,
            RoleView::Staff(_) => Role::Staff,
        }
    }

    pub fn is_cohorted(&self) -> bool {
        matches!(self.cohorting, Cohorting::Cohorted { .. })
    }

    pub fn current_cohort(&self) -> Option<&str> {
        match &self.cohorting {
            Cohorting::Uncohorted => None,
            Cohorting::Cohorted { current, .. } => current.as_deref(),
        }
    }

    /// Present only on staff snapshots.
    pub fn submissions(&self) -> Option<&[SubmissionRecord]> {
        match &self.view {
            RoleView::Learner(_) => None,
            RoleView::Staff(staff) => Some(&staff.submissions),
        }
    }

    /// Present only on learner snapshots with a prior submission.
    pub fn learner_submission_link(&self) -> Option<&str> {
        match &self.view {
            RoleView::Learner(learner) => learner.submission.link(),
            RoleView::Staff(_) => None,
        }
    }
}
