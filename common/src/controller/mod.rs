//! The widget's render/act/sync loop.
//!
//! `ForumTaskController` decides what each role may do, sends mutations
//! through a `WidgetApi`, and re-syncs after every successful mutation. It
//! keeps almost no state of its own: the server is the source of truth and
//! every change is picked up through a fresh `Snapshot`.
//!
//! The two exceptions are
//! - the learner's own submission, recorded in the mount context once the
//!   server has acknowledged it (learner syncs never hit the network);
//! - the cohort filter, written optimistically by `change_cohort` and
//!   reconciled by the sync that follows;
//! - whether the course is cohorted, seeded from the mount context and
//!   replaced by every staff payload.
//!
//! The controller lives on a single thread behind an `Rc`. Its cells are
//! never borrowed across an `.await`, so overlapping operations are allowed
//! and the last response wins.

mod api;
mod error;

use std::cell::{Cell, RefCell};

use log::{debug, info, warn};

pub use api::{ApiError, WidgetApi};
pub use error::ActionError;

use crate::link::check_link;
use crate::model::context::{Role, WidgetContext};
use crate::model::snapshot::Snapshot;
use crate::model::submission::LearnerSubmission;
use crate::requests::{ChangeCohortRequest, SubmitLinkRequest, ValidateSubmissionRequest};

pub struct ForumTaskController<A> {
    api: A,
    context: RefCell<WidgetContext>,
    cohort_filter: RefCell<Option<String>>,
    cohorted: Cell<bool>,
}

impl<A: WidgetApi> ForumTaskController<A> {
    pub fn new(api: A, context: WidgetContext) -> Self {
        let cohort_filter = if context.is_course_cohorted {
            context.cohort.clone().filter(|c| !c.is_empty())
        } else {
            None
        };
        Self {
            api,
            cohorted: Cell::new(context.is_course_cohorted),
            context: RefCell::new(context),
            cohort_filter: RefCell::new(cohort_filter),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn role(&self) -> Role {
        self.context.borrow().role
    }

    pub fn xblock_id(&self) -> String {
        self.context.borrow().xblock_id.clone()
    }

    /// The filter the next staff sync will send.
    pub fn cohort_filter(&self) -> Option<String> {
        self.cohort_filter.borrow().clone()
    }

    /// Builds a fresh snapshot: loaded from the server for staff, taken from
    /// the mount context for learners.
    pub async fn sync(&self) -> Result<Snapshot, ApiError> {
        match self.role() {
            Role::Staff => {
                let filter = self.cohort_filter();
                debug!("loading submissions, cohort filter {filter:?}");
                let payload = self
                    .api
                    .load_submissions(filter.as_deref().unwrap_or_default())
                    .await?;
                let snapshot = Snapshot::for_staff(self.xblock_id(), payload);
                self.cohorted.set(snapshot.is_cohorted());
                Ok(snapshot)
            }
            Role::Learner => Ok(Snapshot::for_learner(&self.context.borrow())),
        }
    }

    /// Learner only. Checks the link locally, posts it, and re-syncs once the
    /// server accepts it.
    pub async fn submit_link(&self, link: &str) -> Result<Snapshot, ActionError> {
        self.require(Role::Learner)?;
        let link = match check_link(link) {
            Ok(link) => link.to_string(),
            Err(err) => {
                info!("link refused before submission: {err:?}");
                return Err(err.into());
            }
        };

        let response = self
            .api
            .submit_link(&SubmitLinkRequest { link: link.clone() })
            .await?;
        if let Err(message) = response.into_result() {
            warn!("submit_link rejected: {message}");
            return Err(ActionError::Rejected(message));
        }

        self.context.borrow_mut().submission = LearnerSubmission::Submitted { link };
        Ok(self.sync().await?)
    }

    /// Staff only. Returns `Ok(None)` without any request when no user id is
    /// given.
    pub async fn validate_submission(
        &self,
        user_id: Option<&str>,
    ) -> Result<Option<Snapshot>, ActionError> {
        self.require(Role::Staff)?;
        let Some(user_id) = user_id.filter(|id| !id.is_empty()) else {
            debug!("validate_submission without a user id, skipping");
            return Ok(None);
        };

        let request = ValidateSubmissionRequest {
            user_id: user_id.to_string(),
        };
        let response = self.api.validate_submission(&request).await?;
        if let Err(message) = response.into_result() {
            warn!("validate_submission for {user_id} rejected: {message}");
            return Err(ActionError::Rejected(message));
        }

        Ok(Some(self.sync().await?))
    }

    /// Staff only, cohorted courses only (as last reported by the server).
    /// The filter is updated before the post and the sync runs whatever the
    /// post's outcome.
    pub async fn change_cohort(&self, cohort: &str) -> Result<Snapshot, ActionError> {
        self.require(Role::Staff)?;
        if !self.cohorted.get() {
            return Err(ActionError::NotCohorted);
        }

        *self.cohort_filter.borrow_mut() = Some(cohort.to_string()).filter(|c| !c.is_empty());

        let request = ChangeCohortRequest {
            cohort: cohort.to_string(),
        };
        if let Err(err) = self.api.change_cohort(&request).await {
            warn!("change_cohort post failed, syncing anyway: {err}");
        }

        Ok(self.sync().await?)
    }

    fn require(&self, expected: Role) -> Result<(), ActionError> {
        let actual = self.role();
        match (expected, actual) {
            (Role::Learner, Role::Learner) | (Role::Staff, Role::Staff) => Ok(()),
            (Role::Learner, Role::Staff) | (Role::Staff, Role::Learner) => {
                Err(ActionError::WrongRole(actual))
            }
        }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
