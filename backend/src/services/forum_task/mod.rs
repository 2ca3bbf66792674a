//! # Forum Task Service Module
//!
//! Stand-in for the courseware runtime that hosts the widget. Each widget
//! instance is addressed by its block id; the acting user is carried in the
//! path, the way the platform would bind it to the handler URL.
//!
//! ## Registered Routes (under `/api/forum_task/{block_id}/users/{user_id}`)
//!
//! *   **`GET /context`**: mount-time `WidgetContext` (role, cohort info, the
//!     learner's own submission and prompt texts).
//! *   **`GET /handler/load_submissions`**: staff-only `StaffPayload`, scoped
//!     by the `cohort` query parameter or the stored preference.
//! *   **`POST /handler/change_cohort`**: stores the staff member's cohort
//!     preference.
//! *   **`POST /handler/submit_link`**: records a learner's link, one per
//!     learner.
//! *   **`POST /handler/validate_submission`**: staff marks a submission as
//!     validated.
//!
//! Mutating handlers always answer `200 OK` with an `ActionResponse`;
//! application errors travel in its `result`/`message` fields.

mod change_cohort;
mod context;
mod load_submissions;
mod submit_link;
mod validate_submission;

use actix_web::web::{get, post, scope};
use actix_web::Scope;
use common::requests::{CHANGE_COHORT, LOAD_SUBMISSIONS, SUBMIT_LINK, VALIDATE_SUBMISSION};
use serde::Deserialize;

pub use common::requests::{handler_base, API_PATH};

/// Block and acting user, extracted from every route.
#[derive(Deserialize)]
pub struct WidgetPath {
    pub block_id: String,
    pub user_id: String,
}

fn handler_route(handler: &str) -> String {
    format!("/{{block_id}}/users/{{user_id}}/handler/{}", handler)
}

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/{block_id}/users/{user_id}/context", get().to(context::process))
        .route(&handler_route(LOAD_SUBMISSIONS), get().to(load_submissions::process))
        .route(&handler_route(CHANGE_COHORT), post().to(change_cohort::process))
        .route(&handler_route(SUBMIT_LINK), post().to(submit_link::process))
        .route(&handler_route(VALIDATE_SUBMISSION), post().to(validate_submission::process))
}

#[cfg(test)]
#[path = "forum_task_test.rs"]
mod tests;
