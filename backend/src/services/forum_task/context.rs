//! Mount-time context for one user of one widget instance.
//!
//! Staff get their stored cohort preference; learners get their own cohort
//! and the current state of their submission. The prompt texts come from the
//! course settings and are picked per state on the client.

use actix_web::{web, HttpResponse, Responder};
use common::model::context::{Role, WidgetContext};
use common::model::submission::{LearnerSubmission, SubmissionRecord};
use log::error;

use super::{handler_base, WidgetPath};
use crate::state::AppState;

pub async fn process(path: web::Path<WidgetPath>, state: web::Data<AppState>) -> impl Responder {
    match build_context(state.get_ref(), &path).await {
        Ok(context) => HttpResponse::Ok().json(context),
        Err(e) => {
            error!("context for {}/{} failed: {}", path.block_id, path.user_id, e);
            HttpResponse::ServiceUnavailable().body(format!("Erro ao carregar o contexto: {}", e))
        }
    }
}

pub async fn build_context(state: &AppState, path: &WidgetPath) -> Result<WidgetContext, String> {
    let role = state.course.role_of(&path.user_id);
    let (cohort, submission) = match role {
        Role::Staff => (
            state
                .store
                .cohort_preference(&path.block_id, &path.user_id)
                .await?,
            LearnerSubmission::Unsubmitted,
        ),
        Role::Learner => (
            state.store.cohort_of(&path.user_id).await?,
            learner_submission(state.store.submission(&path.block_id, &path.user_id).await?),
        ),
    };

    Ok(WidgetContext {
        xblock_id: path.block_id.clone(),
        handler_base: handler_base(&path.block_id, &path.user_id),
        role,
        is_course_cohorted: state.course.cohorted,
        cohort: cohort.filter(|_| state.course.cohorted),
        messages: state.course.messages.clone(),
        submission,
    })
}

fn learner_submission(record: Option<SubmissionRecord>) -> LearnerSubmission {
    match record {
        None => LearnerSubmission::Unsubmitted,
        Some(record) if record.validated => LearnerSubmission::Validated { link: record.link },
        Some(record) => LearnerSubmission::Submitted { link: record.link },
    }
}
