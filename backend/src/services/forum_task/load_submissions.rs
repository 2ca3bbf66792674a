//! Staff listing of submissions for one widget instance.
//!
//! The cohort comes from the `cohort` query parameter when the client sends
//! one (empty meaning every learner), otherwise from the staff member's
//! stored preference. Learners of the
//! selected cohort are split into those with a submission and those without.

use std::collections::{BTreeMap, HashMap};

use actix_web::{web, HttpResponse, Responder};
use common::model::context::Role;
use common::model::snapshot::StaffPayload;
use common::model::submission::SubmissionRecord;
use common::requests::LoadSubmissionsQuery;
use log::{error, warn};

use super::WidgetPath;
use crate::state::AppState;

pub async fn process(
    path: web::Path<WidgetPath>,
    query: web::Query<LoadSubmissionsQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    match state.course.role_of(&path.user_id) {
        Role::Staff => {}
        Role::Learner => {
            warn!("load_submissions refused for learner {}", path.user_id);
            return HttpResponse::Forbidden().body("Apenas staff pode ver as submissões.");
        }
    }

    match load_submissions(state.get_ref(), &path, query.into_inner().cohort).await {
        Ok(payload) => HttpResponse::Ok().json(payload),
        Err(e) => {
            error!("load_submissions for {} failed: {}", path.block_id, e);
            HttpResponse::ServiceUnavailable()
                .body(format!("Erro ao carregar submissões: {}", e))
        }
    }
}

async fn load_submissions(
    state: &AppState,
    path: &WidgetPath,
    requested: Option<String>,
) -> Result<StaffPayload, String> {
    let cohorted = state.course.cohorted;
    let cohort = match (cohorted, requested) {
        (false, _) => None,
        (true, Some(cohort)) if cohort.is_empty() => None,
        (true, Some(cohort)) => Some(cohort),
        (true, None) => {
            state
                .store
                .cohort_preference(&path.block_id, &path.user_id)
                .await?
        }
    };

    let roster = state
        .store
        .roster(cohort.as_deref().filter(|c| !c.is_empty()))
        .await?;
    let mut by_user: HashMap<String, SubmissionRecord> = state
        .store
        .submissions(&path.block_id)
        .await?
        .into_iter()
        .map(|record| (record.user_id.clone(), record))
        .collect();

    let mut submissions = Vec::new();
    let mut not_submitted = Vec::new();
    let mut names = BTreeMap::new();
    for entry in roster {
        match by_user.remove(&entry.user_id) {
            Some(record) => submissions.push(record),
            None => not_submitted.push(entry.user_id.clone()),
        }
        let name = if entry.name.trim().is_empty() {
            entry.user_id.clone()
        } else {
            format_name(&entry.name)
        };
        names.insert(entry.user_id, name);
    }

    let cohorts = if cohorted {
        let mut cohorts = vec![String::new()];
        cohorts.extend(state.store.cohorts().await?);
        cohorts
    } else {
        Vec::new()
    };

    Ok(StaffPayload {
        submissions,
        not_submitted,
        names,
        cohorts,
        is_course_cohorted: cohorted,
        cohort,
    })
}

/// Shortens a full name to its first and last parts.
pub fn format_name(name: &str) -> String {
    let names: Vec<&str> = name.split_whitespace().collect();
    match names.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [first, .., last] => format!("{} {}", first, last),
    }
}
