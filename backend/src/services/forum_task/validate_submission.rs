use actix_web::{web, HttpResponse, Responder};
use common::model::context::Role;
use common::requests::{ActionResponse, ValidateSubmissionRequest};
use log::{error, info};

use super::WidgetPath;
use crate::state::AppState;
use crate::store::ValidationOutcome;

pub const STAFF_ONLY_MESSAGE: &str = "Apenas staff pode validar submissões/falta user_id.";
pub const MISSING_MESSAGE: &str = "Submissão inexistente.";
pub const ALREADY_VALIDATED_MESSAGE: &str = "Submissão já validada.";

pub async fn process(
    path: web::Path<WidgetPath>,
    payload: web::Json<ValidateSubmissionRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    match validate_submission(state.get_ref(), &path, &payload.user_id).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            error!("validate_submission for {} failed: {}", path.block_id, e);
            HttpResponse::ServiceUnavailable().body(format!("Erro ao validar a submissão: {}", e))
        }
    }
}

async fn validate_submission(
    state: &AppState,
    path: &WidgetPath,
    learner_id: &str,
) -> Result<ActionResponse, String> {
    let is_staff = match state.course.role_of(&path.user_id) {
        Role::Staff => true,
        Role::Learner => false,
    };
    if !is_staff || learner_id.is_empty() {
        return Ok(ActionResponse::error(STAFF_ONLY_MESSAGE));
    }

    let outcome = state
        .store
        .mark_validated(&path.block_id, learner_id, &path.user_id)
        .await?;
    Ok(match outcome {
        ValidationOutcome::Validated => {
            info!("{} validated {} on {}", path.user_id, learner_id, path.block_id);
            ActionResponse::ok()
        }
        ValidationOutcome::AlreadyValidated => ActionResponse::error(ALREADY_VALIDATED_MESSAGE),
        ValidationOutcome::Missing => ActionResponse::error(MISSING_MESSAGE),
    })
}
