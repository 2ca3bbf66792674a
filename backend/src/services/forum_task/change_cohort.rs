use actix_web::{web, HttpResponse, Responder};
use common::model::context::Role;
use common::requests::{ActionResponse, ChangeCohortRequest};
use log::{error, info};

use super::WidgetPath;
use crate::state::AppState;

pub async fn process(
    path: web::Path<WidgetPath>,
    payload: web::Json<ChangeCohortRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    match change_cohort(state.get_ref(), &path, &payload.cohort).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            error!("change_cohort for {} failed: {}", path.block_id, e);
            HttpResponse::ServiceUnavailable().body(format!("Erro ao mudar de turma: {}", e))
        }
    }
}

async fn change_cohort(
    state: &AppState,
    path: &WidgetPath,
    cohort: &str,
) -> Result<ActionResponse, String> {
    match state.course.role_of(&path.user_id) {
        Role::Staff => {}
        Role::Learner => return Ok(ActionResponse::error("Apenas staff pode mudar de turma.")),
    }

    state
        .store
        .set_cohort_preference(&path.block_id, &path.user_id, cohort)
        .await?;
    info!("{} now filtering {} by cohort {:?}", path.user_id, path.block_id, cohort);
    Ok(ActionResponse::ok())
}
