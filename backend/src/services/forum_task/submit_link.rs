//! Learner link submission.
//!
//! The link goes through the same allow-list as on the client, then is stored
//! unless the learner already has a submission for this block.

use actix_web::{web, HttpResponse, Responder};
use common::link::check_link;
use common::requests::{ActionResponse, SubmitLinkRequest};
use log::{error, info};

use super::WidgetPath;
use crate::state::AppState;

pub const ONE_SUBMISSION_MESSAGE: &str = "Apenas uma submissão por aluno.";

pub async fn process(
    path: web::Path<WidgetPath>,
    payload: web::Json<SubmitLinkRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    match submit_link(state.get_ref(), &path, &payload.link).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            error!("submit_link for {} failed: {}", path.block_id, e);
            HttpResponse::ServiceUnavailable().body(format!("Erro ao guardar a submissão: {}", e))
        }
    }
}

async fn submit_link(
    state: &AppState,
    path: &WidgetPath,
    link: &str,
) -> Result<ActionResponse, String> {
    let link = match check_link(link) {
        Ok(link) => link,
        Err(e) => return Ok(ActionResponse::error(e.to_string())),
    };

    if !state
        .store
        .insert_submission(&path.block_id, &path.user_id, link)
        .await?
    {
        return Ok(ActionResponse::error(ONE_SUBMISSION_MESSAGE));
    }

    info!("{} submitted {} for {}", path.user_id, link, path.block_id);
    Ok(ActionResponse::ok())
}
