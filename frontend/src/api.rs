//! HTTP transport for the widget handlers, built on `gloo-net`.
//!
//! `HttpApi` is the browser implementation of the controller's `WidgetApi`.
//! Only transport-level problems become `ApiError`s here; application errors
//! travel inside the `ActionResponse` and are interpreted by the controller.

use common::controller::{ApiError, WidgetApi};
use common::model::context::WidgetContext;
use common::model::snapshot::StaffPayload;
use common::requests::{
    context_url, ActionResponse, ChangeCohortRequest, SubmitLinkRequest,
    ValidateSubmissionRequest, CHANGE_COHORT, LOAD_SUBMISSIONS, SUBMIT_LINK, VALIDATE_SUBMISSION,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Clone)]
pub struct HttpApi {
    handler_base: String,
}

impl HttpApi {
    pub fn new(handler_base: &str) -> Self {
        Self {
            handler_base: handler_base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, handler: &str) -> String {
        format!("{}/{}", self.handler_base, handler)
    }
}

impl WidgetApi for HttpApi {
    async fn load_submissions(&self, cohort: &str) -> Result<StaffPayload, ApiError> {
        let response = Request::get(&self.url(LOAD_SUBMISSIONS))
            .query([("cohort", cohort)])
            .send()
            .await
            .map_err(transport)?;
        read_json(check_status(response)?).await
    }

    async fn change_cohort(&self, request: &ChangeCohortRequest) -> Result<(), ApiError> {
        post_json(&self.url(CHANGE_COHORT), request).await?;
        Ok(())
    }

    async fn submit_link(&self, request: &SubmitLinkRequest) -> Result<ActionResponse, ApiError> {
        read_json(post_json(&self.url(SUBMIT_LINK), request).await?).await
    }

    async fn validate_submission(
        &self,
        request: &ValidateSubmissionRequest,
    ) -> Result<ActionResponse, ApiError> {
        read_json(post_json(&self.url(VALIDATE_SUBMISSION), request).await?).await
    }
}

/// Loads the mount-time context once, before the widget is rendered.
pub async fn fetch_context(block_id: &str, user_id: &str) -> Result<WidgetContext, ApiError> {
    let response = Request::get(&context_url(block_id, user_id))
        .send()
        .await
        .map_err(transport)?;
    read_json(check_status(response)?).await
}

async fn post_json<T: Serialize>(url: &str, body: &T) -> Result<Response, ApiError> {
    let response = Request::post(url)
        .json(body)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    check_status(response)
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        Ok(response)
    } else {
        Err(ApiError::Status(response.status()))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn transport(err: gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}
