use crate::FactCheck;
use crate::assistant::ChatReply;
use crate::verdict::FactCheckReport;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tscope_derive::{api_handler, api_model};
use tscope_domain::constants::FACTCHECK_TAG;
use tscope_kernel::server::{ApiError, ApiResult, ApiState};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Claim to verify.
#[api_model(deny_unknown_fields = false)]
pub(crate) struct CheckRequest {
    pub(crate) headline: Option<String>,
}

/// Question for the assistant.
#[api_model(deny_unknown_fields = false)]
pub(crate) struct ChatRequestBody {
    pub(crate) message: Option<String>,
}

/// A rejected or absent body counts as a missing field.
fn required<T>(payload: Result<Json<T>, JsonRejection>, field: impl FnOnce(T) -> Option<String>) -> Option<String> {
    payload.ok().and_then(|Json(body)| field(body)).filter(|value| !value.trim().is_empty())
}

#[api_handler(
    post,
    path = "/check_news",
    request_body = CheckRequest,
    responses(
        (status = OK, description = "Verdict with supporting evidence", body = FactCheckReport),
        (status = BAD_REQUEST, description = "No headline provided"),
    ),
    tag = FACTCHECK_TAG,
)]
pub(crate) async fn check_news(
    State(state): State<ApiState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> ApiResult<Json<FactCheckReport>> {
    let headline = required(payload, |body| body.headline)
        .ok_or_else(|| ApiError::bad_request("No headline provided"))?;
    let factcheck = state.try_get_slice::<FactCheck>()?;

    Ok(Json(factcheck.checker.check(&headline).await))
}

#[api_handler(
    post,
    path = "/chatbot",
    request_body = ChatRequestBody,
    responses(
        (status = OK, description = "Assistant answer", body = ChatReply),
        (status = BAD_REQUEST, description = "No message provided"),
        (status = INTERNAL_SERVER_ERROR, description = "Model unavailable or failed"),
    ),
    tag = FACTCHECK_TAG,
)]
pub(crate) async fn chatbot(
    State(state): State<ApiState>,
    payload: Result<Json<ChatRequestBody>, JsonRejection>,
) -> ApiResult<Json<ChatReply>> {
    let message = required(payload, |body| body.message)
        .ok_or_else(|| ApiError::bad_request("No message provided"))?;
    let factcheck = state.try_get_slice::<FactCheck>()?;

    factcheck
        .assistant
        .chat(&message)
        .await
        .map(Json)
        .map_err(|err| ApiError::from(err.to_string()))
}

/// `/check_news` and `/chatbot`.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(check_news)).routes(routes!(chatbot))
}
