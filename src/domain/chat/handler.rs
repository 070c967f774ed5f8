use super::{
    dto::{ChatRequest, ChatResponse},
    service::ChatService,
};
use crate::state::AppState;
use crate::utils::{error::AppError, response::ErrorResponse};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

/// 자유 대화 API 핸들러
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, body = ChatResponse),
        (status = 400, body = ErrorResponse)
    ),
    tag = "Chat"
)]
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(req) = payload?;

    let reply = ChatService::reply(state.ai_client.as_ref(), &req.message).await;

    Ok(Json(ChatResponse::new(reply)))
}
