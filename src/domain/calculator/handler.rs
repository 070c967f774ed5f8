use super::{
    dto::{CalculateRequest, CalculateResponse},
    service::CalculatorService,
};
use crate::domain::ai::ImagePayload;
use crate::state::AppState;
use crate::utils::{error::AppError, response::ErrorResponse};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use validator::Validate;

/// 손글씨 수식 이미지 분석 API 핸들러
///
/// 모델 호출이나 응답 해석이 실패해도 `data: []`로 200을 반환합니다.
#[utoipa::path(
    post,
    path = "/calculate",
    request_body = CalculateRequest,
    responses(
        (status = 200, body = CalculateResponse),
        (status = 400, body = ErrorResponse)
    ),
    tag = "Calculator"
)]
pub async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculateResponse>, AppError> {
    // 1. 입력값 검증
    let Json(req) = payload?;
    req.validate()
        .map_err(|e| AppError::validation_error(e.to_string()))?;

    // 2. 이미지 디코딩
    let image = ImagePayload::from_data_url(&req.image)
        .map_err(|e| AppError::InvalidImage(e.to_string()))?;

    // 3. 분석 (실패 시 빈 목록)
    let answers =
        CalculatorService::analyze_image(state.ai_client.as_ref(), image, &req.dict_of_vars).await;

    Ok(Json(CalculateResponse::success(answers)))
}
