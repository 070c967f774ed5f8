use axum::{extract::State, Json};

use super::dto::{HealthStatus, RootResponse};
use super::service::check_health;
use crate::state::AppState;

/// 서버 생존 확인
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, body = RootResponse))
)]
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Server is running",
    })
}

/// 헬스체크 API
///
/// 모델 API 장애 시에도 200과 함께 `unhealthy`를 반환합니다.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "헬스체크 결과", body = HealthStatus)
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(check_health(state.ai_client.as_ref(), state.started_at).await)
}
