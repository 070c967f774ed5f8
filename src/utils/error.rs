use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::response::ErrorResponse;

/// 애플리케이션 전역 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),
    #[error("잘못된 요청 형식입니다: {0}")]
    JsonParseFailed(String),
    #[error("이미지 데이터를 해석할 수 없습니다: {0}")]
    InvalidImage(String),
    #[error("{0}")]
    InternalError(String),

    /// 모델 API 인증 실패 (키 누락/만료)
    #[error("model api authentication failed")]
    ModelAuthError,
    /// 모델 API 호출 한도 초과
    #[error("model api rate limit exceeded")]
    ModelRateLimitError,
    /// 타임아웃, 연결 실패, 5xx 등 일시적 오류
    #[error("model api temporarily unavailable")]
    ModelTemporaryError,
    #[error("model api error: {0}")]
    ModelError(String),
}

impl AppError {
    /// 에러 메시지 반환
    pub fn message(&self) -> String {
        match self {
            AppError::ModelAuthError
            | AppError::ModelRateLimitError
            | AppError::ModelTemporaryError
            | AppError::ModelError(_) => "AI 모델 호출에 실패했습니다.".to_string(),
            other => other.to_string(),
        }
    }

    /// 에러 코드 반환
    pub fn error_code(&self) -> String {
        match self {
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::InvalidImage(_) => "COMMON400",
            AppError::InternalError(_) => "COMMON500",
            AppError::ModelAuthError => "AI_001",
            AppError::ModelRateLimitError => "AI_002",
            AppError::ModelTemporaryError => "AI_003",
            AppError::ModelError(_) => "AI_004",
        }
        .to_string()
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::JsonParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidImage(_) => StatusCode::BAD_REQUEST,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ModelAuthError => StatusCode::BAD_GATEWAY,
            AppError::ModelRateLimitError => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ModelTemporaryError => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ModelError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// 지수 백오프로 재시도할 가치가 있는 오류인지 여부
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::ModelRateLimitError | AppError::ModelTemporaryError
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.message();

        match &self {
            AppError::InternalError(detail) => {
                error!("Internal Server Error: {}", detail);
            }
            other => {
                error!("Error [{}]: {}", error_code, other);
            }
        }

        let error_response = ErrorResponse::new(error_code, message);

        (status, Json(error_response)).into_response()
    }
}

/// JsonRejection을 AppError로 변환
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.body_text())
    }
}

/// 편의 함수들
impl AppError {
    pub fn internal_error(msg: impl Into<String>) -> Self {
        AppError::InternalError(msg.into())
    }

    pub fn validation_error(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }
}
