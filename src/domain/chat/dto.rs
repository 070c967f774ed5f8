use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 채팅 요청 DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// 사용자 메시지 (없으면 빈 문자열)
    #[serde(default)]
    #[schema(example = "What is the derivative of x^2?")]
    pub message: String,
}

/// 채팅 응답 DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    #[schema(example = "The derivative of x^2 is 2x.")]
    pub response: String,
}

impl ChatResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}
