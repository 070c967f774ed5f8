use serde::Serialize;
use utoipa::ToSchema;

/// `GET /` 응답
#[derive(Serialize, Debug, ToSchema)]
pub struct RootResponse {
    #[schema(example = "Server is running")]
    pub message: &'static str,
}

/// 헬스 상태 응답
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: HealthState,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    /// 서버 가동 시간 (초)
    #[schema(example = 3600)]
    pub uptime_secs: u64,
    pub checks: HealthChecks,
}

#[derive(Serialize, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Unhealthy,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    /// 모델 API 연결 상태
    pub model_api: CheckResult,
}

/// 개별 의존성 체크 결과
#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    #[schema(example = true)]
    pub status: bool,
    #[schema(example = 150)]
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    pub fn success(latency_ms: u64) -> Self {
        Self {
            status: true,
            latency_ms,
            error: None,
        }
    }

    pub fn failure(latency_ms: u64, error: impl Into<String>) -> Self {
        Self {
            status: false,
            latency_ms,
            error: Some(error.into()),
        }
    }
}

impl HealthState {
    pub fn from_check(check: &CheckResult) -> Self {
        if check.status {
            HealthState::Healthy
        } else {
            HealthState::Unhealthy
        }
    }
}
