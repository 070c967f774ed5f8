use std::time::{Duration, Instant};

use tokio::time::timeout;

use super::dto::{CheckResult, HealthChecks, HealthState, HealthStatus};
use crate::domain::ai::AiClientTrait;

/// 모델 API 프로브 타임아웃
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// 전체 헬스 체크 수행
pub async fn check_health(client: &dyn AiClientTrait, started_at: Instant) -> HealthStatus {
    let model_api = check_model_api(client).await;

    HealthStatus {
        status: HealthState::from_check(&model_api),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: started_at.elapsed().as_secs(),
        checks: HealthChecks { model_api },
    }
}

async fn check_model_api(client: &dyn AiClientTrait) -> CheckResult {
    let start = Instant::now();

    match timeout(HEALTH_CHECK_TIMEOUT, client.check_connectivity()).await {
        Ok(Ok(())) => CheckResult::success(start.elapsed().as_millis() as u64),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "model API health check failed");
            CheckResult::failure(start.elapsed().as_millis() as u64, e.error_code())
        }
        Err(_) => {
            tracing::warn!("model API health check timed out");
            CheckResult::failure(HEALTH_CHECK_TIMEOUT.as_millis() as u64, "Timeout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ai::client::MockAiClientTrait;
    use crate::utils::error::AppError;

    #[tokio::test]
    async fn should_be_healthy_when_model_reachable() {
        // Arrange
        let mut mock = MockAiClientTrait::new();
        mock.expect_check_connectivity().times(1).returning(|| Ok(()));

        // Act
        let status = check_health(&mock, Instant::now()).await;

        // Assert
        assert_eq!(status.status, HealthState::Healthy);
        assert!(status.checks.model_api.status);
        assert!(status.checks.model_api.error.is_none());
    }

    #[tokio::test]
    async fn should_be_unhealthy_when_connectivity_check_fails() {
        let mut mock = MockAiClientTrait::new();
        mock.expect_check_connectivity()
            .returning(|| Err(AppError::ModelAuthError));

        let status = check_health(&mock, Instant::now()).await;

        assert_eq!(status.status, HealthState::Unhealthy);
        assert_eq!(status.checks.model_api.error.as_deref(), Some("AI_001"));
    }
}
