use backoff::{future::retry, ExponentialBackoff};
use std::future::Future;
use std::time::Duration;

use crate::utils::error::AppError;

/// 지수 백오프 설정 생성
fn create_backoff(max_elapsed: Duration) -> ExponentialBackoff {
    ExponentialBackoff {
        initial_interval: Duration::from_millis(500),
        max_interval: Duration::from_secs(10),
        max_elapsed_time: Some(max_elapsed),
        multiplier: 2.0,
        ..Default::default()
    }
}

/// 재시도 로직을 적용한 비동기 작업 실행
///
/// Rate limit, 타임아웃, 5xx 같은 일시적 오류는 `max_elapsed` 안에서 지수 백오프로 재시도하고,
/// 인증 오류 등 영구적 오류는 즉시 실패를 반환합니다.
pub async fn with_retry<F, Fut, T>(max_elapsed: Duration, operation: F) -> Result<T, AppError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let backoff = create_backoff(max_elapsed);

    retry(backoff, || async {
        match operation().await {
            Ok(result) => Ok(result),
            Err(e) if e.is_transient() => {
                tracing::warn!(error = %e, "Retryable model error, will retry...");
                Err(backoff::Error::transient(e))
            }
            Err(e) => {
                tracing::error!(error = %e, "Permanent model error, not retrying");
                Err(backoff::Error::permanent(e))
            }
        }
    })
    .await
}
