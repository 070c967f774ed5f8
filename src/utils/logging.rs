//! 구조화 로깅 초기화
//!
//! 요청 span(`request_id`, method, path)과 모델 호출 로그를 JSON 한 줄씩 stdout으로 내보내고,
//! `LOG_DIR`이 빈 문자열이 아니면 같은 내용을 일별 파일(`inscribe.log.YYYY-MM-DD`)에도 남깁니다.

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt::{self, time::UtcTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const DEFAULT_FILTER: &str = "info,inscribe_server=debug,tower_http=debug";
const DEFAULT_LOG_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "inscribe.log";

/// `LOG_DIR` 해석: 미설정이면 `logs`, 빈 문자열이면 파일 출력 없음
fn resolve_log_dir(raw: Option<String>) -> Option<String> {
    match raw {
        None => Some(DEFAULT_LOG_DIR.to_string()),
        Some(dir) if dir.trim().is_empty() => None,
        Some(dir) => Some(dir.trim().to_string()),
    }
}

/// 전역 subscriber 설치
///
/// 파일 출력이 켜져 있으면 `WorkerGuard`를 반환하며, main에서 끝까지 들고 있어야 버퍼가 비워집니다.
/// `RUST_LOG`가 없으면 `info,inscribe_server=debug,tower_http=debug`를 사용합니다.
pub fn init_logging() -> Option<WorkerGuard> {
    let (file_writer, guard) = match resolve_log_dir(std::env::var("LOG_DIR").ok()) {
        Some(dir) => {
            let (writer, guard) =
                tracing_appender::non_blocking(rolling::daily(dir, LOG_FILE_PREFIX));
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let stdout_layer = fmt::layer()
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_current_span(true)
        .with_span_list(false);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .json()
            .with_timer(UtcTime::rfc_3339())
            .with_current_span(true)
            .with_span_list(false)
            .with_ansi(false)
            .with_writer(writer)
    });

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("tracing subscriber already installed: {err}");
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_log_dir_when_unset() {
        assert_eq!(resolve_log_dir(None).as_deref(), Some("logs"));
    }

    #[test]
    fn should_disable_file_output_for_blank_log_dir() {
        assert_eq!(resolve_log_dir(Some("  ".to_string())), None);
    }

    #[test]
    fn should_use_configured_log_dir() {
        assert_eq!(
            resolve_log_dir(Some(" /var/log/inscribe ".to_string())).as_deref(),
            Some("/var/log/inscribe")
        );
    }
}
