use inscribe_server::{
    config::AppConfig,
    create_router,
    domain::ai::{AiClient, GeminiClient},
    shutdown::shutdown_signal,
    utils::logging::init_logging,
    AppState,
};
use std::{net::SocketAddr, sync::Arc};

#[tokio::main]
async fn main() {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 로깅 초기화 (guard는 프로세스 종료까지 유지)
    let _log_guard = init_logging();

    // 3. 설정 로드
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };

    // 4. 모델 클라이언트 및 라우터 구성
    let ai_client: AiClient = Arc::new(GeminiClient::new(&config));
    tracing::info!(
        model = %config.gemini_model,
        api_base = %config.gemini_api_base,
        env = %config.app_env,
        "model client configured"
    );

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let app = create_router(AppState::new(config, ai_client));

    // 5. 서버 실행
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, addr = %addr, "failed to bind address");
            std::process::exit(1);
        }
    };
    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }

    tracing::info!("Server shut down");
}
