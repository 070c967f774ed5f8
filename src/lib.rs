pub mod config;
pub mod domain;
pub mod global;
pub mod shutdown;
pub mod state;
pub mod utils;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::AppConfig;
pub use state::AppState;

use domain::{calculator, chat, health};
use global::middleware::request_id_middleware;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::handler::root_handler,
        health::handler::health_handler,
        calculator::handler::calculate_handler,
        chat::handler::chat_handler,
    ),
    components(
        schemas(
            health::dto::RootResponse,
            health::dto::HealthStatus,
            health::dto::HealthState,
            health::dto::HealthChecks,
            health::dto::CheckResult,
            calculator::dto::CalculateRequest,
            calculator::dto::CalculateResponse,
            calculator::dto::AnswerRecord,
            chat::dto::ChatRequest,
            chat::dto::ChatResponse,
            utils::response::ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "서버 상태 API"),
        (name = "Calculator", description = "손글씨 수식 분석 API"),
        (name = "Chat", description = "자유 대화 API")
    )
)]
pub struct ApiDoc;

/// 설정된 origin 목록으로 CORS 레이어 구성 (비어 있으면 전체 허용)
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/calculate", post(calculator::calculate_handler))
        .route("/chat", post(chat::chat_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}
