use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, Instrument};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// 요청 단위 추적 ID
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// 클라이언트가 보낸 `x-request-id`를 그대로 쓰고, 없거나 헤더로 쓸 수 없는 값이면 새로 발급합니다.
fn resolve_request_id(request: &Request) -> (String, HeaderValue) {
    if let Some(value) = request.headers().get(&REQUEST_ID_HEADER) {
        if let Ok(id) = value.to_str() {
            if !id.trim().is_empty() {
                return (id.to_string(), value.clone());
            }
        }
    }

    let id = Uuid::new_v4().to_string();
    let header = HeaderValue::from_str(&id).unwrap_or_else(|_| HeaderValue::from_static("unknown"));
    (id, header)
}

pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let (request_id, header_value) = resolve_request_id(&request);
    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );
    let start = Instant::now();

    async move {
        let mut response = next.run(request).await;

        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            status = response.status().as_u16(),
            "request completed"
        );

        response.headers_mut().insert(REQUEST_ID_HEADER, header_value);
        response
    }
    .instrument(span)
    .await
}
