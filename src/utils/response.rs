use serde::Serialize;
use utoipa::ToSchema;

/// 에러 응답 구조체
///
/// 형식:
/// ```json
/// {
///   "isSuccess": false,
///   "code": "COMMON400",
///   "message": "잘못된 요청 형식입니다: ...",
///   "result": null
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub is_success: bool,
    #[schema(example = "COMMON400")]
    pub code: String,
    pub message: String,
    pub result: Option<()>,
}

impl ErrorResponse {
    /// 에러 응답 생성
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            code: code.into(),
            message: message.into(),
            result: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_error_response_in_camel_case() {
        let response = ErrorResponse::new("COMMON400", "잘못된 요청입니다.");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["isSuccess"], false);
        assert_eq!(json["code"], "COMMON400");
        assert!(json["result"].is_null());
    }
}
