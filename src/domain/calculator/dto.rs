use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 이전에 할당된 변수 이름 → 값 (문자열 또는 숫자)
pub type VariableTable = BTreeMap<String, serde_json::Value>;

/// 이미지 분석 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CalculateRequest {
    /// 캔버스 이미지 (`data:image/png;base64,...`)
    #[validate(length(min = 1, message = "이미지는 필수입니다"))]
    #[schema(example = "data:image/png;base64,iVBORw0KGgo=")]
    pub image: String,

    /// 사용자가 할당한 변수 목록
    #[serde(default)]
    #[schema(value_type = Object, example = json!({"x": 2, "name": "five"}))]
    pub dict_of_vars: VariableTable,
}

/// 정규화된 분석 결과 한 건
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnswerRecord {
    /// 원본 수식 또는 그림 설명
    #[schema(example = "2 + 2")]
    pub expr: String,

    /// 계산 결과 또는 할당 값
    #[schema(value_type = Object, example = 4)]
    pub result: serde_json::Value,

    /// 변수 할당 여부
    pub assign: bool,

    /// 풀이 과정 (줄바꿈 없음)
    #[schema(example = "Add 2 and 2 to get 4.")]
    pub steps: String,
}

/// 이미지 분석 응답 DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct CalculateResponse {
    #[schema(example = "Image processed")]
    pub message: String,
    pub data: Vec<AnswerRecord>,
    #[schema(example = "success")]
    pub status: String,
}

impl CalculateResponse {
    pub fn success(data: Vec<AnswerRecord>) -> Self {
        Self {
            message: "Image processed".to_string(),
            data,
            status: "success".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_request_with_variables() {
        // Arrange
        let json = r#"{
            "image": "data:image/png;base64,aGVsbG8=",
            "dict_of_vars": {"x": 2, "y": "5"}
        }"#;

        // Act
        let request: CalculateRequest = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(request.dict_of_vars.len(), 2);
        assert_eq!(request.dict_of_vars["x"], 2);
        assert_eq!(request.dict_of_vars["y"], "5");
    }

    #[test]
    fn should_default_missing_variables_to_empty() {
        let request: CalculateRequest =
            serde_json::from_str(r#"{"image": "aGVsbG8="}"#).unwrap();

        assert!(request.dict_of_vars.is_empty());
    }

    #[test]
    fn should_fail_validation_for_empty_image() {
        let request: CalculateRequest = serde_json::from_str(r#"{"image": ""}"#).unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn should_serialize_success_response() {
        let response = CalculateResponse::success(vec![AnswerRecord {
            expr: "x".to_string(),
            result: serde_json::json!(2),
            assign: true,
            steps: "Given.".to_string(),
        }]);

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["message"], "Image processed");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"][0]["assign"], true);
        assert_eq!(json["data"][0]["result"], 2);
    }
}
