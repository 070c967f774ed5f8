//! 손글씨 수식 분석
//!
//! 프롬프트 생성 → 모델 호출 → 응답 정규화 순서로 이미지 한 장을 `AnswerRecord` 목록으로 바꿉니다.

pub mod dto;
pub mod handler;
pub mod literal;
pub mod normalizer;
pub mod prompt;
pub mod service;

pub use dto::{AnswerRecord, CalculateRequest, CalculateResponse, VariableTable};
pub use handler::calculate_handler;
pub use normalizer::{normalize, normalize_or_empty, AnswerList, NormalizeError, FALLBACK_STEPS};
pub use service::CalculatorService;
