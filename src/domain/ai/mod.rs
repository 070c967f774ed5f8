//! 생성형 AI 모델 호출 계층
//!
//! 프롬프트와 이미지를 모델에 전달하고 응답 텍스트를 돌려받는 역할만 담당합니다.
//! 응답 해석은 각 도메인(calculator, chat)의 몫입니다.

pub mod client;
pub mod image;
pub mod retry;

pub use client::{AiClient, AiClientTrait, GeminiClient};
pub use image::{ImageError, ImagePayload};
