use std::sync::Arc;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs, ImageDetail, ImageUrlArgs,
    },
    Client,
};

use super::image::ImagePayload;
use super::retry::with_retry;
use crate::config::AppConfig;
use crate::utils::error::AppError;

/// 모델 API 에러를 세분화된 AppError로 변환
fn classify_model_error(error: OpenAIError) -> AppError {
    match &error {
        OpenAIError::ApiError(api_err) => {
            let err_type = api_err.r#type.as_deref().unwrap_or("").to_lowercase();
            let message = api_err.message.to_lowercase();

            if err_type == "authentication_error"
                || message.contains("api key")
                || message.contains("permission_denied")
            {
                AppError::ModelAuthError
            } else if err_type == "rate_limit_error"
                || message.contains("rate limit")
                || message.contains("quota")
                || message.contains("resource_exhausted")
            {
                AppError::ModelRateLimitError
            } else if err_type == "server_error"
                || message.contains("unavailable")
                || message.contains("overloaded")
                || message.contains("internal error")
            {
                AppError::ModelTemporaryError
            } else {
                AppError::ModelError(api_err.message.clone())
            }
        }
        OpenAIError::Reqwest(req_err) => {
            let status = req_err.status().map(|s| s.as_u16());
            if req_err.is_timeout() || req_err.is_connect() {
                AppError::ModelTemporaryError
            } else if matches!(status, Some(401) | Some(403)) {
                AppError::ModelAuthError
            } else if status == Some(429) {
                AppError::ModelRateLimitError
            } else if status.map(|s| s >= 500).unwrap_or(false) {
                AppError::ModelTemporaryError
            } else {
                AppError::ModelError(req_err.to_string())
            }
        }
        _ => AppError::ModelError(error.to_string()),
    }
}

/// 생성형 AI 모델 호출 인터페이스
///
/// 프롬프트(+선택적 이미지)를 보내고 응답 텍스트를 받는 블랙박스입니다.
/// 테스트에서는 Mock 객체로 대체합니다.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AiClientTrait: Send + Sync {
    /// 프롬프트와 이미지를 모델에 전달하고 응답 텍스트를 반환
    async fn generate(
        &self,
        prompt: String,
        image: Option<ImagePayload>,
    ) -> Result<String, AppError>;

    /// API 연결 상태 확인 (모델 목록 조회)
    async fn check_connectivity(&self) -> Result<(), AppError>;
}

/// Arc로 래핑된 AiClient (Clone 지원)
pub type AiClient = Arc<dyn AiClientTrait>;

/// Gemini(OpenAI 호환 엔드포인트) 클라이언트 구현체
#[derive(Clone)]
pub struct GeminiClient {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
    retry_max_elapsed: Duration,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_base(config.gemini_api_base.clone())
            .with_api_key(config.gemini_api_key.clone());
        Self {
            client: Client::with_config(openai_config),
            model: config.gemini_model.clone(),
            timeout: Duration::from_secs(config.model_timeout_secs),
            retry_max_elapsed: Duration::from_secs(config.model_retry_max_elapsed_secs),
        }
    }

    fn build_request(
        &self,
        prompt: String,
        image: Option<&ImagePayload>,
    ) -> Result<CreateChatCompletionRequest, AppError> {
        let message = build_user_message(prompt, image)?;

        CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(vec![message])
            .build()
            .map_err(|e| AppError::internal_error(e.to_string()))
    }

    async fn complete_once(&self, request: CreateChatCompletionRequest) -> Result<String, AppError> {
        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| AppError::ModelTemporaryError)? // 타임아웃
            .map_err(classify_model_error)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| AppError::ModelError("empty completion".to_string()))
    }
}

#[async_trait::async_trait]
impl AiClientTrait for GeminiClient {
    async fn generate(
        &self,
        prompt: String,
        image: Option<ImagePayload>,
    ) -> Result<String, AppError> {
        let request = self.build_request(prompt, image.as_ref())?;
        let started = std::time::Instant::now();

        let text = with_retry(self.retry_max_elapsed, || self.complete_once(request.clone())).await?;

        tracing::debug!(
            model = %self.model,
            with_image = image.is_some(),
            latency_ms = started.elapsed().as_millis() as u64,
            response_len = text.len(),
            "model call completed"
        );
        Ok(text)
    }

    async fn check_connectivity(&self) -> Result<(), AppError> {
        self.client
            .models()
            .list()
            .await
            .map_err(classify_model_error)?;
        Ok(())
    }
}

/// 텍스트(+이미지) 단일 사용자 메시지 생성
pub(crate) fn build_user_message(
    prompt: String,
    image: Option<&ImagePayload>,
) -> Result<ChatCompletionRequestMessage, AppError> {
    let content = match image {
        None => ChatCompletionRequestUserMessageContent::Text(prompt),
        Some(image) => {
            let text_part: ChatCompletionRequestUserMessageContentPart =
                ChatCompletionRequestMessageContentPartTextArgs::default()
                    .text(prompt)
                    .build()
                    .map_err(|e| AppError::internal_error(e.to_string()))?
                    .into();

            let image_url = ImageUrlArgs::default()
                .url(image.to_data_url())
                .detail(ImageDetail::High)
                .build()
                .map_err(|e| AppError::internal_error(e.to_string()))?;
            let image_part: ChatCompletionRequestUserMessageContentPart =
                ChatCompletionRequestMessageContentPartImageArgs::default()
                    .image_url(image_url)
                    .build()
                    .map_err(|e| AppError::internal_error(e.to_string()))?
                    .into();

            ChatCompletionRequestUserMessageContent::Array(vec![text_part, image_part])
        }
    };

    Ok(ChatCompletionRequestMessage::User(
        ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| AppError::internal_error(e.to_string()))?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_openai::error::ApiError;

    fn api_error(r#type: Option<&str>, message: &str) -> OpenAIError {
        OpenAIError::ApiError(ApiError {
            message: message.to_string(),
            r#type: r#type.map(String::from),
            param: None,
            code: None,
        })
    }

    #[test]
    fn should_create_gemini_client_from_config() {
        let config = AppConfig::default();
        let client = GeminiClient::new(&config);

        assert_eq!(client.model, "gemini-1.5-flash");
        assert_eq!(client.timeout, Duration::from_secs(25));
    }

    #[test]
    fn should_build_text_only_message() {
        let message = build_user_message("hello".to_string(), None).unwrap();

        match message {
            ChatCompletionRequestMessage::User(user) => {
                assert!(matches!(
                    user.content,
                    ChatCompletionRequestUserMessageContent::Text(ref t) if t == "hello"
                ));
            }
            _ => panic!("expected user message"),
        }
    }

    #[test]
    fn should_attach_image_as_second_part() {
        // Arrange
        let image = ImagePayload {
            mime_type: "image/png".to_string(),
            bytes: b"hello".to_vec(),
        };

        // Act
        let message = build_user_message("solve".to_string(), Some(&image)).unwrap();

        // Assert
        let ChatCompletionRequestMessage::User(user) = message else {
            panic!("expected user message");
        };
        let ChatCompletionRequestUserMessageContent::Array(parts) = user.content else {
            panic!("expected multi-part content");
        };
        assert_eq!(parts.len(), 2);
        match &parts[1] {
            ChatCompletionRequestUserMessageContentPart::ImageUrl(part) => {
                assert_eq!(part.image_url.url, "data:image/png;base64,aGVsbG8=");
            }
            _ => panic!("expected image part"),
        }
    }

    #[test]
    fn should_build_request_with_configured_model() {
        let client = GeminiClient::new(&AppConfig::default());

        let request = client.build_request("prompt".to_string(), None).unwrap();

        assert_eq!(request.model, "gemini-1.5-flash");
        assert_eq!(request.messages.len(), 1);
    }

    #[test]
    fn should_classify_invalid_api_key_as_auth_error() {
        let error = api_error(None, "API key not valid. Please pass a valid API key.");

        assert!(matches!(classify_model_error(error), AppError::ModelAuthError));
    }

    #[test]
    fn should_classify_quota_as_rate_limit() {
        let error = api_error(Some("rate_limit_error"), "Resource has been exhausted");
        assert!(matches!(classify_model_error(error), AppError::ModelRateLimitError));

        let error = api_error(None, "You exceeded your current quota");
        assert!(matches!(classify_model_error(error), AppError::ModelRateLimitError));
    }

    #[test]
    fn should_classify_server_error_as_temporary() {
        let error = api_error(Some("server_error"), "The model is overloaded");

        assert!(matches!(classify_model_error(error), AppError::ModelTemporaryError));
    }

    #[test]
    fn should_keep_message_for_other_api_errors() {
        let error = api_error(Some("invalid_request_error"), "Invalid image");

        match classify_model_error(error) {
            AppError::ModelError(msg) => assert_eq!(msg, "Invalid image"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn should_classify_invalid_argument_as_model_error() {
        let error = OpenAIError::InvalidArgument("bad".to_string());

        assert!(matches!(classify_model_error(error), AppError::ModelError(_)));
    }
}
