use tracing::{info, warn};

use super::prompt::ChatPrompt;
use crate::domain::ai::AiClientTrait;

/// 모델 호출 실패 시 사용자에게 보여줄 문구
pub const CHAT_FALLBACK_MESSAGE: &str =
    "I'm sorry, I encountered an error while processing your request.";

/// 빈 메시지에 대한 안내 문구
pub const EMPTY_MESSAGE_REPLY: &str = "Please provide a message.";

pub struct ChatService;

impl ChatService {
    /// 사용자 메시지에 대한 모델 응답을 그대로 반환합니다.
    ///
    /// 응답은 가공하지 않으며, 호출 실패 시 고정 문구를 반환합니다.
    pub async fn reply(client: &dyn AiClientTrait, message: &str) -> String {
        if message.trim().is_empty() {
            return EMPTY_MESSAGE_REPLY.to_string();
        }

        info!(message_len = message.len(), "채팅 요청");

        match client.generate(ChatPrompt::build(message), None).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, code = %e.error_code(), "chat model invocation failed");
                CHAT_FALLBACK_MESSAGE.to_string()
            }
        }
    }
}
