/// 자유 대화용 페르소나 프롬프트
pub struct ChatPrompt;

impl ChatPrompt {
    pub fn build(message: &str) -> String {
        format!(
            "You are a helpful AI assistant named Inscribe AI. You can answer questions on any topic, \
             including but not limited to mathematics, science, history, geography, literature, and general knowledge. \
             Provide accurate, concise, and helpful responses. \
             User message: {}",
            message
        )
    }
}
