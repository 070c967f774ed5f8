use tracing::{info, warn};

use super::{
    dto::{AnswerRecord, VariableTable},
    normalizer::normalize_or_empty,
    prompt::AnalyzePrompt,
};
use crate::domain::ai::{AiClientTrait, ImagePayload};

pub struct CalculatorService;

impl CalculatorService {
    /// 이미지 속 수식을 모델로 풀고 결과를 정규화합니다.
    ///
    /// 모델 호출 실패와 응답 해석 실패 모두 빈 목록으로 처리하며, 오류를 호출자에게 전파하지 않습니다.
    pub async fn analyze_image(
        client: &dyn AiClientTrait,
        image: ImagePayload,
        variables: &VariableTable,
    ) -> Vec<AnswerRecord> {
        let prompt = AnalyzePrompt::build(variables);

        info!(
            image_bytes = image.bytes.len(),
            mime_type = %image.mime_type,
            variable_count = variables.len(),
            "이미지 분석 요청"
        );

        let raw = match client.generate(prompt, Some(image)).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, code = %e.error_code(), "model invocation failed, returning no answers");
                return Vec::new();
            }
        };

        let answers = normalize_or_empty(&raw);
        info!(
            answer_count = answers.len(),
            assignment_count = answers.iter().filter(|a| a.assign).count(),
            "이미지 분석 완료"
        );
        answers
    }
}
