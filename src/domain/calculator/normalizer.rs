//! 모델 응답 정규화
//!
//! 자유 형식 텍스트를 `AnswerRecord` 목록으로 바꾸고 누락된 필드를 기본값으로 채웁니다.
//! 정규화된 결과를 다시 정규화해도 결과가 바뀌지 않습니다.

use super::dto::AnswerRecord;
use super::literal::{extract_records, Literal, LiteralError};

/// `steps`가 비어 있을 때 채우는 문구
pub const FALLBACK_STEPS: &str = "No detailed steps available";

pub type AnswerList = Vec<AnswerRecord>;

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("unparseable model response: {0}")]
    Unparseable(#[from] LiteralError),
    #[error("element #{index} of the model response is not a key-value record")]
    NotRecord { index: usize },
}

/// 모델 응답을 레코드 목록으로 정규화합니다.
///
/// 레코드가 아닌 원소가 하나라도 있으면 응답 전체를 해석 불가로 봅니다.
pub fn normalize(raw: &str) -> Result<AnswerList, NormalizeError> {
    extract_records(raw)?
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Literal::Dict(entries) => Ok(normalize_record(entries)),
            _ => Err(NormalizeError::NotRecord { index }),
        })
        .collect()
}

/// 실패 시 로그만 남기고 빈 목록을 반환하는 정규화
pub fn normalize_or_empty(raw: &str) -> AnswerList {
    match normalize(raw) {
        Ok(answers) => {
            tracing::debug!(count = answers.len(), "model response normalized");
            answers
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse model response, returning no answers");
            tracing::debug!(raw_response = %raw, "unparseable model response");
            Vec::new()
        }
    }
}

fn normalize_record(mut entries: Vec<(String, Literal)>) -> AnswerRecord {
    let expr = take(&mut entries, "expr")
        .map(|value| value.to_text())
        .unwrap_or_default();

    let result = take(&mut entries, "result")
        .map(|value| value.to_json())
        .unwrap_or_else(|| serde_json::Value::String(String::new()));

    let assign = take(&mut entries, "assign")
        .map(|marker| is_assignment(&marker))
        .unwrap_or(false);

    let steps = match take(&mut entries, "steps") {
        None | Some(Literal::None) => None,
        Some(value) => Some(flatten_steps(&value.to_text())),
    }
    .filter(|steps| !steps.is_empty())
    .unwrap_or_else(|| FALLBACK_STEPS.to_string());

    AnswerRecord {
        expr,
        result,
        assign,
        steps,
    }
}

/// 같은 키가 여러 번 나오면 마지막 값을 사용
fn take(entries: &mut Vec<(String, Literal)>, key: &str) -> Option<Literal> {
    let index = entries.iter().rposition(|(k, _)| k == key)?;
    Some(entries.remove(index).1)
}

/// `assign` 키가 있으면 할당으로 보되, 명시적으로 거짓을 뜻하는 값은 예외
fn is_assignment(marker: &Literal) -> bool {
    match marker {
        Literal::None => false,
        Literal::Bool(flag) => *flag,
        Literal::Int(n) => *n != 0,
        Literal::Float(f) => *f != 0.0,
        Literal::Str(s) => {
            let s = s.trim();
            !(s.is_empty()
                || s.eq_ignore_ascii_case("false")
                || s.eq_ignore_ascii_case("no")
                || s == "0")
        }
        Literal::List(_) | Literal::Dict(_) => true,
    }
}

/// `\n`, `\t`, `\r`로 시작하지만 줄바꿈/탭이 아닌 LaTeX 명령
const LATEX_COMMANDS: &[&str] = &[
    "nabla", "ne", "neg", "neq", "ngeq", "ni", "nleq", "nmid", "not", "notin", "nu", "nparallel",
    "rangle", "rceil", "rfloor", "rho", "right", "rightarrow", "rightleftharpoons", "rvert",
    "tan", "tanh", "tau", "text", "textbf", "textit", "tfrac", "therefore", "theta", "tilde",
    "times", "to", "top", "triangle",
];

/// 줄바꿈/탭과 글자 그대로의 `\n`, `\t`, `\r`를 공백으로 바꾸고 연속 공백을 하나로 합침
///
/// `\theta`, `\neq`처럼 알려진 LaTeX 명령은 건드리지 않습니다.
fn flatten_steps(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(index) = rest.find('\\') {
        cleaned.push_str(&rest[..index]);
        let after = &rest[index + 1..];
        let word_len = after
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(after.len());
        let word = &after[..word_len];

        if word.starts_with(['n', 't', 'r']) && !LATEX_COMMANDS.contains(&word) {
            cleaned.push(' ');
            rest = &after[1..];
        } else {
            cleaned.push('\\');
            rest = after;
        }
    }
    cleaned.push_str(rest);

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
