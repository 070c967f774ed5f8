//! 모델이 생성한 키-값 리터럴 파서
//!
//! 모델 응답은 `[{'expr': '2 + 2', 'result': 4, 'assign': True}]` 같은 Python 스타일 리터럴이지만
//! 앞뒤에 설명 문장이나 코드 펜스가 붙는 경우가 많습니다. 여기서는 제한된 문법만 해석합니다.
//!
//! ```text
//! value   := list | tuple | dict | string+ | number | constant
//! list    := '[' (value (',' value)* ','?)? ']'
//! tuple   := '(' (value (',' value)* ','?)? ')'
//! dict    := '{' (key ':' value (',' key ':' value)* ','?)? '}'
//! key     := string | number | constant | identifier
//! constant:= True | False | None | true | false | null
//! ```
//!
//! JSON 리터럴도 같은 문법의 부분집합이므로 그대로 해석됩니다.

use std::fmt;

/// 중첩 허용 한도 (list/tuple/dict)
const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// list와 tuple 모두 이 형태로 표현
    List(Vec<Literal>),
    /// 입력 순서를 유지하는 key-value 목록 (중복 키는 마지막 값이 유효)
    Dict(Vec<(String, Literal)>),
}

impl Literal {
    /// 사람이 읽을 수 있는 텍스트 표현 (문자열은 따옴표 없이 그대로)
    pub fn to_text(&self) -> String {
        match self {
            Literal::None => "None".to_string(),
            Literal::Bool(true) => "True".to_string(),
            Literal::Bool(false) => "False".to_string(),
            Literal::Int(i) => i.to_string(),
            Literal::Float(f) => format_float(*f),
            Literal::Str(s) => s.clone(),
            Literal::List(_) | Literal::Dict(_) => self.to_json().to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            Literal::None => Value::Null,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(i) => Value::from(*i),
            Literal::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Literal::Str(s) => Value::String(s.clone()),
            Literal::List(items) => Value::Array(items.iter().map(Literal::to_json).collect()),
            Literal::Dict(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralErrorKind {
    NoLiteralFound,
    UnexpectedEnd,
    UnexpectedChar(char),
    UnterminatedString,
    InvalidNumber(String),
    BareWord(String),
    TooDeep,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub struct LiteralError {
    /// 원본 텍스트 기준 바이트 오프셋
    pub offset: usize,
    pub kind: LiteralErrorKind,
}

impl fmt::Display for LiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LiteralErrorKind::NoLiteralFound => write!(f, "no list or dict literal found"),
            LiteralErrorKind::UnexpectedEnd => {
                write!(f, "unexpected end of input at byte {}", self.offset)
            }
            LiteralErrorKind::UnexpectedChar(c) => {
                write!(f, "unexpected character {:?} at byte {}", c, self.offset)
            }
            LiteralErrorKind::UnterminatedString => {
                write!(f, "unterminated string starting at byte {}", self.offset)
            }
            LiteralErrorKind::InvalidNumber(text) => {
                write!(f, "invalid number {:?} at byte {}", text, self.offset)
            }
            LiteralErrorKind::BareWord(word) => {
                write!(f, "unquoted word {:?} at byte {}", word, self.offset)
            }
            LiteralErrorKind::TooDeep => {
                write!(f, "nesting deeper than {} at byte {}", MAX_DEPTH, self.offset)
            }
        }
    }
}

/// 모델 응답 텍스트에서 레코드 시퀀스를 추출합니다.
///
/// - 첫 `[` 또는 `{` 이전의 설명 문장과 코드 펜스는 건너뜁니다.
/// - 완성된 리터럴 뒤에 남은 텍스트는 무시합니다.
/// - 최상위가 dict이거나 괄호 없이 `{...}, {...}`로 나열된 경우 레코드 목록으로 취급합니다.
///
/// 시작 후보 위치에서 해석이 실패하면 실패 지점 이후의 다음 후보부터 다시 시도합니다.
/// 단, 실패한 후보가 이미 dict 항목이나 중첩 컨테이너를 하나라도 완성했다면 그 후보가 응답 본문이므로
/// 더 찾지 않고 오류를 반환합니다.
pub fn extract_records(raw: &str) -> Result<Vec<Literal>, LiteralError> {
    let mut search_from = 0;
    let mut first_error: Option<LiteralError> = None;

    while let Some(relative) = raw[search_from..].find(['[', '{']) {
        let start = search_from + relative;
        let mut parser = Parser::new(raw, start);

        match parser.parse_top_level() {
            Ok(records) => {
                let trailing = raw[parser.pos..].trim();
                if !trailing.is_empty() {
                    tracing::debug!(
                        trailing_len = trailing.len(),
                        "ignoring text after record literal"
                    );
                }
                return Ok(records);
            }
            Err(err) if parser.committed => return Err(err),
            Err(err) => {
                let exhausted = matches!(
                    err.kind,
                    LiteralErrorKind::UnexpectedEnd
                        | LiteralErrorKind::UnterminatedString
                        | LiteralErrorKind::TooDeep
                );
                search_from = err.offset.max(start + 1);
                first_error.get_or_insert(err);
                if exhausted {
                    break;
                }
            }
        }
    }

    Err(first_error.unwrap_or(LiteralError {
        offset: 0,
        kind: LiteralErrorKind::NoLiteralFound,
    }))
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
    /// 레코드 구조를 하나라도 완성했는지 여부
    committed: bool,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, pos: usize) -> Self {
        Self {
            src,
            pos,
            depth: 0,
            committed: false,
        }
    }

    fn enter(&mut self) -> Result<(), LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(LiteralErrorKind::TooDeep));
        }
        self.depth += 1;
        Ok(())
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn error(&self, kind: LiteralErrorKind) -> LiteralError {
        LiteralError {
            offset: self.pos,
            kind,
        }
    }

    fn unexpected(&self) -> LiteralError {
        match self.peek() {
            Some(c) => self.error(LiteralErrorKind::UnexpectedChar(c)),
            None => self.error(LiteralErrorKind::UnexpectedEnd),
        }
    }

    /// 공백과 `#` 주석 건너뛰기
    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '#' {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn parse_top_level(&mut self) -> Result<Vec<Literal>, LiteralError> {
        match self.parse_value()? {
            Literal::List(items) => Ok(items),
            first @ Literal::Dict(_) => {
                let mut records = vec![first];
                loop {
                    let checkpoint = self.pos;
                    self.skip_ws();
                    if self.peek() == Some(',') {
                        self.bump();
                        self.skip_ws();
                        if self.peek() == Some('{') {
                            records.push(self.parse_dict()?);
                            continue;
                        }
                    }
                    self.pos = checkpoint;
                    break;
                }
                Ok(records)
            }
            // 시작 문자가 '[' 또는 '{'이므로 도달하지 않음
            other => Ok(vec![other]),
        }
    }

    fn parse_value(&mut self) -> Result<Literal, LiteralError> {
        self.skip_ws();
        match self.peek() {
            None => Err(self.error(LiteralErrorKind::UnexpectedEnd)),
            Some('[') => self.parse_sequence(']'),
            Some('(') => self.parse_sequence(')'),
            Some('{') => self.parse_dict(),
            Some('\'') | Some('"') => self.parse_strings(false),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.parse_number(),
            Some(c) if is_ident_start(c) => {
                let start = self.pos;
                let word = self.parse_identifier();
                if let Some(raw) = string_prefix(word) {
                    if matches!(self.peek(), Some('\'') | Some('"')) {
                        return self.parse_strings(raw);
                    }
                }
                match constant(word) {
                    Some(literal) => Ok(literal),
                    None => Err(LiteralError {
                        offset: start,
                        kind: LiteralErrorKind::BareWord(word.to_string()),
                    }),
                }
            }
            Some(c) => Err(self.error(LiteralErrorKind::UnexpectedChar(c))),
        }
    }

    fn parse_sequence(&mut self, close: char) -> Result<Literal, LiteralError> {
        self.enter()?;
        self.bump();
        let mut items = Vec::new();
        let mut saw_comma = false;

        loop {
            self.skip_ws();
            match self.peek() {
                Some(c) if c == close => {
                    self.bump();
                    break;
                }
                None => return Err(self.error(LiteralErrorKind::UnexpectedEnd)),
                _ => {}
            }

            let item = self.parse_value()?;
            if matches!(item, Literal::List(_) | Literal::Dict(_)) {
                self.committed = true;
            }
            items.push(item);

            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                    saw_comma = true;
                }
                Some(c) if c == close => {
                    self.bump();
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }

        self.depth -= 1;

        // `(x)`는 tuple이 아니라 괄호로 감싼 값
        if close == ')' && !saw_comma && items.len() == 1 {
            return Ok(items.remove(0));
        }
        Ok(Literal::List(items))
    }

    fn parse_dict(&mut self) -> Result<Literal, LiteralError> {
        self.enter()?;
        self.bump();
        let mut entries = Vec::new();

        loop {
            self.skip_ws();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    break;
                }
                None => return Err(self.error(LiteralErrorKind::UnexpectedEnd)),
                _ => {}
            }

            let key = self.parse_key()?;
            self.skip_ws();
            if self.peek() != Some(':') {
                return Err(self.unexpected());
            }
            self.bump();
            let value = self.parse_value()?;
            entries.push((key, value));
            self.committed = true;

            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }

        self.depth -= 1;
        Ok(Literal::Dict(entries))
    }

    fn parse_key(&mut self) -> Result<String, LiteralError> {
        self.skip_ws();
        match self.peek() {
            Some(c) if is_ident_start(c) => {
                let word = self.parse_identifier();
                if let Some(raw) = string_prefix(word) {
                    if matches!(self.peek(), Some('\'') | Some('"')) {
                        return self.parse_strings(raw).map(|key| key.to_text());
                    }
                }
                Ok(constant(word)
                    .map(|literal| literal.to_text())
                    .unwrap_or_else(|| word.to_string()))
            }
            Some('\'') | Some('"') => self.parse_strings(false).map(|key| key.to_text()),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => {
                self.parse_number().map(|key| key.to_text())
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.bump();
            } else {
                break;
            }
        }
        &self.src[start..self.pos]
    }

    /// 인접한 문자열 리터럴은 하나로 이어 붙임 (`'a' 'b'` == `'ab'`)
    fn parse_strings(&mut self, raw: bool) -> Result<Literal, LiteralError> {
        let mut text = self.parse_string(raw)?;

        loop {
            let checkpoint = self.pos;
            self.skip_ws();
            match self.peek() {
                Some('\'') | Some('"') => text.push_str(&self.parse_string(false)?),
                Some(c) if is_ident_start(c) => {
                    let word = self.parse_identifier();
                    match string_prefix(word) {
                        Some(raw) if matches!(self.peek(), Some('\'') | Some('"')) => {
                            text.push_str(&self.parse_string(raw)?)
                        }
                        _ => {
                            self.pos = checkpoint;
                            break;
                        }
                    }
                }
                _ => {
                    self.pos = checkpoint;
                    break;
                }
            }
        }

        Ok(Literal::Str(text))
    }

    fn parse_string(&mut self, raw: bool) -> Result<String, LiteralError> {
        let start = self.pos;
        let unterminated = LiteralError {
            offset: start,
            kind: LiteralErrorKind::UnterminatedString,
        };
        let quote = self.bump().ok_or_else(|| unterminated.clone())?;

        let closing_pair: String = [quote, quote].iter().collect();
        let triple = self.rest().starts_with(&closing_pair);
        if triple {
            self.pos += closing_pair.len();
        }

        let mut out = String::new();
        loop {
            let c = self.bump().ok_or_else(|| unterminated.clone())?;

            if c == quote {
                if !triple {
                    break;
                }
                if self.rest().starts_with(&closing_pair) {
                    self.pos += closing_pair.len();
                    break;
                }
                out.push(c);
                continue;
            }

            if c != '\\' {
                out.push(c);
                continue;
            }

            let escaped = self.bump().ok_or_else(|| unterminated.clone())?;
            if raw {
                out.push('\\');
                out.push(escaped);
                continue;
            }
            match escaped {
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                '0' => out.push('\0'),
                '\\' => out.push('\\'),
                '\'' => out.push('\''),
                '"' => out.push('"'),
                // 줄 끝의 역슬래시는 줄 이어쓰기
                '\n' => {}
                'x' => self.push_hex_escape(&mut out, 'x', 2),
                'u' => self.push_hex_escape(&mut out, 'u', 4),
                'U' => self.push_hex_escape(&mut out, 'U', 8),
                other => {
                    out.push('\\');
                    out.push(other);
                }
            }
        }

        Ok(out)
    }

    /// 잘못된 hex escape는 오류 대신 원문 그대로 보존
    fn push_hex_escape(&mut self, out: &mut String, marker: char, digits: usize) {
        let decoded = self
            .src
            .get(self.pos..self.pos + digits)
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                out.push(c);
                self.pos += digits;
            }
            None => {
                out.push('\\');
                out.push(marker);
            }
        }
    }

    fn parse_number(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;

        if matches!(self.peek(), Some('+') | Some('-')) {
            self.bump();
        }
        let int_digits = self.eat_digits();
        let mut is_float = false;

        if self.peek() == Some('.') {
            self.bump();
            is_float = true;
            let frac_digits = self.eat_digits();
            if int_digits == 0 && frac_digits == 0 {
                return Err(self.invalid_number(start));
            }
        } else if int_digits == 0 {
            return Err(self.invalid_number(start));
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            self.bump();
            is_float = true;
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.bump();
            }
            if self.eat_digits() == 0 {
                return Err(self.invalid_number(start));
            }
        }

        let text = &self.src[start..self.pos];
        if !is_float {
            if let Ok(value) = text.parse::<i64>() {
                return Ok(Literal::Int(value));
            }
        }
        text.parse::<f64>()
            .map(Literal::Float)
            .map_err(|_| self.invalid_number(start))
    }

    fn eat_digits(&mut self) -> usize {
        let mut count = 0;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
            count += 1;
        }
        count
    }

    fn invalid_number(&self, start: usize) -> LiteralError {
        LiteralError {
            offset: start,
            kind: LiteralErrorKind::InvalidNumber(self.src[start..self.pos].to_string()),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// 문자열 접두사(`r`, `u`)를 raw 여부로 변환
fn string_prefix(word: &str) -> Option<bool> {
    match word {
        "r" | "R" => Some(true),
        "u" | "U" => Some(false),
        _ => None,
    }
}

fn constant(word: &str) -> Option<Literal> {
    match word {
        "True" | "true" => Some(Literal::Bool(true)),
        "False" | "false" => Some(Literal::Bool(false)),
        "None" | "null" => Some(Literal::None),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(raw: &str) -> Literal {
        let mut records = extract_records(&format!("[{raw}]")).unwrap();
        assert_eq!(records.len(), 1, "expected a single value in {raw:?}");
        records.remove(0)
    }

    fn dict(entries: &[(&str, Literal)]) -> Literal {
        Literal::Dict(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    // ===== 스칼라 =====

    #[test]
    fn should_parse_integers_and_floats() {
        assert_eq!(parse_one("4"), Literal::Int(4));
        assert_eq!(parse_one("-17"), Literal::Int(-17));
        assert_eq!(parse_one("+3"), Literal::Int(3));
        assert_eq!(parse_one("69.11"), Literal::Float(69.11));
        assert_eq!(parse_one(".5"), Literal::Float(0.5));
        assert_eq!(parse_one("2."), Literal::Float(2.0));
        assert_eq!(parse_one("1e3"), Literal::Float(1000.0));
        assert_eq!(parse_one("-2.5E-1"), Literal::Float(-0.25));
    }

    #[test]
    fn should_promote_huge_integers_to_float() {
        assert_eq!(
            parse_one("123456789012345678901234567890"),
            Literal::Float(1.2345678901234568e29)
        );
    }

    #[test]
    fn should_parse_python_and_json_constants() {
        assert_eq!(parse_one("True"), Literal::Bool(true));
        assert_eq!(parse_one("false"), Literal::Bool(false));
        assert_eq!(parse_one("None"), Literal::None);
        assert_eq!(parse_one("null"), Literal::None);
    }

    #[test]
    fn should_parse_single_and_double_quoted_strings() {
        assert_eq!(parse_one("'a b'"), Literal::Str("a b".to_string()));
        assert_eq!(parse_one(r#""it's""#), Literal::Str("it's".to_string()));
        assert_eq!(parse_one(r#"'say "hi"'"#), Literal::Str("say \"hi\"".to_string()));
    }

    #[test]
    fn should_decode_escape_sequences() {
        assert_eq!(
            parse_one(r"'a\nb\tc\\d\'e'"),
            Literal::Str("a\nb\tc\\d'e".to_string())
        );
        assert_eq!(parse_one(r"'\x41é'"), Literal::Str("Aé".to_string()));
    }

    #[test]
    fn should_keep_unknown_escapes_verbatim() {
        assert_eq!(
            parse_one(r"'\frac{1}{2} \alpha \xZZ'"),
            Literal::Str(r"\frac{1}{2} \alpha \xZZ".to_string())
        );
    }

    #[test]
    fn should_parse_triple_quoted_and_prefixed_strings() {
        assert_eq!(
            parse_one("'''it's\nmultiline'''"),
            Literal::Str("it's\nmultiline".to_string())
        );
        assert_eq!(parse_one(r"r'\n'"), Literal::Str(r"\n".to_string()));
        assert_eq!(parse_one("u'x'"), Literal::Str("x".to_string()));
    }

    #[test]
    fn should_concatenate_adjacent_strings() {
        assert_eq!(
            parse_one("'Add 2 ' \"and 2\""),
            Literal::Str("Add 2 and 2".to_string())
        );
    }

    #[test]
    fn should_accept_raw_newlines_inside_strings() {
        assert_eq!(
            parse_one("'step one\nstep two'"),
            Literal::Str("step one\nstep two".to_string())
        );
    }

    // ===== 컨테이너 =====

    #[test]
    fn should_parse_dict_with_quoted_and_bare_keys() {
        let value = parse_one("{'expr': 'x', result: 2, \"assign\": True,}");

        assert_eq!(
            value,
            dict(&[
                ("expr", Literal::Str("x".to_string())),
                ("result", Literal::Int(2)),
                ("assign", Literal::Bool(true)),
            ])
        );
    }

    #[test]
    fn should_stringify_non_string_keys() {
        let value = parse_one("{1: 'a', True: 'b', 2.5: 'c'}");

        assert_eq!(
            value,
            dict(&[
                ("1", Literal::Str("a".to_string())),
                ("True", Literal::Str("b".to_string())),
                ("2.5", Literal::Str("c".to_string())),
            ])
        );
    }

    #[test]
    fn should_parse_nested_lists_and_tuples() {
        assert_eq!(
            parse_one("[1, (2, 3), (4,), (5), []]"),
            Literal::List(vec![
                Literal::Int(1),
                Literal::List(vec![Literal::Int(2), Literal::Int(3)]),
                Literal::List(vec![Literal::Int(4)]),
                Literal::Int(5),
                Literal::List(vec![]),
            ])
        );
    }

    #[test]
    fn should_skip_comments_between_tokens() {
        let records = extract_records("[ # first\n {'a': 1}, # second\n]").unwrap();

        assert_eq!(records, vec![dict(&[("a", Literal::Int(1))])]);
    }

    // ===== 복구 정책 =====

    #[test]
    fn should_skip_leading_prose_and_trailing_text() {
        let raw = "Here are the answers:\n[{'expr': '2 + 2', 'result': 4}]\nHope this helps!";

        let records = extract_records(raw).unwrap();

        assert_eq!(
            records,
            vec![dict(&[
                ("expr", Literal::Str("2 + 2".to_string())),
                ("result", Literal::Int(4)),
            ])]
        );
    }

    #[test]
    fn should_strip_markdown_code_fence() {
        let raw = "```json\n[{\"expr\": \"y\", \"result\": 5}]\n```";

        let records = extract_records(raw).unwrap();

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn should_treat_bare_dict_as_single_record() {
        let records = extract_records("{'expr': 'x', 'result': 1}").unwrap();

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn should_collect_comma_separated_dicts_without_brackets() {
        let raw = "{'expr': 'x', 'result': 2}, {'expr': 'y', 'result': 5} and that's all";

        let records = extract_records(raw).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1], dict(&[
            ("expr", Literal::Str("y".to_string())),
            ("result", Literal::Int(5)),
        ]));
    }

    #[test]
    fn should_retry_after_failed_candidate_in_prose() {
        let raw = "The drawing [see below] shows: [{'expr': 'heart', 'result': 'love'}]";

        let records = extract_records(raw).unwrap();

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn should_not_salvage_inner_record_of_broken_list() {
        let raw = "[{'expr': 'a', 'result': 1}, {'expr': 'x', 'result': x = 2}]";

        let err = extract_records(raw).unwrap_err();

        assert_eq!(err.kind, LiteralErrorKind::BareWord("x".to_string()));
    }

    #[test]
    fn should_reject_list_whose_first_record_is_broken() {
        // Arrange
        let raw = "[{'expr': 'x', 'result': x = 2, 'assign': True, 'steps': 'Solve.'}, \
                   {'expr': 'y', 'result': 5, 'assign': True, 'steps': 'Solve.'}]";

        // Act
        let err = extract_records(raw).unwrap_err();

        // Assert
        assert_eq!(err.kind, LiteralErrorKind::BareWord("x".to_string()));
        assert_eq!(err.offset, 25);
    }

    #[test]
    fn should_not_pick_up_dict_inside_string_of_broken_record() {
        let raw = "[{'expr': 'f', 'result': f(x) = 2, 'steps': 'mapping {x: 2}'}]";

        let err = extract_records(raw).unwrap_err();

        assert_eq!(err.kind, LiteralErrorKind::BareWord("f".to_string()));
    }

    #[test]
    fn should_fail_on_excessive_nesting() {
        let raw = format!("{}{}", "[".repeat(5000), "]".repeat(5000));

        let err = extract_records(&raw).unwrap_err();

        assert_eq!(err.kind, LiteralErrorKind::TooDeep);
        assert_eq!(err.offset, MAX_DEPTH);
    }

    #[test]
    fn should_accept_nesting_up_to_limit() {
        let raw = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));

        let records = extract_records(&raw).unwrap();

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn should_fail_on_plain_prose() {
        let err = extract_records("I could not read any expression in this image.").unwrap_err();

        assert_eq!(err.kind, LiteralErrorKind::NoLiteralFound);
    }

    #[test]
    fn should_fail_on_unterminated_string() {
        let err = extract_records("[{'expr': 'x}]").unwrap_err();

        assert_eq!(err.kind, LiteralErrorKind::UnterminatedString);
        assert_eq!(err.offset, 10);
    }

    #[test]
    fn should_fail_on_unclosed_container() {
        let err = extract_records("[{'expr': 'x', 'result': 1}").unwrap_err();

        assert_eq!(err.kind, LiteralErrorKind::UnexpectedEnd);
    }

    #[test]
    fn should_fail_on_unit_suffix_after_number() {
        let err = extract_records("[{'result': 69.11cm}]").unwrap_err();

        assert_eq!(err.kind, LiteralErrorKind::UnexpectedChar('c'));
    }

    #[test]
    fn should_report_offset_in_error_message() {
        let err = extract_records("[1, @]").unwrap_err();

        assert_eq!(err.to_string(), "unexpected character '@' at byte 4");
    }

    // ===== 변환 =====

    #[test]
    fn should_render_text_like_python_str() {
        assert_eq!(Literal::Float(4.0).to_text(), "4.0");
        assert_eq!(Literal::Float(0.25).to_text(), "0.25");
        assert_eq!(Literal::Bool(true).to_text(), "True");
        assert_eq!(Literal::Str("x".to_string()).to_text(), "x");
        assert_eq!(
            Literal::List(vec![Literal::Int(1), Literal::Int(2)]).to_text(),
            "[1,2]"
        );
    }

    #[test]
    fn should_convert_to_json_value() {
        let value = dict(&[
            ("n", Literal::Int(4)),
            ("f", Literal::Float(f64::NAN)),
            ("none", Literal::None),
        ]);

        assert_eq!(
            value.to_json(),
            serde_json::json!({"n": 4, "f": null, "none": null})
        );
    }
}
