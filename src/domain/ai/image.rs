use base64::{engine::general_purpose::STANDARD, Engine as _};

/// 모델에 함께 전달할 이미지 (디코딩된 바이트 + MIME 타입)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("image payload is empty")]
    Empty,
    #[error("malformed data url")]
    MalformedDataUrl,
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("data url is not base64 encoded")]
    NotBase64Encoded,
    #[error("invalid base64: {0}")]
    InvalidBase64(String),
}

impl ImagePayload {
    /// `data:image/png;base64,...` 형식의 Data URL 또는 순수 base64 문자열을 해석합니다.
    ///
    /// MIME 타입이 없는 순수 base64는 캔버스 기본값인 `image/png`로 간주합니다.
    pub fn from_data_url(raw: &str) -> Result<Self, ImageError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ImageError::Empty);
        }

        let (mime_type, encoded) = match trimmed.strip_prefix("data:") {
            Some(rest) => {
                let (meta, data) = rest.split_once(',').ok_or(ImageError::MalformedDataUrl)?;
                let mut meta_parts = meta.split(';');
                let mime = meta_parts.next().unwrap_or_default().trim().to_ascii_lowercase();
                if !mime.starts_with("image/") {
                    return Err(ImageError::UnsupportedMediaType(mime));
                }
                if !meta_parts.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
                    return Err(ImageError::NotBase64Encoded);
                }
                (mime, data)
            }
            None => ("image/png".to_string(), trimmed),
        };

        // 브라우저가 줄바꿈/공백을 섞어 보내는 경우가 있음
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(ImageError::Empty);
        }

        let bytes = STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| ImageError::InvalidBase64(e.to_string()))?;

        Ok(Self { mime_type, bytes })
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}
