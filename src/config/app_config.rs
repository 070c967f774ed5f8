use std::env;

/// Google Gemini의 OpenAI 호환 엔드포인트
pub const DEFAULT_GEMINI_API_BASE: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub app_env: String,

    // AI Model
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub gemini_model: String,
    pub model_timeout_secs: u64,
    pub model_retry_max_elapsed_secs: u64,

    // HTTP
    pub max_body_bytes: usize,
    /// 비어 있으면 모든 origin 허용
    pub cors_allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 8900,
            app_env: "dev".to_string(),
            gemini_api_key: String::new(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            model_timeout_secs: 25,
            model_retry_max_elapsed_secs: 30,
            max_body_bytes: 10 * 1024 * 1024,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 키-값 조회 함수로부터 설정 로드
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server_host = lookup("SERVER_HOST").unwrap_or(defaults.server_host);

        let server_port = match lookup("SERVER_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.server_port,
        };

        let app_env = lookup("APP_ENV").unwrap_or(defaults.app_env);

        let gemini_api_key = match lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()) {
            Some(key) => key,
            None if app_env == "production" => return Err(ConfigError::MissingApiKey),
            None => {
                tracing::warn!(
                    "GEMINI_API_KEY 환경변수가 설정되지 않았습니다. 프로덕션 환경에서는 반드시 설정하세요."
                );
                "test-key".to_string()
            }
        };

        let gemini_api_base = lookup("GEMINI_API_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or(defaults.gemini_api_base);
        let gemini_model = lookup("GEMINI_MODEL").unwrap_or(defaults.gemini_model);

        let model_timeout_secs =
            parse_number(&lookup, "MODEL_TIMEOUT_SECS", defaults.model_timeout_secs)?;
        let model_retry_max_elapsed_secs = parse_number(
            &lookup,
            "MODEL_RETRY_MAX_ELAPSED_SECS",
            defaults.model_retry_max_elapsed_secs,
        )?;
        let max_body_bytes = parse_number(&lookup, "MAX_BODY_BYTES", defaults.max_body_bytes)?;

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            server_host,
            server_port,
            app_env,
            gemini_api_key,
            gemini_api_base,
            gemini_model,
            model_timeout_secs,
            model_retry_max_elapsed_secs,
            max_body_bytes,
            cors_allowed_origins,
        })
    }
}

fn parse_number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        None => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("GEMINI_API_KEY environment variable is required in production")]
    MissingApiKey,
}
