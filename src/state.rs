use std::time::Instant;

use crate::config::AppConfig;
use crate::domain::ai::AiClient;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub ai_client: AiClient,
    /// 가동 시간 계산 기준
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig, ai_client: AiClient) -> Self {
        Self {
            config,
            ai_client,
            started_at: Instant::now(),
        }
    }
}
