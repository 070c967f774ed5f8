pub mod dto;
pub mod handler;
pub mod prompt;
pub mod service;

pub use dto::{ChatRequest, ChatResponse};
pub use handler::chat_handler;
pub use service::ChatService;
