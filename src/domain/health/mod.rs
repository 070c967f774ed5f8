pub mod dto;
pub mod handler;
mod service;

pub use handler::{health_handler, root_handler};
