pub mod ai;
pub mod calculator;
pub mod chat;
pub mod health;
