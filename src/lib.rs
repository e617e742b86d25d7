pub mod commands;
pub mod config;
pub mod gemini;
pub mod retry;
pub mod tutor;
