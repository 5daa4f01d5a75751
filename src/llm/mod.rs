//! LLM 模块
//!
//! 提供 AI 网关的 Chat Completions 客户端。

mod client;
mod format;
mod types;

pub use client::LlmClient;
pub use types::{ChatMessage, LlmError};
