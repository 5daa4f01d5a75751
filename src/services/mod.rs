//! 服务层模块

pub mod parser;
mod prompt_service;
mod subtopic_service;

pub use prompt_service::PromptService;
pub use subtopic_service::SubtopicService;
