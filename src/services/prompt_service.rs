//! Prompt 构建服务
//!
//! 负责构建子主题生成的聊天消息

use crate::llm::ChatMessage;

/// 系统提示词
const SYSTEM_PROMPT: &str = "You are a helpful educational assistant. \
Generate 8-10 relevant subtopics for the given subject. \
Return ONLY a JSON array of strings with subtopic names, no additional text or formatting.";

/// Prompt 服务
pub struct PromptService;

impl PromptService {
    /// 创建新的 Prompt 服务
    pub fn new() -> Self {
        Self
    }

    /// 构建子主题生成的消息列表
    ///
    /// 8-10 条只是给模型的提示，不是对结果的约束。
    pub fn build_subtopic_messages(&self, subject_name: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Generate 8-10 relevant subtopics for studying: {}",
                subject_name
            )),
        ]
    }
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_subtopic_messages() {
        let service = PromptService::new();
        let messages = service.build_subtopic_messages("Linear Algebra");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("JSON array"));
        assert_eq!(messages[1].role, "user");
        assert!(messages[1].content.contains("Linear Algebra"));
    }
}
