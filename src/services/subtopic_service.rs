//! 子主题生成服务
//!
//! 封装整条生成链路：配置检查、Prompt 构建、网关调用、解析、请求日志。
//! 每次调用是无共享的请求/响应往返，只复用 HTTP 连接池和日志文件句柄。

use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::llm::{LlmClient, LlmError};
use crate::services::parser::parse_subtopics;
use crate::services::PromptService;
use crate::utils::RequestLogger;

/// 子主题生成服务
pub struct SubtopicService {
    /// Err 保存初始化失败的原因，请求时原样返回
    client: Result<LlmClient, String>,
    model: String,
    request_log: RequestLogger,
}

impl SubtopicService {
    /// 从给定配置创建服务
    ///
    /// 密钥缺失或客户端构建失败时不报错，留到请求时返回配置错误。
    pub fn from_config(config: &AppConfig) -> Self {
        let client = if config.api_key.is_empty() {
            Err("AI_GATEWAY_API_KEY is not configured".to_string())
        } else {
            LlmClient::new(&config.api_key, &config.base_url).map_err(|e| {
                error!("Failed to build AI gateway client: {}", e);
                e.to_string()
            })
        };

        Self {
            client,
            model: config.model.clone(),
            request_log: RequestLogger::default(),
        }
    }

    /// 为给定科目生成子主题列表
    pub async fn generate(&self, subject_name: &str) -> AppResult<Vec<String>> {
        let request_id = RequestLogger::generate_request_id();
        let start = std::time::Instant::now();
        let entry = self
            .request_log
            .begin(&request_id, subject_name, &self.model);

        // 密钥缺失或客户端不可用时直接失败，不发出任何出站请求
        let client = match self.client.as_ref() {
            Ok(client) => client,
            Err(reason) => {
                let err = AppError::Config(reason.clone());
                self.request_log
                    .finish_error(entry, start, err.kind(), err.message(), None);
                return Err(err);
            }
        };

        info!(
            "Generating subtopics for subject: {} (request_id={})",
            subject_name, request_id
        );

        let messages = PromptService::new().build_subtopic_messages(subject_name);

        let content = match client.chat_completion(messages, &self.model).await {
            Ok(content) => content,
            Err(e) => {
                let upstream_status = match &e {
                    LlmError::Api { status, .. } => Some(*status),
                    _ => None,
                };
                let err: AppError = e.into();
                self.request_log
                    .finish_error(entry, start, err.kind(), err.message(), upstream_status);
                return Err(err);
            }
        };

        debug!("AI response: {}", content);

        let (subtopics, strategy) = parse_subtopics(&content);
        info!(
            "Generated {} subtopics for {} (strategy={})",
            subtopics.len(),
            subject_name,
            strategy.as_str()
        );

        self.request_log
            .finish_success(entry, start, subtopics.len(), strategy.as_str());
        Ok(subtopics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 密钥缺失时必须在发出任何出站请求之前返回配置错误
    #[tokio::test]
    async fn test_missing_key_fails_before_outbound_call() {
        let config = AppConfig::default();
        let service = SubtopicService::from_config(&config);

        let err = service.generate("Mathematics").await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(err.message(), "AI_GATEWAY_API_KEY is not configured");
    }

    /// 提供了密钥就不得报告密钥缺失
    #[test]
    fn test_configured_key_builds_client() {
        let config = AppConfig {
            api_key: "test-key".to_string(),
            ..Default::default()
        };
        let service = SubtopicService::from_config(&config);
        assert!(service.client.is_ok());
    }
}
