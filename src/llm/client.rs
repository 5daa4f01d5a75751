//! AI 网关客户端

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use super::format::build_chat_endpoint;
use super::types::{ChatMessage, LlmError};

/// Chat Completions 请求载荷
#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

/// Chat Completions 响应
#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    #[serde(default)]
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug, Default)]
struct ChoiceMessage {
    content: Option<String>,
}

/// AI 网关客户端
///
/// 持有连接池，供并发请求复用；每次调用都是独立的请求/响应往返。
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    /// 创建新的客户端
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LlmError::Config("API Key is required".to_string()));
        }

        // 构建 HTTP 客户端
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(LlmError::Http)?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into(),
        })
    }

    /// 单次聊天补全调用，返回首个 choice 的文本内容
    ///
    /// 不做重试：任何传输失败或非成功状态码都立即返回错误。
    /// 空字符串内容视同缺失。
    pub async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        model: &str,
    ) -> Result<String, LlmError> {
        let endpoint = build_chat_endpoint(&self.base_url);

        let payload = ChatCompletionRequest {
            model: model.to_string(),
            messages,
        };

        debug!("AI gateway request: endpoint={}, model={}", endpoint, model);

        let response = self
            .client
            .post(&endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        // 检查状态码
        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "AI gateway error: status={}, body={}",
                status_code,
                truncate_body(&error_text, 500)
            );
            return Err(LlmError::Api {
                status: status_code,
                message: error_text,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        // 提取首个 choice 的内容
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}

/// 截断日志预览，始终落在字符边界上
///
/// 响应体由上游控制，可能在任意字节处出现多字节字符。
fn truncate_body(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
