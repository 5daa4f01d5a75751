//! 统一错误处理模块
//!
//! 定义应用级错误类型，并实现 axum 的 IntoResponse trait 以便自动转换为 HTTP 响应。
//! 所有失败都在服务边界处收敛为 `{ "error": message }` 结构，不向调用方抛出未处理的故障。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm::LlmError;

/// 应用错误枚举
#[derive(Error, Debug)]
pub enum AppError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 上游限流
    #[error("限流: {0}")]
    RateLimited(String),

    /// AI 额度耗尽
    #[error("额度耗尽: {0}")]
    QuotaExhausted(String),

    /// 上游网关错误
    #[error("上游错误: {0}")]
    Upstream(String),

    /// 请求参数错误
    #[error("请求错误: {0}")]
    BadRequest(String),
}

impl AppError {
    /// 对应的 HTTP 状态码
    ///
    /// 限流和额度耗尽原样透传 429/402，其余归为 500/400。
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::QuotaExhausted(_) => StatusCode::PAYMENT_REQUIRED,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// 返回给前端的错误消息
    pub fn message(&self) -> &str {
        match self {
            AppError::Config(msg)
            | AppError::RateLimited(msg)
            | AppError::QuotaExhausted(msg)
            | AppError::Upstream(msg)
            | AppError::BadRequest(msg) => msg,
        }
    }

    /// 错误分类标识（用于请求日志）
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::RateLimited(_) => "rate_limited",
            AppError::QuotaExhausted(_) => "quota_exhausted",
            AppError::Upstream(_) => "upstream",
            AppError::BadRequest(_) => "bad_request",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.message()
        }));

        (status, body).into_response()
    }
}

/// 上游错误到应用错误的映射
///
/// 429/402 带专属的用户可见消息，其余网关失败归为通用错误。
impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Api { status: 429, .. } => {
                AppError::RateLimited("Rate limit exceeded. Please try again later.".to_string())
            }
            LlmError::Api { status: 402, .. } => AppError::QuotaExhausted(
                "AI credits depleted. Please add credits to continue.".to_string(),
            ),
            LlmError::Api { .. } => AppError::Upstream("AI gateway error".to_string()),
            LlmError::EmptyResponse => AppError::Upstream("No content in AI response".to_string()),
            LlmError::Config(msg) => AppError::Config(msg),
            LlmError::Http(e) => AppError::Upstream(format!("AI gateway request failed: {}", e)),
        }
    }
}

/// 便捷类型别名
pub type AppResult<T> = Result<T, AppError>;
