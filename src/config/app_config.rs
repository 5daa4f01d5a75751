//! 应用配置管理
//!
//! 从进程环境变量加载配置。网关密钥是唯一的必需项，
//! 缺失时不在启动阶段报错，而是在请求时返回配置错误。

use std::env;

fn default_base_url() -> String {
    "https://ai.gateway.lovable.dev".to_string()
}

fn default_model() -> String {
    "google/gemini-2.5-flash".to_string()
}

fn default_port() -> u16 {
    8765
}

/// 应用配置结构体
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// AI 网关密钥
    pub api_key: String,

    /// AI 网关基础 URL
    pub base_url: String,

    /// 模型名称
    pub model: String,

    /// 监听端口
    pub port: u16,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("AI_GATEWAY_API_KEY").unwrap_or_default(),
            base_url: env::var("AI_GATEWAY_BASE_URL").unwrap_or_else(|_| default_base_url()),
            model: env::var("AI_GATEWAY_MODEL").unwrap_or_else(|_| default_model()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(default_port),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            port: default_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.api_key.is_empty());
        assert_eq!(config.base_url, "https://ai.gateway.lovable.dev");
        assert_eq!(config.model, "google/gemini-2.5-flash");
        assert_eq!(config.port, 8765);
    }
}
