//! 应用状态管理
//!
//! 定义在请求处理器之间共享的状态。
//! 处理器之间不共享可变状态，只复用 HTTP 连接池和日志文件句柄，
//! 并发请求互不影响。

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::SubtopicService;

/// 应用共享状态
///
/// 使用 Arc 包裹以便在多个处理器之间安全共享
pub struct AppState {
    /// 子主题生成服务
    pub subtopics: SubtopicService,
}

impl AppState {
    /// 从给定配置创建应用状态
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            subtopics: SubtopicService::from_config(config),
        }
    }
}

/// 创建可共享的应用状态
pub fn create_shared_state(config: &AppConfig) -> Arc<AppState> {
    Arc::new(AppState::from_config(config))
}
