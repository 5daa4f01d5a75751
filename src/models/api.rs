//! REST API 请求/响应模型

use serde::{Deserialize, Serialize};

/// 子主题生成请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSubtopicsRequest {
    pub subject_name: String,
}

/// 子主题生成响应
#[derive(Debug, Serialize)]
pub struct GenerateSubtopicsResponse {
    pub subtopics: Vec<String>,
}
