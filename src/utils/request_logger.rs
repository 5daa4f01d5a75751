//! 生成请求日志记录器
//!
//! 将每次子主题生成请求记录到 JSONL 文件，便于调试和分析。
//! 日志是纯诊断用途，写入失败不影响请求本身。

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use uuid::Uuid;

/// 请求日志条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// 请求 ID
    pub request_id: String,
    /// 时间戳
    pub timestamp: DateTime<Utc>,
    /// 科目名称
    pub subject_name: String,
    /// 模型名称
    pub model: String,
    /// 状态
    pub status: String,
    /// 持续时间（毫秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// 生成的子主题数量
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtopic_count: Option<usize>,
    /// 解析策略
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_strategy: Option<String>,
    /// 错误类型
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// 错误信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// 上游 HTTP 状态码
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}

/// 请求日志记录器
pub struct RequestLogger {
    log_path: PathBuf,
    max_entries: usize,
    file: Mutex<Option<File>>,
}

impl RequestLogger {
    /// 创建新的日志记录器
    pub fn new(log_dir: Option<PathBuf>) -> Self {
        let log_dir = log_dir.unwrap_or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."))
                .join("storage")
        });

        // 确保目录存在
        let _ = fs::create_dir_all(&log_dir);

        let log_path = log_dir.join("generation_requests.jsonl");

        Self {
            log_path,
            max_entries: 1000,
            file: Mutex::new(None),
        }
    }

    /// 生成请求 ID
    pub fn generate_request_id() -> String {
        Uuid::new_v4().to_string()[..8].to_string()
    }

    /// 记录请求开始
    pub fn begin(&self, request_id: &str, subject_name: &str, model: &str) -> LogEntry {
        LogEntry {
            request_id: request_id.to_string(),
            timestamp: Utc::now(),
            subject_name: subject_name.to_string(),
            model: model.to_string(),
            status: "pending".to_string(),
            duration_ms: None,
            subtopic_count: None,
            parse_strategy: None,
            error_type: None,
            error_message: None,
            upstream_status: None,
        }
    }

    /// 记录成功
    pub fn finish_success(
        &self,
        mut entry: LogEntry,
        start_time: std::time::Instant,
        subtopic_count: usize,
        parse_strategy: &str,
    ) {
        entry.status = "success".to_string();
        entry.duration_ms = Some(start_time.elapsed().as_millis() as u64);
        entry.subtopic_count = Some(subtopic_count);
        entry.parse_strategy = Some(parse_strategy.to_string());
        self.write_entry(&entry);
    }

    /// 记录错误
    pub fn finish_error(
        &self,
        mut entry: LogEntry,
        start_time: std::time::Instant,
        error_type: &str,
        error_message: &str,
        upstream_status: Option<u16>,
    ) {
        entry.status = "error".to_string();
        entry.duration_ms = Some(start_time.elapsed().as_millis() as u64);
        entry.error_type = Some(error_type.to_string());
        entry.error_message = Some(Self::truncate(error_message, 500));
        entry.upstream_status = upstream_status;
        self.write_entry(&entry);
    }

    /// 截断字符串，始终落在字符边界上
    fn truncate(s: &str, max_len: usize) -> String {
        if s.len() <= max_len {
            s.to_string()
        } else {
            let mut end = max_len;
            while !s.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &s[..end])
        }
    }

    /// 写入日志条目
    fn write_entry(&self, entry: &LogEntry) {
        let mut file_guard = self.file.lock();

        // 懒加载文件
        if file_guard.is_none() {
            if let Ok(f) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.log_path)
            {
                *file_guard = Some(f);
            }
        }

        if let Some(file) = file_guard.as_mut() {
            if let Ok(json) = serde_json::to_string(entry) {
                let _ = writeln!(file, "{}", json);
                let _ = file.flush();
            }
        }

        drop(file_guard);
        self.cleanup_if_needed();
    }

    /// 清理旧日志
    fn cleanup_if_needed(&self) {
        if let Ok(file) = File::open(&self.log_path) {
            let reader = BufReader::new(file);
            let lines: Vec<String> = reader.lines().filter_map(|l| l.ok()).collect();

            if lines.len() > self.max_entries {
                let keep_lines = &lines[lines.len() - self.max_entries..];
                if let Ok(mut file) = File::create(&self.log_path) {
                    for line in keep_lines {
                        let _ = writeln!(file, "{}", line);
                    }
                }
            }
        }
    }
}

impl Default for RequestLogger {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_id() {
        let id = RequestLogger::generate_request_id();
        assert_eq!(id.len(), 8);
        assert_ne!(id, RequestLogger::generate_request_id());
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        // '€' 占 3 字节，横跨截断点
        let msg = format!("{}€", "a".repeat(499));
        let out = RequestLogger::truncate(&msg, 500);
        assert_eq!(out, format!("{}...", "a".repeat(499)));

        assert_eq!(RequestLogger::truncate("short", 500), "short");
    }

    #[test]
    fn test_write_entry_appends_jsonl() {
        let dir = std::env::temp_dir().join(format!("gen-log-{}", Uuid::new_v4()));
        let logger = RequestLogger::new(Some(dir.clone()));

        let entry = logger.begin("abcd1234", "Physics", "google/gemini-2.5-flash");
        logger.finish_success(entry, std::time::Instant::now(), 9, "json_array");

        let content = fs::read_to_string(dir.join("generation_requests.jsonl")).unwrap();
        let parsed: LogEntry = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(parsed.request_id, "abcd1234");
        assert_eq!(parsed.subject_name, "Physics");
        assert_eq!(parsed.status, "success");
        assert_eq!(parsed.subtopic_count, Some(9));
        assert_eq!(parsed.parse_strategy.as_deref(), Some("json_array"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_error_entry_records_upstream_status() {
        let dir = std::env::temp_dir().join(format!("gen-log-{}", Uuid::new_v4()));
        let logger = RequestLogger::new(Some(dir.clone()));

        let entry = logger.begin("ef567890", "History", "google/gemini-2.5-flash");
        logger.finish_error(
            entry,
            std::time::Instant::now(),
            "rate_limited",
            "Rate limit exceeded. Please try again later.",
            Some(429),
        );

        let content = fs::read_to_string(dir.join("generation_requests.jsonl")).unwrap();
        let parsed: LogEntry = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(parsed.status, "error");
        assert_eq!(parsed.error_type.as_deref(), Some("rate_limited"));
        assert_eq!(parsed.upstream_status, Some(429));

        let _ = fs::remove_dir_all(&dir);
    }
}
