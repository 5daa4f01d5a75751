//! 子主题解析
//!
//! 将模型的自由文本回复解析为干净的子主题列表。
//! 解析失败从不向调用方暴露，只会退化到按行提取。
//! 解析是输入字符串的纯函数，不依赖任何外部状态。

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// 匹配首个 JSON 数组字面量（非贪婪，跨行）
static ARRAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[.*?\]").unwrap());

/// 匹配行首的列表标记（`-` `•` `*` 数字 `.` 的连续串加空白）
static MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-•*\d.]+\s*").unwrap());

/// 解析时实际采用的策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// 直接解析出 JSON 数组
    JsonArray,
    /// 未找到数组字面量，按行提取并剥离列表标记
    LineSplit,
    /// 找到数组字面量但解析失败，按行抢救
    Salvage,
}

impl ParseStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseStrategy::JsonArray => "json_array",
            ParseStrategy::LineSplit => "line_split",
            ParseStrategy::Salvage => "salvage",
        }
    }
}

/// 解析子主题列表，并返回采用的策略
///
/// 优先级：JSON 数组 > 行提取。两条回退路径是刻意分开的，
/// 行为不同（见各自的函数说明），不要合并。
pub fn parse_subtopics(content: &str) -> (Vec<String>, ParseStrategy) {
    if let Some(matched) = ARRAY_RE.find(content) {
        match serde_json::from_str::<Vec<String>>(matched.as_str()) {
            Ok(subtopics) => return (subtopics, ParseStrategy::JsonArray),
            Err(e) => {
                warn!("Failed to parse subtopic array, salvaging lines: {}", e);
                return (salvage_lines(content), ParseStrategy::Salvage);
            }
        }
    }

    (split_list_lines(content), ParseStrategy::LineSplit)
}

/// 未找到数组字面量时的回退：按行提取
///
/// 丢弃空行和纯括号行，剥离行首列表标记和一对外围引号。
fn split_list_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && *line != "[" && *line != "]")
        .map(|line| {
            let stripped = MARKER_RE.replace(line, "");
            strip_outer_quotes(&stripped).trim().to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// 数组字面量解析失败时的回退：按行抢救
///
/// 只保留长度大于 2 的行，最多取前 10 条，不做任何剥离。
fn salvage_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| line.len() > 2)
        .take(10)
        .map(str::to_string)
        .collect()
}

/// 剥离一对外围引号（首尾最多各一个）
fn strip_outer_quotes(line: &str) -> &str {
    let line = line.strip_prefix(['"', '\'']).unwrap_or(line);
    line.strip_suffix(['"', '\'']).unwrap_or(line)
}
