//! 统计信息块与 SQL 块
//!
//! 两种块都按输入顺序保存原始行（保留行尾换行符），拼接后即为原文。

use crate::parser::line::{LineKind, classify_line};

/// 一条查询的统计信息块
///
/// 通常以 `# Query <n>:` 行开头，后续是若干 `#` 开头的统计行。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatBlock {
    /// 块内所有原始行
    pub lines: Vec<String>,
}

impl StatBlock {
    /// 以第一行创建统计块
    pub fn new(first_line: String) -> Self {
        Self {
            lines: vec![first_line],
        }
    }

    /// 追加一行
    pub fn add_line(&mut self, line: String) {
        self.lines.push(line);
    }

    /// 第一行（不存在时返回空串）
    pub fn first_line(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or("")
    }

    /// 是否以 `# Query <n>` 行开头
    pub fn starts_with_query_header(&self) -> bool {
        classify_line(self.first_line()) == LineKind::QueryHeader
    }

    /// 拼接后的完整内容
    pub fn full_content(&self) -> String {
        self.lines.concat()
    }

    /// 去掉空白后是否为空
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }
}

/// 一条 SQL 语句，最后一行以 `\G` 结束
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SqlBlock {
    /// 块内所有原始行
    pub lines: Vec<String>,
}

impl SqlBlock {
    pub fn new(first_line: String) -> Self {
        Self {
            lines: vec![first_line],
        }
    }

    pub fn add_line(&mut self, line: String) {
        self.lines.push(line);
    }

    /// 拼接后的 SQL 原文，`\G` 保持不变
    pub fn full_content(&self) -> String {
        self.lines.concat()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
