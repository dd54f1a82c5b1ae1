//! 行分类
//!
//! 将报告中的一行映射为 [`LineKind`]，分类是全函数：任何输入行都有且只有一个类别。

use crate::tools::{
    has_terminator, is_blank_line, is_comment_line, is_databases_header, is_query_header,
};

/// 报告行的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineKind {
    /// 空行（只含空白），直接跳过
    Blank,
    /// `# Databases <db>` 行，携带当前查询使用的数据库
    DatabasesHeader,
    /// `# Query <n>: ...` 行，一条查询统计信息的开头
    QueryHeader,
    /// 其他以 `#` 开头的统计信息行
    OtherComment,
    /// SQL 行，`terminated` 表示该行以 `\G` 结尾
    Sql {
        /// 是否以 `\G` 结束当前 SQL
        terminated: bool,
    },
}

impl LineKind {
    /// 是否属于统计信息（以 `#` 开头的行）
    pub fn is_comment(&self) -> bool {
        matches!(
            self,
            LineKind::DatabasesHeader | LineKind::QueryHeader | LineKind::OtherComment
        )
    }
}

/// 对一行进行分类
///
/// 按顺序检查：
/// 1. 去掉空白后为空 -> `Blank`
/// 2. 以 `#` 开头：`# Databases ` 且不以 `more` 结尾 -> `DatabasesHeader`；
///    `# Query <数字>` -> `QueryHeader`；其余 -> `OtherComment`
/// 3. 其他 -> `Sql`，去掉空白后以 `\G` 结尾时 `terminated` 为 `true`
///
/// # 示例
///
/// ```
/// use digest_advisor::{LineKind, classify_line};
///
/// assert_eq!(classify_line("# Query 1: 0.01 QPS\n"), LineKind::QueryHeader);
/// assert_eq!(classify_line("SELECT 1\\G\n"), LineKind::Sql { terminated: true });
/// ```
pub fn classify_line(line: &str) -> LineKind {
    if is_blank_line(line) {
        return LineKind::Blank;
    }

    if is_comment_line(line) {
        if is_databases_header(line) {
            LineKind::DatabasesHeader
        } else if is_query_header(line) {
            LineKind::QueryHeader
        } else {
            LineKind::OtherComment
        }
    } else {
        LineKind::Sql {
            terminated: has_terminator(line),
        }
    }
}
