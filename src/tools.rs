//! 行判定工具函数
//!
//! pt-query-digest 报告的每一行都只需看行首或去掉首尾空白后的行尾即可判定类别，
//! 这里全部基于字节比较实现，不依赖正则表达式。

// 行首前缀常量
const COMMENT_BYTE: u8 = b'#';
const DATABASES_PREFIX: &[u8] = b"# Databases ";
const QUERY_PREFIX: &[u8] = b"# Query ";
const FIRST_QUERY_PREFIX: &[u8] = b"# Query 1:";

// 行尾标记常量
const MORE_SUFFIX: &[u8] = b"more";
const TERMINATOR: &[u8] = b"\\G";

/// 去掉首尾 ASCII 空白（含换行符）后的内容
#[inline(always)]
pub fn trimmed(line: &str) -> &[u8] {
    line.as_bytes().trim_ascii()
}

/// 判断是否为空行（只含空白字符）
#[inline]
pub fn is_blank_line(line: &str) -> bool {
    trimmed(line).is_empty()
}

/// 判断是否为注释行（统计信息行），即行首为 `#`
#[inline]
pub fn is_comment_line(line: &str) -> bool {
    line.as_bytes().first() == Some(&COMMENT_BYTE)
}

/// 判断是否为 `# Databases` 行。
///
/// 判断标准
/// 1. 行首为 `# Databases `（注意末尾空格）。
/// 2. 去掉空白后不以 `more` 结尾（库太多时 pt-query-digest 会输出 `... 2 more`，此时无法确定库名）。
pub fn is_databases_header(line: &str) -> bool {
    line.as_bytes().starts_with(DATABASES_PREFIX) && !trimmed(line).ends_with(MORE_SUFFIX)
}

/// 判断是否为 `# Query <数字>` 行，数字必须紧跟在 `Query ` 之后
pub fn is_query_header(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.starts_with(QUERY_PREFIX)
        && bytes
            .get(QUERY_PREFIX.len())
            .is_some_and(|b| b.is_ascii_digit())
}

/// 判断是否为报告中的第一条查询 `# Query 1:`
#[inline]
pub fn is_first_query_header(line: &str) -> bool {
    line.as_bytes().starts_with(FIRST_QUERY_PREFIX)
}

/// 判断 SQL 行是否以结束标记 `\G` 结尾（忽略首尾空白）
#[inline]
pub fn has_terminator(line: &str) -> bool {
    trimmed(line).ends_with(TERMINATOR)
}
