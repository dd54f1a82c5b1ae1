//! 数据库上下文
//!
//! pt-query-digest 在统计信息里用 `# Databases` 行给出查询所用的库。
//! 建议工具需要 `USE <db>;` 才能解析不带库名前缀的表，因此这里把库名提取出来，
//! 保存到下一条 SQL 发送时使用。

use crate::error::DigestError;
use crate::parser::constants::DATABASE_TOKEN_INDEX;

/// 待使用的数据库上下文
///
/// 至多保存一个 `USE <db>;` 指令，被下一条发送的 SQL 消费一次后清空。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DatabaseContext {
    pending: Option<String>,
}

impl DatabaseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置（覆盖）待使用的指令
    pub fn set(&mut self, directive: String) {
        self.pending = Some(directive);
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// 取出指令并清空
    pub fn take(&mut self) -> Option<String> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// 根据 `# Databases` 行更新上下文
    ///
    /// 字段不足时清空上下文并返回错误，调用方决定是否记录日志后继续。
    pub fn update_from_header(&mut self, line: &str) -> Result<(), DigestError> {
        match parse_use_database(line) {
            Ok(directive) => {
                self.set(directive);
                Ok(())
            }
            Err(e) => {
                self.clear();
                Err(e)
            }
        }
    }
}

/// 从 `# Databases` 行提取 `USE <db>;` 指令
///
/// 连续空白视为一个分隔符，取第三个字段作为库名。
///
/// # 示例
///
/// ```
/// use digest_advisor::parse_use_database;
///
/// let directive = parse_use_database("# Databases    sakila\n").unwrap();
/// assert_eq!(directive, "USE sakila;");
/// ```
pub fn parse_use_database(line: &str) -> Result<String, DigestError> {
    let mut fields = line.split_whitespace();
    match fields.nth(DATABASE_TOKEN_INDEX) {
        Some(db) => Ok(format!("USE {db};")),
        None => Err(DigestError::MalformedHeader {
            fields: line.split_whitespace().count(),
            raw: line.trim_end().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_database() {
        assert_eq!(
            parse_use_database("# Databases    sakila\n").unwrap(),
            "USE sakila;"
        );
    }

    #[test]
    fn multiple_databases_takes_first() {
        let line = "# Databases    db1 (2/66%), db2 (1/33%)\n";
        assert_eq!(parse_use_database(line).unwrap(), "USE db1;");
    }

    #[test]
    fn too_few_fields() {
        let err = parse_use_database("# Databases \n").unwrap_err();
        assert!(matches!(err, DigestError::MalformedHeader { fields: 2, .. }));
    }

    #[test]
    fn context_is_consumed_once() {
        let mut ctx = DatabaseContext::new();
        ctx.update_from_header("# Databases  test\n").unwrap();
        assert_eq!(ctx.pending(), Some("USE test;"));
        assert_eq!(ctx.take().as_deref(), Some("USE test;"));
        assert_eq!(ctx.take(), None);
    }

    #[test]
    fn malformed_header_clears_context() {
        let mut ctx = DatabaseContext::new();
        ctx.set("USE old;".to_string());
        assert!(ctx.update_from_header("# Databases ").is_err());
        assert_eq!(ctx.pending(), None);
    }
}
