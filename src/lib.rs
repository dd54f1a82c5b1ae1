//! # Digest Advisor
//!
//! 将 pt-query-digest 的分析报告与 SQL 优化建议工具（默认 [SOAR](https://github.com/XiaoMi/soar)）结合，
//! 生成一份完整的慢查询分析报告。
//!
//! ## 功能特性
//!
//! - **保留统计信息**: 每条查询的统计信息原样保存在 ```` ```text ```` 围栏块中
//! - **逐条建议**: 报告中的每条 SQL 都会交给建议工具，并用建议结果替换原 SQL
//! - **数据库上下文**: 根据 `# Databases` 行自动在 SQL 前加上 `USE <db>;`
//! - **顺序一致**: 单线程逐行处理，输出顺序与输入完全一致
//!
//! ## 快速开始
//!
//! ```rust
//! use digest_advisor::{DigestError, rewrite_report_to_string};
//!
//! let report = "# Query 1: 0.01 QPS, 0.00x concurrency\n\
//!               ## Databases    sakila\n\
//!               SELECT * FROM film\\G\n";
//!
//! // 测试时可以用闭包代替外部建议工具
//! let advisor = |sql: &str| -> Result<String, DigestError> {
//!     assert!(sql.starts_with("USE sakila;"));
//!     Ok("# Query: 6A4E3B\n## 建议使用 LIMIT\n".to_string())
//! };
//!
//! let output = rewrite_report_to_string(report, advisor)?;
//! assert!(output.contains("```text\n"));
//! assert!(output.ends_with("## 建议使用 LIMIT\n\n"));
//! # Ok::<(), DigestError>(())
//! ```
//!
//! ### 调用 SOAR
//!
//! ```rust,no_run
//! use digest_advisor::{SoarAdvisor, rewrite_report_from_file};
//!
//! let advisor = SoarAdvisor::new("soar", ["-ignore-rules=OK"]);
//! rewrite_report_from_file("slow.digest", std::io::stdout(), advisor)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## 报告格式
//!
//! 输入（pt-query-digest 输出片段）：
//!
//! ```text
//! # Query 1: 0.01 QPS, 0.00x concurrency, ID 0x6A4E3B... at byte 1024
//! # Databases    sakila
//! SELECT * FROM film\G
//! ```
//!
//! 输出：
//!
//! ````text
//! # pt-query-digest统计信息
//! # Query 1
//! ```text
//! # Query 1: 0.01 QPS, 0.00x concurrency, ID 0x6A4E3B... at byte 1024
//! # Databases    sakila
//! ```
//! <建议工具输出，去掉第一行>
//! ````

pub mod advisor;
pub mod cli;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod rewrite_config;
pub mod rewriter;
pub mod tools;

pub use advisor::{Advisor, SoarAdvisor, advise, trim_advisor_header};
pub use error::DigestError;
pub use formatter::ReportWriter;
pub use parser::{
    DatabaseContext,
    LineKind,
    LineReader,
    SqlBlock,
    StatBlock,
    classify_line,
    parse_use_database,
    rewrite_report,
    rewrite_report_from_file,
    rewrite_report_to_string,
    rewrite_report_with_banner,
};
pub use rewrite_config::RewriteConfig;
pub use rewriter::{DigestRewriter, ParserState, RewriteStats};
