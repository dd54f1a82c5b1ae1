//! 改写报告使用的常量定义
//!
//! 定义了输出格式中的围栏标记、默认横幅、建议工具默认参数等。

/// 统计信息块的起始围栏
pub const FENCE_OPEN: &str = "```text\n";

/// 统计信息块的结束围栏
pub const FENCE_CLOSE: &str = "```\n";

/// 第一条查询之前输出的一次性横幅
pub const DEFAULT_BANNER: &str = "# pt-query-digest统计信息";

/// 默认的 SQL 建议工具
pub const DEFAULT_ADVISOR_PROGRAM: &str = "soar";

/// 命令行没有任何参数时传给建议工具的默认参数
pub const DEFAULT_ADVISOR_ARGS: [&str; 1] = ["-ignore-rules=OK"];

/// `USE <db>;` 中库名所在的字段下标（`#`、`Databases`、库名）
pub const DATABASE_TOKEN_INDEX: usize = 2;

/// 汇总行截取到第一个冒号之前
pub const SUMMARY_SEPARATOR: u8 = b':';
