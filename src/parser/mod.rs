//! Parser 模块 - 解析 pt-query-digest 报告
//!
//! 此模块提供了报告解析所需的全部组件,包括:
//! - 行分类
//! - 统计信息块 / SQL 块的累积
//! - 数据库上下文提取
//! - 流式逐行读取
//! - 便捷 API 函数

mod api;
pub(crate) mod constants;
pub mod block;
pub mod context;
pub mod line;
pub mod line_reader;

pub use api::{
    rewrite_report, rewrite_report_from_file, rewrite_report_to_string,
    rewrite_report_with_banner,
};
pub use block::{SqlBlock, StatBlock};
pub use context::{DatabaseContext, parse_use_database};
pub use line::{LineKind, classify_line};
pub use line_reader::LineReader;
