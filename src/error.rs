//! 错误类型定义
//!
//! 定义了报告改写过程中可能出现的所有错误类型。

use std::process::ExitStatus;

use thiserror::Error;

/// 改写错误类型
///
/// 除 `MalformedHeader` 会被记录日志后当作“无数据库上下文”处理外，
/// 其余错误都会终止整个运行。
#[derive(Debug, Error)]
pub enum DigestError {
    /// 输入文件未找到或无法访问
    #[error("file not found or inaccessible: {path}")]
    FileNotFound {
        /// 文件路径及底层错误信息
        path: String,
    },

    /// 读取输入或写出报告时的 I/O 错误
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 无法启动外部建议工具
    #[error("failed to start advisor `{program}`: {source}")]
    AdvisorSpawn {
        /// 建议工具程序名
        program: String,
        /// 底层错误
        #[source]
        source: std::io::Error,
    },

    /// 与建议工具通信（写入 SQL / 读取输出）失败
    #[error("advisor `{program}` I/O failed: {source}")]
    AdvisorIo {
        /// 建议工具程序名
        program: String,
        /// 底层错误
        #[source]
        source: std::io::Error,
    },

    /// 建议工具非正常退出
    #[error("advisor `{program}` exited abnormally: {status}")]
    AdvisorFailed {
        /// 建议工具程序名
        program: String,
        /// 退出状态
        status: ExitStatus,
    },

    /// `# Databases` 行中没有足够的字段来提取库名
    #[error("malformed databases header: expected at least 3 fields, got {fields} in '{raw}'")]
    MalformedHeader {
        /// 实际字段数
        fields: usize,
        /// 原始行内容
        raw: String,
    },
}
