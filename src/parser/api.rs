//! 便捷 API 函数
//!
//! 提供了一组方便使用的高层 API，用于一次性改写整份 pt-query-digest 报告。

use crate::advisor::Advisor;
use crate::error::DigestError;
use crate::parser::constants::DEFAULT_BANNER;
use crate::parser::line_reader::LineReader;
use crate::rewriter::{DigestRewriter, RewriteStats};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// 从任意 Reader 读取报告，改写后写入 Writer
///
/// 使用默认横幅。需要自定义横幅时直接使用 [`rewrite_report_with_banner`]。
///
/// # 参数
///
/// * `reader` - pt-query-digest 报告来源
/// * `writer` - 改写后报告的输出目标
/// * `advisor` - SQL 建议工具
///
/// # 返回
///
/// * `Ok(RewriteStats)` - 改写完成
/// * `Err(DigestError)` - 读写失败或建议工具调用失败，整个改写中止
///
/// # 示例
///
/// ```
/// use digest_advisor::{DigestError, rewrite_report};
///
/// let report = "# Query 1: 0.01 QPS\nSELECT 1\\G\n";
/// let mut out = Vec::new();
/// let advisor = |_: &str| -> Result<String, DigestError> { Ok("# Query: 1\nOK\n".to_string()) };
///
/// let stats = rewrite_report(report.as_bytes(), &mut out, advisor)?;
/// assert_eq!(stats.sql_dispatched, 1);
/// # Ok::<(), DigestError>(())
/// ```
pub fn rewrite_report<R, W, A>(
    reader: R,
    writer: W,
    advisor: A,
) -> Result<RewriteStats, DigestError>
where
    R: Read,
    W: Write,
    A: Advisor,
{
    rewrite_report_with_banner(reader, writer, advisor, DEFAULT_BANNER)
}

/// 与 [`rewrite_report`] 相同，但使用指定的横幅
pub fn rewrite_report_with_banner<R, W, A>(
    reader: R,
    writer: W,
    advisor: A,
    banner: &str,
) -> Result<RewriteStats, DigestError>
where
    R: Read,
    W: Write,
    A: Advisor,
{
    let mut rewriter = DigestRewriter::new(advisor, writer, banner);
    for line in LineReader::new(BufReader::new(reader)) {
        rewriter.feed_line(line?)?;
    }
    let (stats, _) = rewriter.finish()?;
    Ok(stats)
}

/// 从文件读取报告并改写
///
/// 文件打开失败时在任何输出之前返回 `FileNotFound`。
///
/// # 示例
///
/// ```no_run
/// use digest_advisor::{SoarAdvisor, rewrite_report_from_file};
///
/// let advisor = SoarAdvisor::new("soar", ["-ignore-rules=OK"]);
/// let stats = rewrite_report_from_file("slow.digest", std::io::stdout(), advisor)?;
/// eprintln!("分析了 {} 条 SQL", stats.sql_dispatched);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn rewrite_report_from_file<P, W, A>(
    path: P,
    writer: W,
    advisor: A,
) -> Result<RewriteStats, DigestError>
where
    P: AsRef<Path>,
    W: Write,
    A: Advisor,
{
    let path_ref = path.as_ref();
    let file = File::open(path_ref).map_err(|e| DigestError::FileNotFound {
        path: format!("{}: {}", path_ref.display(), e),
    })?;
    rewrite_report(file, writer, advisor)
}

/// 改写内存中的报告，返回改写结果
pub fn rewrite_report_to_string<A: Advisor>(
    input: &str,
    advisor: A,
) -> Result<String, DigestError> {
    let mut out = Vec::with_capacity(input.len());
    rewrite_report(input.as_bytes(), &mut out, advisor)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
