//! 报告输出
//!
//! 统计信息块输出为 ```` ```text ```` 围栏块，建议工具的输出原样写出。

use std::io::{self, Write};

use memchr::memchr;

use crate::parser::block::StatBlock;
use crate::parser::constants::{FENCE_CLOSE, FENCE_OPEN, SUMMARY_SEPARATOR};

/// 改写后报告的写出器
pub struct ReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// 写出横幅行
    pub fn write_banner(&mut self, banner: &str) -> io::Result<()> {
        self.writer.write_all(banner.as_bytes())?;
        self.writer.write_all(b"\n")
    }

    /// 写出一个统计信息块
    ///
    /// 块内容为空白时什么都不写，返回 `false`。
    /// 第一行是 `# Query <n>:` 时先写一行汇总（第一个冒号之前的部分），
    /// 之后总是写出完整的围栏块。
    pub fn print_stat_info(&mut self, block: &StatBlock) -> io::Result<bool> {
        if block.is_blank() {
            return Ok(false);
        }

        if block.starts_with_query_header() {
            self.writer.write_all(summary_line(block.first_line()).as_bytes())?;
            self.writer.write_all(b"\n")?;
        }

        self.writer.write_all(FENCE_OPEN.as_bytes())?;
        for line in &block.lines {
            self.writer.write_all(line.as_bytes())?;
        }
        self.writer.write_all(FENCE_CLOSE.as_bytes())?;
        Ok(true)
    }

    /// 原样写出建议工具的输出
    pub fn print_advice(&mut self, advice: &str) -> io::Result<()> {
        self.writer.write_all(advice.as_bytes())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// `# Query 1: 0.01 QPS, ...` -> `# Query 1`
fn summary_line(header: &str) -> &str {
    match memchr(SUMMARY_SEPARATOR, header.as_bytes()) {
        Some(pos) => &header[..pos],
        None => header.trim_end_matches(['\r', '\n']),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(block: &StatBlock) -> (bool, String) {
        let mut out = ReportWriter::new(Vec::new());
        let written = out.print_stat_info(block).unwrap();
        (written, String::from_utf8(out.into_inner()).unwrap())
    }

    #[test]
    fn query_block_has_summary_and_fence() {
        let mut block = StatBlock::new("# Query 1: 0.01 QPS, 0.00x concurrency\n".to_string());
        block.add_line("# Databases    test\n".to_string());
        let (written, text) = render(&block);
        assert!(written);
        assert_eq!(
            text,
            "# Query 1\n```text\n# Query 1: 0.01 QPS, 0.00x concurrency\n# Databases    test\n```\n"
        );
    }

    #[test]
    fn other_block_has_fence_only() {
        let block = StatBlock::new("# 340ms user time, 20ms system time\n".to_string());
        let (_, text) = render(&block);
        assert_eq!(text, "```text\n# 340ms user time, 20ms system time\n```\n");
    }

    #[test]
    fn blank_block_is_skipped() {
        let (written, text) = render(&StatBlock::new("   \n".to_string()));
        assert!(!written);
        assert!(text.is_empty());
    }

    #[test]
    fn summary_without_colon() {
        assert_eq!(summary_line("# Query 7\n"), "# Query 7");
        assert_eq!(summary_line("# Query 7: x"), "# Query 7");
    }

    #[test]
    fn advice_written_verbatim() {
        let mut out = ReportWriter::new(Vec::new());
        out.write_banner("# banner").unwrap();
        out.print_advice("## 建议\n\n").unwrap();
        assert_eq!(out.into_inner(), "# banner\n## 建议\n\n".as_bytes());
    }
}
