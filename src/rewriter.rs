//! DigestRewriter - 报告改写状态机
//!
//! 逐行驱动分类、累积、刷新和建议工具调用，保证输出顺序与输入一致：
//! 同一位置产生的统计信息总是先于建议工具输出写出。

use std::io::Write;

use tracing::{debug, info, warn};

use crate::advisor::{Advisor, advise};
use crate::error::DigestError;
use crate::formatter::ReportWriter;
use crate::parser::block::{SqlBlock, StatBlock};
use crate::parser::context::DatabaseContext;
use crate::parser::line::{LineKind, classify_line};
use crate::tools::is_first_query_header;

/// 解析状态，只归 [`DigestRewriter`] 所有
#[derive(Debug, Default)]
pub struct ParserState {
    /// 当前统计信息块
    pub stat: Option<StatBlock>,
    /// 当前 SQL 块
    pub sql: Option<SqlBlock>,
    /// 待使用的数据库上下文
    pub database: DatabaseContext,
    /// 是否已输出横幅
    pub banner_emitted: bool,
}

/// 一次改写的统计数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewriteStats {
    /// 读取的行数（含空行）
    pub lines: usize,
    /// 跳过的空行数
    pub blank_lines: usize,
    /// 写出的统计信息块数
    pub stat_blocks: usize,
    /// 发送给建议工具的 SQL 数
    pub sql_dispatched: usize,
    /// 无法提取库名的 `# Databases` 行数
    pub malformed_headers: usize,
    /// 输入结束时被丢弃的统计信息块数（0 或 1）
    pub dropped_stat_blocks: usize,
    /// 输入结束时未以 `\G` 结束、因此未发送的 SQL 块数（0 或 1）
    pub dropped_sql_blocks: usize,
}

/// 报告改写器
///
/// # 类型参数
///
/// * `A` - SQL 建议工具
/// * `W` - 输出目标
pub struct DigestRewriter<A: Advisor, W: Write> {
    advisor: A,
    out: ReportWriter<W>,
    banner: String,
    state: ParserState,
    stats: RewriteStats,
}

impl<A: Advisor, W: Write> DigestRewriter<A, W> {
    pub fn new(advisor: A, writer: W, banner: impl Into<String>) -> Self {
        Self {
            advisor,
            out: ReportWriter::new(writer),
            banner: banner.into(),
            state: ParserState::default(),
            stats: RewriteStats::default(),
        }
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    pub fn stats(&self) -> RewriteStats {
        self.stats
    }

    /// 处理一行输入（应保留行尾换行符）
    pub fn feed_line(&mut self, line: String) -> Result<(), DigestError> {
        self.stats.lines += 1;

        match classify_line(&line) {
            LineKind::Blank => {
                self.stats.blank_lines += 1;
            }
            LineKind::DatabasesHeader => {
                if let Err(e) = self.state.database.update_from_header(&line) {
                    self.stats.malformed_headers += 1;
                    warn!(line = self.stats.lines, error = %e, "ignoring databases header");
                }
                self.append_stat(line);
            }
            LineKind::QueryHeader => {
                if !self.state.banner_emitted && is_first_query_header(&line) {
                    self.out.write_banner(&self.banner)?;
                    self.state.banner_emitted = true;
                }
                self.flush_stat()?;
                self.state.stat = Some(StatBlock::new(line));
            }
            LineKind::OtherComment => self.append_stat(line),
            LineKind::Sql { terminated } => {
                self.state
                    .sql
                    .get_or_insert_with(SqlBlock::default)
                    .add_line(line);
                if terminated {
                    self.flush_stat()?;
                    self.dispatch_sql()?;
                }
            }
        }

        Ok(())
    }

    /// 结束改写，返回统计数据和输出目标
    ///
    /// 输入结束时仍未刷新的统计信息块不会输出，未结束的 SQL 也不会发送。
    pub fn finish(mut self) -> Result<(RewriteStats, W), DigestError> {
        if let Some(block) = self.state.stat.take() {
            if !block.is_blank() {
                self.stats.dropped_stat_blocks += 1;
                debug!(lines = block.lines.len(), "dropping trailing statistics block");
            }
        }
        if let Some(block) = self.state.sql.take() {
            self.stats.dropped_sql_blocks += 1;
            debug!(lines = block.line_count(), "dropping unterminated sql block");
        }

        self.out.flush()?;
        info!(
            lines = self.stats.lines,
            stat_blocks = self.stats.stat_blocks,
            sql_dispatched = self.stats.sql_dispatched,
            "rewrite finished"
        );
        Ok((self.stats, self.out.into_inner()))
    }

    fn append_stat(&mut self, line: String) {
        self.state
            .stat
            .get_or_insert_with(StatBlock::default)
            .add_line(line);
    }

    /// 输出并清空当前统计信息块
    fn flush_stat(&mut self) -> Result<(), DigestError> {
        if let Some(block) = self.state.stat.take() {
            if self.out.print_stat_info(&block)? {
                self.stats.stat_blocks += 1;
            }
        }
        Ok(())
    }

    /// 把当前 SQL 块（加上数据库上下文）交给建议工具，并写出建议
    fn dispatch_sql(&mut self) -> Result<(), DigestError> {
        let Some(block) = self.state.sql.take() else {
            return Ok(());
        };

        let use_db = self.state.database.take();
        debug!(
            database = use_db.as_deref().unwrap_or(""),
            lines = block.line_count(),
            "dispatching sql to advisor"
        );

        let mut input = use_db.unwrap_or_default();
        input.push_str(&block.full_content());

        let advice = advise(&mut self.advisor, &input)?;
        self.out.print_advice(&advice)?;
        self.stats.sql_dispatched += 1;
        Ok(())
    }
}
