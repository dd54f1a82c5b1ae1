//! digest-advisor CLI entry point.

use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use digest_advisor::cli::{Args, InputSource, Invocation};
use digest_advisor::{RewriteConfig, SoarAdvisor, rewrite_report_with_banner};

fn main() -> Result<()> {
    let args = Args::parse_verbatim();

    // 日志写到 stderr，避免混入报告
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let invocation = Invocation::from(args);
    let config = RewriteConfig::from_env().with_advisor_args(invocation.advisor_args);
    let advisor = SoarAdvisor::from_config(&config);
    tracing::debug!(
        program = %advisor.program(),
        args = ?advisor.args(),
        input = ?invocation.input,
        "starting rewrite"
    );

    let reader = invocation.input.open().with_context(|| match &invocation.input {
        InputSource::File(path) => format!("Failed to open report: {}", path.display()),
        InputSource::Stdin => "Failed to read report from stdin".to_string(),
    })?;

    let stdout = io::stdout();
    let writer = BufWriter::new(stdout.lock());

    let stats = rewrite_report_with_banner(reader, writer, advisor, &config.banner)
        .context("Failed to rewrite pt-query-digest report")?;

    tracing::info!(
        sql = stats.sql_dispatched,
        stat_blocks = stats.stat_blocks,
        "done"
    );
    Ok(())
}
