//! SQL 建议工具调用
//!
//! 每条 SQL 都单独启动一次建议工具进程：写入 SQL 并关闭标准输入，读完标准输出，
//! 再等待进程退出。整个调用是同步阻塞的，没有超时。

use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};
use std::thread;

use memchr::memchr;
use tracing::debug;

use crate::error::DigestError;
use crate::rewrite_config::RewriteConfig;

/// SQL 建议工具
///
/// `consult` 返回工具的原始输出，去掉首行等后处理由 [`advise`] 完成。
pub trait Advisor {
    fn consult(&mut self, input: &str) -> Result<String, DigestError>;
}

/// 闭包也可以作为建议工具，便于测试时替换外部进程
impl<F> Advisor for F
where
    F: FnMut(&str) -> Result<String, DigestError>,
{
    fn consult(&mut self, input: &str) -> Result<String, DigestError> {
        self(input)
    }
}

/// 以子进程方式调用的建议工具（默认为 `soar`）
#[derive(Debug, Clone)]
pub struct SoarAdvisor {
    program: String,
    args: Vec<String>,
}

impl SoarAdvisor {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &RewriteConfig) -> Self {
        Self::new(config.advisor_program.clone(), config.advisor_args.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn io_error(&self, source: std::io::Error) -> DigestError {
        DigestError::AdvisorIo {
            program: self.program.clone(),
            source,
        }
    }

    /// 写入 SQL、读取输出并等待退出
    ///
    /// 写入放在单独线程里，保证工具在读完输入前就大量输出时也不会互相阻塞。
    fn communicate(&self, child: &mut Child, input: &str) -> Result<Vec<u8>, DigestError> {
        let stdin = child.stdin.take();
        let mut stdout = child.stdout.take();

        let (write_result, read_result) = thread::scope(|s| {
            let writer = s.spawn(move || match stdin {
                // stdin 在闭包结束时被 drop，工具随即收到 EOF
                Some(mut stdin) => stdin.write_all(input.as_bytes()),
                None => Ok(()),
            });

            let mut output = Vec::new();
            let read_result = match stdout.as_mut() {
                Some(out) => out.read_to_end(&mut output).map(|_| output),
                None => Ok(output),
            };

            let write_result = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (write_result, read_result)
        });

        let status = child.wait().map_err(|e| self.io_error(e))?;

        // 工具不读输入就退出时写入会遇到 BrokenPipe，以退出状态为准
        if let Err(e) = write_result {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(self.io_error(e));
            }
        }
        let output = read_result.map_err(|e| self.io_error(e))?;

        if !status.success() {
            return Err(DigestError::AdvisorFailed {
                program: self.program.clone(),
                status,
            });
        }

        Ok(output)
    }
}

impl Advisor for SoarAdvisor {
    fn consult(&mut self, input: &str) -> Result<String, DigestError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| DigestError::AdvisorSpawn {
                program: self.program.clone(),
                source,
            })?;

        let result = self.communicate(&mut child, input);
        if result.is_err() {
            // 出错时确保子进程被回收
            let _ = child.kill();
            let _ = child.wait();
        }

        let output = result?;
        debug!(
            program = %self.program,
            input_bytes = input.len(),
            output_bytes = output.len(),
            "advisor finished"
        );
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

/// 去掉建议工具输出的第一行（形如 `# Query: xxxx` 的查询标识）
///
/// 没有换行符时原样返回。
///
/// # 示例
///
/// ```
/// use digest_advisor::trim_advisor_header;
///
/// assert_eq!(trim_advisor_header("# Query: abc\nadvice\n"), "advice\n");
/// assert_eq!(trim_advisor_header("no newline"), "no newline");
/// ```
pub fn trim_advisor_header(output: &str) -> &str {
    match memchr(b'\n', output.as_bytes()) {
        Some(pos) => &output[pos + 1..],
        None => output,
    }
}

/// 调用建议工具并完成后处理：去掉首行，末尾补一个换行符
pub fn advise<A: Advisor + ?Sized>(advisor: &mut A, input: &str) -> Result<String, DigestError> {
    let raw = advisor.consult(input)?;
    let mut advice = trim_advisor_header(&raw).to_string();
    advice.push('\n');
    Ok(advice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_header_with_newline() {
        assert_eq!(trim_advisor_header("# Query: abc\nline1\nline2\n"), "line1\nline2\n");
        assert_eq!(trim_advisor_header("only header\n"), "");
    }

    #[test]
    fn trim_header_without_newline() {
        assert_eq!(trim_advisor_header("single"), "single");
        assert_eq!(trim_advisor_header(""), "");
    }

    #[test]
    fn advise_appends_newline() {
        let mut stub = |_: &str| -> Result<String, DigestError> {
            Ok("# Query: abc\nadvice-line\n".to_string())
        };
        assert_eq!(advise(&mut stub, "SELECT 1\\G\n").unwrap(), "advice-line\n\n");
    }

    #[test]
    fn advise_passes_input_through() {
        let mut seen = Vec::new();
        let mut stub = |input: &str| -> Result<String, DigestError> {
            seen.push(input.to_string());
            Ok(String::new())
        };
        assert_eq!(advise(&mut stub, "USE db;SELECT 1\\G\n").unwrap(), "\n");
        assert_eq!(seen, vec!["USE db;SELECT 1\\G\n"]);
    }

    #[test]
    fn spawn_failure_is_reported() {
        let mut advisor = SoarAdvisor::new("digest-advisor-no-such-program", Vec::<String>::new());
        let err = advisor.consult("SELECT 1\\G\n").unwrap_err();
        assert!(matches!(err, DigestError::AdvisorSpawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn cat_echoes_input() {
        let mut advisor = SoarAdvisor::new("cat", Vec::<String>::new());
        let out = advisor.consult("# Query: x\nSELECT 1\\G\n").unwrap();
        assert_eq!(out, "# Query: x\nSELECT 1\\G\n");
        assert_eq!(advise(&mut advisor, "# Query: x\nSELECT 1\\G\n").unwrap(), "SELECT 1\\G\n\n");
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_fatal() {
        let mut advisor = SoarAdvisor::new("sh", ["-c", "cat >/dev/null; exit 3"]);
        let err = advisor.consult("SELECT 1\\G\n").unwrap_err();
        assert!(matches!(err, DigestError::AdvisorFailed { .. }));
    }
}
