//! 命令行参数
//!
//! 本工具自身不识别任何选项：所有参数都原样透传给建议工具，
//! 只有最后一个参数是已存在的文件时才把它当作输入报告。

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::DigestError;
use crate::rewrite_config::default_advisor_args;

/// Rewrite a pt-query-digest report with per-query advice from SOAR.
#[derive(Parser, Debug)]
#[command(name = "digest-advisor", version, about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Flags passed to the advisor, optionally followed by the report file
    #[arg(
        value_name = "ARGS",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub tokens: Vec<String>,
}

impl Args {
    /// 解析进程命令行，`--` 也作为普通参数透传
    pub fn parse_verbatim() -> Self {
        Self::parse_from(escape_tokens(std::env::args_os()))
    }

    /// 同 [`Args::parse_verbatim`]，从给定的 argv（含程序名）解析
    pub fn try_parse_verbatim_from<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(escape_tokens(argv))
    }
}

/// 在程序名之后插入 `--`，clap 之后的参数一律按值收集
fn escape_tokens<I, T>(argv: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut argv = argv.into_iter().map(Into::into);
    let program = argv.next().unwrap_or_else(|| OsString::from("digest-advisor"));
    let mut escaped = vec![program, OsString::from("--")];
    escaped.extend(argv);
    escaped
}

/// 报告来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// 标准输入
    Stdin,
    /// 命令行最后一个参数指定的文件
    File(PathBuf),
}

impl InputSource {
    /// 打开报告来源
    pub fn open(&self) -> Result<Box<dyn Read>, DigestError> {
        match self {
            InputSource::Stdin => Ok(Box::new(io::stdin().lock())),
            InputSource::File(path) => {
                let file = File::open(path).map_err(|e| DigestError::FileNotFound {
                    path: format!("{}: {}", path.display(), e),
                })?;
                Ok(Box::new(file))
            }
        }
    }
}

/// 拆分后的命令行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// 透传给建议工具的参数
    pub advisor_args: Vec<String>,
    /// 报告来源
    pub input: InputSource,
}

impl Invocation {
    /// 拆分命令行参数
    ///
    /// - 没有任何参数：使用默认建议工具参数，从标准输入读取
    /// - 最后一个参数是已存在的文件：其余参数透传，从该文件读取
    /// - 否则：全部参数透传，从标准输入读取
    pub fn from_tokens(mut tokens: Vec<String>) -> Self {
        if tokens.is_empty() {
            return Self {
                advisor_args: default_advisor_args(),
                input: InputSource::Stdin,
            };
        }

        let last_is_file = tokens
            .last()
            .is_some_and(|last| Path::new(last).is_file());

        match tokens.pop() {
            Some(last) if last_is_file => Self {
                advisor_args: tokens,
                input: InputSource::File(PathBuf::from(last)),
            },
            Some(last) => {
                tokens.push(last);
                Self {
                    advisor_args: tokens,
                    input: InputSource::Stdin,
                }
            }
            None => Self {
                advisor_args: tokens,
                input: InputSource::Stdin,
            },
        }
    }
}

impl From<Args> for Invocation {
    fn from(args: Args) -> Self {
        Self::from_tokens(args.tokens)
    }
}
