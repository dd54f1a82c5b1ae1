//! 改写配置模块
//!
//! 集中保存建议工具的命令、参数和横幅文本。默认值可以通过环境变量覆盖，
//! 命令行层只需把透传参数填进来即可。

use once_cell::sync::Lazy;

use crate::parser::constants::{DEFAULT_ADVISOR_ARGS, DEFAULT_ADVISOR_PROGRAM, DEFAULT_BANNER};

/// 覆盖建议工具程序的环境变量
pub const ADVISOR_BIN_ENV: &str = "DIGEST_ADVISOR_BIN";

/// 覆盖横幅文本的环境变量
pub const BANNER_ENV: &str = "DIGEST_BANNER";

// 环境变量只在首次使用时读取一次
static ENV_ADVISOR_PROGRAM: Lazy<String> = Lazy::new(|| {
    resolve_override(std::env::var(ADVISOR_BIN_ENV).ok(), DEFAULT_ADVISOR_PROGRAM)
});

static ENV_BANNER: Lazy<String> =
    Lazy::new(|| resolve_override(std::env::var(BANNER_ENV).ok(), DEFAULT_BANNER));

/// 环境变量未设置或为空白时回退到默认值
fn resolve_override(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// 改写配置
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewriteConfig {
    /// 建议工具程序名或路径
    pub advisor_program: String,

    /// 每次调用建议工具时透传的参数
    pub advisor_args: Vec<String>,

    /// 遇到 `# Query 1:` 时输出的一次性横幅
    pub banner: String,
}

impl RewriteConfig {
    /// 内置默认配置（不读取环境变量）
    pub fn builtin() -> Self {
        Self {
            advisor_program: DEFAULT_ADVISOR_PROGRAM.to_string(),
            advisor_args: default_advisor_args(),
            banner: DEFAULT_BANNER.to_string(),
        }
    }

    /// 以环境变量覆盖后的默认配置
    pub fn from_env() -> Self {
        Self {
            advisor_program: ENV_ADVISOR_PROGRAM.clone(),
            advisor_args: default_advisor_args(),
            banner: ENV_BANNER.clone(),
        }
    }

    /// 替换透传参数
    pub fn with_advisor_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.advisor_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_advisor_program(mut self, program: impl Into<String>) -> Self {
        self.advisor_program = program.into();
        self
    }

    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// 没有任何命令行参数时使用的建议工具参数
pub fn default_advisor_args() -> Vec<String> {
    DEFAULT_ADVISOR_ARGS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_config() {
        let config = RewriteConfig::builtin();
        assert_eq!(config.advisor_program, "soar");
        assert_eq!(config.advisor_args, vec!["-ignore-rules=OK"]);
        assert_eq!(config.banner, DEFAULT_BANNER);
    }

    #[test]
    fn test_builders() {
        let config = RewriteConfig::builtin()
            .with_advisor_program("/usr/local/bin/soar")
            .with_advisor_args(["-report-type=markdown", "-log-level=0"])
            .with_banner("# report");
        assert_eq!(config.advisor_program, "/usr/local/bin/soar");
        assert_eq!(config.advisor_args.len(), 2);
        assert_eq!(config.banner, "# report");
    }

    #[test]
    fn test_resolve_override() {
        let value = resolve_override(Some("/opt/soar/bin/soar".to_string()), "soar");
        assert_eq!(value, "/opt/soar/bin/soar");
        assert_eq!(resolve_override(None, "soar"), "soar");
        assert_eq!(resolve_override(Some(String::new()), "soar"), "soar");
        assert_eq!(resolve_override(Some("  \t".to_string()), DEFAULT_BANNER), DEFAULT_BANNER);
    }

    #[test]
    fn test_empty_passthrough_args() {
        let config = RewriteConfig::builtin().with_advisor_args(Vec::<String>::new());
        assert!(config.advisor_args.is_empty());
    }
}
