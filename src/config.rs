use std::env;

/// GitHub API 根地址
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_LISTEN: &str = "0.0.0.0:3000";
pub const DEFAULT_FONT_FAMILY: &str = "Inter";
pub const DEFAULT_FONT_REGULAR: &str =
    "https://cdn.jsdelivr.net/fontsource/fonts/inter@latest/latin-400-normal.ttf";
pub const DEFAULT_FONT_BOLD: &str =
    "https://cdn.jsdelivr.net/fontsource/fonts/inter@latest/latin-700-normal.ttf";

/// 服务配置
///
/// 全部来自环境变量：
///
/// - `GITHUB_TOKEN`：访问 gist API 的 token，未设置时列表接口返回 500
/// - `GISTBLOG_API_BASE`：API 根地址
/// - `GISTBLOG_LISTEN`：监听地址
/// - `GISTBLOG_FONT_REGULAR` / `GISTBLOG_FONT_BOLD`：字体地址或本地路径
/// - `GISTBLOG_FONT_FAMILY`：分享图使用的字体族
#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub api_base: String,
    pub listen: String,
    pub font_family: String,
    pub font_regular: String,
    pub font_bold: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            api_base: DEFAULT_API_BASE.to_string(),
            listen: DEFAULT_LISTEN.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_regular: DEFAULT_FONT_REGULAR.to_string(),
            font_bold: DEFAULT_FONT_BOLD.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 通过 `lookup` 读取每个变量，空值视为未设置
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            github_token: get("GITHUB_TOKEN"),
            api_base: get("GISTBLOG_API_BASE").unwrap_or(defaults.api_base),
            listen: get("GISTBLOG_LISTEN").unwrap_or(defaults.listen),
            font_family: get("GISTBLOG_FONT_FAMILY").unwrap_or(defaults.font_family),
            font_regular: get("GISTBLOG_FONT_REGULAR").unwrap_or(defaults.font_regular),
            font_bold: get("GISTBLOG_FONT_BOLD").unwrap_or(defaults.font_bold),
        }
    }
}
