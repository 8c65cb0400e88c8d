use indexmap::IndexMap;
use serde::Deserialize;

/// GitHub gist API 返回的单个 gist。
///
/// 只保留博客需要的字段，其余字段在反序列化时忽略。
#[derive(Debug, Clone, Deserialize)]
pub struct GistRecord {
    pub id: String,
    /// 上游允许为 `null`
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub owner: Option<GistOwner>,
    /// 文件名 -> 文件描述，保留响应中的顺序
    #[serde(default)]
    pub files: IndexMap<String, GistFile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GistOwner {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GistFile {
    pub filename: String,
    pub raw_url: String,
}

impl GistRecord {
    /// 描述是否以博客标记开头（不区分大小写）
    pub fn is_blog_post(&self, marker: &str) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().starts_with(marker))
    }

    /// 响应中列出的第一个文件
    pub fn first_file(&self) -> Option<&GistFile> {
        self.files.values().next()
    }
}
