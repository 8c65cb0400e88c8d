mod lister;
mod resolver;

use std::future::Future;

use crate::{error::Result, gist::GistRecord};

pub use self::{
    lister::{BLOG_POST_MARKER, BlogIndex, PREFIX_BUDGET, list_posts},
    resolver::{PostDetail, resolve_post},
};

/// 博客内容来源
///
/// 生产环境为 [`crate::gist::GistClient`]，测试中可以替换为内存实现。
pub trait GistSource: Send + Sync {
    /// 拉取全部 gist（含分页）
    fn list_gists(&self) -> impl Future<Output = Result<Vec<GistRecord>>> + Send;

    /// 读取原始内容的开头部分，最多 `budget` 个字符
    fn fetch_prefix(
        &self,
        url: &str,
        budget: usize,
    ) -> impl Future<Output = Result<String>> + Send;

    /// 读取完整原始内容
    fn fetch_content(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;

    use reqwest::StatusCode;

    use super::*;
    use crate::error::Error;

    /// 内存中的 gist 来源
    #[derive(Default)]
    pub struct FakeSource {
        pub gists: Vec<GistRecord>,
        /// raw_url -> 内容；缺失时返回 404
        pub contents: HashMap<String, String>,
    }

    impl FakeSource {
        pub fn with_gist(
            mut self,
            id: &str,
            description: &str,
            filename: &str,
            content: &str,
        ) -> Self {
            let raw_url = format!("https://gist.example/raw/{id}");
            let gist = serde_json::from_value(serde_json::json!({
                "id": id,
                "description": description,
                "html_url": format!("https://gist.example/{id}"),
                "owner": { "login": "octocat", "avatar_url": "https://avatars.example/octocat" },
                "files": { filename: { "filename": filename, "raw_url": raw_url } }
            }))
            .expect("valid gist json");
            self.gists.push(gist);
            self.contents.insert(raw_url, content.to_string());
            self
        }

        fn lookup(&self, url: &str) -> Result<String> {
            self.contents
                .get(url)
                .cloned()
                .ok_or(Error::UpstreamFetch {
                    what: "gist content",
                    status: StatusCode::NOT_FOUND,
                })
        }
    }

    impl GistSource for FakeSource {
        async fn list_gists(&self) -> Result<Vec<GistRecord>> {
            Ok(self.gists.clone())
        }

        async fn fetch_prefix(&self, url: &str, budget: usize) -> Result<String> {
            Ok(self.lookup(url)?.chars().take(budget).collect())
        }

        async fn fetch_content(&self, url: &str) -> Result<String> {
            self.lookup(url)
        }
    }
}
