use futures::future::try_join_all;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::GistSource;
use crate::{
    content::{BlogPost, FrontMatter, sort_by_date_desc},
    error::Result,
};

/// gist 描述以此开头（不区分大小写）即视为博客文章
pub const BLOG_POST_MARKER: &str = "blog_post";

/// 读取原始内容时保留的字符数，足以容纳 front matter
pub const PREFIX_BUDGET: usize = 1500;

/// 列出全部博客文章，按日期倒序。
///
/// 1. 分页拉取全部 gist
/// 2. 过滤出描述带有 [`BLOG_POST_MARKER`] 的 gist
/// 3. 并发读取每篇文章首个文件的开头并解析 front matter
/// 4. 按日期倒序排序
///
/// 任意一次读取失败都会使整个列表失败。
#[instrument(name = "list posts", skip_all)]
pub async fn list_posts<S: GistSource>(source: &S) -> Result<Vec<BlogPost>> {
    let gists = source.list_gists().await?;
    let total = gists.len();

    let fetches = gists
        .iter()
        .filter(|gist| gist.is_blog_post(BLOG_POST_MARKER))
        .filter_map(|gist| match gist.first_file() {
            Some(file) => Some((gist, file)),
            None => {
                warn!(id = %gist.id, "blog gist has no files, skipped");
                None
            }
        })
        .map(|(gist, file)| async move {
            let prefix = source.fetch_prefix(&file.raw_url, PREFIX_BUDGET).await?;
            Ok::<_, crate::error::Error>(BlogPost::new(gist, file, FrontMatter::extract(&prefix)))
        });

    let mut posts = try_join_all(fetches).await?;
    sort_by_date_desc(&mut posts);

    debug!(total, posts = posts.len(), "blog posts listed");
    Ok(posts)
}

/// 博客首页数据，失败时降级为空列表和错误信息。
#[derive(Debug, Serialize)]
pub struct BlogIndex {
    #[serde(rename = "blogPosts")]
    pub blog_posts: Vec<BlogPost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BlogIndex {
    pub async fn load<S: GistSource>(source: &S) -> Self {
        match list_posts(source).await {
            Ok(blog_posts) => Self {
                blog_posts,
                error: None,
            },
            Err(e) => {
                tracing::error!(%e, "failed to load blog posts");
                Self::failed()
            }
        }
    }

    pub fn failed() -> Self {
        Self {
            blog_posts: Vec::new(),
            error: Some("Failed to load blog posts".to_string()),
        }
    }
}
