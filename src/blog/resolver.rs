use serde::Serialize;
use tracing::instrument;

use super::{GistSource, list_posts};
use crate::{
    content::{BlogPost, read_time_minutes},
    error::{Error, Result},
};

/// 单篇文章详情：元信息、完整原文和预计阅读时间
#[derive(Debug, Serialize)]
pub struct PostDetail {
    pub post: BlogPost,
    pub content: String,
    #[serde(rename = "readTime")]
    pub read_time: usize,
}

/// 根据 slug 查找文章并读取完整内容。
///
/// 每次调用都会重新列出文章，不做缓存。找不到时返回 [`Error::NotFound`]。
#[instrument(name = "resolve post", skip(source))]
pub async fn resolve_post<S: GistSource>(source: &S, slug: &str) -> Result<PostDetail> {
    let post = list_posts(source)
        .await?
        .into_iter()
        .find(|p| p.slug == slug)
        .ok_or(Error::NotFound)?;

    let content = source.fetch_content(&post.raw_url).await?;
    let read_time = read_time_minutes(&content);

    Ok(PostDetail {
        post,
        content,
        read_time,
    })
}
