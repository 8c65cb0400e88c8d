use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use super::Result;

use crate::{
    blog::{self, BlogIndex, PostDetail},
    content::BlogPost,
    state::{AppState, Gists},
};

/// 配置博客相关路由。
///
/// 路由包括：
/// - `GET /`：博客首页数据，失败时降级为空列表
/// - `GET /posts`：文章列表
/// - `GET /posts/{slug}`：单篇文章详情
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/", get(blog_index))
        .route("/posts", get(post_list))
        .route("/posts/{slug}", get(post_detail))
}

/// 获取全部文章，按日期倒序。
async fn post_list(State(gists): State<Gists>) -> Result<Json<Vec<BlogPost>>> {
    let client = gists.client()?;
    blog::list_posts(client).await.map(Json)
}

/// 根据 slug 获取单篇文章。
///
/// 返回 [`PostDetail`]，如果文章不存在返回 [`crate::error::Error::NotFound`]。
async fn post_detail(
    Path(slug): Path<String>,
    State(gists): State<Gists>,
) -> Result<Json<PostDetail>> {
    let client = gists.client()?;
    blog::resolve_post(client, &slug).await.map(Json)
}

/// 博客首页数据。
async fn blog_index(State(gists): State<Gists>) -> Json<BlogIndex> {
    match gists.client() {
        Ok(client) => Json(BlogIndex::load(client).await),
        Err(e) => {
            tracing::error!(%e, "failed to load blog posts");
            Json(BlogIndex::failed())
        }
    }
}
