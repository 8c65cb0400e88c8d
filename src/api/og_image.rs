use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use axum_extra::extract::Query;
use serde::Deserialize;

use super::Result;

use crate::{
    render::{FontLoader, OgImageOptions, render_png},
    state::AppState,
};

const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// 配置分享图路由。
pub fn setup_route() -> Router<AppState> {
    Router::new().route("/og-image", get(og_image))
}

/// 分享图查询参数，全部可选。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OgImageQuery {
    title: Option<String>,
    description: Option<String>,
    author: Option<String>,
    date: Option<String>,
    #[serde(rename = "readTime")]
    read_time: Option<String>,
}

impl From<OgImageQuery> for OgImageOptions {
    fn from(q: OgImageQuery) -> Self {
        OgImageOptions::new(q.title, q.description, q.author, q.date, q.read_time)
    }
}

/// 生成 PNG 分享图。
///
/// 每次请求都会重新读取字体，渲染在阻塞线程池中执行。
async fn og_image(
    Query(query): Query<OgImageQuery>,
    State(fonts): State<FontLoader>,
) -> Result<impl IntoResponse> {
    let options = OgImageOptions::from(query);
    let fonts = fonts.load().await?;

    let png = tokio::task::spawn_blocking(move || render_png(&options, &fonts)).await??;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, CACHE_CONTROL),
        ],
        png,
    ))
}
