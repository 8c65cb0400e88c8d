use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue};
use reqwest::header;
use tracing::{debug, instrument};

use super::{GistRecord, next_page_url};
use crate::blog::GistSource;
use crate::error::{Error, Result};

/// 访问 GitHub gist API 的客户端。
///
/// 所有请求携带 `Authorization: Bearer <token>`，克隆开销很小。
#[derive(Clone)]
pub struct GistClient {
    client: reqwest::Client,
    api_base: Arc<str>,
}

impl GistClient {
    /// 使用指定的 GitHub Token 和 API 根地址创建客户端
    ///
    /// ```ignore
    /// let client = GistClient::new("your_token", "https://api.github.com")?;
    /// ```
    pub fn new<T: AsRef<str>>(token: T, api_base: impl AsRef<str>) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.as_ref()))
            .map_err(|_| Error::InvalidConfig("GITHUB_TOKEN is not a valid header value"))?;
        auth.set_sensitive(true);

        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .default_headers({
                let mut header = HeaderMap::new();
                header.insert(
                    header::ACCEPT,
                    HeaderValue::from_static("application/vnd.github+json"),
                );
                header.insert(
                    "X-GitHub-Api-Version",
                    HeaderValue::from_static("2022-11-28"),
                );
                header.insert(header::AUTHORIZATION, auth);
                header
            })
            .build()?;

        Ok(Self {
            client,
            api_base: Arc::from(api_base.as_ref().trim_end_matches('/')),
        })
    }

    /// 请求原始文件内容
    async fn get_raw(&self, url: &str) -> Result<reqwest::Response> {
        let resp = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/vnd.github.v3.raw")
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Error::UpstreamFetch {
                what: "gist content",
                status: resp.status(),
            });
        }
        Ok(resp)
    }
}

impl GistSource for GistClient {
    /// 按 `Link` 头逐页拉取全部 gist
    #[instrument(name = "list gists", skip_all)]
    async fn list_gists(&self) -> Result<Vec<GistRecord>> {
        let mut url = format!("{}/gists", self.api_base);
        let mut gists = Vec::new();

        loop {
            let resp = self.client.get(&url).send().await?;
            if !resp.status().is_success() {
                return Err(Error::UpstreamFetch {
                    what: "gists",
                    status: resp.status(),
                });
            }

            let next = resp
                .headers()
                .get(header::LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(next_page_url)
                .map(str::to_owned);

            let page: Vec<GistRecord> = resp.json().await?;
            debug!(%url, count = page.len(), "fetched gist page");
            gists.extend(page);

            match next {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(gists)
    }

    /// 只读取响应体的第一个分块，最多保留 `budget` 个字符
    async fn fetch_prefix(&self, url: &str, budget: usize) -> Result<String> {
        let mut resp = self.get_raw(url).await?;
        let chunk = resp.chunk().await?.unwrap_or_default();

        Ok(String::from_utf8_lossy(&chunk).chars().take(budget).collect())
    }

    async fn fetch_content(&self, url: &str) -> Result<String> {
        Ok(self.get_raw(url).await?.text().await?)
    }
}
