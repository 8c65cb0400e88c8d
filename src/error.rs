use std::io;

use axum::{Json, response::IntoResponse};
use reqwest::StatusCode;
use serde_json::json;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("GitHub token not configured")]
    AuthConfigMissing,

    #[error("{0}")]
    InvalidConfig(&'static str),

    /// 上游（gist API、原始内容或字体地址）返回了非成功状态码
    #[error("failed to fetch {what}: {status}")]
    UpstreamFetch {
        what: &'static str,
        status: StatusCode,
    },

    #[error("Blog post not found")]
    NotFound,

    #[error("image render failed: {0}")]
    Render(String),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
}

fn json_error(status: StatusCode, message: &str) -> axum::response::Response {
    (status, Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            Error::AuthConfigMissing => {
                tracing::error!("GITHUB_TOKEN is not set");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "GitHub token not configured")
            }
            Error::NotFound => json_error(StatusCode::NOT_FOUND, "Blog post not found"),
            Error::UpstreamFetch { what, status } => {
                tracing::error!(what, %status, "upstream fetch failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            Error::Reqwest(e) => {
                tracing::error!(%e, "http client error");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            Error::Io(e) => {
                tracing::error!(%e, "file io error");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            e @ (Error::InvalidConfig(_) | Error::Render(_) | Error::Join(_)) => {
                tracing::error!(%e, "internal error");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(e: Error) -> (StatusCode, serde_json::Value) {
        let resp = e.into_response();
        let status = resp.status();
        let data = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&data).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let (status, body) = body_json(Error::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Blog post not found");
    }

    #[tokio::test]
    async fn test_upstream_detail_is_not_leaked() {
        let (status, body) = body_json(Error::UpstreamFetch {
            what: "gists",
            status: StatusCode::UNAUTHORIZED,
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
    }

    #[tokio::test]
    async fn test_missing_token_explains_itself() {
        let (status, body) = body_json(Error::AuthConfigMissing).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "GitHub token not configured");
    }
}
