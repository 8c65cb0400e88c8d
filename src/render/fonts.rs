use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, instrument};

use crate::error::{Error, Result};

/// 字体文件位置：远程地址或本地路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    Url(Arc<str>),
    Path(Arc<str>),
}

impl FontSource {
    /// 以 `http://` 或 `https://` 开头视为远程地址，否则视为本地路径
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(Arc::from(location))
        } else {
            Self::Path(Arc::from(location))
        }
    }

    async fn read(&self, http: &reqwest::Client) -> Result<Bytes> {
        match self {
            Self::Url(url) => {
                let resp = http.get(&**url).send().await?;
                if !resp.status().is_success() {
                    return Err(Error::UpstreamFetch {
                        what: "font",
                        status: resp.status(),
                    });
                }
                Ok(resp.bytes().await?)
            }
            Self::Path(path) => Ok(Bytes::from(tokio::fs::read(&**path).await?)),
        }
    }
}

/// 一次渲染所需的字体数据，由调用方持有。
#[derive(Debug, Clone)]
pub struct FontData {
    pub family: String,
    pub regular: Bytes,
    pub bold: Bytes,
}

/// 按需加载常规与粗体两种字重。
#[derive(Debug, Clone)]
pub struct FontLoader {
    http: reqwest::Client,
    family: Arc<str>,
    regular: FontSource,
    bold: FontSource,
}

impl FontLoader {
    pub fn new(family: &str, regular: FontSource, bold: FontSource) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            http,
            family: Arc::from(family),
            regular,
            bold,
        })
    }

    /// 同时读取两种字重，任一失败即返回错误
    #[instrument(name = "load fonts", skip_all)]
    pub async fn load(&self) -> Result<FontData> {
        let (regular, bold) =
            tokio::try_join!(self.regular.read(&self.http), self.bold.read(&self.http))?;
        debug!(regular = regular.len(), bold = bold.len(), "fonts loaded");

        Ok(FontData {
            family: self.family.to_string(),
            regular,
            bold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source() {
        assert_eq!(
            FontSource::parse("https://cdn.example/inter.ttf"),
            FontSource::Url(Arc::from("https://cdn.example/inter.ttf"))
        );
        assert_eq!(
            FontSource::parse("static/fonts/Inter-Bold.ttf"),
            FontSource::Path(Arc::from("static/fonts/Inter-Bold.ttf"))
        );
    }

    #[tokio::test]
    async fn test_load_from_paths() {
        let dir = tempfile::tempdir().unwrap();
        let regular = dir.path().join("regular.ttf");
        let bold = dir.path().join("bold.ttf");
        tokio::fs::write(&regular, b"regular").await.unwrap();
        tokio::fs::write(&bold, b"bold!").await.unwrap();

        let loader = FontLoader::new(
            "Inter",
            FontSource::parse(regular.to_str().unwrap()),
            FontSource::parse(bold.to_str().unwrap()),
        )
        .unwrap();
        let fonts = loader.load().await.expect("读取字体失败");
        assert_eq!(fonts.family, "Inter");
        assert_eq!(&fonts.regular[..], b"regular");
        assert_eq!(&fonts.bold[..], b"bold!");
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let loader = FontLoader::new(
            "Inter",
            FontSource::parse("/nonexistent/gistblog/regular.ttf"),
            FontSource::parse("/nonexistent/gistblog/bold.ttf"),
        )
        .unwrap();
        assert!(matches!(loader.load().await, Err(Error::Io(_))));
    }
}
