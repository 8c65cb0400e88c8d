use axum::extract::FromRef;

use crate::{
    config::Config,
    error::{Error, Result},
    gist::GistClient,
    render::{FontLoader, FontSource},
};

/// gist 客户端，未配置 token 时为空
#[derive(Clone)]
pub struct Gists(Option<GistClient>);

impl Gists {
    /// 获取客户端
    ///
    /// 未配置 token 时返回 [`Error::AuthConfigMissing`]。
    pub fn client(&self) -> Result<&GistClient> {
        self.0.as_ref().ok_or(Error::AuthConfigMissing)
    }
}

/// 应用程序上下文
///
/// [`AppState`] 只持有可廉价克隆的句柄，请求之间不共享任何可变状态。
#[derive(Clone, FromRef)]
pub struct AppState {
    gists: Gists,
    fonts: FontLoader,
}

impl AppState {
    /// 根据 [`Config`] 创建一个新的 [`AppState`] 实例
    pub fn new(config: &Config) -> Result<Self> {
        let gists = match &config.github_token {
            Some(token) => Some(GistClient::new(token, &config.api_base)?),
            None => {
                tracing::warn!("GITHUB_TOKEN not set, blog endpoints will fail");
                None
            }
        };

        let fonts = FontLoader::new(
            &config.font_family,
            FontSource::parse(&config.font_regular),
            FontSource::parse(&config.font_bold),
        )?;

        Ok(Self {
            gists: Gists(gists),
            fonts,
        })
    }

    /// 获取 gist 客户端
    pub fn gists(&self) -> &Gists {
        &self.gists
    }

    /// 获取字体加载器
    pub fn fonts(&self) -> &FontLoader {
        &self.fonts
    }
}
