use serde_derive::{Deserialize, Serialize};
use url::Url;

use super::BackendKind;

// 一个具体的后端实例（比如某个 Invidious 站点）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: String,
    pub app: BackendKind,
    pub name: String,
    pub api_url: Url,
    #[serde(default)]
    pub frontend_url: Option<Url>,
    #[serde(default)]
    pub proxies_videos: bool, // 是否通过实例代理视频资源
}

impl Instance {
    pub fn new(app: BackendKind, api_url: Url) -> Self {
        let name = api_url.host_str().unwrap_or(app.name()).to_string();
        Self {
            id: api_url.to_string(),
            app,
            name,
            api_url,
            frontend_url: None,
            proxies_videos: false,
        }
    }

    pub fn with_proxy(mut self, proxies_videos: bool) -> Self {
        self.proxies_videos = proxies_videos;
        self
    }

    pub fn long_description(&self) -> String {
        format!("{} ({})", self.name, self.app)
    }
}
