pub mod error;
pub mod fetcher;
pub mod file_source;

pub use error::SourceError;
pub use fetcher::VideoFetcher;
pub use file_source::FileSource;

use async_trait::async_trait;
use serde_json::Value;

/// 元数据来源（HTTP 接口、本地缓存等），只负责拿到解析好的 JSON
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch_video(&self, video_id: &str) -> Result<Value, SourceError>;
}
