use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::{MetadataSource, SourceError};
use crate::common::models::Video;
use crate::parser::parser_trait::VideoPayloadParser;

/// 拉取并解析视频，按视频ID保存最新快照
///
/// 每次刷新都整体替换 `Arc<Video>`，读者拿到的永远是完整的旧快照或新快照。
pub struct VideoFetcher<S, P> {
    source: S,
    parser: P,
    videos: DashMap<String, Arc<Video>>, // video_id -> 最新快照
}

impl<S, P> VideoFetcher<S, P>
where
    S: MetadataSource,
    P: VideoPayloadParser,
{
    pub fn new(source: S, parser: P) -> Self {
        Self {
            source,
            parser,
            videos: DashMap::new(),
        }
    }

    pub async fn refresh(&self, video_id: &str) -> Result<Arc<Video>, SourceError> {
        let payload = self.source.fetch_video(video_id).await?;
        let video = Arc::new(self.parser.parse_video(&payload)?);

        info!("刷新视频 {}: {} 条流", video_id, video.streams.len());
        if let Some(old) = self.videos.insert(video_id.to_string(), Arc::clone(&video)) {
            debug!("替换旧快照: {} 条流", old.streams.len());
        }
        Ok(video)
    }

    pub fn snapshot(&self, video_id: &str) -> Option<Arc<Video>> {
        self.videos.get(video_id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn forget(&self, video_id: &str) -> Option<Arc<Video>> {
        self.videos.remove(video_id).map(|(_, video)| video)
    }
}
