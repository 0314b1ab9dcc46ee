use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use crate::common::models::{Profile, Video};
use crate::parser::models::{Resolution, Stream};
use crate::parser::stream_selector::{PlayerBackend, StreamSelector};

// 三者必须在同一把锁下一起更新，选中的流总是属于当前视频
#[derive(Debug, Default)]
struct SessionState {
    video: Option<Arc<Video>>,
    profile: Profile,
    selection: Option<Stream>,
}

impl SessionState {
    fn reselect(&mut self) -> Option<Stream> {
        let stream = self
            .video
            .as_ref()
            .and_then(|v| v.default_stream_for_profile(&self.profile));
        match &stream {
            Some(s) => debug!("按配置 {} 选中: {}", self.profile.name, s),
            None => debug!("配置 {} 下没有可选的流", self.profile.name),
        }

        self.selection = stream.clone();
        stream
    }
}

// 播放驱动持有的状态：当前视频快照、配置和选中的流
#[derive(Debug, Default)]
pub struct PlaybackSession {
    state: RwLock<SessionState>,
}

impl PlaybackSession {
    pub fn new(profile: Profile) -> Self {
        Self {
            state: RwLock::new(SessionState {
                profile,
                ..SessionState::default()
            }),
        }
    }

    /// 换上新视频（或同一视频的新快照），并按配置重新选流
    pub async fn load(&self, video: Arc<Video>) -> Option<Stream> {
        if !video.is_playable() {
            warn!("视频 {} 没有可播放的流", video.id);
        }
        let mut state = self.state.write().await;
        state.video = Some(video);
        state.reselect()
    }

    pub async fn set_profile(&self, profile: Profile) -> Option<Stream> {
        let mut state = self.state.write().await;
        state.profile = profile;
        state.reselect()
    }

    /// 用户手动切换清晰度，没有该档位时保持原选择
    pub async fn select_resolution(&self, resolution: Resolution) -> Option<Stream> {
        let mut state = self.state.write().await;
        let video = state.video.clone()?;
        match video.stream_with_resolution(resolution) {
            Some(stream) => {
                info!("切换清晰度: {}", stream);
                state.selection = Some(stream.clone());
                Some(stream)
            }
            None => {
                debug!("视频 {} 没有 {} 的流", video.id, resolution);
                None
            }
        }
    }

    pub async fn select(&self, stream: Stream) {
        self.state.write().await.selection = Some(stream);
    }

    pub async fn selection(&self) -> Option<Stream> {
        self.state.read().await.selection.clone()
    }

    pub async fn video(&self) -> Option<Arc<Video>> {
        self.state.read().await.video.clone()
    }

    /// 当前视频和选中的流，同一时刻的一致快照
    pub async fn current(&self) -> (Option<Arc<Video>>, Option<Stream>) {
        let state = self.state.read().await;
        (state.video.clone(), state.selection.clone())
    }

    /// 逐条选不到流时退回的自适应清单
    pub async fn fallback_manifest(&self) -> Option<Url> {
        let state = self.state.read().await;
        if state.selection.is_some() {
            return None;
        }
        state.video.as_ref()?.hls_url.clone()
    }

    pub async fn available_streams(&self, backend: &impl PlayerBackend) -> Vec<Stream> {
        match self.video().await {
            Some(video) => StreamSelector::sorted_available(&video.streams, backend),
            None => Vec::new(),
        }
    }
}
