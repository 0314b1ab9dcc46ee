use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use url::Url;

use crate::backend::BackendKind;
use crate::parser::errors::ParseError;
use crate::parser::models::{Resolution, Stream};
use crate::parser::stream_selector::StreamSelector;
use crate::parser::utils::FormatTool;

// ---------------------------------------------------------------------------
// 用户/设备配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default = "default_profile_name")]
    pub name: String,
    #[serde(default = "default_backend")]
    pub backend: BackendKind,
    #[serde(default)]
    pub default_stream_resolution: Resolution, // 偏好清晰度
}

fn default_profile_name() -> String {
    "default".to_string()
}

fn default_backend() -> BackendKind {
    BackendKind::Invidious
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: default_profile_name(),
            backend: default_backend(),
            default_stream_resolution: Resolution::default(),
        }
    }
}

impl Profile {
    pub fn from_json_str(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.default_stream_resolution = resolution;
        self
    }
}

// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailQuality {
    Maxres,
    Maxresdefault,
    Sddefault,
    High,
    Medium,
    Default,
    Start,
    Middle,
    End,
}

impl ThumbnailQuality {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "maxres" => Some(Self::Maxres),
            "maxresdefault" => Some(Self::Maxresdefault),
            "sddefault" => Some(Self::Sddefault),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "default" => Some(Self::Default),
            "start" => Some(Self::Start),
            "middle" => Some(Self::Middle),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: Url,
    pub quality: ThumbnailQuality,
}

// ---------------------------------------------------------------------------

/// 一个视频的元数据和它的全部候选流
///
/// 每次刷新都会整体重建，构造后不再修改；相等性只看组合ID。
#[derive(Debug, Clone, Default, Serialize)]
pub struct Video {
    pub id: String,               // videoId + indexId
    pub video_id: String,         // 后端原生ID
    pub index_id: Option<String>, // 播放列表里的索引ID
    pub title: String,
    pub author: String,
    pub channel: Channel,
    pub length: f64, // 秒
    pub published: String,
    pub published_at: Option<DateTime<Utc>>,
    pub views: Option<u64>,
    pub likes: Option<u64>,
    pub dislikes: Option<u64>,
    pub description: String,
    pub genre: String,
    pub keywords: Vec<String>,
    pub thumbnails: Vec<Thumbnail>,
    pub live: bool,
    pub upcoming: bool,
    pub streams: Vec<Stream>,
    pub hls_url: Option<Url>, // 无法逐条提取时使用的自适应清单
}

impl Video {
    pub fn new(video_id: impl Into<String>, index_id: Option<String>) -> Self {
        let video_id = video_id.into();
        let id = match &index_id {
            Some(index) => format!("{}{}", video_id, index),
            None => video_id.clone(),
        };

        Self {
            id,
            video_id,
            index_id,
            ..Default::default()
        }
    }

    // 整体替换流列表，返回新的视频
    pub fn with_streams(self, streams: Vec<Stream>) -> Self {
        Self { streams, ..self }
    }

    // 没有流也没有清单地址就无法播放
    pub fn is_playable(&self) -> bool {
        !self.streams.is_empty() || self.hls_url.is_some()
    }

    pub fn selectable_streams(&self) -> Vec<Stream> {
        StreamSelector::selectable(&self.streams)
    }

    pub fn default_stream(&self) -> Option<Stream> {
        StreamSelector::default_stream(&self.streams)
    }

    pub fn best_stream(&self) -> Option<Stream> {
        StreamSelector::best(&self.streams)
    }

    pub fn stream_with_resolution(&self, resolution: Resolution) -> Option<Stream> {
        StreamSelector::matching(&self.streams, resolution)
    }

    pub fn default_stream_for_profile(&self, profile: &Profile) -> Option<Stream> {
        StreamSelector::default_for_profile(&self.streams, profile)
    }

    pub fn play_time(&self) -> Option<String> {
        if self.length <= 0.0 {
            return None;
        }
        Some(FormatTool::format_duration(self.length))
    }

    pub fn published_date(&self) -> Option<&str> {
        if self.published.is_empty() || self.published == "0 seconds ago" {
            None
        } else {
            Some(&self.published)
        }
    }

    pub fn views_count(&self) -> Option<String> {
        self.views
            .filter(|v| *v != 0)
            .map(FormatTool::format_count)
    }

    pub fn likes_count(&self) -> Option<String> {
        self.likes.map(FormatTool::format_count)
    }

    pub fn dislikes_count(&self) -> Option<String> {
        self.dislikes.map(FormatTool::format_count)
    }

    pub fn thumbnail_url(&self, quality: ThumbnailQuality) -> Option<&Url> {
        self.thumbnails
            .iter()
            .find(|t| t.quality == quality)
            .map(|t| &t.url)
    }
}

impl PartialEq for Video {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Video {}

impl Hash for Video {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
