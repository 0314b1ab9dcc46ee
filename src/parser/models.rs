use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use url::Url;

// 清晰度阶梯，按像素高度降序，同高度下高帧率在前
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Hd4320p60,
    Hd4320p,
    Hd2160p60,
    Hd2160p,
    Hd1440p60,
    Hd1440p,
    Hd1080p60,
    Hd1080p,
    Hd720p60,
    Hd720p,
    Sd480p,
    Sd360p,
    Sd240p,
    Sd144p,
    Unknown, // 无法识别的标签，排在最后
}

// (档位, 标签, 高度, 帧率)
// 新增档位只需要修改这张表
const LADDER: &[(Resolution, &str, u32, u32)] = &[
    (Resolution::Hd4320p60, "4320p60", 4320, 60),
    (Resolution::Hd4320p, "4320p", 4320, 30),
    (Resolution::Hd2160p60, "2160p60", 2160, 60),
    (Resolution::Hd2160p, "2160p", 2160, 30),
    (Resolution::Hd1440p60, "1440p60", 1440, 60),
    (Resolution::Hd1440p, "1440p", 1440, 30),
    (Resolution::Hd1080p60, "1080p60", 1080, 60),
    (Resolution::Hd1080p, "1080p", 1080, 30),
    (Resolution::Hd720p60, "720p60", 720, 60),
    (Resolution::Hd720p, "720p", 720, 30),
    (Resolution::Sd480p, "480p", 480, 30),
    (Resolution::Sd360p, "360p", 360, 30),
    (Resolution::Sd240p, "240p", 240, 30),
    (Resolution::Sd144p, "144p", 144, 30),
    (Resolution::Unknown, "unknown", 0, 0),
];

// 达到这个帧率就归入 60 帧档位
const HIGH_FRAME_RATE: u32 = 48;

impl Resolution {
    /// 所有档位，顺序与阶梯表一致（从高到低）
    pub const ALL: [Resolution; LADDER.len()] = {
        let mut all = [Resolution::Unknown; LADDER.len()];
        let mut i = 0;
        while i < LADDER.len() {
            all[i] = LADDER[i].0;
            i += 1;
        }
        all
    };

    fn entry(&self) -> &'static (Resolution, &'static str, u32, u32) {
        LADDER
            .iter()
            .find(|(tier, ..)| tier == self)
            .unwrap_or(&LADDER[LADDER.len() - 1])
    }

    pub fn label(&self) -> &'static str {
        self.entry().1
    }

    pub fn height(&self) -> u32 {
        self.entry().2
    }

    pub fn frame_rate(&self) -> u32 {
        self.entry().3
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Resolution::Unknown)
    }

    /// 把任意清晰度标签映射到档位，识别不了的一律归为 Unknown
    ///
    /// 支持 "1080p60"、"720p"、"1080"、"1920x1080"、"4K" 这几种写法。
    pub fn parse(label: &str) -> Resolution {
        lazy_static! {
            static ref LABEL_PATTERN: Regex = Regex::new(r"^(\d{2,4})p?(\d{2,3})?$").unwrap();
            static ref DIMENSION_PATTERN: Regex = Regex::new(r"^\d{2,5}x(\d{2,4})$").unwrap();
        }

        let label = label.trim().to_lowercase();

        match label.as_str() {
            "8k" => return Resolution::Hd4320p,
            "4k" => return Resolution::Hd2160p,
            _ => {}
        }

        if let Some(caps) = LABEL_PATTERN.captures(&label) {
            let height = caps[1].parse().unwrap_or_default();
            let fps = caps
                .get(2)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(30);
            return Self::from_dimensions(height, fps);
        }

        if let Some(caps) = DIMENSION_PATTERN.captures(&label) {
            let height = caps[1].parse().unwrap_or_default();
            return Self::from_dimensions(height, 30);
        }

        Resolution::Unknown
    }

    /// 按高度和帧率查表，没有 60 帧档位时退回同高度的普通档位
    pub fn from_dimensions(height: u32, fps: u32) -> Resolution {
        let wanted_fps = if fps >= HIGH_FRAME_RATE { 60 } else { 30 };

        LADDER
            .iter()
            .filter(|(tier, _, h, _)| !tier.is_unknown() && *h == height)
            .min_by_key(|(_, _, _, f)| f.abs_diff(wanted_fps))
            .map(|(tier, ..)| *tier)
            .unwrap_or(Resolution::Unknown)
    }
}

/// 档位比较：高度高的在前，同高度比帧率，Unknown 永远最低
pub fn compare_resolution(a: &Resolution, b: &Resolution) -> Ordering {
    (b.height(), b.frame_rate()).cmp(&(a.height(), a.frame_rate()))
}

// Ord 的语义是“越靠前越小”，排序后即为从高到低
impl Ord for Resolution {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_resolution(self, other)
    }
}

impl PartialOrd for Resolution {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::Hd720p
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Resolution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Resolution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Resolution::parse(&label))
    }
}

// --------------------------------------------------------

// 流的交付方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Combined, // 单个资源同时包含音视频
    Split,    // 音频和视频分开，需要客户端合流
}

impl StreamKind {
    // 数值越小越优先
    pub fn rank(&self) -> u8 {
        match self {
            StreamKind::Combined => 0,
            StreamKind::Split => 1,
        }
    }
}

/// Combined 优先于 Split
pub fn compare_kind(a: &StreamKind, b: &StreamKind) -> Ordering {
    a.rank().cmp(&b.rank())
}

impl Ord for StreamKind {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_kind(self, other)
    }
}

impl PartialOrd for StreamKind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Combined => write!(f, "combined"),
            StreamKind::Split => write!(f, "split"),
        }
    }
}

// --------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StreamSource {
    Combined { url: Url },
    Split { audio: Url, video: Url },
}

// 一个可播放的版本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub resolution: Resolution,
    pub encoding: String,
    pub instance: Option<String>, // 来源实例ID
    #[serde(flatten)]
    pub source: StreamSource,
}

impl Stream {
    pub fn combined(resolution: Resolution, encoding: impl Into<String>, url: Url) -> Self {
        Self {
            resolution,
            encoding: encoding.into(),
            instance: None,
            source: StreamSource::Combined { url },
        }
    }

    pub fn split(
        resolution: Resolution,
        encoding: impl Into<String>,
        audio: Url,
        video: Url,
    ) -> Self {
        Self {
            resolution,
            encoding: encoding.into(),
            instance: None,
            source: StreamSource::Split { audio, video },
        }
    }

    pub fn with_instance(mut self, instance: Option<String>) -> Self {
        self.instance = instance;
        self
    }

    pub fn kind(&self) -> StreamKind {
        match self.source {
            StreamSource::Combined { .. } => StreamKind::Combined,
            StreamSource::Split { .. } => StreamKind::Split,
        }
    }

    pub fn short_quality(&self) -> &'static str {
        self.resolution.label()
    }

    // 所有需要拉取的地址，Split 先视频后音频
    pub fn locators(&self) -> Vec<&Url> {
        match &self.source {
            StreamSource::Combined { url } => vec![url],
            StreamSource::Split { audio, video } => vec![video, audio],
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.resolution, self.kind(), self.encoding)
    }
}

// --------------------------------------------------------

/// 后端无关的原始格式条目，字段类型不对时按缺失处理
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFormat {
    pub resolution: Option<String>,
    pub url: Option<String>,
    pub encoding: Option<String>,
    pub media_type: Option<String>,
}

impl RawFormat {
    /// 不是键值结构的条目返回 None
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            resolution: text("resolution").or_else(|| text("qualityLabel")),
            url: text("url"),
            encoding: text("encoding"),
            media_type: text("type"),
        })
    }

    // "video/mp4; codecs=..." -> "video"
    fn top_level_type(&self) -> Option<String> {
        self.media_type
            .as_deref()
            .and_then(|t| t.split('/').next())
            .map(|t| t.trim().to_lowercase())
    }

    pub fn is_audio(&self) -> bool {
        self.top_level_type().as_deref() == Some("audio")
    }

    pub fn is_video(&self) -> bool {
        self.top_level_type().as_deref() == Some("video")
    }
}
