use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use super::errors::ParseError;
use super::locator::{DirectLocator, InstanceProxy, LocatorTransform};
use super::parser_trait::VideoPayloadParser;
use super::stream_extractor::StreamExtractor;
use crate::backend::Instance;
use crate::common::models::{Channel, Thumbnail, ThumbnailQuality, Video};

// 解析远程后端统一后的视频载荷
pub struct CommonVideoParser {
    instance: Option<Instance>,
    transform: Box<dyn LocatorTransform>,
}

impl CommonVideoParser {
    pub fn new(instance: Option<Instance>) -> Self {
        let transform: Box<dyn LocatorTransform> = match &instance {
            Some(instance) => Box::new(InstanceProxy::for_instance(instance)),
            None => Box::new(DirectLocator),
        };
        Self {
            instance,
            transform,
        }
    }

    pub fn with_transform(mut self, transform: Box<dyn LocatorTransform>) -> Self {
        self.transform = transform;
        self
    }

    fn parse_thumbnails(&self, json: &Map<String, Value>) -> Vec<Thumbnail> {
        json.get("videoThumbnails")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| {
                        let quality = ThumbnailQuality::from_label(item.get("quality")?.as_str()?)?;
                        let url = self.resolve_url(item.get("url")?.as_str()?)?;
                        Some(Thumbnail { url, quality })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    // 缩略图可能是相对地址，相对实例地址补全
    fn resolve_url(&self, raw: &str) -> Option<Url> {
        match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                self.instance.as_ref()?.api_url.join(raw).ok()
            }
            Err(_) => None,
        }
    }
}

impl VideoPayloadParser for CommonVideoParser {
    fn parse_video(&self, payload: &Value) -> Result<Video, ParseError> {
        let json = payload
            .as_object()
            .ok_or_else(|| ParseError::UnparseableMetadata("视频载荷应为对象".to_string()))?;

        let index_id = string_field(json, "indexId");
        let mut video = Video::new(string_field(json, "videoId").unwrap_or_default(), index_id);

        video.title = string_field(json, "title").unwrap_or_default();
        video.author = string_field(json, "author").unwrap_or_default();
        video.channel = Channel {
            id: string_field(json, "authorId").unwrap_or_default(),
            name: video.author.clone(),
        };
        video.length = f64_field(json, "lengthSeconds").unwrap_or(0.0);
        video.published = string_field(json, "publishedText").unwrap_or_default();
        video.published_at = f64_field(json, "published")
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs as i64, 0));
        video.views = u64_field(json, "viewCount");
        video.likes = u64_field(json, "likeCount");
        video.dislikes = u64_field(json, "dislikeCount");
        video.description = string_field(json, "description").unwrap_or_default();
        video.genre = string_field(json, "genre").unwrap_or_default();
        video.keywords = json
            .get("keywords")
            .and_then(Value::as_array)
            .map(|k| k.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default();
        video.thumbnails = self.parse_thumbnails(json);
        video.live = json.get("liveNow").and_then(Value::as_bool).unwrap_or(false);
        video.upcoming = json.get("isUpcoming").and_then(Value::as_bool).unwrap_or(false);
        video.hls_url = string_field(json, "hlsUrl").and_then(|u| Url::parse(&u).ok());

        let instance_id = self.instance.as_ref().map(|i| i.id.clone());
        let streams = StreamExtractor::new(&*self.transform, instance_id)
            .extract_from_payload(payload)?;

        debug!("视频 {} 解析完成, {} 条流", video.id, streams.len());
        Ok(video.with_streams(streams))
    }
}

fn string_field(json: &Map<String, Value>, key: &str) -> Option<String> {
    json.get(key).and_then(Value::as_str).map(str::to_string)
}

// 数字字段有的后端给字符串
fn f64_field(json: &Map<String, Value>, key: &str) -> Option<f64> {
    match json.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn u64_field(json: &Map<String, Value>, key: &str) -> Option<u64> {
    match json.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
