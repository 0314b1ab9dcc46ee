use serde_json::Value;
use url::Url;

use super::errors::ParseError;
use super::models::{Resolution, Stream};
use super::parser_trait::VideoPayloadParser;
use crate::common::models::Video;

// 本地文件：一个文件就是一条 Combined 流，清晰度可以未知
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalParser;

impl VideoPayloadParser for LocalParser {
    fn parse_video(&self, payload: &Value) -> Result<Video, ParseError> {
        let json = payload
            .as_object()
            .ok_or_else(|| ParseError::UnparseableMetadata("本地文件描述应为对象".to_string()))?;

        let url = json
            .get("url")
            .and_then(Value::as_str)
            .and_then(|u| Url::parse(u).ok());

        let mut video = Video::new(
            url.as_ref().map(Url::to_string).unwrap_or_default(),
            None,
        );
        video.title = json
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| file_name(url.as_ref()))
            .unwrap_or_default();

        let Some(url) = url else {
            return Ok(video);
        };

        let resolution = json
            .get("resolution")
            .and_then(Value::as_str)
            .map(Resolution::parse)
            .unwrap_or(Resolution::Unknown);
        let encoding = json
            .get("encoding")
            .and_then(Value::as_str)
            .unwrap_or_default();

        Ok(video.with_streams(vec![Stream::combined(resolution, encoding, url)]))
    }
}

fn file_name(url: Option<&Url>) -> Option<String> {
    url?.path_segments()?
        .next_back()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
