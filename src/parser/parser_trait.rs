use serde_json::Value;

use super::errors::ParseError;
use crate::common::models::Video;

// 把后端载荷解析成 Video，每个后端实现一次
pub trait VideoPayloadParser: Send + Sync {
    fn parse_video(&self, payload: &Value) -> Result<Video, ParseError>;
}
