use serde_json::Value;

use errors::ParseError;
use parser_trait::VideoPayloadParser;

use crate::backend::{BackendKind, Instance};
use crate::common::models::Video;

pub mod errors;
pub mod local_parser;
pub mod locator;
pub mod models;
pub mod parser_trait;
pub mod stream_extractor;
pub mod stream_selector;
pub mod utils;
pub mod video_parser;

use local_parser::LocalParser;
use video_parser::CommonVideoParser;

pub enum AnyParser {
    Local(LocalParser),
    Common(CommonVideoParser),
}

impl VideoPayloadParser for AnyParser {
    fn parse_video(&self, payload: &Value) -> Result<Video, ParseError> {
        match self {
            AnyParser::Local(p) => p.parse_video(payload),
            AnyParser::Common(p) => p.parse_video(payload),
        }
    }
}

/// 根据后端类型选择解析器
pub fn get_parser(kind: BackendKind, instance: Option<Instance>) -> Result<AnyParser, ParseError> {
    if let Some(instance) = &instance {
        if instance.app != kind {
            return Err(ParseError::InstanceMismatch {
                expected: kind,
                actual: instance.app,
            });
        }
    }

    match kind {
        BackendKind::Local => Ok(AnyParser::Local(LocalParser)),
        BackendKind::Invidious | BackendKind::Piped | BackendKind::PeerTube => {
            Ok(AnyParser::Common(CommonVideoParser::new(instance)))
        }
    }
}
