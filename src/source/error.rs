use thiserror::Error;

use crate::parser::errors::ParseError;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("读取元数据失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("未找到视频: {0}")]
    NotFound(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.into())
    }
}
