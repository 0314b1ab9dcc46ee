use thiserror::Error;

use crate::backend::BackendKind;

#[derive(Debug, Error)]
pub enum ParseError {
    // 整个载荷不是键值结构，和“没有可用的流”是两回事
    #[error("元数据无法解析: {0}")]
    UnparseableMetadata(String),
    #[error("实例类型不匹配: 需要 {expected}，实际为 {actual}")]
    InstanceMismatch {
        expected: BackendKind,
        actual: BackendKind,
    },
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::UnparseableMetadata(err.to_string())
    }
}
