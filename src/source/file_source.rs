use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{MetadataSource, SourceError};

// 从目录里读取 <video_id>.json
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, video_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", video_id))
    }
}

#[async_trait]
impl MetadataSource for FileSource {
    async fn fetch_video(&self, video_id: &str) -> Result<Value, SourceError> {
        let path = self.path_for(video_id);
        debug!("读取元数据文件: {:?}", path);

        let data = match tokio::fs::read_to_string(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::NotFound(video_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&data)?)
    }
}
