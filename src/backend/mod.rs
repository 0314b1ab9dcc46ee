pub mod capabilities;
pub mod instance;

pub use capabilities::Capabilities;
pub use instance::Instance;

use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// 支持的视频后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Local,    // 本地文件
    Invidious,
    Piped,
    PeerTube,
}

impl BackendKind {
    pub const ALL: [BackendKind; 4] = [
        BackendKind::Local,
        BackendKind::Invidious,
        BackendKind::Piped,
        BackendKind::PeerTube,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::Invidious => "Invidious",
            Self::Piped => "Piped",
            Self::PeerTube => "PeerTube",
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::of(*self)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "invidious" => Ok(Self::Invidious),
            "piped" => Ok(Self::Piped),
            "peertube" => Ok(Self::PeerTube),
            other => Err(format!("未知的后端类型: {}", other)),
        }
    }
}
