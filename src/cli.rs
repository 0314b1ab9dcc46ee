use clap::Parser;
use std::path::PathBuf;
use url::Url;

use stream_negotiator::BackendKind;

/// 视频流协商工具
#[derive(Parser, Debug)]
#[command(name = "streamneg")]
#[command(version = "0.1")]
#[command(author = "rpeng252@gmail.com")]
#[command(about = "解析视频元数据并选出可播放的流", long_about = None)]
pub struct Cli {
    /// 视频元数据文件 (JSON)
    #[arg(long, value_name = "FILE")]
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// 后端类型
    #[arg(long, value_name = "KIND")]
    #[arg(default_value = "invidious")]
    #[arg(help = "后端类型: local, invidious, piped, peertube")]
    pub backend: BackendKind,

    /// 实例地址，用于代理改写和相对地址补全
    #[arg(long, value_name = "URL")]
    #[arg(value_hint = clap::ValueHint::Url)]
    pub instance_url: Option<Url>,

    /// 通过实例代理音视频资源
    #[arg(long)]
    pub proxy: bool,

    /// 偏好清晰度
    #[arg(long, value_name = "QUALITY")]
    #[arg(help = "偏好清晰度，如: 1080p60, 720p, 480p")]
    pub quality: Option<String>,

    /// 配置文件 (JSON)
    #[arg(long, value_name = "FILE")]
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub profile: Option<PathBuf>,

    /// 以 JSON 输出选择结果
    #[arg(long)]
    pub json: bool,

    /// 显示后端支持的功能
    #[arg(long)]
    pub capabilities: bool,

    /// 输出调试日志
    #[arg(long, short)]
    pub verbose: bool,
}
