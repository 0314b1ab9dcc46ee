use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::json;
use std::path::Path;
use tracing::{debug, info};

use stream_negotiator::common::logger::PrettyLogger;
use stream_negotiator::parser::{self, parser_trait::VideoPayloadParser};
use stream_negotiator::{
    BackendKind, Instance, Profile, Resolution, log_error, log_info, log_success, log_warning,
};

mod cli;

/// 从命令行参数和配置文件生成 Profile
async fn load_profile(args: &cli::Cli) -> Result<Profile> {
    let mut profile = match &args.profile {
        Some(path) => {
            info!("读取配置文件: {:?}", path);
            let data = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("读取配置文件失败: {:?}", path))?;
            Profile::from_json_str(&data)?
        }
        None => Profile {
            backend: args.backend,
            ..Profile::default()
        },
    };

    if let Some(quality) = &args.quality {
        let resolution = Resolution::parse(quality);
        if resolution.is_unknown() {
            log_warning!("无法识别的清晰度 {}，按 unknown 处理", quality);
        }
        profile = profile.with_resolution(resolution);
    }

    debug!("使用配置: {:?}", profile);
    Ok(profile)
}

fn print_capabilities(kind: BackendKind) {
    PrettyLogger::title(format!("{} 支持的功能", kind));
    for (name, enabled) in kind.capabilities().flags() {
        PrettyLogger::flag(name, enabled);
    }
}

async fn read_payload(path: &Path) -> Result<serde_json::Value> {
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("读取元数据文件失败: {:?}", path))?;
    let payload = serde_json::from_str(&data).map_err(stream_negotiator::ParseError::from)?;
    Ok(payload)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // 初始化日志
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    if args.capabilities {
        if args.json {
            let output = json!({
                "backend": args.backend,
                "capabilities": args.backend.capabilities(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_capabilities(args.backend);
        }
        return Ok(());
    }

    let Some(input) = &args.input else {
        bail!("需要通过 --input 指定元数据文件");
    };

    let profile = load_profile(&args).await?;
    let instance = args
        .instance_url
        .clone()
        .map(|url| Instance::new(args.backend, url).with_proxy(args.proxy));
    if let Some(instance) = &instance {
        log_info!("实例: {}", instance.long_description());
    }

    let payload = read_payload(input).await?;
    let parser = parser::get_parser(args.backend, instance)?;
    let video = parser.parse_video(&payload).map_err(|e| {
        log_error!("解析失败: {}", e);
        e
    })?;

    let selectable = video.selectable_streams();
    let default = video.default_stream();
    let best = video.best_stream();
    let chosen = video.default_stream_for_profile(&profile);

    if args.json {
        let output = json!({
            "id": video.id,
            "title": video.title,
            "selectable": selectable,
            "default": default,
            "best": best,
            "profile": chosen,
            "hls_url": video.hls_url,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    PrettyLogger::video_info(
        &video.title,
        video.play_time().unwrap_or_else(|| "--:--".to_string()),
    );
    if let Some(views) = video.views_count() {
        log_info!("播放量: {}", views);
    }
    PrettyLogger::separator();

    if selectable.is_empty() {
        match &video.hls_url {
            Some(hls) => log_warning!("没有可逐条选择的流，使用自适应清单: {}", hls),
            None => log_error!("没有可播放的流"),
        }
        return Ok(());
    }

    log_info!("可选的流 ({} 条):", selectable.len());
    for stream in &selectable {
        PrettyLogger::stream_entry("", stream);
    }
    PrettyLogger::separator();

    if let Some(stream) = &default {
        PrettyLogger::stream_entry("默认", stream);
    }
    if let Some(stream) = &best {
        PrettyLogger::stream_entry("最佳", stream);
    }
    match &chosen {
        Some(stream) => {
            PrettyLogger::stream_entry("配置", stream);
            for url in stream.locators() {
                debug!("资源地址: {}", url);
            }
            log_success!("按配置 {} 选中 {}", profile.name, stream);
        }
        None => log_error!("配置 {} 下没有可选的流", profile.name),
    }

    Ok(())
}
