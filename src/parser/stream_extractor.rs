use serde_json::Value;
use tracing::{debug, warn};

use super::errors::ParseError;
use super::locator::LocatorTransform;
use super::models::{RawFormat, Resolution, Stream};

/// Split 流目前只接受这个编码的视频轨
pub const ACCEPTED_SPLIT_ENCODING: &str = "h264";

// 把后端原始格式条目整理成 Stream 列表
pub struct StreamExtractor<'a> {
    transform: &'a dyn LocatorTransform,
    instance: Option<String>,
}

impl<'a> StreamExtractor<'a> {
    pub fn new(transform: &'a dyn LocatorTransform, instance: Option<String>) -> Self {
        Self {
            transform,
            instance,
        }
    }

    /// 从整份视频载荷里提取所有流
    ///
    /// 只有载荷本身不是键值结构时才报错，单条坏数据直接跳过。
    pub fn extract_from_payload(&self, payload: &Value) -> Result<Vec<Stream>, ParseError> {
        let obj = payload.as_object().ok_or_else(|| {
            warn!("视频载荷不是对象: {}", type_name(payload));
            ParseError::UnparseableMetadata(format!(
                "视频载荷应为对象，实际为{}",
                type_name(payload)
            ))
        })?;

        let combined = raw_formats(obj.get("formatStreams"), "formatStreams");
        let adaptive = raw_formats(obj.get("adaptiveFormats"), "adaptiveFormats");

        Ok(self.extract(&combined, &adaptive))
    }

    pub fn extract(&self, combined: &[RawFormat], adaptive: &[RawFormat]) -> Vec<Stream> {
        let mut streams = self.extract_combined(combined);
        let combined_count = streams.len();
        streams.extend(self.extract_adaptive(adaptive));
        debug!(
            "提取完成: 合流{}条, 分离{}条 (原始条目 {}+{})",
            combined_count,
            streams.len() - combined_count,
            combined.len(),
            adaptive.len()
        );
        streams
    }

    /// 每个合格的合流条目产生一条 Combined 流
    pub fn extract_combined(&self, entries: &[RawFormat]) -> Vec<Stream> {
        entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| {
                let Some(resolution) = self.resolution_of(entry) else {
                    debug!("丢弃合流条目 {}: 清晰度无法识别 {:?}", i, entry.resolution);
                    return None;
                };
                let Some(url) = entry
                    .url
                    .as_deref()
                    .and_then(|u| self.transform.transform(u))
                else {
                    debug!("丢弃合流条目 {}: 缺少可用地址", i);
                    return None;
                };

                Some(
                    Stream::combined(resolution, entry.encoding.clone().unwrap_or_default(), url)
                        .with_instance(self.instance.clone()),
                )
            })
            .collect()
    }

    /// 找到第一条音频，再和每个 h264 视频轨配对
    ///
    /// 没有音频时一条 Split 流都不产生，没有音频的视频轨无法播放。
    pub fn extract_adaptive(&self, entries: &[RawFormat]) -> Vec<Stream> {
        let audio_url = entries
            .iter()
            .filter(|e| e.is_audio())
            .find_map(|e| e.url.as_deref().and_then(|u| self.transform.transform(u)));

        let Some(audio_url) = audio_url else {
            debug!("没有可用的音频轨，跳过 {} 条分离格式", entries.len());
            return Vec::new();
        };

        entries
            .iter()
            .filter(|e| e.is_video())
            .filter(|e| {
                let accepted = e
                    .encoding
                    .as_deref()
                    .is_some_and(|enc| enc.eq_ignore_ascii_case(ACCEPTED_SPLIT_ENCODING));
                if !accepted {
                    debug!("跳过视频轨: 编码 {:?} 不受支持", e.encoding);
                }
                accepted
            })
            .filter_map(|e| {
                let resolution = self.resolution_of(e)?;
                let video_url = e.url.as_deref().and_then(|u| self.transform.transform(u))?;
                Some(
                    Stream::split(
                        resolution,
                        e.encoding.clone().unwrap_or_default(),
                        audio_url.clone(),
                        video_url,
                    )
                    .with_instance(self.instance.clone()),
                )
            })
            .collect()
    }

    // 标签缺失或识别为 Unknown 的条目视为坏数据
    fn resolution_of(&self, entry: &RawFormat) -> Option<Resolution> {
        let resolution = Resolution::parse(entry.resolution.as_deref()?);
        (!resolution.is_unknown()).then_some(resolution)
    }
}

fn raw_formats(value: Option<&Value>, field: &str) -> Vec<RawFormat> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter_map(RawFormat::from_value).collect(),
        Some(other) => {
            debug!("字段 {} 不是数组 ({})，按空处理", field, type_name(other));
            Vec::new()
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "布尔值",
        Value::Number(_) => "数字",
        Value::String(_) => "字符串",
        Value::Array(_) => "数组",
        Value::Object(_) => "对象",
    }
}
