use itertools::Itertools;
use std::collections::BTreeMap;
use tracing::debug;

use super::models::{Resolution, Stream, StreamKind, compare_kind, compare_resolution};
use crate::common::models::Profile;

/// 判断当前播放器能否播放某条流
pub trait PlayerBackend {
    fn can_play(&self, stream: &Stream) -> bool;
}

impl<F> PlayerBackend for F
where
    F: Fn(&Stream) -> bool,
{
    fn can_play(&self, stream: &Stream) -> bool {
        self(stream)
    }
}

// 所有函数都是纯函数，同样的输入总是得到同样的结果
pub struct StreamSelector;

impl StreamSelector {
    /// 每个清晰度档位保留一条代表，Combined 优先，同类取输入顺序靠前的
    ///
    /// 结果按档位从高到低排列，没有流的档位直接缺席。
    pub fn selectable(streams: &[Stream]) -> Vec<Stream> {
        Resolution::ALL
            .iter()
            .filter_map(|resolution| {
                streams
                    .iter()
                    .filter(|s| s.resolution == *resolution)
                    .min_by(|a, b| compare_kind(&a.kind(), &b.kind()))
                    .cloned()
            })
            .collect()
    }

    /// 可选列表里第一条 Combined 流
    pub fn default_stream(streams: &[Stream]) -> Option<Stream> {
        Self::selectable(streams)
            .into_iter()
            .find(|s| s.kind() == StreamKind::Combined)
    }

    /// 清晰度最高的可选流
    pub fn best(streams: &[Stream]) -> Option<Stream> {
        Self::selectable(streams)
            .into_iter()
            .min_by(|a, b| compare_resolution(&a.resolution, &b.resolution))
    }

    pub fn matching(streams: &[Stream], resolution: Resolution) -> Option<Stream> {
        Self::selectable(streams)
            .into_iter()
            .find(|s| s.resolution == resolution)
    }

    /// 按配置里的偏好清晰度选流
    ///
    /// 偏好档位不存在时退回原始列表的第一条，这一步不考虑 Combined 优先。
    pub fn default_for_profile(streams: &[Stream], profile: &Profile) -> Option<Stream> {
        let preferred = profile.default_stream_resolution;
        Self::matching(streams, preferred).or_else(|| {
            let fallback = streams.first().cloned();
            if let Some(stream) = &fallback {
                debug!("没有 {} 的流，退回第一条: {}", preferred, stream);
            }
            fallback
        })
    }

    /// 当前播放器能播放的流，先按档位再按交付方式排序
    pub fn sorted_available(streams: &[Stream], backend: &impl PlayerBackend) -> Vec<Stream> {
        streams
            .iter()
            .filter(|s| backend.can_play(s))
            .sorted_by(|a, b| {
                compare_resolution(&a.resolution, &b.resolution)
                    .then_with(|| compare_kind(&a.kind(), &b.kind()))
            })
            .cloned()
            .collect()
    }

    /// 某个实例下可播放的流，按交付方式分组
    pub fn grouped_for_instance(
        streams: &[Stream],
        instance_id: &str,
        backend: &impl PlayerBackend,
    ) -> BTreeMap<StreamKind, Vec<Stream>> {
        Self::sorted_available(streams, backend)
            .into_iter()
            .filter(|s| s.instance.as_deref() == Some(instance_id))
            .into_group_map_by(|s| s.kind())
            .into_iter()
            .collect()
    }
}
