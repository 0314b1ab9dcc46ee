use std::collections::HashSet;
use url::Url;

use stream_negotiator::common::models::{Profile, Video};
use stream_negotiator::parser::models::{Resolution, Stream, StreamKind, compare_kind};
use stream_negotiator::parser::stream_selector::StreamSelector;

fn url(s: &str) -> Url {
    Url::parse(&format!("https://cdn.example.com/{}", s)).unwrap()
}

fn combined(resolution: Resolution, encoding: &str, name: &str) -> Stream {
    Stream::combined(resolution, encoding, url(name))
}

fn split(resolution: Resolution, video: &str) -> Stream {
    Stream::split(resolution, "h264", url("audio"), url(video))
}

// 720p/360p 合流 + 1080p 分离流
fn scenario() -> Vec<Stream> {
    vec![
        combined(Resolution::Hd720p, "h264", "a"),
        combined(Resolution::Sd360p, "h264", "b"),
        split(Resolution::Hd1080p, "d"),
    ]
}

#[test]
fn test_selectable_scenario() {
    let selectable = StreamSelector::selectable(&scenario());

    let tiers: Vec<_> = selectable.iter().map(|s| s.resolution).collect();
    assert_eq!(
        tiers,
        vec![Resolution::Hd1080p, Resolution::Hd720p, Resolution::Sd360p]
    );
    assert_eq!(selectable[0].kind(), StreamKind::Split);
    assert_eq!(selectable[1].locators(), vec![&url("a")]);
    assert_eq!(selectable[2].locators(), vec![&url("b")]);
}

#[test]
fn test_best_and_default_scenario() {
    let streams = scenario();

    let best = StreamSelector::best(&streams).unwrap();
    assert_eq!(best.resolution, Resolution::Hd1080p);
    assert_eq!(best.kind(), StreamKind::Split);

    let default = StreamSelector::default_stream(&streams).unwrap();
    assert_eq!(default.resolution, Resolution::Hd720p);
    assert_eq!(default.kind(), StreamKind::Combined);
}

#[test]
fn test_selectable_one_per_tier_and_prefers_combined() {
    let streams = vec![
        split(Resolution::Hd720p, "s720"),
        split(Resolution::Hd1080p, "s1080"),
        combined(Resolution::Hd720p, "h264", "c720"),
        split(Resolution::Hd720p, "s720b"),
        combined(Resolution::Sd480p, "vp9", "c480"),
        combined(Resolution::Unknown, "", "unknown"),
    ];
    let selectable = StreamSelector::selectable(&streams);

    let tiers: HashSet<_> = selectable.iter().map(|s| s.resolution).collect();
    assert_eq!(tiers.len(), selectable.len());

    for stream in &selectable {
        let has_combined = streams
            .iter()
            .any(|s| s.resolution == stream.resolution && s.kind() == StreamKind::Combined);
        if has_combined {
            assert_eq!(stream.kind(), StreamKind::Combined, "{}", stream);
        }
    }

    assert_eq!(selectable.last().map(|s| s.resolution), Some(Resolution::Unknown));
    assert_eq!(
        StreamSelector::matching(&streams, Resolution::Hd720p)
            .unwrap()
            .locators(),
        vec![&url("c720")]
    );
}

#[test]
fn test_duplicate_tier_keeps_first_in_input_order() {
    let streams = vec![
        combined(Resolution::Hd1080p, "h264", "first"),
        combined(Resolution::Hd1080p, "vp9", "second"),
    ];
    let selectable = StreamSelector::selectable(&streams);

    assert_eq!(selectable.len(), 1);
    assert_eq!(selectable[0].encoding, "h264");
    assert_eq!(selectable[0].locators(), vec![&url("first")]);
}

#[test]
fn test_empty_input_is_absent_everywhere() {
    let streams: Vec<Stream> = Vec::new();

    assert!(StreamSelector::selectable(&streams).is_empty());
    assert!(StreamSelector::default_stream(&streams).is_none());
    assert!(StreamSelector::best(&streams).is_none());
    assert!(StreamSelector::matching(&streams, Resolution::Hd720p).is_none());
    assert!(StreamSelector::default_for_profile(&streams, &Profile::default()).is_none());
}

#[test]
fn test_default_is_none_without_combined() {
    let streams = vec![split(Resolution::Hd1080p, "x"), split(Resolution::Hd720p, "y")];

    assert!(StreamSelector::default_stream(&streams).is_none());
    assert_eq!(
        StreamSelector::best(&streams).map(|s| s.resolution),
        Some(Resolution::Hd1080p)
    );
}

#[test]
fn test_profile_match_and_fallback() {
    let streams = vec![
        split(Resolution::Hd1080p, "first-raw"),
        combined(Resolution::Hd720p, "h264", "a"),
    ];

    let hd = Profile::default().with_resolution(Resolution::Hd720p);
    assert_eq!(
        StreamSelector::default_for_profile(&streams, &hd).map(|s| s.resolution),
        Some(Resolution::Hd720p)
    );

    // 480p 不存在，退回原始列表第一条（即使它是 Split）
    let sd = Profile::default().with_resolution(Resolution::Sd480p);
    let fallback = StreamSelector::default_for_profile(&streams, &sd).unwrap();
    assert_eq!(fallback, streams[0]);
    assert_eq!(fallback.kind(), StreamKind::Split);
}

#[test]
fn test_kind_comparator_prefers_combined() {
    use std::cmp::Ordering;

    assert_eq!(compare_kind(&StreamKind::Combined, &StreamKind::Split), Ordering::Less);
    assert_eq!(compare_kind(&StreamKind::Split, &StreamKind::Combined), Ordering::Greater);
    assert_eq!(compare_kind(&StreamKind::Split, &StreamKind::Split), Ordering::Equal);
}

#[test]
fn test_sorted_available_and_grouping() {
    let streams = vec![
        combined(Resolution::Sd360p, "h264", "i1-360").with_instance(Some("i1".into())),
        split(Resolution::Hd1080p, "i1-1080").with_instance(Some("i1".into())),
        combined(Resolution::Hd1080p, "h264", "i1-1080c").with_instance(Some("i1".into())),
        split(Resolution::Hd720p, "i2-720").with_instance(Some("i2".into())),
        split(Resolution::Hd2160p, "i1-2160").with_instance(Some("i1".into())),
    ];

    // 假设播放器不支持 4K
    let backend = |s: &Stream| s.resolution != Resolution::Hd2160p;

    let sorted = StreamSelector::sorted_available(&streams, &backend);
    let order: Vec<_> = sorted.iter().map(|s| (s.resolution, s.kind())).collect();
    assert_eq!(
        order,
        vec![
            (Resolution::Hd1080p, StreamKind::Combined),
            (Resolution::Hd1080p, StreamKind::Split),
            (Resolution::Hd720p, StreamKind::Split),
            (Resolution::Sd360p, StreamKind::Combined),
        ]
    );

    let groups = StreamSelector::grouped_for_instance(&streams, "i1", &backend);
    let kinds: Vec<_> = groups.keys().copied().collect();
    assert_eq!(kinds, vec![StreamKind::Combined, StreamKind::Split]);
    assert_eq!(groups[&StreamKind::Combined].len(), 2);
    assert_eq!(groups[&StreamKind::Combined][0].resolution, Resolution::Hd1080p);
    assert_eq!(groups[&StreamKind::Split].len(), 1);

    assert!(StreamSelector::grouped_for_instance(&streams, "i3", &backend).is_empty());
}

#[test]
fn test_video_views_follow_selector() {
    let video = Video::new("abc", None).with_streams(scenario());

    assert!(video.is_playable());
    assert_eq!(video.selectable_streams(), StreamSelector::selectable(&video.streams));
    assert_eq!(video.best_stream(), StreamSelector::best(&video.streams));
    assert_eq!(video.default_stream().map(|s| s.resolution), Some(Resolution::Hd720p));
    assert_eq!(
        video.stream_with_resolution(Resolution::Sd360p).map(|s| s.kind()),
        Some(StreamKind::Combined)
    );
    assert!(video.stream_with_resolution(Resolution::Sd144p).is_none());
}

#[test]
fn test_stream_description() {
    let stream = split(Resolution::Hd1080p60, "v");
    assert_eq!(stream.to_string(), "1080p60 (split, h264)");
    assert_eq!(stream.short_quality(), "1080p60");
}
