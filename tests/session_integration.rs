use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

use stream_negotiator::common::models::{Profile, Video};
use stream_negotiator::parser::models::{Resolution, Stream, StreamKind};
use stream_negotiator::parser::video_parser::CommonVideoParser;
use stream_negotiator::player::PlaybackSession;
use stream_negotiator::source::{FileSource, SourceError, VideoFetcher};

fn url(s: &str) -> Url {
    Url::parse(&format!("https://cdn.example.com/{}", s)).unwrap()
}

fn sample_video() -> Arc<Video> {
    Arc::new(Video::new("abc", None).with_streams(vec![
        Stream::split(Resolution::Hd1080p, "h264", url("audio"), url("v1080")),
        Stream::combined(Resolution::Hd720p, "h264", url("c720")),
        Stream::combined(Resolution::Sd360p, "h264", url("c360")),
    ]))
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("streamneg-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test]
async fn test_session_selects_by_profile() {
    let session = PlaybackSession::new(Profile::default().with_resolution(Resolution::Hd720p));

    let chosen = session.load(sample_video()).await.unwrap();
    assert_eq!(chosen.resolution, Resolution::Hd720p);
    assert_eq!(session.selection().await, Some(chosen));

    let chosen = session
        .set_profile(Profile::default().with_resolution(Resolution::Hd1080p))
        .await
        .unwrap();
    assert_eq!(chosen.kind(), StreamKind::Split);
}

#[tokio::test]
async fn test_session_manual_resolution_switch() {
    let session = PlaybackSession::new(Profile::default());
    session.load(sample_video()).await;

    let switched = session.select_resolution(Resolution::Sd360p).await.unwrap();
    assert_eq!(switched.resolution, Resolution::Sd360p);

    // 不存在的档位不改变当前选择
    assert!(session.select_resolution(Resolution::Hd2160p).await.is_none());
    assert_eq!(session.selection().await, Some(switched));

    let manual = Stream::combined(Resolution::Sd144p, "h264", url("c144"));
    session.select(manual.clone()).await;
    assert_eq!(session.selection().await, Some(manual));
}

#[tokio::test]
async fn test_session_unplayable_video_falls_back_to_manifest() {
    let session = PlaybackSession::new(Profile::default());
    let mut video = Video::new("live", None);
    video.hls_url = Some(url("live.m3u8"));

    assert!(session.load(Arc::new(video)).await.is_none());
    assert_eq!(session.fallback_manifest().await, Some(url("live.m3u8")));

    let empty = Video::new("nothing", None);
    assert!(!empty.is_playable());
    assert!(session.load(Arc::new(empty)).await.is_none());
    assert_eq!(session.fallback_manifest().await, None);
}

#[tokio::test]
async fn test_session_available_streams_respects_backend() {
    let session = PlaybackSession::new(Profile::default());
    assert!(session.available_streams(&|_: &Stream| true).await.is_empty());

    session.load(sample_video()).await;
    let combined_only = |s: &Stream| s.kind() == StreamKind::Combined;
    let available = session.available_streams(&combined_only).await;

    assert_eq!(available.len(), 2);
    assert_eq!(available[0].resolution, Resolution::Hd720p);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_loads_keep_selection_with_current_video() {
    let session = Arc::new(PlaybackSession::new(Profile::default()));
    let video_a = Arc::new(
        Video::new("a", None)
            .with_streams(vec![Stream::combined(Resolution::Hd720p, "h264", url("a720"))]),
    );
    let video_b = Arc::new(
        Video::new("b", None)
            .with_streams(vec![Stream::combined(Resolution::Hd720p, "h264", url("b720"))]),
    );

    for _ in 0..2000 {
        let first = tokio::spawn({
            let session = session.clone();
            let video = video_a.clone();
            async move { session.load(video).await }
        });
        let second = tokio::spawn({
            let session = session.clone();
            let video = video_b.clone();
            async move { session.load(video).await }
        });
        let switch = tokio::spawn({
            let session = session.clone();
            async move { session.select_resolution(Resolution::Hd720p).await }
        });
        first.await.unwrap();
        second.await.unwrap();
        switch.await.unwrap();

        let (video, selection) = session.current().await;
        let video = video.unwrap();
        assert_eq!(selection.as_ref(), video.streams.first(), "视频 {}", video.id);
    }
}

#[tokio::test]
async fn test_fetcher_replaces_snapshot_wholesale() {
    let dir = temp_dir("fetcher");
    let path = dir.join("vid1.json");

    let first = json!({
        "videoId": "vid1",
        "title": "第一版",
        "formatStreams": [
            { "resolution": "720p", "url": "https://cdn.example.com/a", "encoding": "h264" }
        ]
    });
    tokio::fs::write(&path, first.to_string()).await.unwrap();

    let fetcher = VideoFetcher::new(FileSource::new(&dir), CommonVideoParser::new(None));
    let v1 = fetcher.refresh("vid1").await.unwrap();
    assert_eq!(v1.streams.len(), 1);

    let second = json!({
        "videoId": "vid1",
        "title": "第二版",
        "formatStreams": [
            { "resolution": "1080p", "url": "https://cdn.example.com/b", "encoding": "h264" },
            { "resolution": "360p", "url": "https://cdn.example.com/c", "encoding": "h264" }
        ]
    });
    tokio::fs::write(&path, second.to_string()).await.unwrap();

    let v2 = fetcher.refresh("vid1").await.unwrap();
    let snapshot = fetcher.snapshot("vid1").unwrap();

    // 旧快照不受影响
    assert_eq!(v1.streams.len(), 1);
    assert_eq!(v1.title, "第一版");
    assert_eq!(snapshot.streams.len(), 2);
    assert_eq!(snapshot.title, "第二版");
    assert!(Arc::ptr_eq(&v2, &snapshot));

    assert!(fetcher.forget("vid1").is_some());
    assert!(fetcher.snapshot("vid1").is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_fetcher_errors() {
    let dir = temp_dir("errors");
    tokio::fs::write(dir.join("broken.json"), "{ not json").await.unwrap();
    tokio::fs::write(dir.join("array.json"), "[1, 2]").await.unwrap();

    let fetcher = VideoFetcher::new(FileSource::new(&dir), CommonVideoParser::new(None));

    assert!(matches!(
        fetcher.refresh("missing").await,
        Err(SourceError::NotFound(id)) if id == "missing"
    ));
    assert!(matches!(fetcher.refresh("broken").await, Err(SourceError::Parse(_))));
    assert!(matches!(fetcher.refresh("array").await, Err(SourceError::Parse(_))));
    assert!(fetcher.snapshot("array").is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_profile_from_json() {
    let profile = Profile::from_json_str(
        r#"{ "name": "tv", "backend": "piped", "default_stream_resolution": "1080p60" }"#,
    )
    .unwrap();
    assert_eq!(profile.name, "tv");
    assert_eq!(profile.default_stream_resolution, Resolution::Hd1080p60);

    let defaults = Profile::from_json_str("{}").unwrap();
    assert_eq!(defaults, Profile::default());
    assert_eq!(defaults.default_stream_resolution, Resolution::Hd720p);

    assert!(Profile::from_json_str("42").is_err());
    assert!(Profile::from_json_str("{ nope").is_err());
}
