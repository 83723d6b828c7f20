use std::{cell::Cell, fs};

use tubegist_core::{
    AppendFileSink, JsonFileSource, NoopSink, Result, Segment, TimeRange, Transcript,
    TranscriptProvider, TubegistError, build_chapters, extract, fetch_cached, record_hits,
    search,
};

struct CountingProvider {
    transcript: Transcript,
    calls: Cell<usize>,
}

impl CountingProvider {
    fn new(transcript: Transcript) -> Self {
        Self {
            transcript,
            calls: Cell::new(0),
        }
    }
}

impl TranscriptProvider for CountingProvider {
    async fn fetch(&self, _video_id: &str) -> Result<Transcript> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.transcript.clone())
    }
}

struct UnavailableProvider;

impl TranscriptProvider for UnavailableProvider {
    async fn fetch(&self, video_id: &str) -> Result<Transcript> {
        Err(TubegistError::UpstreamFetch {
            video_id: video_id.to_string(),
            reason: "captions disabled".to_string(),
        })
    }
}

fn lecture() -> Transcript {
    Transcript::new(vec![
        Segment::new("Welcome to the lecture.", 0.0, 20.0),
        Segment::new("Today: cats, dogs & more!", 20.0, 25.0),
        Segment::new("Cats are independent.", 45.0, 30.0),
        Segment::new("Dogs are loyal.", 75.0, 30.0),
        Segment::new("That's all, folks.", 105.0, 20.0),
    ])
}

#[tokio::test]
async fn cache_is_written_then_reused() {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("abc").join("transcript_en.json");
    let provider = CountingProvider::new(lecture());

    let (first, cached) = fetch_cached(&provider, "abc", &cache_path, false)
        .await
        .unwrap();
    assert!(!cached);
    assert!(cache_path.exists());

    let (second, cached) = fetch_cached(&provider, "abc", &cache_path, false)
        .await
        .unwrap();
    assert!(cached);
    assert_eq!(first, second);
    assert_eq!(provider.calls.get(), 1);

    let (_, cached) = fetch_cached(&provider, "abc", &cache_path, true)
        .await
        .unwrap();
    assert!(!cached);
    assert_eq!(provider.calls.get(), 2);
}

#[tokio::test]
async fn corrupt_cache_is_refetched_and_repaired() {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("transcript_en.json");
    fs::write(&cache_path, "[{\"text\": \"trunc").unwrap();
    let provider = CountingProvider::new(lecture());

    let (transcript, cached) = fetch_cached(&provider, "abc", &cache_path, false)
        .await
        .unwrap();
    assert!(!cached);
    assert_eq!(transcript, lecture());
    assert_eq!(provider.calls.get(), 1);

    let (_, cached) = fetch_cached(&provider, "abc", &cache_path, false)
        .await
        .unwrap();
    assert!(cached);
    assert_eq!(provider.calls.get(), 1);
}

#[tokio::test]
async fn upstream_failure_propagates_and_leaves_no_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("transcript_en.json");

    let err = fetch_cached(&UnavailableProvider, "gone", &cache_path, false)
        .await
        .unwrap_err();
    assert!(matches!(err, TubegistError::UpstreamFetch { .. }));
    assert!(!cache_path.exists());
}

#[tokio::test]
async fn json_file_source_reads_segments() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lecture.json");
    fs::write(&path, serde_json::to_string(&lecture()).unwrap()).unwrap();

    let transcript = JsonFileSource::new(&path).fetch("ignored").await.unwrap();
    assert_eq!(transcript, lecture());
}

#[tokio::test]
async fn unreadable_json_file_is_reported_with_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{not json").unwrap();

    let err = JsonFileSource::new(&path).fetch("x").await.unwrap_err();
    match err {
        TubegistError::TranscriptFile { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn views_over_one_transcript() {
    let transcript = lecture();

    // last segment ends at 125s; durations also sum to 125s
    let middle = extract(&transcript, Some(TimeRange::new(20.0, 75.0))).unwrap();
    assert_eq!(
        middle,
        "Today: cats, dogs & more! Cats are independent. Dogs are loyal."
    );

    let chapters = build_chapters(&transcript);
    assert_eq!(chapters.len(), 2);
    assert_eq!(
        chapters[0].text,
        "Welcome to the lecture. Today: cats, dogs & more! Cats are independent."
    );
    assert_eq!(chapters[1].text, "Dogs are loyal. That's all, folks.");

    let hits = search(&transcript, "Cats");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].start, 45.0);
    assert_eq!(hits[0].normalized_text, "Cats are independent");
}

#[test]
fn file_sink_appends_across_searches() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Output.txt");
    let transcript = lecture();

    let mut sink = AppendFileSink::open(&path).unwrap();
    record_hits(&mut sink, &search(&transcript, "are")).unwrap();
    drop(sink);

    let mut sink = AppendFileSink::open(&path).unwrap();
    record_hits(&mut sink, &search(&transcript, "folks")).unwrap();
    drop(sink);

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, "00:00:45\n00:01:15\n00:01:45\n");
}

#[test]
fn noop_sink_accepts_everything() {
    let hits = search(&lecture(), "a");
    assert!(!hits.is_empty());
    record_hits(&mut NoopSink, &hits).unwrap();
}
