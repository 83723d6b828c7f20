use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tokio::{fs, process::Command};
use tracing::{debug, info, warn};

use crate::{
    error::{Result, TubegistError},
    types::{Segment, Transcript},
    video::watch_url,
};

/// Produces the caption segments of a video.
#[allow(async_fn_in_trait)]
pub trait TranscriptProvider {
    async fn fetch(&self, video_id: &str) -> Result<Transcript>;
}

/// Downloads captions (manual or automatic) with yt-dlp in json3 format.
pub struct YtDlpSource {
    program: PathBuf,
    lang: String,
    work_dir: PathBuf,
}

impl YtDlpSource {
    pub fn new(lang: impl Into<String>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: PathBuf::from("yt-dlp"),
            lang: lang.into(),
            work_dir: work_dir.into(),
        }
    }

    /// Use a different yt-dlp executable than the one on `PATH`.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    fn captions_path(&self) -> PathBuf {
        self.work_dir.join(format!("captions.{}.json3", self.lang))
    }
}

impl TranscriptProvider for YtDlpSource {
    async fn fetch(&self, video_id: &str) -> Result<Transcript> {
        fs::create_dir_all(&self.work_dir).await?;
        let output_template = self.work_dir.join("captions.%(ext)s");
        let captions_path = self.captions_path();

        // yt-dlp exits 0 when a video has no captions, so a file left over
        // from an earlier fetch must not be mistaken for its output
        match fs::remove_file(&captions_path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }

        info!(video_id, lang = %self.lang, "fetching captions with yt-dlp");
        let output = Command::new(&self.program)
            .arg("--skip-download")
            .arg("--write-subs")
            .arg("--write-auto-subs")
            .arg("--sub-langs")
            .arg(&self.lang)
            .arg("--sub-format")
            .arg("json3")
            .arg("-o")
            .arg(&output_template)
            .arg(watch_url(video_id))
            .output()
            .await
            .map_err(|e| TubegistError::UpstreamFetch {
                video_id: video_id.to_string(),
                reason: format!("could not run yt-dlp: {}", e),
            })?;

        if !output.status.success() {
            return Err(TubegistError::UpstreamFetch {
                video_id: video_id.to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if !captions_path.exists() {
            return Err(TubegistError::UpstreamFetch {
                video_id: video_id.to_string(),
                reason: format!("no '{}' captions available", self.lang),
            });
        }

        let raw = fs::read_to_string(&captions_path).await?;
        let transcript = parse_json3(&raw)?;
        if transcript.is_empty() {
            return Err(TubegistError::UpstreamFetch {
                video_id: video_id.to_string(),
                reason: "caption track is empty".to_string(),
            });
        }

        debug!(segments = transcript.len(), "parsed json3 captions");
        Ok(transcript)
    }
}

/// Reads a JSON array of `{text, start, duration}` objects from disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TranscriptProvider for JsonFileSource {
    async fn fetch(&self, _video_id: &str) -> Result<Transcript> {
        load_transcript(&self.path)
            .await
            .map_err(|e| TubegistError::TranscriptFile {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }
}

#[derive(Deserialize)]
struct Json3Captions {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Converts a yt-dlp json3 caption file into segments.
///
/// Events without text (window styling, bare line breaks) are skipped.
pub fn parse_json3(raw: &str) -> Result<Transcript> {
    let captions: Json3Captions = serde_json::from_str(raw)?;

    let segments = captions
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs?.into_iter().map(|seg| seg.utf8).collect();
            let text = text.replace('\n', " ").trim().to_string();
            if text.is_empty() {
                return None;
            }
            Some(Segment {
                text,
                start: event.t_start_ms as f64 / 1000.0,
                duration: event.d_duration_ms as f64 / 1000.0,
            })
        })
        .collect();

    Ok(Transcript::new(segments))
}

/// Load a transcript from a JSON file
pub async fn load_transcript(path: &Path) -> Result<Transcript> {
    let json_content = fs::read_to_string(path).await?;
    let transcript: Transcript = serde_json::from_str(&json_content)?;
    Ok(transcript)
}

/// Save a transcript to a JSON file
pub async fn save_transcript(transcript: &Transcript, path: &Path) -> Result<()> {
    let pretty_json = serde_json::to_string_pretty(transcript)?;
    fs::write(path, &pretty_json).await?;
    Ok(())
}

/// Returns the cached transcript at `cache_path` unless `force` is set,
/// otherwise fetches from `provider` and refreshes the cache. An unreadable
/// cache file is replaced by a fresh fetch.
///
/// The flag in the result tells whether the cache was used.
pub async fn fetch_cached<P: TranscriptProvider>(
    provider: &P,
    video_id: &str,
    cache_path: &Path,
    force: bool,
) -> Result<(Transcript, bool)> {
    if !force && cache_path.exists() {
        match load_transcript(cache_path).await {
            Ok(transcript) => {
                debug!(path = %cache_path.display(), "using cached transcript");
                return Ok((transcript, true));
            }
            Err(e) => {
                warn!(
                    path = %cache_path.display(),
                    error = %e,
                    "cached transcript unreadable, refetching"
                );
            }
        }
    }

    let transcript = provider.fetch(video_id).await?;
    if let Some(parent) = cache_path.parent() {
        fs::create_dir_all(parent).await?;
    }
    save_transcript(&transcript, cache_path).await?;
    Ok((transcript, false))
}
