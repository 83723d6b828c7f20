use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TubegistError {
    #[error(
        "Invalid timestamps. Please enter valid start and end times. \
         (start={start}s, end={end}s, video length={total_duration}s)"
    )]
    InvalidRange {
        start: f64,
        end: f64,
        total_duration: f64,
    },

    #[error("Transcript unavailable for {video_id}: {reason}")]
    UpstreamFetch { video_id: String, reason: String },

    #[error("Malformed video URL {url}: expected a ...watch?v=<id> link")]
    MalformedUrl { url: String },

    #[error("Transcript file {path} could not be read: {reason}")]
    TranscriptFile { path: PathBuf, reason: String },

    #[error("Model command failed: {reason}")]
    ModelFailed { reason: String },

    #[error("Model command is empty")]
    InvalidModelCommand,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TubegistError>;
