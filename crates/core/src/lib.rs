//! Tubegist Core Library
//!
//! Transcript processing for YouTube videos: time-range extraction,
//! fixed-width chapters, keyword search with timestamps, and word-bounded
//! summaries of language model output.

pub mod cache;
pub mod chapters;
pub mod error;
pub mod format;
pub mod model;
pub mod range;
pub mod search;
pub mod sink;
pub mod source;
pub mod summary;
pub mod types;
pub mod video;

// Re-export commonly used items at crate root
pub use cache::{get_cache_dir, get_root_cache_dir, get_transcript_path};
pub use chapters::build_chapters;
pub use error::{Result, TubegistError};
pub use format::{format_chapters_readable, format_hits_table, format_no_hits, format_timestamp};
pub use model::{CommandModel, LanguageModel, ModelConfig};
pub use range::extract;
pub use search::{normalize_line, search};
pub use sink::{AppendFileSink, NoopSink, TimestampSink, record_hits};
pub use source::{
    JsonFileSource, TranscriptProvider, YtDlpSource, fetch_cached, load_transcript,
    save_transcript,
};
pub use summary::{DEFAULT_MAX_WORDS, DEFAULT_PROMPT, split_sentences, summarize, truncate};
pub use types::{Chapter, SearchHit, Segment, TimeRange, Transcript};
pub use video::{thumbnail_url, video_id, watch_url};
