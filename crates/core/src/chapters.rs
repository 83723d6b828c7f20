use tracing::debug;

use crate::types::{Chapter, Transcript};

pub const CHAPTER_SECONDS: u64 = 60;

impl Transcript {
    /// Video length as seen by the chapter builder: sum of all durations.
    pub fn summed_duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration).sum()
    }
}

/// Splits the transcript into consecutive 60 second chapters.
///
/// Windows are generated while `window_end <= summed_duration`, so a trailing
/// partial minute never becomes a chapter. A segment belongs to every window
/// with `window_start <= start <= window_end`; one starting exactly on a
/// boundary lands in both neighbouring chapters.
pub fn build_chapters(transcript: &Transcript) -> Vec<Chapter> {
    let total_duration = transcript.summed_duration();
    let mut chapters = Vec::new();
    let mut chapter_start = 0;
    let mut chapter_end = CHAPTER_SECONDS;

    while chapter_end as f64 <= total_duration {
        let (lo, hi) = (chapter_start as f64, chapter_end as f64);
        let text = transcript
            .segments
            .iter()
            .filter(|seg| seg.start >= lo && seg.start <= hi)
            .map(|seg| seg.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        chapters.push(Chapter {
            start_seconds: chapter_start,
            end_seconds: chapter_end,
            text,
        });
        chapter_start = chapter_end;
        chapter_end += CHAPTER_SECONDS;
    }

    debug!(
        total_duration,
        chapters = chapters.len(),
        "built fixed-width chapters"
    );
    chapters
}
