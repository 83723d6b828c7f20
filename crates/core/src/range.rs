use tracing::debug;

use crate::{
    error::{Result, TubegistError},
    types::{TimeRange, Transcript},
};

impl Transcript {
    /// Video length as seen by range validation: end of the last segment.
    ///
    /// Chapters use [`Transcript::summed_duration`] instead; the two differ
    /// whenever captions leave gaps or overlap.
    pub fn range_duration(&self) -> f64 {
        self.segments
            .last()
            .map(|s| s.start + s.duration)
            .unwrap_or(0.0)
    }
}

/// Joins segment text with single spaces, optionally limited to segments
/// whose `start` lies inside `range`.
///
/// A range outside `[0, range_duration]` (or with `end < start`) fails with
/// [`TubegistError::InvalidRange`]. A valid range that selects nothing
/// yields an empty string.
pub fn extract(transcript: &Transcript, range: Option<TimeRange>) -> Result<String> {
    let Some(range) = range else {
        return Ok(join_text(transcript, |_| true));
    };

    let total_duration = transcript.range_duration();
    let valid = 0.0 <= range.start && range.start <= range.end && range.end <= total_duration;
    if !valid {
        return Err(TubegistError::InvalidRange {
            start: range.start,
            end: range.end,
            total_duration,
        });
    }

    let text = join_text(transcript, |start| range.contains(start));
    debug!(
        start = range.start,
        end = range.end,
        chars = text.len(),
        "extracted transcript range"
    );
    Ok(text)
}

fn join_text(transcript: &Transcript, keep: impl Fn(f64) -> bool) -> String {
    transcript
        .segments
        .iter()
        .filter(|seg| keep(seg.start))
        .map(|seg| seg.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
