use serde::{Deserialize, Serialize};

/// One timed caption line as delivered by the transcript provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    /// Seconds from the start of the video.
    pub start: f64,
    /// Seconds the caption stays on screen.
    pub duration: f64,
}

impl Segment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Ordered caption segments. Serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    pub segments: Vec<Segment>,
}

impl Transcript {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

impl From<Vec<Segment>> for Transcript {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

/// Requested window in seconds, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Builds a range from minute values, the unit users type them in.
    pub fn from_minutes(start_min: f64, end_min: f64) -> Self {
        Self {
            start: start_min * 60.0,
            end: end_min * 60.0,
        }
    }

    pub fn contains(&self, seconds: f64) -> bool {
        self.start <= seconds && seconds <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chapter {
    pub start_seconds: u64,
    pub end_seconds: u64,
    pub text: String,
}

impl Chapter {
    pub fn label(&self) -> String {
        format!("Chapter {}-{}", self.start_seconds, self.end_seconds)
    }
}

/// A matching segment: original start time, normalized text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub start: f64,
    pub normalized_text: String,
}
