use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::types::{SearchHit, Transcript};

// Everything except ASCII letters, digits and plain spaces.
static STRIPPED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9 ]").expect("Invalid normalization regex"));

/// Deletes punctuation and non-ASCII characters. Words separated only by
/// punctuation are merged.
pub fn normalize_line(text: &str) -> String {
    STRIPPED_CHARS.replace_all(text, "").into_owned()
}

/// Case-sensitive substring search over normalized segment text.
///
/// Hits keep the segment's original start time but carry the normalized
/// text. No match is an empty vector. An empty keyword matches every
/// segment, so callers reject it before searching.
pub fn search(transcript: &Transcript, keyword: &str) -> Vec<SearchHit> {
    let hits: Vec<SearchHit> = transcript
        .segments
        .iter()
        .filter_map(|seg| {
            let line = normalize_line(&seg.text);
            line.contains(keyword).then(|| SearchHit {
                start: seg.start,
                normalized_text: line,
            })
        })
        .collect();

    debug!(keyword, hits = hits.len(), "keyword search finished");
    hits
}
