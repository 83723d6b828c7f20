use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::{error::Result, model::LanguageModel};

pub const DEFAULT_PROMPT: &str = "You are a YouTube video summarizer. You will be taking the \
transcript text and summarizing the video, providing the important points. No timestamps. \
Please provide the summary of the text given here. Make the formatting nice. Add spaces \
between points.\n";

pub const DEFAULT_MAX_WORDS: usize = 250;

// Candidate boundary: sentence punctuation followed by one whitespace char.
static BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.?]\s").expect("Invalid sentence boundary regex"));

/// Splits model output into sentences.
///
/// Splits on a single whitespace character that follows `.` or `?`, except
/// after `X.Y.`-style initialisms ("U.S.") or a capitalised two-letter
/// abbreviation ("Mr."). This is a heuristic, not a tokenizer.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut from = 0;

    for m in BOUNDARY.find_iter(text) {
        // '.' and '?' are single byte, whitespace starts right after
        let split_at = m.start() + 1;
        if ends_with_abbreviation(&text[..split_at]) {
            continue;
        }
        sentences.push(&text[from..split_at]);
        from = m.end();
    }
    sentences.push(&text[from..]);
    sentences
}

fn ends_with_abbreviation(head: &str) -> bool {
    let mut tail = head.chars().rev();
    let c1 = tail.next();
    let c2 = tail.next();
    let c3 = tail.next();
    let c4 = tail.next();

    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');

    let initialism = is_word(c4)
        && c3 == Some('.')
        && is_word(c2)
        && c1.is_some_and(|c| c != '\n');
    let title = c3.is_some_and(|c| c.is_ascii_uppercase())
        && c2.is_some_and(|c| c.is_ascii_lowercase())
        && c1 == Some('.');

    initialism || title
}

/// Keeps whole sentences, in order, while the running word count stays
/// within `max_words`. Stops at the first sentence that would overflow.
pub fn truncate(raw_text: &str, max_words: usize) -> String {
    let mut word_count = 0;
    let mut accepted = Vec::new();

    for sentence in split_sentences(raw_text) {
        let words = sentence.split_whitespace().count();
        if word_count + words > max_words {
            break;
        }
        accepted.push(sentence);
        word_count += words;
    }

    debug!(
        sentences = accepted.len(),
        words = word_count,
        max_words,
        "truncated model response"
    );
    accepted.join(" ")
}

/// Asks the model for a summary and trims the answer to `max_words`.
pub async fn summarize<M: LanguageModel>(
    model: &M,
    transcript_text: &str,
    prompt: &str,
    max_words: usize,
) -> Result<String> {
    info!(chars = transcript_text.len(), "requesting summary");
    let response = model.generate(prompt, transcript_text).await?;
    Ok(truncate(&response, max_words))
}
