use crate::types::{Chapter, SearchHit};

const TIME_HEADER: &str = "Start Times";
const LINE_HEADER: &str = "Sentence Mentioned";

/// Format seconds as HH:MM:SS.
///
/// The minutes field counts total minutes, so 3725s renders as `01:62:05`.
pub fn format_timestamp(seconds: f64) -> String {
    let hours = (seconds / 3600.0) as u64;
    let minutes = (seconds / 60.0) as u64;
    let secs = (seconds % 60.0) as u64;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Render keyword hits as a two column table under a heading.
pub fn format_hits_table(keyword: &str, hits: &[SearchHit]) -> String {
    let mut output = format!("'{}' was mentioned at:\n\n", keyword);
    output.push_str(&format!("{:<11} | {}\n", TIME_HEADER, LINE_HEADER));
    output.push_str(&format!("{}-+-{}\n", "-".repeat(11), "-".repeat(LINE_HEADER.len())));
    for hit in hits {
        output.push_str(&format!(
            "{:<11} | {}\n",
            format_timestamp(hit.start),
            hit.normalized_text
        ));
    }
    output
}

pub fn format_no_hits(keyword: &str) -> String {
    format!(
        "No occurrences of the keyword '{}' found in the transcript.",
        keyword
    )
}

/// Format chapters as markdown sections
pub fn format_chapters_readable(chapters: &[Chapter]) -> String {
    let mut output = String::new();
    for chapter in chapters {
        output.push_str(&format!("## {}\n\n", chapter.label()));
        output.push_str(chapter.text.trim());
        output.push_str("\n\n");
    }
    output
}
