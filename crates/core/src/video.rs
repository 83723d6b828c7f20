use crate::error::{Result, TubegistError};

/// Takes the token after the first `=`, so only `...watch?v=<id>` links work.
/// Anything following the id (`&t=30`) up to the next `=` is kept.
pub fn video_id(url: &str) -> Result<&str> {
    url.split('=').nth(1).ok_or_else(|| TubegistError::MalformedUrl {
        url: url.to_string(),
    })
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

pub fn thumbnail_url(video_id: &str) -> String {
    format!("http://img.youtube.com/vi/{}/0.jpg", video_id)
}
