use std::path::{Path, PathBuf};

pub fn get_root_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("tubegist")
}

/// Get the cache directory for a given video id
pub fn get_cache_dir(video_id: &str) -> PathBuf {
    get_root_cache_dir().join(sanitize(video_id))
}

/// Get the path for a cached transcript file (language aware)
pub fn get_transcript_path(cache_dir: &Path, lang: &str) -> PathBuf {
    cache_dir.join(format!("transcript_{}.json", sanitize(lang)))
}

// Ids come straight from user URLs and may carry `&`, `/` and friends.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
