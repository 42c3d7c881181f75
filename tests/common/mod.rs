#![allow(dead_code)]

use std::path::{Path, PathBuf};

use playlist_dump::clients::entities::{PlaylistDocument, Track};

// Fresh directory under the system temp dir, removed on drop
pub struct TestDir {
    pub path: PathBuf,
}

impl TestDir {
    pub fn new(prefix: &str) -> Self {
        let path = std::env::temp_dir().join(format!("{prefix}_{:016x}", rand::random::<u64>()));
        std::fs::create_dir_all(&path).unwrap();
        TestDir { path }
    }

    pub fn join(&self, child: &str) -> PathBuf {
        self.path.join(child)
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

pub fn track(name: &str, duration_ms: u64) -> Track {
    Track {
        name: name.to_string(),
        artist: format!("{name} Artist"),
        album: format!("{name} Album"),
        duration_ms,
        spotify_url: Some(format!("https://open.spotify.com/track/{name}")),
        added_at: Some("2024-03-19T12:00:00+00:00".to_string()),
    }
}

pub fn write_document(dir: &Path, file_name: &str, name: &str, tracks: Vec<Track>) {
    let doc = PlaylistDocument {
        playlist_name: name.to_string(),
        playlist_id: Some(format!("{name}_id")),
        playlist_owner: Some("Test User".to_string()),
        owner_id: Some("test_user".to_string()),
        total_tracks: tracks.len(),
        playlist_url: Some(format!("https://open.spotify.com/playlist/{name}")),
        tracks,
    };
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(file_name), serde_json::to_string_pretty(&doc).unwrap()).unwrap();
}
