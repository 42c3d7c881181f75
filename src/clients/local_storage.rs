use log::debug;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::clients::entities::PlaylistDocument;
use crate::clients::errors::Result;

pub const DEFAULT_RAW_DIR: &str = "data/bronze";
pub const DEFAULT_PROCESSED_DIR: &str = "data/silver";
pub const CSV_FILE_NAME: &str = "combined_playlists.csv";

/// Turns a playlist name into a lowercase file stem made of word characters,
/// `-` and single underscores.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let mapped = if c.is_whitespace() {
            '_'
        } else if c.is_alphanumeric() || c == '_' || c == '-' {
            c
        } else {
            '_'
        };
        if mapped == '_' && out.ends_with('_') {
            continue;
        }
        out.push(mapped);
    }
    out.to_lowercase().trim_matches('_').to_string()
}

/// Raw (one JSON per playlist) and processed (combined CSV) data directories
pub struct LocalStorage {
    raw_dir: PathBuf,
    processed_dir: PathBuf,
    // file stems handed out during this run
    used_stems: HashSet<String>,
}

impl LocalStorage {
    pub fn new(raw_dir: impl Into<PathBuf>, processed_dir: impl Into<PathBuf>) -> Self {
        LocalStorage {
            raw_dir: raw_dir.into(),
            processed_dir: processed_dir.into(),
            used_stems: HashSet::new(),
        }
    }

    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }

    pub fn processed_dir(&self) -> &Path {
        &self.processed_dir
    }

    pub fn csv_output_path(&self) -> PathBuf {
        self.processed_dir.join(CSV_FILE_NAME)
    }

    /// Picks a file stem for `name` that no earlier playlist of this run received.
    pub fn claim_file_stem(&mut self, name: &str, id: Option<&str>) -> String {
        let mut stem = sanitize_filename(name);
        if stem.is_empty() {
            stem = id.map(sanitize_filename).unwrap_or_default();
        }
        if stem.is_empty() {
            stem = "playlist".to_string();
        }

        let mut candidate = stem.clone();
        if self.used_stems.contains(&candidate) {
            if let Some(id) = id {
                candidate = format!("{stem}_{}", sanitize_filename(id));
            }
            let mut n = 2;
            while self.used_stems.contains(&candidate) {
                candidate = format!("{stem}_{n}");
                n += 1;
            }
        }
        self.used_stems.insert(candidate.clone());
        candidate
    }

    pub async fn write_playlist(&self, doc: &PlaylistDocument, file_stem: &str) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.raw_dir).await?;
        let path = self.raw_dir.join(format!("{file_stem}.json"));
        let body = serde_json::to_vec_pretty(doc)?;
        tokio::fs::write(&path, body).await?;
        debug!("Wrote playlist {:?} to {path:?}", doc.playlist_name);
        Ok(path)
    }

    /// JSON files in the raw directory, sorted by file name
    pub fn list_playlist_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.raw_dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    pub fn read_playlist(path: &Path) -> Result<PlaylistDocument> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
