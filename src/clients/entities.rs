use serde::{Deserialize, Serialize};

/// Name used for the saved-tracks collection when it is stored like a playlist
pub const LIKED_SONGS: &str = "Liked Songs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
}

/// One entry of the current user's playlist listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub url: Option<String>,
}

/// What a playlist holds, judged by its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistKind {
    Music,
    Podcast,
    Audiobook,
}

impl PlaylistKind {
    pub fn classify(name: &str) -> Self {
        if name.starts_with("Pods") {
            PlaylistKind::Podcast
        } else if name.starts_with("Audiobooks") {
            PlaylistKind::Audiobook
        } else {
            PlaylistKind::Music
        }
    }

    pub fn is_spoken_word(self) -> bool {
        matches!(self, PlaylistKind::Podcast | PlaylistKind::Audiobook)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub artist: String, // every credited artist, comma separated
    pub album: String,
    pub duration_ms: u64,
    #[serde(default)]
    pub spotify_url: Option<String>,
    #[serde(default)]
    pub added_at: Option<String>,
}

/// On-disk shape of a downloaded playlist, one JSON file each
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDocument {
    pub playlist_name: String,
    #[serde(default)]
    pub playlist_id: Option<String>,
    #[serde(default)]
    pub playlist_owner: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub total_tracks: usize,
    #[serde(default)]
    pub playlist_url: Option<String>,
    pub tracks: Vec<Track>,
}

impl PlaylistDocument {
    pub fn new(
        summary: Option<&PlaylistSummary>,
        name: &str,
        owner: &User,
        tracks: Vec<Track>,
    ) -> Self {
        PlaylistDocument {
            playlist_name: name.to_string(),
            playlist_id: summary.map(|s| s.id.clone()),
            playlist_owner: owner.display_name.clone(),
            owner_id: Some(owner.id.clone()),
            total_tracks: tracks.len(),
            playlist_url: summary.and_then(|s| s.url.clone()),
            tracks,
        }
    }
}

/// A single page of a paginated listing
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    // items the API sent, before episodes and empty entries were dropped
    pub fetched: usize,
    pub has_next: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_name_prefix() {
        assert_eq!(PlaylistKind::classify("Pods for the commute"), PlaylistKind::Podcast);
        assert_eq!(PlaylistKind::classify("Audiobooks 2024"), PlaylistKind::Audiobook);
        assert_eq!(PlaylistKind::classify("Road trip"), PlaylistKind::Music);
        // prefix match is case sensitive
        assert_eq!(PlaylistKind::classify("pods"), PlaylistKind::Music);
        assert!(PlaylistKind::Podcast.is_spoken_word());
        assert!(!PlaylistKind::Music.is_spoken_word());
    }

    #[test]
    fn document_without_optional_fields_parses() {
        let raw = r#"{
            "playlist_name": "Minimal",
            "tracks": [
                {"name": "Song", "artist": "Someone", "album": "Record", "duration_ms": 1000}
            ]
        }"#;
        let doc: PlaylistDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.playlist_id, None);
        assert_eq!(doc.tracks.len(), 1);
        assert_eq!(doc.tracks[0].spotify_url, None);
    }
}
