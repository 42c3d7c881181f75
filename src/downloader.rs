//! Downloads Liked Songs and the user's playlists into the raw data directory.

use std::future::Future;
use std::path::PathBuf;

use log::{debug, error, info, warn};

use crate::clients::{
    LocalStorage, PlaylistSource,
    entities::{LIKED_SONGS, Page, PlaylistDocument, PlaylistKind, PlaylistSummary, Track, User},
    errors::Result,
};

/// Page size for saved tracks and the playlist listing, the API maximum
pub const LIBRARY_PAGE_SIZE: u32 = 50;
/// Page size for playlist items, the API maximum
pub const PLAYLIST_PAGE_SIZE: u32 = 100;

/// Knobs for a download run
#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadOptions {
    /// Also download playlists owned by other users that appear in the library
    pub include_followed: bool,
    /// Do not download the Liked Songs collection
    pub skip_liked: bool,
}

/// Why a playlist was left out on purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Podcast or audiobook playlist
    SpokenWord(PlaylistKind),
    /// Owned by someone else
    NotOwned,
}

/// Outcome of a download run
#[derive(Debug, Default)]
pub struct DownloadReport {
    /// JSON files written, in download order
    pub written: Vec<PathBuf>,
    /// Playlists skipped by rule
    pub skipped: Vec<(String, SkipReason)>,
    /// Playlists that failed, with the error message
    pub failed: Vec<(String, String)>,
}

/// Requests pages until the source reports there is no next one or sends
/// back an empty page.
pub async fn fetch_all_pages<T, F, Fut>(label: &str, page_size: u32, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut offset = 0;
    loop {
        let page = fetch_page(page_size, offset).await?;
        if page.fetched == 0 {
            break;
        }
        items.extend(page.items);
        debug!("Processed {} items in '{label}' so far...", items.len());
        if !page.has_next {
            break;
        }
        offset += page_size;
    }
    Ok(items)
}

/// Runs the download pipeline against any [`PlaylistSource`]
pub struct Downloader<S> {
    source: S,
    storage: LocalStorage,
    options: DownloadOptions,
}

impl<S: PlaylistSource> Downloader<S> {
    /// Creates a downloader writing into `storage`'s raw directory
    pub fn new(source: S, storage: LocalStorage, options: DownloadOptions) -> Self {
        Downloader {
            source,
            storage,
            options,
        }
    }

    /// Downloads everything. Only failures to read the user or the
    /// playlist listing are returned as errors; per-playlist failures are
    /// logged and collected in the report.
    pub async fn download_all(&mut self) -> Result<DownloadReport> {
        info!("Starting playlist download ...");
        let user = self.source.current_user().await?;
        let mut report = DownloadReport::default();

        if !self.options.skip_liked {
            self.download_liked_songs(&user, &mut report).await;
        }

        let source = &self.source;
        let playlists = fetch_all_pages("playlist listing", LIBRARY_PAGE_SIZE, move |limit, offset| {
            source.playlists_page(limit, offset)
        })
        .await?;
        info!("Found {} playlists in the library", playlists.len());

        for playlist in &playlists {
            if let Some(reason) = self.skip_reason(playlist, &user) {
                info!("Skipping playlist '{}': {reason:?}", playlist.name);
                report.skipped.push((playlist.name.clone(), reason));
                continue;
            }
            self.download_playlist(playlist, &user, &mut report).await;
        }

        info!(
            "Download complete! Wrote {} files, skipped {}, failed {}",
            report.written.len(),
            report.skipped.len(),
            report.failed.len()
        );
        Ok(report)
    }

    fn skip_reason(&self, playlist: &PlaylistSummary, user: &User) -> Option<SkipReason> {
        let kind = PlaylistKind::classify(&playlist.name);
        if kind.is_spoken_word() {
            return Some(SkipReason::SpokenWord(kind));
        }
        if !self.options.include_followed && playlist.owner_id != user.id {
            return Some(SkipReason::NotOwned);
        }
        None
    }

    async fn download_liked_songs(&mut self, user: &User, report: &mut DownloadReport) {
        info!("Processing {LIKED_SONGS}");
        let source = &self.source;
        let fetched = fetch_all_pages(LIKED_SONGS, LIBRARY_PAGE_SIZE, move |limit, offset| {
            source.saved_tracks_page(limit, offset)
        })
        .await;
        self.store(None, LIKED_SONGS, user, fetched, report).await;
    }

    async fn download_playlist(
        &mut self,
        playlist: &PlaylistSummary,
        user: &User,
        report: &mut DownloadReport,
    ) {
        info!("Processing playlist: {}", playlist.name);
        let source = &self.source;
        let fetched = fetch_all_pages(&playlist.name, PLAYLIST_PAGE_SIZE, move |limit, offset| {
            source.playlist_tracks_page(playlist, limit, offset)
        })
        .await;
        self.store(Some(playlist), &playlist.name, user, fetched, report)
            .await;
    }

    async fn store(
        &mut self,
        summary: Option<&PlaylistSummary>,
        name: &str,
        user: &User,
        fetched: Result<Vec<Track>>,
        report: &mut DownloadReport,
    ) {
        let tracks = match fetched {
            Ok(tracks) => tracks,
            Err(e) => {
                error!("Error downloading playlist {name}: {e}");
                report.failed.push((name.to_string(), e.to_string()));
                return;
            }
        };
        if tracks.is_empty() {
            warn!("Playlist '{name}' has no tracks, writing it anyway");
        }

        let doc = PlaylistDocument::new(summary, name, user, tracks);
        let stem = self
            .storage
            .claim_file_stem(name, summary.map(|s| s.id.as_str()));
        match self.storage.write_playlist(&doc, &stem).await {
            Ok(path) => {
                info!(
                    "Successfully downloaded playlist '{name}' ({} tracks) to {path:?}",
                    doc.total_tracks
                );
                report.written.push(path);
            }
            Err(e) => {
                error!("Error saving playlist {name}: {e}");
                report.failed.push((name.to_string(), e.to_string()));
            }
        }
    }
}
