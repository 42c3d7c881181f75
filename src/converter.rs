//! Flattens the downloaded playlist documents into one CSV.

use std::path::PathBuf;

use log::{error, info, warn};
use serde::Serialize;

use crate::clients::{
    LocalStorage,
    entities::{PlaylistDocument, Track},
    errors::{Error, Result},
};

/// Column order of the combined CSV
pub const CSV_HEADER: [&str; 8] = [
    "playlist_name",
    "name",
    "artist",
    "album",
    "duration",
    "added_at",
    "spotify_url",
    "playlist_url",
];

/// Formats milliseconds as `m:ss`, minutes are not padded.
pub fn format_duration(ms: u64) -> String {
    let seconds = ms / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    playlist_name: &'a str,
    name: &'a str,
    artist: &'a str,
    album: &'a str,
    duration: String,
    added_at: Option<&'a str>,
    spotify_url: Option<&'a str>,
    playlist_url: Option<&'a str>,
}

impl<'a> CsvRow<'a> {
    fn new(doc: &'a PlaylistDocument, track: &'a Track) -> Self {
        CsvRow {
            playlist_name: &doc.playlist_name,
            name: &track.name,
            artist: &track.artist,
            album: &track.album,
            duration: format_duration(track.duration_ms),
            added_at: track.added_at.as_deref(),
            spotify_url: track.spotify_url.as_deref(),
            playlist_url: doc.playlist_url.as_deref(),
        }
    }
}

/// Outcome of a conversion run
#[derive(Debug)]
pub struct ConversionReport {
    /// Where the CSV was written
    pub output: PathBuf,
    /// Files that parsed and contributed rows
    pub files_processed: usize,
    /// Data rows written, header excluded
    pub rows_written: usize,
    /// Files that were skipped, with the reason
    pub failures: Vec<(PathBuf, String)>,
}

/// Reads every playlist JSON in the raw directory and writes the combined
/// CSV into the processed directory. Unreadable files are reported and skipped.
pub fn combine_playlists_to_csv(storage: &LocalStorage) -> Result<ConversionReport> {
    info!("Starting playlist combination process...");
    if !storage.raw_dir().is_dir() {
        return Err(Error::MissingRawDirectory(storage.raw_dir().to_path_buf()));
    }
    let files = storage.list_playlist_files()?;
    if files.is_empty() {
        return Err(Error::NoPlaylistFiles(storage.raw_dir().to_path_buf()));
    }
    info!("Found {} playlist files to process.", files.len());

    let mut documents = Vec::with_capacity(files.len());
    let mut failures = Vec::new();
    for path in files {
        match LocalStorage::read_playlist(&path) {
            Ok(doc) => {
                info!("Processed {} ({} tracks)", doc.playlist_name, doc.tracks.len());
                documents.push(doc);
            }
            Err(e) => {
                error!("Error processing {path:?}: {e}");
                failures.push((path, e.to_string()));
            }
        }
    }

    std::fs::create_dir_all(storage.processed_dir())?;
    let output = storage.csv_output_path();
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&output)?;
    writer.write_record(CSV_HEADER)?;

    let mut rows_written = 0;
    for doc in &documents {
        for track in &doc.tracks {
            writer.serialize(CsvRow::new(doc, track))?;
            rows_written += 1;
        }
    }
    writer.flush()?;

    if rows_written == 0 {
        warn!("No tracks were found in the playlist files, {output:?} only has a header");
    }
    info!(
        "Successfully combined {rows_written} tracks from {} playlists.",
        documents.len()
    );
    info!("Output saved to: {output:?}");

    Ok(ConversionReport {
        output,
        files_processed: documents.len(),
        rows_written,
        failures,
    })
}
