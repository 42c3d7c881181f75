//! Playlist dump - download Spotify playlists and combine them into a CSV
//!
//! The downloader stores one JSON document per playlist in a raw data
//! directory, the converter flattens those documents into a single CSV.

/// Client modules for interacting with Spotify and local storage
pub mod clients;
/// Credential loading
pub mod config;
/// JSON to CSV conversion
pub mod converter;
/// Playlist download pipeline
pub mod downloader;
