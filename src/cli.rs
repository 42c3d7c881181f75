use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{info, warn};
use playlist_dump::clients::{
    LocalStorage, SpotifyClient,
    errors::Result,
    local_storage::{DEFAULT_PROCESSED_DIR, DEFAULT_RAW_DIR},
};
use playlist_dump::config::SpotifySettings;
use playlist_dump::converter;
use playlist_dump::downloader::{DownloadOptions, Downloader};

#[derive(Parser)]
#[command(name = "playlist-dump")]
#[command(version, about = "Download Spotify playlists and combine them into a CSV", long_about = None)]
struct Cli {
    /// Path to the JSON config file with Spotify credentials
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding one JSON file per playlist
    #[arg(long, global = true, default_value = DEFAULT_RAW_DIR)]
    raw_dir: PathBuf,

    /// Directory the combined CSV is written to
    #[arg(long, global = true, default_value = DEFAULT_PROCESSED_DIR)]
    processed_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download Liked Songs and playlists as JSON
    Download {
        /// Also download playlists owned by other users
        #[arg(long)]
        include_followed: bool,
        /// Do not download Liked Songs
        #[arg(long)]
        skip_liked: bool,
    },
    /// Combine downloaded playlists into one CSV
    Convert {},
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let storage = LocalStorage::new(cli.raw_dir, cli.processed_dir);

    match cli.command {
        Commands::Download {
            include_followed,
            skip_liked,
        } => {
            let options = DownloadOptions {
                include_followed,
                skip_liked,
            };
            download(cli.config, storage, options).await?;
        }
        Commands::Convert {} => {
            convert(&storage)?;
        }
    }
    Ok(())
}

async fn download(config: Option<PathBuf>, storage: LocalStorage, options: DownloadOptions) -> Result<()> {
    info!("Loading config ...");
    let settings = SpotifySettings::load(config.as_deref())?;
    let spotify = SpotifyClient::from_settings(&settings);
    info!("Authorizing client ...");
    // CLI prompt may be shown on this call
    spotify.authorize_client().await?;

    let mut downloader = Downloader::new(spotify, storage, options);
    let report = downloader.download_all().await?;
    for (name, reason) in &report.failed {
        warn!("Playlist '{name}' was not downloaded: {reason}");
    }
    Ok(())
}

fn convert(storage: &LocalStorage) -> Result<()> {
    let report = converter::combine_playlists_to_csv(storage)?;
    for (path, reason) in &report.failures {
        warn!("{path:?} was skipped: {reason}");
    }
    Ok(())
}
