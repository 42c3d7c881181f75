use std::path::PathBuf;

use log::{debug, warn};

use crate::clients::{
    entities::{Page, PlaylistSummary, Track, User},
    errors::{Error, Result},
    source::PlaylistSource,
};
use crate::config::SpotifySettings;
use rspotify::{
    AuthCodeSpotify, Config, Credentials, OAuth,
    model::{FullTrack, PlayableItem, PlaylistId, PlaylistItem, SavedTrack, SimplifiedPlaylist},
    prelude::*,
    scopes,
};

fn track_from_full(track: FullTrack, added_at: Option<String>) -> Track {
    let artist = track
        .artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Track {
        name: track.name,
        artist,
        album: track.album.name,
        duration_ms: u64::try_from(track.duration.num_milliseconds()).unwrap_or(0),
        spotify_url: track.external_urls.get("spotify").cloned(),
        added_at,
    }
}

impl From<SavedTrack> for Track {
    fn from(f: SavedTrack) -> Track {
        track_from_full(f.track, Some(f.added_at.to_rfc3339()))
    }
}

// Episodes and removed tracks come back as items too, those yield None
fn track_from_item(item: PlaylistItem) -> Option<Track> {
    let added_at = item.added_at.map(|at| at.to_rfc3339());
    match item.track {
        Some(PlayableItem::Track(track)) => Some(track_from_full(track, added_at)),
        Some(_) => {
            debug!("Skipping non-track playlist item");
            None
        }
        None => {
            warn!("Skipping empty playlist item added at {added_at:?}");
            None
        }
    }
}

impl From<SimplifiedPlaylist> for PlaylistSummary {
    fn from(p: SimplifiedPlaylist) -> PlaylistSummary {
        PlaylistSummary {
            id: p.id.id().to_string(),
            name: p.name,
            owner_id: p.owner.id.id().to_string(),
            url: p.external_urls.get("spotify").cloned(),
        }
    }
}

pub struct SpotifyClient {
    pub spotify: AuthCodeSpotify,
}

impl SpotifyClient {
    pub fn new(spotify: AuthCodeSpotify) -> Self {
        SpotifyClient { spotify }
    }

    // Authorize the Spotify client via CLI prompt and OAuth flow
    // This function requires the `cli` feature enabled.
    pub async fn authorize_client(&self) -> Result<()> {
        debug!("Starting Spotify authorization ...");
        let url = self.spotify.get_authorize_url(false)?;
        self.spotify.prompt_for_token(&url).await?;
        Ok(())
    }

    /// Builds a client from loaded settings, tokens are cached in the user cache directory
    pub fn from_settings(settings: &SpotifySettings) -> Self {
        let creds = Credentials::new(&settings.client_id, &settings.client_secret);
        let oauth = OAuth {
            redirect_uri: settings.redirect_uri.clone(),
            scopes: scopes!(
                "playlist-read-private",
                "playlist-read-collaborative",
                "user-library-read",
                "user-read-private"
            ),
            ..Default::default()
        };

        let cache_path = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp")) // Fallback to /tmp if cache directory can't be determined
            .join(".playlist_dump_token_cache");

        let spotify = AuthCodeSpotify::with_config(
            creds,
            oauth,
            Config {
                token_cached: true,
                token_refreshing: true,
                cache_path,
                ..Default::default()
            },
        );

        Self::new(spotify)
    }
}

impl PlaylistSource for SpotifyClient {
    async fn current_user(&self) -> Result<User> {
        let user = self.spotify.me().await?;
        debug!("Authenticated as user: {:?}", user.display_name);
        Ok(User {
            id: user.id.id().to_string(),
            display_name: user.display_name,
        })
    }

    async fn saved_tracks_page(&self, limit: u32, offset: u32) -> Result<Page<Track>> {
        let page = self
            .spotify
            .current_user_saved_tracks_manual(None, Some(limit), Some(offset))
            .await?;
        Ok(Page {
            fetched: page.items.len(),
            has_next: page.next.is_some(),
            items: page.items.into_iter().map(Track::from).collect(),
        })
    }

    async fn playlists_page(&self, limit: u32, offset: u32) -> Result<Page<PlaylistSummary>> {
        let page = self
            .spotify
            .current_user_playlists_manual(Some(limit), Some(offset))
            .await?;
        Ok(Page {
            fetched: page.items.len(),
            has_next: page.next.is_some(),
            items: page.items.into_iter().map(PlaylistSummary::from).collect(),
        })
    }

    async fn playlist_tracks_page(
        &self,
        playlist: &PlaylistSummary,
        limit: u32,
        offset: u32,
    ) -> Result<Page<Track>> {
        let id = PlaylistId::from_id(playlist.id.as_str())
            .map_err(|e| Error::ParseError(format!("playlist id {}: {e}", playlist.id)))?;
        let page = self
            .spotify
            .playlist_items_manual(id, None, None, Some(limit), Some(offset))
            .await?;
        Ok(Page {
            fetched: page.items.len(),
            has_next: page.next.is_some(),
            items: page.items.into_iter().filter_map(track_from_item).collect(),
        })
    }
}
