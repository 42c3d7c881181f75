use crate::clients::{
    entities::{Page, PlaylistSummary, Track, User},
    errors::Result,
};

/// Paginated read access to a user's music library.
///
/// `offset` counts items, not pages. Implementations report `has_next`
/// exactly as the remote API does, the caller decides when to stop.
#[allow(async_fn_in_trait)]
pub trait PlaylistSource {
    async fn current_user(&self) -> Result<User>;

    async fn saved_tracks_page(&self, limit: u32, offset: u32) -> Result<Page<Track>>;

    async fn playlists_page(&self, limit: u32, offset: u32) -> Result<Page<PlaylistSummary>>;

    async fn playlist_tracks_page(
        &self,
        playlist: &PlaylistSummary,
        limit: u32,
        offset: u32,
    ) -> Result<Page<Track>>;
}
