/// Data entities for playlists and tracks
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Raw and processed data directories
pub mod local_storage;
/// Paginated library access
pub mod source;
/// Spotify API client
pub mod spotify;

pub use local_storage::LocalStorage;
pub use source::PlaylistSource;
pub use spotify::SpotifyClient;
