use color_eyre::eyre::Result;

use super::Page;

/// Decoupled representation of a Spotify playlist from the API.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotifyApiPlaylist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub total_tracks: u32,
}

/// Decoupled representation of a Spotify track from the API.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotifyApiTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
}

/// Port trait wrapping the Spotify API capabilities used by business logic.
///
/// Implementations live in `services::spotify::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SpotifyClient: Send + Sync {
    async fn playlists_page(&self, offset: u32, limit: u32) -> Result<Page<SpotifyApiPlaylist>>;

    /// Slots whose track is gone or has no id come back as `None`.
    async fn playlist_tracks_page(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Page<Option<SpotifyApiTrack>>>;
}
