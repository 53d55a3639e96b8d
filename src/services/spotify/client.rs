use color_eyre::eyre::{Result, WrapErr};

use crate::ports::Page;
use crate::ports::spotify::{SpotifyApiPlaylist, SpotifyApiTrack, SpotifyClient};
use crate::spotify_rs::auth::{RefreshTokenError, SpotifyCredentials, refresh_access_token};
use crate::spotify_rs::client::SpotifyClient as SpotifyWebClient;
use crate::spotify_rs::types::{SpotifyPlaylist, SpotifyPlaylistItem};

pub struct SpotifyHttpAdapter {
    client: SpotifyWebClient,
}

impl SpotifyHttpAdapter {
    /// Exchange the long-lived refresh token for an access token.
    pub async fn authenticate(credentials: &SpotifyCredentials) -> Result<Self, RefreshTokenError> {
        let token = refresh_access_token(credentials).await?;
        tracing::debug!(
            "Refreshed Spotify access token, expires in {}s",
            token.expires_in
        );
        if token.refresh_token.is_some() {
            tracing::info!("Spotify issued a new refresh token for this session");
        }

        Ok(Self {
            client: SpotifyWebClient::new(token.access_token),
        })
    }
}

fn to_api_playlist(playlist: SpotifyPlaylist) -> SpotifyApiPlaylist {
    SpotifyApiPlaylist {
        id: playlist.id,
        name: playlist.name,
        description: playlist.description.filter(|d| !d.is_empty()),
        total_tracks: playlist.tracks.total,
    }
}

fn to_api_track(item: SpotifyPlaylistItem) -> Option<SpotifyApiTrack> {
    let track = item.track?;
    Some(SpotifyApiTrack {
        id: track.id?,
        name: track.name,
        artists: track.artists.into_iter().map(|a| a.name).collect(),
    })
}

#[async_trait::async_trait]
impl SpotifyClient for SpotifyHttpAdapter {
    async fn playlists_page(&self, offset: u32, limit: u32) -> Result<Page<SpotifyApiPlaylist>> {
        let page = self
            .client
            .get_user_playlists_page(offset, limit)
            .await
            .wrap_err_with(|| format!("Failed to fetch playlists at offset {}", offset))?;

        Ok(Page {
            items: page.items.into_iter().map(to_api_playlist).collect(),
            limit: page.limit,
        })
    }

    async fn playlist_tracks_page(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Page<Option<SpotifyApiTrack>>> {
        let page = self
            .client
            .get_playlist_tracks_page(playlist_id, offset, limit)
            .await
            .wrap_err_with(|| {
                format!(
                    "Failed to fetch tracks of playlist {} at offset {}",
                    playlist_id, offset
                )
            })?;

        Ok(Page {
            items: page.items.into_iter().map(to_api_track).collect(),
            limit: page.limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spotify_rs::types::{SpotifyArtist, SpotifyPlaylistTracks, SpotifyTrack};

    #[test]
    fn test_to_api_track() {
        let item = SpotifyPlaylistItem {
            track: Some(SpotifyTrack {
                id: Some("t1".into()),
                name: "Under Pressure".into(),
                artists: vec![
                    SpotifyArtist {
                        name: "Queen".into(),
                    },
                    SpotifyArtist {
                        name: "David Bowie".into(),
                    },
                ],
            }),
        };

        let track = to_api_track(item).unwrap();
        assert_eq!(track.id, "t1");
        assert_eq!(track.artists, vec!["Queen", "David Bowie"]);
    }

    #[test]
    fn test_removed_and_local_tracks_are_absent() {
        assert!(to_api_track(SpotifyPlaylistItem { track: None }).is_none());

        let local_file = SpotifyPlaylistItem {
            track: Some(SpotifyTrack {
                id: None,
                name: "demo.mp3".into(),
                artists: vec![],
            }),
        };
        assert!(to_api_track(local_file).is_none());
    }

    #[test]
    fn test_empty_description_is_dropped() {
        let playlist = to_api_playlist(SpotifyPlaylist {
            id: "pl1".into(),
            name: "Focus".into(),
            description: Some(String::new()),
            tracks: SpotifyPlaylistTracks { total: 3 },
        });

        assert!(playlist.description.is_none());
        assert_eq!(playlist.total_tracks, 3);
    }
}
