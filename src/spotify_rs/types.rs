use serde::{Deserialize, Serialize};

/// Spotify OAuth token response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    /// Only present when Spotify rotates the refresh token
    pub refresh_token: Option<String>,
}

/// Offset/limit paging object wrapping every Spotify list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPaging<T> {
    pub items: Vec<T>,
    pub limit: u32,
}

/// Spotify playlist from API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPlaylist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tracks: SpotifyPlaylistTracks,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyPlaylistTracks {
    pub total: u32,
}

/// Entry of a playlist's track list. `track` is null when the track was
/// removed from Spotify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPlaylistItem {
    pub track: Option<SpotifyTrack>,
}

/// Spotify track from API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    /// Null for local files
    pub id: Option<String>,
    pub name: String,
    /// Missing for podcast episodes
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_playlist_tracks_page() {
        let page: SpotifyPaging<SpotifyPlaylistItem> = serde_json::from_value(serde_json::json!({
            "href": "https://api.spotify.com/v1/playlists/pl1/tracks?offset=0&limit=50",
            "items": [
                {
                    "added_at": "2021-01-01T00:00:00Z",
                    "track": {
                        "id": "t1",
                        "name": "Yesterday",
                        "artists": [{ "id": "a1", "name": "The Beatles" }],
                        "duration_ms": 125000
                    }
                },
                { "added_at": "2021-01-01T00:00:00Z", "track": null },
                {
                    "added_at": "2021-01-01T00:00:00Z",
                    "track": {
                        "id": null,
                        "name": "my-demo.mp3",
                        "artists": [{ "id": null, "name": "" }]
                    }
                }
            ],
            "limit": 50,
            "next": null,
            "offset": 0,
            "previous": null,
            "total": 3
        }))
        .unwrap();

        assert_eq!(page.items.len(), 3);
        assert_eq!(page.limit, 50);
        let first = page.items[0].track.as_ref().unwrap();
        assert_eq!(first.id.as_deref(), Some("t1"));
        assert_eq!(first.artists[0].name, "The Beatles");
        assert!(page.items[1].track.is_none());
        assert!(page.items[2].track.as_ref().unwrap().id.is_none());
    }

    #[test]
    fn test_deserialize_playlist_without_description() {
        let playlist: SpotifyPlaylist = serde_json::from_value(serde_json::json!({
            "id": "pl1",
            "name": "Road Trip",
            "description": null,
            "tracks": { "href": "https://api.spotify.com/v1/playlists/pl1/tracks", "total": 12 }
        }))
        .unwrap();

        assert_eq!(playlist.name, "Road Trip");
        assert!(playlist.description.is_none());
        assert_eq!(playlist.tracks.total, 12);
    }
}
