use std::time::Duration;

use color_eyre::Result;
use serde::de::DeserializeOwned;

use crate::spotify_rs::types::{SpotifyPaging, SpotifyPlaylist, SpotifyPlaylistItem};

const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Spotify Web API client
pub struct SpotifyClient {
    access_token: String,
    client: reqwest::Client,
}

impl SpotifyClient {
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            client: reqwest::Client::new(),
        }
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        url: &str,
        offset: u32,
        limit: u32,
    ) -> Result<SpotifyPaging<T>> {
        let response = self
            .client
            .get(url)
            .query(&[("offset", offset), ("limit", limit)])
            .bearer_auth(&self.access_token)
            .timeout(Duration::from_secs(10))
            .send()
            .await?
            .error_for_status()?;

        let page: SpotifyPaging<T> = response.json().await?;
        Ok(page)
    }

    /// Get one page of the current user's playlists
    pub async fn get_user_playlists_page(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<SpotifyPaging<SpotifyPlaylist>> {
        self.get_page(&format!("{}/me/playlists", SPOTIFY_API_URL), offset, limit)
            .await
    }

    /// Get one page of the tracks in a playlist
    pub async fn get_playlist_tracks_page(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<SpotifyPaging<SpotifyPlaylistItem>> {
        let url = format!(
            "{}/playlists/{}/tracks",
            SPOTIFY_API_URL,
            urlencoding::encode(playlist_id)
        );
        self.get_page(&url, offset, limit).await
    }
}
