use futures::future::try_join_all;

use crate::error::ExportError;
use crate::ports::spotify::{SpotifyApiPlaylist, SpotifyClient};
use crate::services::matching::types::{PlaylistEntry, SourceTrack};
use crate::services::pagination::{PAGE_SIZE, fetch_all};

/// A selected playlist together with every slot of its track list.
#[derive(Debug, Clone)]
pub struct SourcePlaylist {
    pub playlist: SpotifyApiPlaylist,
    pub entries: Vec<PlaylistEntry>,
}

/// Read-only access to the user's Spotify library.
pub struct SpotifyLibraryService<C: SpotifyClient> {
    client: C,
}

impl<C: SpotifyClient> SpotifyLibraryService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub async fn playlists(&self) -> Result<Vec<SpotifyApiPlaylist>, ExportError> {
        let playlists = fetch_all(
            |offset, limit| self.client.playlists_page(offset, limit),
            PAGE_SIZE,
        )
        .await
        .map_err(|e| ExportError::fetch("Spotify playlists", &e))?;

        tracing::info!("Fetched {} Spotify playlists", playlists.len());
        Ok(playlists)
    }

    pub async fn playlist_entries(
        &self,
        playlist: &SpotifyApiPlaylist,
    ) -> Result<Vec<PlaylistEntry>, ExportError> {
        let tracks = fetch_all(
            |offset, limit| self.client.playlist_tracks_page(&playlist.id, offset, limit),
            PAGE_SIZE,
        )
        .await
        .map_err(|e| ExportError::fetch(format!("tracks of '{}'", playlist.name), &e))?;

        let entries: Vec<PlaylistEntry> = tracks
            .into_iter()
            .map(|track| {
                PlaylistEntry::from(track.map(|track| SourceTrack {
                    id: track.id,
                    title: track.name,
                    artists: track.artists,
                }))
            })
            .collect();

        tracing::info!(
            "Fetched {} tracks of playlist '{}' ({} unavailable)",
            entries.len(),
            playlist.name,
            entries
                .iter()
                .filter(|entry| entry.track().is_none())
                .count()
        );
        Ok(entries)
    }

    /// Fetch the track lists of all `playlists` at once.
    ///
    /// The result keeps the order of `playlists` whatever order the requests
    /// complete in.
    pub async fn load_playlists(
        &self,
        playlists: Vec<SpotifyApiPlaylist>,
    ) -> Result<Vec<SourcePlaylist>, ExportError> {
        try_join_all(playlists.into_iter().map(|playlist| async move {
            let entries = self.playlist_entries(&playlist).await?;
            Ok::<_, ExportError>(SourcePlaylist { playlist, entries })
        }))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Page;
    use crate::ports::spotify::{MockSpotifyClient, SpotifyApiTrack};
    use color_eyre::eyre::eyre;

    fn api_playlist(id: &str, name: &str) -> SpotifyApiPlaylist {
        SpotifyApiPlaylist {
            id: id.into(),
            name: name.into(),
            description: None,
            total_tracks: 0,
        }
    }

    fn api_track(id: &str) -> SpotifyApiTrack {
        SpotifyApiTrack {
            id: id.into(),
            name: format!("Track {}", id),
            artists: vec!["Artist".into()],
        }
    }

    #[tokio::test]
    async fn test_playlists_walks_all_pages() {
        let mut client = MockSpotifyClient::new();
        client
            .expect_playlists_page()
            .times(2)
            .returning(|offset, limit| {
                let count = if offset == 0 { limit } else { 7 };
                Ok(Page {
                    items: (0..count)
                        .map(|i| api_playlist(&format!("pl{}", offset + i), "Playlist"))
                        .collect(),
                    limit,
                })
            });

        let service = SpotifyLibraryService::new(client);
        let playlists = service.playlists().await.unwrap();

        assert_eq!(playlists.len(), 57);
        assert_eq!(playlists[0].id, "pl0");
        assert_eq!(playlists[56].id, "pl56");
    }

    #[tokio::test]
    async fn test_unavailable_tracks_become_absent() {
        let mut client = MockSpotifyClient::new();
        client
            .expect_playlist_tracks_page()
            .returning(|_, _, limit| {
                Ok(Page {
                    items: vec![Some(api_track("t1")), None, Some(api_track("t2"))],
                    limit,
                })
            });

        let service = SpotifyLibraryService::new(client);
        let entries = service
            .playlist_entries(&api_playlist("pl1", "Mix"))
            .await
            .unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].track().unwrap().id, "t1");
        assert_eq!(entries[1], PlaylistEntry::Absent);
        assert_eq!(entries[2].track().unwrap().title, "Track t2");
    }

    #[tokio::test]
    async fn test_load_playlists_keeps_selection_order() {
        let mut client = MockSpotifyClient::new();
        client
            .expect_playlist_tracks_page()
            .returning(|playlist_id, _, limit| {
                Ok(Page {
                    items: vec![Some(api_track(&format!("{}-t", playlist_id)))],
                    limit,
                })
            });

        let service = SpotifyLibraryService::new(client);
        let loaded = service
            .load_playlists(vec![api_playlist("b", "B"), api_playlist("a", "A")])
            .await
            .unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].playlist.name, "B");
        assert_eq!(loaded[0].entries[0].track().unwrap().id, "b-t");
        assert_eq!(loaded[1].playlist.name, "A");
    }

    #[tokio::test]
    async fn test_failed_page_fails_the_fetch() {
        let mut client = MockSpotifyClient::new();
        client
            .expect_playlist_tracks_page()
            .returning(|_, _, _| Err(eyre!("401 Unauthorized")));

        let service = SpotifyLibraryService::new(client);
        let result = service
            .load_playlists(vec![api_playlist("pl1", "Mix")])
            .await;

        match result {
            Err(ExportError::Fetch { what, reason }) => {
                assert_eq!(what, "tracks of 'Mix'");
                assert!(reason.contains("401"));
            }
            other => panic!("expected fetch error, got {:?}", other),
        }
    }
}
