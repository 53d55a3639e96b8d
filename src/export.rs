//! The interactive export run, one spinner per stage.
//!
//! Every stage is fail-fast. The failing stage shows the error and nothing is
//! written.

use std::path::{Path, PathBuf};

use color_eyre::Result;

use crate::error::ExportError;
use crate::ports::spotify::SpotifyClient;
use crate::ports::terminal::{ProgressReporter, Prompter};
use crate::ports::youtube_music::YoutubeMusicClient;
use crate::services::aggregate::write_results;
use crate::services::export::ExportService;
use crate::services::matching::matcher::MatchPolicy;
use crate::services::spotify::client::SpotifyHttpAdapter;
use crate::services::spotify::library::SpotifyLibraryService;
use crate::services::youtube_music::client::YoutubeMusicHttpAdapter;
use crate::spotify_rs::auth::SpotifyCredentials;
use crate::terminal::progress::Stage;
use crate::terminal::prompt::DialoguerPrompter;

pub struct ExportOptions {
    pub credentials: SpotifyCredentials,
    pub output: PathBuf,
    pub concurrency: usize,
    pub policy: MatchPolicy,
}

async fn initialize(
    credentials: &SpotifyCredentials,
) -> Result<(YoutubeMusicHttpAdapter, SpotifyHttpAdapter), ExportError> {
    futures::try_join!(
        async {
            YoutubeMusicHttpAdapter::initialize()
                .await
                .map_err(|e| ExportError::Auth(format!("{e:#}")))
        },
        async {
            SpotifyHttpAdapter::authenticate(credentials)
                .await
                .map_err(|e| ExportError::Auth(e.to_string()))
        },
    )
}

pub async fn run(options: ExportOptions) -> Result<()> {
    let stage = Stage::start("Initializing APIs");
    let (youtube, spotify) = stage.finish(initialize(&options.credentials).await)?;

    let library = SpotifyLibraryService::new(spotify);
    let service = ExportService::new(
        youtube,
        DialoguerPrompter,
        options.policy,
        options.concurrency,
    );

    export_with(&library, &service, &options.output).await
}

/// Run every stage after the clients are ready.
pub async fn export_with<S, Y, P>(
    library: &SpotifyLibraryService<S>,
    service: &ExportService<Y, P>,
    output: &Path,
) -> Result<()>
where
    S: SpotifyClient,
    Y: YoutubeMusicClient,
    P: Prompter,
{
    let stage = Stage::start("Fetching Spotify Playlists");
    let playlists = stage.finish(library.playlists().await)?;

    // The prompt needs the terminal; the stage only shows the outcome.
    let stage = Stage::start("Choosing playlists");
    stage.pause();
    let selected = stage.finish(service.select_playlists(playlists).await)?;
    tracing::info!("{} playlists selected", selected.len());

    let stage = Stage::start("Fetching Chosen Playlists Information");
    let playlists = stage.finish(library.load_playlists(selected).await)?;

    let stage = Stage::start("Fetching YouTube Tracks");
    let results = stage.finish(service.export_all(playlists, &stage).await)?;

    let stage = Stage::start(format!("Saving results to {}", output.display()));
    stage.finish(write_results(output, &results))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Page;
    use crate::ports::spotify::{MockSpotifyClient, SpotifyApiPlaylist, SpotifyApiTrack};
    use crate::ports::terminal::MockPrompter;
    use crate::ports::youtube_music::MockYoutubeMusicClient;
    use crate::test_utils::song;
    use color_eyre::eyre::eyre;

    fn playlist(id: &str, name: &str) -> SpotifyApiPlaylist {
        SpotifyApiPlaylist {
            id: id.into(),
            name: name.into(),
            description: None,
            total_tracks: 2,
        }
    }

    fn spotify_library() -> SpotifyLibraryService<MockSpotifyClient> {
        let mut spotify = MockSpotifyClient::new();
        spotify.expect_playlists_page().returning(|_, limit| {
            Ok(Page {
                items: vec![playlist("pl1", "Road Trip"), playlist("pl2", "Chill")],
                limit,
            })
        });
        spotify
            .expect_playlist_tracks_page()
            .withf(|id, _, _| id == "pl1")
            .returning(|_, _, limit| {
                Ok(Page {
                    items: vec![
                        Some(SpotifyApiTrack {
                            id: "t1".into(),
                            name: "Yesterday".into(),
                            artists: vec!["The Beatles".into()],
                        }),
                        None,
                    ],
                    limit,
                })
            });
        SpotifyLibraryService::new(spotify)
    }

    #[tokio::test]
    async fn test_export_writes_selected_playlists() {
        let mut youtube = MockYoutubeMusicClient::new();
        youtube
            .expect_search_songs()
            .returning(|_| Ok(vec![song("s9", "Yesterday", &["The Beatles"])]));
        let mut prompter = MockPrompter::new();
        prompter
            .expect_multi_select()
            .times(1)
            .returning(|_, _| Ok(Some(vec![0])));

        let service = ExportService::new(youtube, prompter, MatchPolicy::default(), 16);
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("data.json");

        export_with(&spotify_library(), &service, &output)
            .await
            .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!([{ "playlistName": "Road Trip", "tracks": { "t1": "s9" } }])
        );
    }

    #[tokio::test]
    async fn test_failed_search_writes_nothing() {
        let mut youtube = MockYoutubeMusicClient::new();
        youtube
            .expect_search_songs()
            .returning(|_| Err(eyre!("503 Service Unavailable")));
        let mut prompter = MockPrompter::new();
        prompter
            .expect_multi_select()
            .returning(|_, _| Ok(Some(vec![0])));

        let service = ExportService::new(youtube, prompter, MatchPolicy::default(), 16);
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("data.json");

        let error = export_with(&spotify_library(), &service, &output)
            .await
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<ExportError>(),
            Some(ExportError::Search { .. })
        ));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_cancelled_selection_writes_nothing() {
        let mut youtube = MockYoutubeMusicClient::new();
        youtube.expect_search_songs().times(0);
        let mut prompter = MockPrompter::new();
        prompter
            .expect_multi_select()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = ExportService::new(youtube, prompter, MatchPolicy::default(), 16);
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("data.json");

        let error = export_with(&spotify_library(), &service, &output)
            .await
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<ExportError>(),
            Some(ExportError::PromptCancelled)
        ));
        assert!(!output.exists());
    }
}
