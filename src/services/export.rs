use std::sync::atomic::{AtomicUsize, Ordering};

use futures::{StreamExt, TryStreamExt, stream};

use crate::error::ExportError;
use crate::ports::spotify::SpotifyApiPlaylist;
use crate::ports::terminal::{Choice, ProgressReporter, Prompter};
use crate::ports::youtube_music::YoutubeMusicClient;
use crate::services::aggregate::{PlaylistResult, aggregate};
use crate::services::matching::matcher::{AutoMatch, MatchPolicy, auto_match};
use crate::services::matching::types::{MatchOutcome, SourceTrack, search_query};
use crate::services::resolution::{DeferredTrack, resolve};
use crate::services::spotify::library::SourcePlaylist;

pub const DEFAULT_CONCURRENCY: usize = 16;

/// Matches selected Spotify playlists against YouTube Music.
///
/// Each playlist goes through two phases. The first searches every track
/// concurrently and keeps the confident matches. The second asks the user,
/// one track at a time, about everything the first phase deferred.
pub struct ExportService<Y: YoutubeMusicClient, P: Prompter> {
    youtube: Y,
    prompter: P,
    policy: MatchPolicy,
    concurrency: usize,
}

fn playlist_choice(playlist: &SpotifyApiPlaylist) -> Choice {
    let subtitle = match &playlist.description {
        Some(description) => description.clone(),
        None => format!("{} tracks", playlist.total_tracks),
    };
    Choice::new(playlist.name.clone(), subtitle)
}

impl<Y: YoutubeMusicClient, P: Prompter> ExportService<Y, P> {
    pub fn new(youtube: Y, prompter: P, policy: MatchPolicy, concurrency: usize) -> Self {
        Self {
            youtube,
            prompter,
            policy,
            concurrency: concurrency.max(1),
        }
    }

    /// Let the user pick the playlists to export. Asks again until at least
    /// one playlist is picked.
    pub async fn select_playlists(
        &self,
        playlists: Vec<SpotifyApiPlaylist>,
    ) -> Result<Vec<SpotifyApiPlaylist>, ExportError> {
        if playlists.is_empty() {
            return Err(ExportError::Prompt(
                "There are no playlists to choose from".into(),
            ));
        }
        let choices: Vec<Choice> = playlists.iter().map(playlist_choice).collect();

        let selection = loop {
            let selection = self
                .prompter
                .multi_select("Choose playlists to export", &choices)
                .await
                .map_err(|e| ExportError::Prompt(format!("{e:#}")))?
                .ok_or(ExportError::PromptCancelled)?;
            if !selection.is_empty() {
                break selection;
            }
            tracing::debug!("No playlist selected, asking again");
        };

        let mut playlists: Vec<Option<SpotifyApiPlaylist>> =
            playlists.into_iter().map(Some).collect();
        selection
            .into_iter()
            .map(|index| {
                playlists
                    .get_mut(index)
                    .and_then(Option::take)
                    .ok_or_else(|| {
                        ExportError::Prompt(format!("Selection {} is out of range", index))
                    })
            })
            .collect()
    }

    async fn auto_match_track(&self, track: &SourceTrack) -> Result<AutoMatch, ExportError> {
        let query = search_query(track);
        let songs = self
            .youtube
            .search_songs(&query)
            .await
            .map_err(|e| ExportError::search(&query, &e))?;

        Ok(auto_match(track, songs, &self.policy))
    }

    /// First phase: search and auto-match every present track of `playlist`.
    ///
    /// The result is aligned with `playlist.entries`; absent entries yield
    /// `None` without a search.
    pub async fn auto_match_playlist(
        &self,
        playlist: &SourcePlaylist,
        progress: &dyn ProgressReporter,
    ) -> Result<Vec<Option<AutoMatch>>, ExportError> {
        let total = playlist.entries.len();
        let label = format!("Fetching YouTube Tracks for {}", playlist.playlist.name);
        progress.report(&label);

        let done = AtomicUsize::new(0);
        let done = &done;
        let label = label.as_str();

        stream::iter(playlist.entries.iter())
            .map(move |entry| async move {
                let matched = match entry.track() {
                    Some(track) => Some(self.auto_match_track(track).await?),
                    None => None,
                };
                let count = done.fetch_add(1, Ordering::SeqCst) + 1;
                progress.report(&format!("{}: {}/{}", label, count, total));
                Ok::<_, ExportError>(matched)
            })
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    /// Run both phases for one playlist.
    pub async fn export_playlist(
        &self,
        playlist: SourcePlaylist,
        progress: &dyn ProgressReporter,
    ) -> Result<PlaylistResult, ExportError> {
        let matches = self.auto_match_playlist(&playlist, progress).await?;
        let deferred = matches
            .iter()
            .filter(|matched| matches!(matched, Some(AutoMatch::Deferred(_))))
            .count();
        tracing::info!(
            "'{}': {} of {} tracks need a manual choice",
            playlist.playlist.name,
            deferred,
            playlist.entries.len()
        );

        progress.pause();
        let mut resolved = Vec::with_capacity(playlist.entries.len());
        for (entry, matched) in playlist.entries.into_iter().zip(matches) {
            let outcome = match (entry.track(), matched) {
                (_, Some(AutoMatch::Matched(id))) => Some(MatchOutcome::Matched(id)),
                (Some(track), Some(AutoMatch::Deferred(songs))) => {
                    let deferred = DeferredTrack {
                        track: track.clone(),
                        songs,
                    };
                    Some(resolve(&deferred, &self.youtube, &self.prompter).await?)
                }
                _ => None,
            };
            resolved.push((entry, outcome));
        }

        Ok(aggregate(playlist.playlist.name, resolved))
    }

    /// Export `playlists` one after another, keeping their order.
    pub async fn export_all(
        &self,
        playlists: Vec<SourcePlaylist>,
        progress: &dyn ProgressReporter,
    ) -> Result<Vec<PlaylistResult>, ExportError> {
        let mut results = Vec::with_capacity(playlists.len());
        for playlist in playlists {
            results.push(self.export_playlist(playlist, progress).await?);
        }
        Ok(results)
    }
}
