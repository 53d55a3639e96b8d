//! Interactive fallback for tracks the automatic pass could not match.
//!
//! The user first picks from the song results that were already fetched. If
//! none of them is right, a video search is run and the user picks from those,
//! or skips the track.

use crate::error::ExportError;
use crate::ports::terminal::{Choice, Prompter};
use crate::ports::youtube_music::YoutubeMusicClient;
use crate::services::matching::similarity::similarity_percent;
use crate::services::matching::types::{Candidate, MatchOutcome, SourceTrack, search_query};

/// A track left unmatched by the automatic pass, with the song results that
/// were shown to the matcher.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredTrack {
    pub track: SourceTrack,
    pub songs: Vec<Candidate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ResolutionState {
    SongChoice,
    VideoChoice,
    Matched(String),
    Unmatched,
}

fn track_label(track: &SourceTrack) -> String {
    let artist = match track.primary_artist() {
        "" => "?",
        artist => artist,
    };
    format!("{} - {}", track.title, artist)
}

fn percent_label(percent: f64) -> String {
    format!("{}%", percent)
}

fn song_choices(track: &SourceTrack, songs: &[Candidate]) -> Vec<Choice> {
    songs
        .iter()
        .map(|song| {
            Choice::new(
                format!("{} - {}", song.title, song.primary_artist().unwrap_or("?")),
                percent_label(similarity_percent(&song.title, &track.title)),
            )
        })
        .chain(std::iter::once(Choice::new(
            "NONE",
            "Search using YouTube instead",
        )))
        .collect()
}

fn video_choices(track: &SourceTrack, videos: &[Candidate]) -> Vec<Choice> {
    let query = search_query(track);
    videos
        .iter()
        .map(|video| {
            Choice::new(
                video.title.clone(),
                percent_label(similarity_percent(&video.title, &query)),
            )
        })
        .chain(std::iter::once(Choice::new("NONE", "Skip this track")))
        .collect()
}

/// Ask the user to pick one of `candidates`. The extra last choice is "NONE".
async fn choose<'a, P: Prompter + ?Sized>(
    prompter: &P,
    message: &str,
    choices: &[Choice],
    candidates: &'a [Candidate],
) -> Result<Option<&'a Candidate>, ExportError> {
    let selection = prompter
        .select(message, choices)
        .await
        .map_err(|e| ExportError::Prompt(format!("{e:#}")))?
        .ok_or(ExportError::PromptCancelled)?;

    if selection == candidates.len() {
        return Ok(None);
    }
    candidates
        .get(selection)
        .map(Some)
        .ok_or_else(|| ExportError::Prompt(format!("Selection {} is out of range", selection)))
}

async fn song_choice<P: Prompter + ?Sized>(
    deferred: &DeferredTrack,
    prompter: &P,
) -> Result<ResolutionState, ExportError> {
    let message = format!(
        "Which of these is the correct song for: {}",
        track_label(&deferred.track)
    );
    let choices = song_choices(&deferred.track, &deferred.songs);

    Ok(
        match choose(prompter, &message, &choices, &deferred.songs).await? {
            Some(song) => ResolutionState::Matched(song.id.clone()),
            None => ResolutionState::VideoChoice,
        },
    )
}

async fn video_choice<Y: YoutubeMusicClient + ?Sized, P: Prompter + ?Sized>(
    deferred: &DeferredTrack,
    youtube: &Y,
    prompter: &P,
) -> Result<ResolutionState, ExportError> {
    let query = search_query(&deferred.track);
    let videos = youtube
        .search_videos(&query)
        .await
        .map_err(|e| ExportError::search(&query, &e))?;

    let message = format!(
        "Which of these is the correct video for: {}",
        track_label(&deferred.track)
    );
    let choices = video_choices(&deferred.track, &videos);

    Ok(match choose(prompter, &message, &choices, &videos).await? {
        Some(video) => ResolutionState::Matched(video.id.clone()),
        None => ResolutionState::Unmatched,
    })
}

/// Walk the user through choosing a match for one deferred track.
pub async fn resolve<Y: YoutubeMusicClient + ?Sized, P: Prompter + ?Sized>(
    deferred: &DeferredTrack,
    youtube: &Y,
    prompter: &P,
) -> Result<MatchOutcome, ExportError> {
    let mut state = ResolutionState::SongChoice;

    loop {
        state = match state {
            ResolutionState::SongChoice => song_choice(deferred, prompter).await?,
            ResolutionState::VideoChoice => video_choice(deferred, youtube, prompter).await?,
            ResolutionState::Matched(id) => {
                tracing::info!("'{}' resolved to {}", deferred.track.title, id);
                return Ok(MatchOutcome::Matched(id));
            }
            ResolutionState::Unmatched => {
                tracing::info!("'{}' left unmatched", deferred.track.title);
                return Ok(MatchOutcome::Unmatched);
            }
        };
    }
}
