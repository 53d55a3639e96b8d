/// A track from the source catalog (Spotify).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTrack {
    pub id: String,
    pub title: String,
    pub artists: Vec<String>,
}

impl SourceTrack {
    /// The first credited artist, or an empty string when there is none.
    pub fn primary_artist(&self) -> &str {
        self.artists.first().map(String::as_str).unwrap_or_default()
    }
}

/// One slot of a source playlist.
///
/// Spotify keeps a slot for tracks that were removed or are otherwise
/// unavailable. Those slots are carried through as `Absent` and dropped when
/// the playlist result is aggregated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistEntry {
    Present(SourceTrack),
    Absent,
}

impl PlaylistEntry {
    pub fn track(&self) -> Option<&SourceTrack> {
        match self {
            PlaylistEntry::Present(track) => Some(track),
            PlaylistEntry::Absent => None,
        }
    }
}

impl From<Option<SourceTrack>> for PlaylistEntry {
    fn from(track: Option<SourceTrack>) -> Self {
        match track {
            Some(track) => PlaylistEntry::Present(track),
            None => PlaylistEntry::Absent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Song,
    Video,
}

/// A search result from the target catalog (YouTube Music).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// YouTube video id
    pub id: String,
    pub title: String,
    pub artists: Vec<String>,
    pub kind: CandidateKind,
}

impl Candidate {
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched(String),
    Unmatched,
}

impl MatchOutcome {
    pub fn into_target_id(self) -> Option<String> {
        match self {
            MatchOutcome::Matched(id) => Some(id),
            MatchOutcome::Unmatched => None,
        }
    }
}

/// Search query used for both the song and the video index.
pub fn search_query(track: &SourceTrack) -> String {
    format!("{} - {}", track.title, track.primary_artist())
}
