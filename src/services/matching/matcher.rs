//! Automatic matching of a source track against ranked search candidates.
//!
//! The first candidate (in the provider's ranking order) whose title and
//! artists are both similar enough to the source track is accepted. A later
//! candidate is never preferred over an earlier qualifying one, even if it
//! scores higher.

use serde::{Deserialize, Serialize};

use super::similarity::{leading_fraction, similarity};
use super::types::{Candidate, SourceTrack};

/// Thresholds for accepting a candidate without asking the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    /// Title similarity must be strictly greater than this
    pub title_threshold: f64,
    /// At least one artist pair must be strictly greater than this
    pub artist_threshold: f64,
    /// Share of the candidate title kept for the second title comparison.
    ///
    /// YouTube titles often carry suffixes like "(Official Video)" which drag
    /// the full-title score down.
    pub title_prefix_ratio: f64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            title_threshold: 0.8,
            artist_threshold: 0.8,
            title_prefix_ratio: 0.5,
        }
    }
}

impl MatchPolicy {
    pub fn title_matches(&self, source_title: &str, candidate_title: &str) -> bool {
        similarity(source_title, candidate_title) > self.title_threshold
            || similarity(
                source_title,
                leading_fraction(candidate_title, self.title_prefix_ratio),
            ) > self.title_threshold
    }

    /// Any source artist against any candidate artist, not positional.
    pub fn artists_match(&self, source_artists: &[String], candidate_artists: &[String]) -> bool {
        source_artists.iter().any(|source_artist| {
            candidate_artists.iter().any(|candidate_artist| {
                similarity(source_artist, candidate_artist) > self.artist_threshold
            })
        })
    }

    pub fn qualifies(&self, source: &SourceTrack, candidate: &Candidate) -> bool {
        self.title_matches(&source.title, &candidate.title)
            && self.artists_match(&source.artists, &candidate.artists)
    }
}

/// Outcome of the automatic pass for one track.
#[derive(Debug, Clone, PartialEq)]
pub enum AutoMatch {
    Matched(String),
    /// Nothing qualified; the candidates are kept, unchanged, for the user to
    /// pick from.
    Deferred(Vec<Candidate>),
}

/// Return the first candidate that qualifies under `policy`.
pub fn find_auto_match<'a>(
    source: &SourceTrack,
    candidates: &'a [Candidate],
    policy: &MatchPolicy,
) -> Option<&'a Candidate> {
    candidates
        .iter()
        .find(|candidate| policy.qualifies(source, candidate))
}

pub fn auto_match(
    source: &SourceTrack,
    candidates: Vec<Candidate>,
    policy: &MatchPolicy,
) -> AutoMatch {
    match find_auto_match(source, &candidates, policy) {
        Some(candidate) => {
            tracing::debug!(
                "Auto-matched '{}' by '{}' to {:?} {} ('{}')",
                source.title,
                source.primary_artist(),
                candidate.kind,
                candidate.id,
                candidate.title
            );
            AutoMatch::Matched(candidate.id.clone())
        }
        None => {
            tracing::debug!(
                "No automatic match for '{}' by '{}' among {} candidates",
                source.title,
                source.primary_artist(),
                candidates.len()
            );
            AutoMatch::Deferred(candidates)
        }
    }
}
