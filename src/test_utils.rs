use std::sync::Mutex;

use crate::ports::terminal::ProgressReporter;
use crate::services::matching::types::{Candidate, CandidateKind, SourceTrack};

fn names(artists: &[&str]) -> Vec<String> {
    artists.iter().map(|artist| artist.to_string()).collect()
}

pub fn source_track(id: &str, title: &str, artists: &[&str]) -> SourceTrack {
    SourceTrack {
        id: id.into(),
        title: title.into(),
        artists: names(artists),
    }
}

pub fn song(id: &str, title: &str, artists: &[&str]) -> Candidate {
    Candidate {
        id: id.into(),
        title: title.into(),
        artists: names(artists),
        kind: CandidateKind::Song,
    }
}

pub fn video(id: &str, title: &str, artists: &[&str]) -> Candidate {
    Candidate {
        id: id.into(),
        title: title.into(),
        artists: names(artists),
        kind: CandidateKind::Video,
    }
}

/// Keeps every progress message and counts pauses.
#[derive(Default)]
pub struct RecordingProgress {
    pub messages: Mutex<Vec<String>>,
    pub pauses: Mutex<usize>,
}

impl RecordingProgress {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn pauses(&self) -> usize {
        *self.pauses.lock().unwrap()
    }
}

impl ProgressReporter for RecordingProgress {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn pause(&self) {
        *self.pauses.lock().unwrap() += 1;
    }
}
