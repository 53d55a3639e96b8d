use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::ExportError;
use crate::services::matching::types::{MatchOutcome, PlaylistEntry};

/// Source track id to YouTube video id. `None` marks a track nobody matched.
pub type TrackMap = BTreeMap<String, Option<String>>;

/// One exported playlist as written to the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistResult {
    #[serde(rename = "playlistName")]
    pub playlist_name: String,
    pub tracks: TrackMap,
}

/// Fold resolved playlist slots into a `PlaylistResult`.
///
/// Absent slots are dropped. When a track appears twice the later outcome
/// wins.
pub fn aggregate(
    playlist_name: impl Into<String>,
    resolved: impl IntoIterator<Item = (PlaylistEntry, Option<MatchOutcome>)>,
) -> PlaylistResult {
    let tracks = resolved
        .into_iter()
        .filter_map(|(entry, outcome)| match entry {
            PlaylistEntry::Present(track) => Some((
                track.id,
                outcome.and_then(MatchOutcome::into_target_id),
            )),
            PlaylistEntry::Absent => None,
        })
        .collect();

    PlaylistResult {
        playlist_name: playlist_name.into(),
        tracks,
    }
}

/// Write `results` as pretty printed JSON.
///
/// The file is written next to `path` first and renamed over it, so a failed
/// run never leaves a half written file behind.
pub fn write_results(path: &Path, results: &[PlaylistResult]) -> Result<(), ExportError> {
    let output_error = |reason: String| ExportError::Output {
        path: path.to_path_buf(),
        reason,
    };

    let json = serde_json::to_string_pretty(results).map_err(|e| output_error(e.to_string()))?;

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(directory).map_err(|e| output_error(e.to_string()))?;
    writeln!(file, "{}", json).map_err(|e| output_error(e.to_string()))?;
    file.persist(path)
        .map_err(|e| output_error(e.error.to_string()))?;

    tracing::info!(
        "Wrote {} playlists to {}",
        results.len(),
        path.display()
    );
    Ok(())
}
