use std::path::PathBuf;

/// Failure of one stage of an export run.
///
/// Every stage is fail-fast: the first error aborts the whole run and is shown
/// as the status of the stage that produced it.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to authenticate: {0}")]
    Auth(String),
    #[error("Failed to fetch {what}: {reason}")]
    Fetch { what: String, reason: String },
    #[error("Failed to search YouTube Music for '{query}': {reason}")]
    Search { query: String, reason: String },
    #[error("Selection was cancelled")]
    PromptCancelled,
    #[error("Failed to prompt for a selection: {0}")]
    Prompt(String),
    #[error("Failed to write {}: {reason}", path.display())]
    Output { path: PathBuf, reason: String },
}

impl ExportError {
    pub fn fetch(what: impl Into<String>, report: &color_eyre::Report) -> Self {
        Self::Fetch {
            what: what.into(),
            reason: format!("{report:#}"),
        }
    }

    pub fn search(query: impl Into<String>, report: &color_eyre::Report) -> Self {
        Self::Search {
            query: query.into(),
            reason: format!("{report:#}"),
        }
    }
}
