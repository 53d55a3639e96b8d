use color_eyre::eyre::Result;

use crate::services::matching::types::Candidate;

/// Port trait wrapping the YouTube Music search capabilities used by business logic.
///
/// Results are returned in the provider's relevance order, which callers rely on.
/// Implementations live in `services::youtube_music::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait YoutubeMusicClient: Send + Sync {
    async fn search_songs(&self, query: &str) -> Result<Vec<Candidate>>;

    async fn search_videos(&self, query: &str) -> Result<Vec<Candidate>>;
}
