use color_eyre::eyre::{Result, WrapErr};
use reqwest::Client;

use crate::ports::youtube_music::YoutubeMusicClient;
use crate::services::matching::types::{Candidate, CandidateKind};
use crate::ytmusic_rs::config::{InnertubeConfig, fetch_config};
use crate::ytmusic_rs::search::{SearchFilter, SearchResultItem, search};

pub struct YoutubeMusicHttpAdapter {
    client: Client,
    config: InnertubeConfig,
}

impl YoutubeMusicHttpAdapter {
    /// Load the InnerTube settings the search endpoint needs.
    pub async fn initialize() -> Result<Self> {
        let client = Client::new();
        let config = fetch_config(&client)
            .await
            .wrap_err("Failed to initialize YouTube Music client")?;
        tracing::debug!(
            "Initialized YouTube Music client version {}",
            config.client_version
        );

        Ok(Self { client, config })
    }

    async fn search_candidates(
        &self,
        query: &str,
        filter: SearchFilter,
        kind: CandidateKind,
    ) -> Result<Vec<Candidate>> {
        let items = search(&self.client, &self.config, query, filter)
            .await
            .wrap_err_with(|| format!("YouTube Music search for '{}' failed", query))?;
        tracing::debug!("{:?} search '{}' returned {} results", filter, query, items.len());

        Ok(items
            .into_iter()
            .map(|item| to_candidate(item, kind))
            .collect())
    }
}

fn to_candidate(item: SearchResultItem, kind: CandidateKind) -> Candidate {
    Candidate {
        id: item.video_id,
        title: item.title,
        artists: item.artists,
        kind,
    }
}

#[async_trait::async_trait]
impl YoutubeMusicClient for YoutubeMusicHttpAdapter {
    async fn search_songs(&self, query: &str) -> Result<Vec<Candidate>> {
        self.search_candidates(query, SearchFilter::Songs, CandidateKind::Song)
            .await
    }

    async fn search_videos(&self, query: &str) -> Result<Vec<Candidate>> {
        self.search_candidates(query, SearchFilter::Videos, CandidateKind::Video)
            .await
    }
}
