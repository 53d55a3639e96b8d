use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::config::InnertubeConfig;
use super::{USER_AGENT, YTMUSIC_URL};

/// Which index of YouTube Music to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFilter {
    Songs,
    Videos,
}

impl SearchFilter {
    /// Opaque `params` value selecting the filter chip in the web client
    fn params(self) -> &'static str {
        match self {
            SearchFilter::Songs => "EgWKAQIIAWoMEA4QChADEAQQCRAF",
            SearchFilter::Videos => "EgWKAQIQAWoMEA4QChADEAQQCRAF",
        }
    }
}

/// One row of a search result shelf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultItem {
    pub video_id: String,
    pub title: String,
    pub artists: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InnertubeClient<'a> {
    client_name: &'static str,
    client_version: &'a str,
    hl: &'static str,
    gl: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    visitor_data: Option<&'a str>,
}

#[derive(Serialize)]
struct InnertubeContext<'a> {
    client: InnertubeClient<'a>,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    context: InnertubeContext<'a>,
    query: &'a str,
    params: &'static str,
}

/// Search YouTube Music.
///
/// Endpoint
/// - `POST /youtubei/v1/search`
///
/// Returns
/// - The items of every result shelf, in the order YouTube ranked them.
pub async fn search(
    client: &Client,
    config: &InnertubeConfig,
    query: &str,
    filter: SearchFilter,
) -> Result<Vec<SearchResultItem>> {
    let body = SearchRequest {
        context: InnertubeContext {
            client: InnertubeClient {
                client_name: "WEB_REMIX",
                client_version: &config.client_version,
                hl: "en",
                gl: "US",
                visitor_data: config.visitor_data.as_deref(),
            },
        },
        query,
        params: filter.params(),
    };

    let endpoint = Url::parse(YTMUSIC_URL)?.join("youtubei/v1/search")?;
    let mut request = client
        .post(endpoint)
        .query(&[("prettyPrint", "false")])
        .header("User-Agent", USER_AGENT)
        .header("Origin", YTMUSIC_URL.trim_end_matches('/'))
        .header("X-YouTube-Client-Name", "67")
        .header("X-YouTube-Client-Version", &config.client_version)
        .json(&body)
        .timeout(Duration::from_secs(10));
    if let Some(api_key) = &config.api_key {
        request = request.query(&[("key", api_key.as_str())]);
    }
    if let Some(visitor_data) = &config.visitor_data {
        request = request.header("X-Goog-Visitor-Id", visitor_data);
    }

    let response: Value = request
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .wrap_err("Failed to deserialize YouTube Music search response")?;

    Ok(parse_search_response(&response))
}

/// Collect every list item from the shelves of a search response.
///
/// Rows that have no playable video id (artists, albums, promos) are skipped.
pub fn parse_search_response(response: &Value) -> Vec<SearchResultItem> {
    let sections = response
        .pointer("/contents/tabbedSearchResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents")
        .and_then(Value::as_array);

    sections
        .into_iter()
        .flatten()
        .filter_map(|section| section.pointer("/musicShelfRenderer/contents"))
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(|row| row.get("musicResponsiveListItemRenderer"))
        .filter_map(parse_list_item)
        .collect()
}

fn flex_column_runs(item: &Value, column: usize) -> &[Value] {
    item.pointer(&format!(
        "/flexColumns/{}/musicResponsiveListItemFlexColumnRenderer/text/runs",
        column
    ))
    .and_then(Value::as_array)
    .map(Vec::as_slice)
    .unwrap_or_default()
}

fn run_text(run: &Value) -> &str {
    run.get("text").and_then(Value::as_str).unwrap_or_default()
}

fn video_id(item: &Value) -> Option<&str> {
    [
        "/playlistItemData/videoId",
        "/flexColumns/0/musicResponsiveListItemFlexColumnRenderer/text/runs/0/navigationEndpoint/watchEndpoint/videoId",
        "/overlay/musicItemThumbnailOverlayRenderer/content/musicPlayButtonRenderer/playNavigationEndpoint/watchEndpoint/videoId",
    ]
    .iter()
    .find_map(|pointer| item.pointer(pointer).and_then(Value::as_str))
}

fn is_artist_run(run: &Value) -> bool {
    let page_type = run
        .pointer("/navigationEndpoint/browseEndpoint/browseEndpointContextSupportedConfigs/browseEndpointContextMusicConfig/pageType")
        .and_then(Value::as_str);
    matches!(
        page_type,
        Some("MUSIC_PAGE_TYPE_ARTIST") | Some("MUSIC_PAGE_TYPE_USER_CHANNEL")
    )
}

/// Artists are the linked runs of the second column. Unlinked artists only
/// show up as text before the first " • " separator.
fn artists(item: &Value) -> Vec<String> {
    let runs = flex_column_runs(item, 1);

    let linked: Vec<String> = runs
        .iter()
        .filter(|run| is_artist_run(run))
        .map(|run| run_text(run).trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    if !linked.is_empty() {
        return linked;
    }

    runs.iter()
        .map(|run| run_text(run).trim())
        .take_while(|text| *text != "•")
        .filter(|text| !matches!(*text, "" | "&" | ","))
        .map(str::to_string)
        .collect()
}

fn parse_list_item(item: &Value) -> Option<SearchResultItem> {
    let video_id = video_id(item)?;
    let title = flex_column_runs(item, 0)
        .first()
        .map(run_text)
        .unwrap_or_default();

    Some(SearchResultItem {
        video_id: video_id.to_string(),
        title: title.to_string(),
        artists: artists(item),
    })
}
