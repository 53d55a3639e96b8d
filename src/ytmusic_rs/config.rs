use std::time::Duration;

use color_eyre::eyre::{OptionExt, Result, WrapErr};
use regex::Regex;
use reqwest::Client;
use serde_json::{Map, Value};

use super::{USER_AGENT, YTMUSIC_URL};

/// Values from the page's `ytcfg` needed to talk to the InnerTube API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnertubeConfig {
    pub api_key: Option<String>,
    pub client_version: String,
    pub visitor_data: Option<String>,
}

/// Pull the InnerTube settings out of the YouTube Music start page.
///
/// The page calls `ytcfg.set({...})` several times; later calls override
/// earlier keys.
pub fn extract_config(html: &str) -> Result<InnertubeConfig> {
    let re = Regex::new(r"(?s)ytcfg\.set\((\{.+?\})\);").wrap_err("Invalid ytcfg regex")?;

    let mut merged = Map::new();
    for captures in re.captures_iter(html) {
        // Calls that are not plain JSON objects are skipped
        if let Ok(Value::Object(values)) = serde_json::from_str::<Value>(&captures[1]) {
            merged.extend(values);
        }
    }

    let string_value = |key: &str| {
        merged
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Ok(InnertubeConfig {
        api_key: string_value("INNERTUBE_API_KEY"),
        client_version: string_value("INNERTUBE_CLIENT_VERSION")
            .ok_or_eyre("YouTube Music page did not contain INNERTUBE_CLIENT_VERSION")?,
        visitor_data: string_value("VISITOR_DATA"),
    })
}

/// Download the start page and extract its InnerTube config.
pub async fn fetch_config(client: &Client) -> Result<InnertubeConfig> {
    let html = client
        .get(YTMUSIC_URL)
        .header("User-Agent", USER_AGENT)
        .header("Accept-Language", "en-US,en;q=0.9")
        // Skip the EU cookie consent interstitial
        .header("Cookie", "CONSENT=YES+1")
        .timeout(Duration::from_secs(10))
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
        .wrap_err("Failed to read YouTube Music start page")?;

    extract_config(&html)
}
