//! Minimal client for the YouTube Music web API (InnerTube).

pub mod config;
pub mod search;

const YTMUSIC_URL: &str = "https://music.youtube.com/";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
