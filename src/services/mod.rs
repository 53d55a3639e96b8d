pub mod aggregate;
pub mod export;
pub mod matching;
pub mod pagination;
pub mod resolution;
pub mod spotify;
pub mod youtube_music;
