pub mod spotify;
pub mod terminal;
pub mod youtube_music;

/// One page of an offset/limit paginated collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The page size the server applied
    pub limit: u32,
}
