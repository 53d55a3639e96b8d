use std::future::Future;

use color_eyre::eyre::{Result, ensure};

use crate::ports::Page;

/// Page size used for both playlists and playlist tracks.
pub const PAGE_SIZE: u32 = 50;

/// Fetch every item of an offset/limit paginated collection.
///
/// Pages are requested one after another, starting at offset 0 and stepping by
/// `page_size`, until a page comes back with fewer than `page_size` items.
/// The first failing page aborts the whole fetch.
pub async fn fetch_all<T, F, Fut>(mut fetch_page: F, page_size: u32) -> Result<Vec<T>>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    ensure!(page_size > 0, "Page size must be greater than zero");

    let mut offset: u32 = 0;
    let mut out: Vec<T> = Vec::new();

    loop {
        let page = fetch_page(offset, page_size).await?;
        let received = page.items.len();
        tracing::trace!(offset, limit = page.limit, received, "Fetched page");

        out.extend(page.items);

        if received < page_size as usize {
            break;
        }
        offset += page_size;
    }

    Ok(out)
}
