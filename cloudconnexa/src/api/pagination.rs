//! Page-walking over the `/page?page=N&size=M` collection endpoints
//!
//! The API has no server-side filtering, so every lookup walks the whole
//! collection. Pages are 0-based.

use std::future::Future;

use super::common::PageResponse;
use super::error::ApiError;

pub const FIRST_PAGE: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Fetch pages starting at [`FIRST_PAGE`] until the server-reported
/// `total_pages` is reached, and return every element in page order.
///
/// Stops early on an empty page, and after a single fetch when the server
/// reports `total_pages == 0`. The first failing fetch aborts the walk and
/// nothing collected so far is returned.
pub async fn collect_all<T, F, Fut>(page_size: u32, fetch: F) -> Result<Vec<T>, ApiError>
where
    F: Fn(u32, u32) -> Fut,
    Fut: Future<Output = Result<PageResponse<T>, ApiError>>,
{
    let mut all = Vec::new();
    let mut page = FIRST_PAGE;

    loop {
        let response = fetch(page, page_size).await?;
        let received = response.content.len();
        tracing::debug!(
            "Fetched page {} of {} ({} elements)",
            page + 1,
            response.total_pages,
            received
        );
        all.extend(response.content);

        if received == 0 || page.saturating_add(1) >= response.total_pages {
            break;
        }
        page += 1;
    }

    Ok(all)
}
