// Offset/limit aggregation over list endpoints.
//
// The controller's `totalCount` is the only stop signal: a short page does
// not end the scan. The page budget exists so a controller whose total
// never converges cannot keep the loop alive forever.

use std::future::Future;

use tracing::{debug, warn};

use crate::error::Error;
use crate::models::Page;

/// Items requested per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: i32 = 25;

/// Upper bound on fetches for a single listing.
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// Page size and safety budget for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: i32,
    max_pages: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl Paginator {
    /// Paginator with a custom page size (clamped to at least 1).
    pub fn new(page_size: i32) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    /// Replace the page budget (clamped to at least 1).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn page_size(&self) -> i32 {
        self.page_size
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Collect all pages into a single `Vec<T>`.
    ///
    /// `fetch(offset, limit)` is called with offsets `0, page_size,
    /// 2 * page_size, …` until the accumulated item count reaches the
    /// `totalCount` of the latest page. The first page is always fetched.
    /// Any error aborts the scan and nothing collected so far is returned.
    pub async fn collect<T, F, Fut>(&self, fetch: F) -> Result<Vec<T>, Error>
    where
        F: Fn(i64, i32) -> Fut,
        Fut: Future<Output = Result<Page<T>, Error>>,
    {
        let mut all = Vec::new();
        let mut offset: i64 = 0;

        for page_no in 1..=self.max_pages {
            let page = fetch(offset, self.page_size).await?;
            let received = page.data.len();
            all.extend(page.data);

            let accumulated = i64::try_from(all.len()).unwrap_or(i64::MAX);
            debug!(
                page = page_no,
                offset,
                received,
                accumulated,
                total = page.total_count,
                "fetched page"
            );

            if accumulated >= page.total_count {
                return Ok(all);
            }

            offset += i64::from(self.page_size);
        }

        warn!(
            max_pages = self.max_pages,
            accumulated = all.len(),
            "controller total never reached; giving up"
        );
        Err(Error::PageLimitExceeded {
            max_pages: self.max_pages,
        })
    }
}
