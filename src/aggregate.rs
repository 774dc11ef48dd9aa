//! Builds the listing for pages `1..=N` out of the page cache,
//! fetching only the pages the cache does not have yet.
//!
//! Missing pages are fetched concurrently, one task per page. All tasks are awaited
//! before the call reports anything, and every page that was fetched successfully is
//! cached even when a sibling failed, so a later request only has to retry the
//! failed pages. The final list is read back from the cache, ordered by page.
//!
//! Two overlapping calls may both fetch the same missing page; the later store simply
//! overwrites the earlier one. A single page is never read half-written, but one
//! response can combine pages cached by different calls.

use std::sync::Arc;

use chrono::Local;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

use crate::cache::PageCache;
use crate::fetch::ItemFetcher;
use crate::item::Item;
use crate::{info_time, Error, PageIndex, Result, ITEMS_PER_PAGE, MAX_PAGES, START_PAGE};

pub struct PageAggregator {
    cache: Arc<PageCache>,
    fetcher: Arc<dyn ItemFetcher>,
}

impl PageAggregator {
    pub fn new(cache: Arc<PageCache>, fetcher: Arc<dyn ItemFetcher>) -> Self {
        Self { cache, fetcher }
    }

    pub fn cache(&self) -> &Arc<PageCache> {
        &self.cache
    }

    /// Returns the items of pages `1..=total_pages`, page by page in listing order.
    ///
    /// Fails with [`Error::InvalidArgument`] when `total_pages` is outside `1..=MAX_PAGES`
    /// (nothing is fetched), and with [`Error::UpstreamFetchFailed`] when any missing page
    /// could not be fetched; no partial listing is ever returned.
    pub async fn aggregate(&self, total_pages: PageIndex) -> Result<Vec<Item>> {
        if !(START_PAGE..=MAX_PAGES).contains(&total_pages) {
            return Err(Error::InvalidArgument(format!(
                "number of pages must be between {START_PAGE} and {MAX_PAGES}, got {total_pages}"
            )));
        }
        let start_time = Local::now();

        let requested = START_PAGE..=total_pages;
        let missing = self.cache.missing(requested.clone());
        debug!(
            "{} of {total_pages} pages missing from cache: {missing:?}",
            missing.len()
        );
        if !missing.is_empty() {
            self.fill(missing).await?;
        }

        let capacity = usize::try_from(total_pages)
            .ok()
            .and_then(|pages| pages.checked_mul(ITEMS_PER_PAGE))
            .unwrap_or(0);
        let mut items = Vec::with_capacity(capacity);
        for page in requested {
            let entry = self
                .cache
                .get(page)
                .ok_or(Error::InternalInconsistency(page))?;
            items.extend(entry.iter().cloned());
        }

        info_time!(
            start_time,
            "Aggregated {} items from {} pages",
            items.len(),
            total_pages
        );
        Ok(items)
    }

    /// Fetches `pages` concurrently and caches each one that succeeds.
    /// Waits for every task; on failure reports the lowest failing page.
    async fn fill(&self, pages: Vec<PageIndex>) -> Result<()> {
        let mut task_set = JoinSet::new();
        for page in pages {
            task_set.spawn({
                let fetcher = Arc::clone(&self.fetcher);
                async move { (page, fetcher.fetch(page).await) }
            });
        }

        let mut failed: Option<(PageIndex, Error)> = None;
        let mut join_failed: Option<JoinError> = None;
        while let Some(task) = task_set.join_next().await {
            match task {
                Ok((page, Ok(items))) => self.cache.put(page, items),
                Ok((page, Err(err))) => {
                    warn!("Fetching page {page} failed: {err}");
                    if failed.as_ref().map_or(true, |(first, _)| page < *first) {
                        failed = Some((page, err));
                    }
                }
                Err(err) => {
                    warn!("A fetch task did not complete: {err}");
                    join_failed.get_or_insert(err);
                }
            }
        }

        if let Some((page, source)) = failed {
            return Err(Error::UpstreamFetchFailed {
                page,
                source: Box::new(source),
            });
        }
        if let Some(err) = join_failed {
            return Err(err.into());
        }
        Ok(())
    }
}
