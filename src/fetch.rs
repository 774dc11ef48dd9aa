//! Turning a page index into the items listed on that page.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::item::Item;
use crate::parse::parse_html;
use crate::request::request_page_html;
use crate::{Error, PageIndex, Result, START_PAGE};

/// Source of listing pages.
///
/// Implementations must be safe to call concurrently for different pages.
#[async_trait]
pub trait ItemFetcher: Send + Sync {
    /// Returns the items of `page` in listing order.
    ///
    /// Fails with [`Error::InvalidArgument`] for pages below [`START_PAGE`] and with
    /// [`Error::UpstreamUnavailable`] when the page cannot be downloaded.
    async fn fetch(&self, page: PageIndex) -> Result<Vec<Item>>;
}

/// Fetches listing pages over HTTP and scrapes them.
#[derive(Debug, Clone)]
pub struct HnFetcher {
    // Client uses Arc so we can clone cheaply
    client: Client,
    base_url: Arc<str>,
}

impl HnFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hnscrap/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ItemFetcher for HnFetcher {
    async fn fetch(&self, page: PageIndex) -> Result<Vec<Item>> {
        if page < START_PAGE {
            return Err(Error::InvalidArgument(format!(
                "page must be an integer >= {START_PAGE}, got {page}"
            )));
        }

        let html = request_page_html(&self.client, &self.base_url, page).await?;
        let items = parse_html(html.into(), Arc::clone(&self.base_url)).await?;
        debug!("Fetched page {page}: {} items", items.len());
        Ok(items)
    }
}
