use reqwest::Client;
use tracing::debug;

use crate::{PageIndex, Result};

/// Listing page URL for `page_num` under `base_url`.
pub(crate) fn page_url(base_url: &str, page_num: PageIndex) -> String {
    format!("{}/news?p={page_num}", base_url.trim_end_matches('/'))
}

/// Requests a page and returns a `Result<String>` containing the HTML.
/// Any non-success status is turned into an error.
pub(crate) async fn request_page_html(
    client: &Client,
    base_url: &str,
    page_num: PageIndex,
) -> Result<String> {
    let url = page_url(base_url, page_num);
    debug!("Requesting page {page_num}: {url}");

    let res = client.get(&url).send().await?.error_for_status()?;
    let html = res.text().await?;
    Ok(html)
}
