use std::sync::Arc;

use scraper::{ElementRef, Html, Selector};
use tokio::task::spawn_blocking;
use tracing::{debug, warn};

use crate::item::Item;
use crate::{Error, Result, ITEMS_PER_PAGE};

/// Parses a listing page on the blocking pool.
/// `base_url` is used to make links to discussion pages absolute.
pub(crate) async fn parse_html(html: Arc<String>, base_url: Arc<str>) -> Result<Vec<Item>> {
    let items = spawn_blocking(move || parse_items(&html, &base_url)).await??;
    Ok(items)
}

/// Extracts every `.athing` row of the listing, in document order.
/// The row's metadata (points, submitter, age, comments) lives in the following sibling row.
pub(crate) fn parse_items(html: &str, base_url: &str) -> Result<Vec<Item>> {
    let doc = Html::parse_document(html);

    // Create selectors.
    let row_selector = create_selector(".athing")?;
    let title_selector = create_selector(".titleline > a")?;
    let subtext_selector = create_selector(".subtext")?;
    let score_selector = create_selector(".score")?;
    let user_selector = create_selector(".hnuser")?;
    let age_selector = create_selector(".age")?;
    let link_selector = create_selector("a")?;

    let mut items = Vec::with_capacity(ITEMS_PER_PAGE);
    for row in doc.select(&row_selector) {
        let Some(title_link) = row.select(&title_selector).next() else {
            debug!("skipping a row without a title link");
            continue;
        };
        let href = title_link.value().attr("href").unwrap_or_default();

        let subtext = row
            .next_siblings()
            .find_map(ElementRef::wrap)
            .and_then(|meta| meta.select(&subtext_selector).next());

        let (points, sent_by, published, comments) = match subtext {
            Some(sub) => (
                sub.select(&score_selector)
                    .next()
                    .map_or(0, |score| leading_number(&text_of(score))),
                sub.select(&user_selector).next().map(text_of).unwrap_or_default(),
                sub.select(&age_selector).next().map(text_of).unwrap_or_default(),
                sub.select(&link_selector)
                    .last()
                    .map(text_of)
                    .filter(|text| text.contains("comment"))
                    .map_or(0, |text| leading_number(&text)),
            ),
            // Rows without metadata still make it into the listing.
            None => (0, String::new(), String::new(), 0),
        };

        items.push(Item {
            title: text_of(title_link),
            url: absolute_url(base_url, href),
            points,
            sent_by,
            published,
            comments,
        });
    }

    if items.len() != ITEMS_PER_PAGE {
        warn!(
            "expected {ITEMS_PER_PAGE} items from HTML, but parsed {}",
            items.len()
        );
    }
    Ok(items)
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}

#[inline]
fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Links to discussion pages are relative upstream ("item?id=..").
fn absolute_url(base_url: &str, href: &str) -> String {
    if href.starts_with("item?id=") {
        format!("{}/{href}", base_url.trim_end_matches('/'))
    } else {
        href.to_string()
    }
}

/// "118 points", "24\u{a0}comments" -> the number in front, 0 if there is none.
fn leading_number(text: &str) -> u32 {
    text.split(|c: char| c == '\u{a0}' || c.is_whitespace())
        .next()
        .and_then(|num| num.parse().ok())
        .unwrap_or(0)
}
