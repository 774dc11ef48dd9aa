//! Hacker News page scraper with an in-memory page cache.
//!
//! A request for `N` pages only goes upstream for the pages that are not
//! cached yet; those are fetched concurrently and the full listing is then
//! reassembled from the cache in page order.

mod error;
mod macros;
mod parse;
mod request;

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod fetch;
pub mod item;
pub mod logging;
pub mod server;

pub use error::{Error, Result};

/// 1-based index of one upstream listing page.
pub type PageIndex = i64;

/// The first page of the upstream listing.
pub const START_PAGE: PageIndex = 1;
/// How many items a full listing page carries.
pub const ITEMS_PER_PAGE: usize = 30;
/// Most pages one aggregate may span; larger requests are rejected.
pub const MAX_PAGES: PageIndex = 1_000;
/// Site scraped when no other upstream is configured.
pub const DEFAULT_UPSTREAM: &str = "https://news.ycombinator.com";
