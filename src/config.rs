use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use crate::{PageIndex, DEFAULT_UPSTREAM, MAX_PAGES};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "hnscrap",
    version,
    about = "Serves Hacker News listing pages, scraped once and cached in memory"
)]
pub struct Config {
    /// Address to bind the HTTP server to (host:port).
    #[arg(long, env = "HNSCRAP_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Base URL of the site to scrape.
    #[arg(long, env = "HNSCRAP_UPSTREAM", default_value = DEFAULT_UPSTREAM)]
    pub upstream: String,

    /// Seconds before a single page request times out.
    #[arg(long, env = "HNSCRAP_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Most pages a single request may ask for.
    /// If set to 0 only the hard ceiling of `MAX_PAGES` applies.
    #[arg(long, env = "HNSCRAP_MAX_PAGES", default_value_t = 100)]
    pub max_pages: PageIndex,

    /// Log progress (info level).
    #[arg(short, long)]
    pub verbose: bool,

    /// Log everything (debug level).
    #[arg(long)]
    pub debug: bool,

    /// Only log errors.
    #[arg(short, long, conflicts_with_all = ["verbose", "debug"])]
    pub quiet: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// `None` when only the aggregator's own ceiling applies.
    pub fn page_limit(&self) -> Option<PageIndex> {
        (self.max_pages > 0).then_some(self.max_pages.min(MAX_PAGES))
    }
}
