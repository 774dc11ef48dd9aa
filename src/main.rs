use std::sync::Arc;

use clap::Parser;
use hnscrap::{
    aggregate::PageAggregator, cache::PageCache, config::Config, fetch::HnFetcher, info_time,
    logging::init_logging, server::router, Result,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config)?;

    let fetcher = HnFetcher::new(&config.upstream, config.timeout())?;
    let aggregator = Arc::new(PageAggregator::new(
        Arc::new(PageCache::new()),
        Arc::new(fetcher),
    ));
    let app = router(aggregator, config.page_limit());

    let listener = TcpListener::bind(config.bind).await?;
    info_time!(
        "Listening on http://{}, scraping {}",
        config.bind,
        config.upstream
    );
    axum::serve(listener, app).await?;

    Ok(())
}
