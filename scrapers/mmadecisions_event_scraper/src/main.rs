use anyhow::{Context, Result};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mmadecisions_event_scraper::{
    batch_writer,
    config::ScraperConfig,
    event_scraper::EventScraper,
    fetcher::WebHtmlFetcher,
};

fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ScraperConfig::from_env();
    config.years.validate()?;
    info!("Using base URL: {}", config.site.base_url);

    let fetcher = WebHtmlFetcher::new(&config.scraping).context("Failed to create HTTP client")?;
    let scraper = EventScraper::new(fetcher, &config)?;

    let summary = batch_writer::run(&scraper, &config.years, &config.output.path)?;

    let metrics = scraper.fetcher().metrics().get_metrics();
    info!(
        "Wrote {} events from {} years ({} requests, avg {:.0}ms)",
        summary.events_written(),
        summary.events_per_year.len(),
        metrics.total_requests,
        metrics.avg_response_time_ms
    );
    Ok(())
}
