use indexmap::IndexSet;
use scraper::{Html, Selector};
use tracing::{debug, info};
use url::Url;

use crate::{
    config::ScraperConfig,
    errors::ScrapeError,
    fetcher::HtmlFetcher,
    types::EventRecord,
};

const LISTING_PATH: &str = "decisions-by-event";
const DECISION_ROW_SELECTOR: &str = "tr.decision";
const EVENT_LINK_SELECTOR: &str = "td.list a";

/// Pulls event links out of the yearly "decisions by event" listing pages.
pub struct EventScraper<F: HtmlFetcher> {
    html_fetcher: F,
    base_url: Url,
    title_prefix: String,
    row_selector: Selector,
    link_selector: Selector,
}

impl<F: HtmlFetcher> EventScraper<F> {
    pub fn new(html_fetcher: F, config: &ScraperConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            html_fetcher,
            base_url: Url::parse(&config.site.base_url)?,
            title_prefix: config.scraping.title_prefix.clone(),
            row_selector: parse_selector(DECISION_ROW_SELECTOR)?,
            link_selector: parse_selector(EVENT_LINK_SELECTOR)?,
        })
    }

    pub fn fetcher(&self) -> &F {
        &self.html_fetcher
    }

    pub fn title_prefix(&self) -> &str {
        &self.title_prefix
    }

    /// `<base>/decisions-by-event/<year>/`
    pub fn listing_url(&self, year: i32) -> Result<Url, ScrapeError> {
        Ok(self.base_url.join(&format!("{}/{}/", LISTING_PATH, year))?)
    }

    /// Fetches one year's listing page and returns its matching events in page order.
    pub fn extract(&self, year: i32) -> Result<Vec<EventRecord>, ScrapeError> {
        let url = self.listing_url(year)?;
        info!("Fetching listing for {} from {}", year, url);

        let html = self.html_fetcher.fetch_html(url.as_str())?;
        let events = self.parse_listing(&html, year)?;

        info!("Found {} events for {}", events.len(), year);
        Ok(events)
    }

    /// Rows without an event link are skipped. A link without `href`, on any
    /// row, fails the whole page.
    pub fn parse_listing(&self, html: &str, year: i32) -> Result<Vec<EventRecord>, ScrapeError> {
        let document = Html::parse_document(html);
        let mut seen: IndexSet<(String, String)> = IndexSet::new();

        for row in document.select(&self.row_selector) {
            let Some(link) = row.select(&self.link_selector).next() else {
                debug!("Skipping decision row without an event link");
                continue;
            };
            let title = link.text().collect::<String>().trim().to_string();
            let Some(href) = link.value().attr("href") else {
                return Err(ScrapeError::MissingHref { year, title });
            };

            if !title.starts_with(&self.title_prefix) {
                continue;
            }

            let url = self.base_url.join(href)?;

            if !seen.insert((title, url.to_string())) {
                debug!("Dropping duplicate listing entry {}", url);
            }
        }

        Ok(seen
            .into_iter()
            .map(|(title, url)| EventRecord { year, title, url })
            .collect())
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector(format!("{}: {:?}", selector, e)))
}
