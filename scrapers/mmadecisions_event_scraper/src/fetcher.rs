use reqwest::{blocking::Client, header::CONTENT_TYPE};
use tracing::{debug, warn};

use crate::{config::ScrapingConfig, encoding::decode_body, errors::ScrapeError, metrics::MetricsCollector};

/// Source of listing page HTML. The live implementation talks HTTP; tests swap in
/// canned pages.
pub trait HtmlFetcher {
    fn fetch_html(&self, url: &str) -> Result<String, ScrapeError>;
}

pub struct WebHtmlFetcher {
    client: Client,
    metrics: MetricsCollector,
}

impl WebHtmlFetcher {
    pub fn new(config: &ScrapingConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(ScrapeError::Client)?;

        Ok(Self {
            client,
            metrics: MetricsCollector::new(),
        })
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }
}

impl HtmlFetcher for WebHtmlFetcher {
    fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        let tracker = self.metrics.record_request_start();

        let response = match self.client.get(url).send() {
            Ok(response) => response,
            Err(source) => {
                tracker.fail(source.to_string());
                return Err(ScrapeError::Transport {
                    url: url.to_string(),
                    source,
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP {} for {}", status, url);
            tracker.fail(format!("HTTP {}", status));
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = match response.bytes() {
            Ok(body) => body,
            Err(source) => {
                tracker.fail(source.to_string());
                return Err(ScrapeError::Transport {
                    url: url.to_string(),
                    source,
                });
            }
        };
        tracker.succeed(body.len());
        debug!("Fetched {} bytes from {} ({:?})", body.len(), url, content_type);

        Ok(decode_body(&body, content_type.as_deref()))
    }
}
