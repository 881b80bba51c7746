use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("HTTP request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: StatusCode },
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Event link {title:?} on the {year} listing has no href")]
    MissingHref { year: i32, title: String },
    #[error("Invalid selector `{0}`")]
    Selector(String),
    #[error("Invalid year range {latest}-{earliest}")]
    InvalidYearRange { latest: i32, earliest: i32 },
}
