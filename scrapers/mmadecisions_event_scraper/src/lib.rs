pub mod batch_writer;
pub mod config;
pub mod encoding;
pub mod errors;
pub mod event_scraper;
pub mod fetcher;
pub mod metrics;
pub mod types;
