use std::{env, path::PathBuf};

use crate::types::YearRange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://mmadecisions.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapingConfig {
    pub user_agent: String,
    /// Only events whose title starts with this literal are kept.
    pub title_prefix: String,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            title_prefix: "UFC".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ufc_event_urls.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    pub site: SiteConfig,
    pub scraping: ScrapingConfig,
    pub years: YearRange,
    pub output: OutputConfig,
}

impl ScraperConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = env::var("MMADECISIONS_BASE_URL") {
            config.site.base_url = base_url;
        }
        if let Ok(user_agent) = env::var("SCRAPER_USER_AGENT") {
            config.scraping.user_agent = user_agent;
        }
        if let Ok(prefix) = env::var("EVENT_TITLE_PREFIX") {
            config.scraping.title_prefix = prefix;
        }
        if let Ok(path) = env::var("SCRAPER_OUTPUT_PATH") {
            config.output.path = PathBuf::from(path);
        }

        config
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            scraping: ScrapingConfig::default(),
            years: YearRange::default(),
            output: OutputConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "MMADECISIONS_BASE_URL",
        "SCRAPER_USER_AGENT",
        "EVENT_TITLE_PREFIX",
        "SCRAPER_OUTPUT_PATH",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_env();
        let config = ScraperConfig::from_env();
        assert_eq!(config, ScraperConfig::default());
        assert_eq!(config.site.base_url, "https://mmadecisions.com");
        assert_eq!(config.scraping.user_agent, "Mozilla/5.0");
        assert_eq!(config.scraping.title_prefix, "UFC");
        assert_eq!(config.years, YearRange { latest: 2025, earliest: 1998 });
        assert_eq!(config.output.path, PathBuf::from("ufc_event_urls.csv"));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        env::set_var("MMADECISIONS_BASE_URL", "http://127.0.0.1:1234");
        env::set_var("EVENT_TITLE_PREFIX", "Bellator");
        env::set_var("SCRAPER_OUTPUT_PATH", "out/bellator.csv");

        let config = ScraperConfig::from_env();
        clear_env();

        assert_eq!(config.site.base_url, "http://127.0.0.1:1234");
        assert_eq!(config.scraping.title_prefix, "Bellator");
        assert_eq!(config.scraping.user_agent, "Mozilla/5.0");
        assert_eq!(config.years, YearRange::default());
        assert_eq!(config.output.path, PathBuf::from("out/bellator.csv"));
    }

    #[test]
    #[serial]
    fn test_year_range_is_not_read_from_env() {
        clear_env();
        env::set_var("SCRAPER_LATEST_YEAR", "2024");
        env::set_var("SCRAPER_EARLIEST_YEAR", "2020");

        let config = ScraperConfig::from_env();
        env::remove_var("SCRAPER_LATEST_YEAR");
        env::remove_var("SCRAPER_EARLIEST_YEAR");

        assert_eq!(config.years, YearRange { latest: 2025, earliest: 1998 });
    }
}
