use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use pk_core::{Error, Fetcher, Result, Snapshot};

pub mod dawn;
pub mod weather;

pub use dawn::DawnScraper;
pub use weather::WeatherForecastScraper;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMetadata {
    pub name: &'static str,
    pub emoji: &'static str,
    pub url: &'static str,
    /// Subcommand / path segment the source is reachable under.
    pub cli_name: &'static str,
}

#[async_trait]
pub trait Scraper: Send + Sync {
    type Record: Send;

    fn source_metadata(&self) -> SourceMetadata;

    /// Page that gets fetched on every run.
    fn page_url(&self) -> &str;

    /// Extra request headers, e.g. a browser `User-Agent`.
    fn request_headers(&self) -> Vec<(&'static str, &'static str)> {
        vec![]
    }

    /// Pulls records out of a fetched page. Missing pieces are handled here;
    /// extraction never fails.
    fn extract(&self, html: &str) -> Vec<Self::Record>;

    /// Message shown to the user when the fetch fails.
    fn failure_message(&self, error: &Error) -> String;

    async fn scrape(&self, fetcher: &Fetcher) -> Result<Snapshot<Self::Record>> {
        let html = fetcher
            .fetch(self.page_url(), &self.request_headers())
            .await?;
        Ok(Snapshot::new(self.extract(&html)))
    }
}

/// Every source this crate knows how to scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    News,
    Weather,
}

impl SourceKind {
    pub const ALL: [SourceKind; 2] = [SourceKind::News, SourceKind::Weather];

    pub fn metadata(&self) -> SourceMetadata {
        match self {
            SourceKind::News => dawn::METADATA,
            SourceKind::Weather => weather::METADATA,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.metadata().cli_name)
    }
}

impl FromStr for SourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SourceKind::ALL
            .into_iter()
            .find(|kind| kind.metadata().cli_name.eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Scraping(format!("Unknown source: {}", s)))
    }
}

/// The configured scraper for every source, shared by the CLI and the web app.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub news: DawnScraper,
    pub weather: WeatherForecastScraper,
}

impl Sources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_news(mut self, news: DawnScraper) -> Self {
        self.news = news;
        self
    }

    pub fn with_weather(mut self, weather: WeatherForecastScraper) -> Self {
        self.weather = weather;
        self
    }
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use scraper::{ElementRef, Selector};
    use url::Url;

    use super::*;

    pub fn selector(css: &str) -> Result<Selector> {
        Selector::parse(css).map_err(|e| Error::Scraping(format!("Invalid selector {}: {:?}", css, e)))
    }

    /// All text below `element`, trimmed.
    pub fn element_text(element: &ElementRef) -> String {
        element.text().collect::<String>().trim().to_string()
    }

    /// First match of `selector` under `element`, as trimmed text.
    pub fn child_text(element: &ElementRef, selector: &Selector) -> Option<String> {
        element.select(selector).next().map(|el| element_text(&el))
    }

    /// Resolves `href` against the site origin. Root-relative paths get the
    /// origin prepended; absolute URLs pass through.
    pub fn absolute_url(origin: &str, href: &str) -> String {
        match Url::parse(origin).and_then(|base| base.join(href)) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", origin, href),
        }
    }
}
