use async_trait::async_trait;
use lazy_static::lazy_static;
use pk_core::{Error, NewsArticle};
use scraper::{ElementRef, Html, Selector};

use super::utils;
use super::{Scraper, SourceMetadata};
use crate::logging::Logger;

pub const METADATA: SourceMetadata = SourceMetadata {
    name: "Dawn",
    emoji: "📰",
    url: "https://www.dawn.com/latest-news",
    cli_name: "news",
};

pub const ORIGIN: &str = "https://www.dawn.com";

/// Dawn serves a stripped page to clients that don't look like a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Placeholder for an article without an excerpt.
pub const NO_SUMMARY: &str = "No summary available";
/// Placeholder for an article without a timestamp.
pub const NO_TIMESTAMP: &str = "Not available";

/// Class list of one article card, in order. Cards carrying extra classes
/// are other layouts and are left out.
const CARD_CLASSES: [&str; 5] = ["sm:w-2/3", "w-full", "sm:ml-6", "sm:border-b", "border-gray-200"];

lazy_static! {
    static ref CONTAINER: Selector =
        utils::selector(r"div.sm\:w-2\/3.w-full.sm\:ml-6.sm\:border-b.border-gray-200")
            .expect("valid container selector");
    static ref TITLE_LINK: Selector = utils::selector("a.story__link").expect("valid title selector");
    static ref SUMMARY: Selector = utils::selector("div.story__excerpt").expect("valid summary selector");
    static ref TIMESTAMP: Selector =
        utils::selector("span.timestamp--time.timeago").expect("valid timestamp selector");
}

/// Same classes in the same order; spacing inside the attribute is ignored.
fn is_card(element: &ElementRef) -> bool {
    element
        .value()
        .attr("class")
        .map_or(false, |class| class.split_whitespace().eq(CARD_CLASSES))
}

#[derive(Debug, Clone)]
pub struct DawnScraper {
    page_url: String,
    logger: Logger,
}

impl Default for DawnScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl DawnScraper {
    pub fn new() -> Self {
        Self {
            page_url: METADATA.url.to_string(),
            logger: Logger::new().with_prefix("[dawn]"),
        }
    }

    /// Points the scraper at another copy of the page. Links are still
    /// resolved against [`ORIGIN`].
    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = url.into();
        self
    }
}

#[async_trait]
impl Scraper for DawnScraper {
    type Record = NewsArticle;

    fn source_metadata(&self) -> SourceMetadata {
        METADATA
    }

    fn page_url(&self) -> &str {
        &self.page_url
    }

    fn request_headers(&self) -> Vec<(&'static str, &'static str)> {
        vec![("User-Agent", BROWSER_USER_AGENT)]
    }

    fn extract(&self, html: &str) -> Vec<NewsArticle> {
        let document = Html::parse_document(html);
        let mut articles = Vec::new();
        let mut skipped = 0;

        for container in document.select(&CONTAINER).filter(is_card) {
            let Some(anchor) = container.select(&TITLE_LINK).next() else {
                skipped += 1;
                continue;
            };

            let href = anchor.value().attr("href").unwrap_or_default();
            articles.push(NewsArticle {
                title: utils::element_text(&anchor),
                summary: utils::child_text(&container, &SUMMARY)
                    .unwrap_or_else(|| NO_SUMMARY.to_string()),
                published_time: utils::child_text(&container, &TIMESTAMP)
                    .unwrap_or_else(|| NO_TIMESTAMP.to_string()),
                link: utils::absolute_url(ORIGIN, href),
            });
        }

        if skipped > 0 {
            self.logger
                .debug(&format!("skipped {} containers without a title link", skipped));
        }
        self.logger.info(&format!("extracted {} articles", articles.len()));
        articles
    }

    fn failure_message(&self, error: &Error) -> String {
        match error.status_code() {
            Some(status) => format!("Failed to retrieve news. Status code: {}", status),
            None => format!("Failed to retrieve news: {}", error),
        }
    }
}
