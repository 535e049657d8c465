use async_trait::async_trait;
use lazy_static::lazy_static;
use pk_core::{CityWeather, Error};
use scraper::{ElementRef, Html, Selector};

use super::utils;
use super::{Scraper, SourceMetadata};
use crate::logging::Logger;

pub const METADATA: SourceMetadata = SourceMetadata {
    name: "Weather Forecast",
    emoji: "🌦️",
    url: "https://www.weather-forecast.com/countries/Pakistan",
    cli_name: "weather",
};

lazy_static! {
    static ref CITY_LINK: Selector = utils::selector(".b-list-table a").expect("valid city selector");
    static ref WEATHER_CELL: Selector =
        utils::selector("div.smallweathercell").expect("valid weather cell selector");
    static ref ICON: Selector = utils::selector("img").expect("valid icon selector");
}

/// Scrapes the per-city forecast table for Pakistan.
///
/// Each city is paired with the weather cell that sits in its own row; a row
/// without a cell leaves that city's details empty. Pages that keep names and
/// cells in separate lists are paired by position instead, cut to the shorter
/// of the two lists.
#[derive(Debug, Clone)]
pub struct WeatherForecastScraper {
    page_url: String,
    logger: Logger,
}

impl Default for WeatherForecastScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherForecastScraper {
    pub fn new() -> Self {
        Self {
            page_url: METADATA.url.to_string(),
            logger: Logger::new().with_prefix("[weather]"),
        }
    }

    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = url.into();
        self
    }

    fn zip_by_position(&self, document: &Html, anchors: &[ElementRef]) -> Vec<CityWeather> {
        let cities: Vec<String> = anchors.iter().map(utils::element_text).collect();
        let details: Vec<String> = document
            .select(&WEATHER_CELL)
            .filter_map(|cell| cell_details(&cell))
            .collect();

        if cities.len() != details.len() {
            self.logger.warn(&format!(
                "found {} cities but {} weather cells, keeping the first {}",
                cities.len(),
                details.len(),
                cities.len().min(details.len())
            ));
        }

        cities
            .into_iter()
            .zip(details)
            .map(|(city, details)| CityWeather::from_details(city, &details))
            .collect()
    }
}

/// Alt text of the cell's icon. A cell without an icon has no details; an
/// icon without alt text has empty ones.
fn cell_details(cell: &ElementRef) -> Option<String> {
    cell.select(&ICON)
        .next()
        .map(|img| img.value().attr("alt").unwrap_or_default().trim().to_string())
}

/// Largest element around a city link that holds no other city link.
fn city_scope<'a>(anchor: &ElementRef<'a>) -> ElementRef<'a> {
    let mut scope = *anchor;
    for node in anchor.ancestors() {
        let Some(parent) = ElementRef::wrap(node) else {
            break;
        };
        if parent.select(&CITY_LINK).count() != 1 {
            break;
        }
        scope = parent;
    }
    scope
}

/// First weather cell inside the city's own scope, if the page puts one there.
fn row_cell<'a>(anchor: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    city_scope(anchor).select(&WEATHER_CELL).next()
}

#[async_trait]
impl Scraper for WeatherForecastScraper {
    type Record = CityWeather;

    fn source_metadata(&self) -> SourceMetadata {
        METADATA
    }

    fn page_url(&self) -> &str {
        &self.page_url
    }

    fn extract(&self, html: &str) -> Vec<CityWeather> {
        let document = Html::parse_document(html);
        let anchors: Vec<ElementRef> = document.select(&CITY_LINK).collect();

        let cells: Vec<Option<ElementRef>> = anchors.iter().map(row_cell).collect();

        let cities = if cells.iter().any(Option::is_some) {
            self.logger.debug("pairing cities with the weather cell in their row");
            anchors
                .iter()
                .zip(cells)
                .map(|(anchor, cell)| {
                    let details = cell.and_then(|cell| cell_details(&cell)).unwrap_or_default();
                    CityWeather::from_details(utils::element_text(anchor), &details)
                })
                .collect()
        } else {
            self.logger.debug("no per-city rows, pairing cities by position");
            self.zip_by_position(&document, &anchors)
        };

        self.logger.info(&format!("extracted {} cities", cities.len()));
        cities
    }

    fn failure_message(&self, error: &Error) -> String {
        match error.status_code() {
            Some(status) => format!(
                "Error: Unable to fetch the webpage. Status code {}.",
                status
            ),
            None => format!("Error: Unable to fetch the webpage. {}", error),
        }
    }
}
