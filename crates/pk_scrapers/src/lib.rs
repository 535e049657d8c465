pub mod scrapers;
pub mod cli;
mod logging;

pub use logging::{init_logging, Logger};
pub use scrapers::{
    DawnScraper, Scraper, SourceKind, SourceMetadata, Sources, WeatherForecastScraper,
};

pub use cli::{handle_command, ScraperArgs, ScraperCommands};

pub mod prelude {
    pub use super::scrapers::Scraper;
    pub use pk_core::{CityWeather, Error, NewsArticle, Result};
}
