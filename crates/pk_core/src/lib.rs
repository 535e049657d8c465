pub mod config;
pub mod error;
pub mod fetch;
pub mod types;
pub mod view;

pub use config::{FetchConfig, ServerConfig};
pub use error::{Error, Result};
pub use fetch::Fetcher;
pub use types::{CityWeather, NewsArticle, Snapshot};
pub use view::{NewsFilter, SortKey, TableRow, TimeBucket, WeatherView};
