//! Filtering, sorting and tabular shape of scraped rows.
//!
//! Everything here is pure so the web pages and the CLI share one
//! implementation.

use std::fmt;
use std::str::FromStr;

use crate::types::{CityWeather, NewsArticle};
use crate::Error;

/// Shown instead of an empty news table.
pub const NO_ARTICLES: &str = "No articles found with the given filters.";
/// Shown instead of an empty weather table.
pub const NO_CITIES: &str = "No cities match the given search.";

/// A record that can be laid out as one table row.
pub trait TableRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<&str>;
}

impl TableRow for NewsArticle {
    const HEADERS: &'static [&'static str] = &["Title", "Summary", "Published Time", "Link"];

    fn cells(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.summary.as_str(),
            self.published_time.as_str(),
            self.link.as_str(),
        ]
    }
}

impl TableRow for CityWeather {
    const HEADERS: &'static [&'static str] = &["City", "Condition", "Temperature (C)"];

    fn cells(&self) -> Vec<&str> {
        vec![
            self.city.as_str(),
            self.condition.as_str(),
            self.temperature_c.as_str(),
        ]
    }
}

/// Case-insensitive substring test. A blank query matches everything; any
/// other query is matched as typed, surrounding spaces included.
pub fn matches_query(field: &str, query: &str) -> bool {
    query.trim().is_empty() || field.to_lowercase().contains(&query.to_lowercase())
}

/// Coarse publish-time buckets, judged from the site's relative time text.
///
/// `Today` is a subset of `Last24Hours`: anything mentioning "hours ago" also
/// mentions "hour".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeBucket {
    #[default]
    All,
    Today,
    Last24Hours,
    Older,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 4] = [
        TimeBucket::All,
        TimeBucket::Today,
        TimeBucket::Last24Hours,
        TimeBucket::Older,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeBucket::All => "All",
            TimeBucket::Today => "Today",
            TimeBucket::Last24Hours => "Last 24 hours",
            TimeBucket::Older => "Older",
        }
    }

    pub fn matches(&self, published_time: &str) -> bool {
        match self {
            TimeBucket::All => true,
            TimeBucket::Today => published_time.contains("hours ago"),
            TimeBucket::Last24Hours => published_time.contains("hour"),
            TimeBucket::Older => {
                !published_time.contains("hours ago") && !published_time.contains("hour")
            }
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeBucket {
    type Err = Error;

    /// Accepts the display labels and a few shell-friendly spellings
    /// (`last-24-hours`, `24h`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "all" => Ok(TimeBucket::All),
            "today" => Ok(TimeBucket::Today),
            "last 24 hours" | "24h" => Ok(TimeBucket::Last24Hours),
            "older" => Ok(TimeBucket::Older),
            _ => Err(Error::InvalidOption(format!("unknown time filter: {}", s))),
        }
    }
}

/// Weather column to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    City,
    Condition,
    Temperature,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::City, SortKey::Condition, SortKey::Temperature];

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::City => "City",
            SortKey::Condition => "Condition",
            SortKey::Temperature => "Temperature (C)",
        }
    }

    fn field<'a>(&self, row: &'a CityWeather) -> &'a str {
        match self {
            SortKey::City => &row.city,
            SortKey::Condition => &row.condition,
            SortKey::Temperature => &row.temperature_c,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "city" => Ok(SortKey::City),
            "condition" => Ok(SortKey::Condition),
            "temperature" | "temperature (c)" | "temp" => Ok(SortKey::Temperature),
            _ => Err(Error::InvalidOption(format!("unknown sort key: {}", s))),
        }
    }
}

/// Title search followed by the time bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsFilter {
    pub query: String,
    pub time: TimeBucket,
}

impl NewsFilter {
    pub fn new(query: impl Into<String>, time: TimeBucket) -> Self {
        Self {
            query: query.into(),
            time,
        }
    }

    pub fn apply(&self, articles: Vec<NewsArticle>) -> Vec<NewsArticle> {
        let articles = filter_by_title(articles, &self.query);
        filter_by_time(articles, self.time)
    }
}

pub fn filter_by_title(articles: Vec<NewsArticle>, query: &str) -> Vec<NewsArticle> {
    articles
        .into_iter()
        .filter(|a| matches_query(&a.title, query))
        .collect()
}

pub fn filter_by_time(articles: Vec<NewsArticle>, bucket: TimeBucket) -> Vec<NewsArticle> {
    articles
        .into_iter()
        .filter(|a| bucket.matches(&a.published_time))
        .collect()
}

/// City search followed by an ascending sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherView {
    pub query: String,
    pub sort: SortKey,
}

impl WeatherView {
    pub fn new(query: impl Into<String>, sort: SortKey) -> Self {
        Self {
            query: query.into(),
            sort,
        }
    }

    pub fn apply(&self, cities: Vec<CityWeather>) -> Vec<CityWeather> {
        let mut cities = filter_by_city(cities, &self.query);
        sort_cities(&mut cities, self.sort);
        cities
    }
}

pub fn filter_by_city(cities: Vec<CityWeather>, query: &str) -> Vec<CityWeather> {
    cities
        .into_iter()
        .filter(|c| matches_query(&c.city, query))
        .collect()
}

/// Stable, ascending, plain string order. Temperatures stay text, so
/// "9 C" sorts after "30 C".
pub fn sort_cities(cities: &mut [CityWeather], key: SortKey) {
    cities.sort_by(|a, b| key.field(a).cmp(key.field(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, published_time: &str) -> NewsArticle {
        NewsArticle {
            title: title.to_string(),
            summary: String::new(),
            published_time: published_time.to_string(),
            link: format!("https://www.dawn.com/news/{}", title.len()),
        }
    }

    fn city(name: &str, details: &str) -> CityWeather {
        CityWeather::from_details(name, details)
    }

    fn titles(articles: &[NewsArticle]) -> Vec<&str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    fn names(cities: &[CityWeather]) -> Vec<&str> {
        cities.iter().map(|c| c.city.as_str()).collect()
    }

    #[test]
    fn test_title_search_is_case_insensitive() {
        let articles = vec![article("Dawn News Today", "1 hour ago"), article("Other", "1 hour ago")];
        let filtered = filter_by_title(articles, "dawn");
        assert_eq!(titles(&filtered), vec!["Dawn News Today"]);
    }

    #[test]
    fn test_blank_query_keeps_everything() {
        let articles = vec![article("A", "x"), article("B", "y")];
        assert_eq!(filter_by_title(articles.clone(), "").len(), 2);
        assert_eq!(filter_by_title(articles, "   ").len(), 2);
    }

    #[test]
    fn test_query_spaces_are_significant() {
        assert!(!matches_query("Federal Budget", "budget "));
        assert!(matches_query("Budget session ends", "budget "));
        assert!(!matches_query("Lahore", " lahore"));
    }

    #[test]
    fn test_today_bucket() {
        assert!(TimeBucket::Today.matches("3 hours ago"));
        assert!(!TimeBucket::Today.matches("2 days ago"));
        assert!(!TimeBucket::Today.matches("1 hour ago"));
    }

    #[test]
    fn test_last_24_hours_overlaps_today() {
        assert!(TimeBucket::Last24Hours.matches("1 hour ago"));
        assert!(TimeBucket::Last24Hours.matches("3 hours ago"));
        assert!(!TimeBucket::Last24Hours.matches("2 days ago"));
    }

    #[test]
    fn test_older_bucket() {
        assert!(TimeBucket::Older.matches("2 days ago"));
        assert!(TimeBucket::Older.matches("Not available"));
        assert!(!TimeBucket::Older.matches("5 hours ago"));
        assert!(!TimeBucket::Older.matches("1 hour ago"));
    }

    #[test]
    fn test_news_filter_applies_both() {
        let articles = vec![
            article("Budget passed", "3 hours ago"),
            article("Budget debate", "2 days ago"),
            article("Cricket", "4 hours ago"),
        ];
        let filtered = NewsFilter::new("budget", TimeBucket::Today).apply(articles);
        assert_eq!(titles(&filtered), vec!["Budget passed"]);
    }

    #[test]
    fn test_time_bucket_parsing() {
        assert_eq!("Last 24 hours".parse::<TimeBucket>().unwrap(), TimeBucket::Last24Hours);
        assert_eq!("last-24-hours".parse::<TimeBucket>().unwrap(), TimeBucket::Last24Hours);
        assert_eq!("24h".parse::<TimeBucket>().unwrap(), TimeBucket::Last24Hours);
        assert_eq!("TODAY".parse::<TimeBucket>().unwrap(), TimeBucket::Today);
        assert!("yesterday".parse::<TimeBucket>().is_err());
        for bucket in TimeBucket::ALL {
            assert_eq!(bucket.label().parse::<TimeBucket>().unwrap(), bucket);
        }
    }

    #[test]
    fn test_sort_by_city() {
        let mut cities = vec![city("Lahore", "Cloudy and 22 C"), city("Karachi", "Sunny and 30 C")];
        sort_cities(&mut cities, SortKey::City);
        assert_eq!(names(&cities), vec!["Karachi", "Lahore"]);
    }

    #[test]
    fn test_sort_by_temperature_is_textual() {
        let mut cities = vec![
            city("Skardu", "Snow and 9 C"),
            city("Karachi", "Sunny and 30 C"),
            city("Sukkur", "Hot and 41 C"),
        ];
        sort_cities(&mut cities, SortKey::Temperature);
        assert_eq!(names(&cities), vec!["Karachi", "Sukkur", "Skardu"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut cities = vec![
            city("Lahore", "Sunny and 30 C"),
            city("Karachi", "Cloudy and 22 C"),
            city("Islamabad", "Sunny and 25 C"),
        ];
        sort_cities(&mut cities, SortKey::Condition);
        assert_eq!(names(&cities), vec!["Karachi", "Lahore", "Islamabad"]);
    }

    #[test]
    fn test_weather_view() {
        let cities = vec![
            city("Lahore", "Cloudy and 22 C"),
            city("Karachi", "Sunny and 30 C"),
            city("Larkana", "Hot and 38 C"),
        ];
        let view = WeatherView::new("la", SortKey::City);
        assert_eq!(names(&view.apply(cities)), vec!["Lahore", "Larkana"]);
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("Temperature (C)".parse::<SortKey>().unwrap(), SortKey::Temperature);
        assert_eq!("city".parse::<SortKey>().unwrap(), SortKey::City);
        assert!("humidity".parse::<SortKey>().is_err());
        assert_eq!(SortKey::default(), SortKey::City);
    }

    #[test]
    fn test_table_rows() {
        let row = city("Karachi", "Sunny and 30 C");
        assert_eq!(row.cells(), vec!["Karachi", "Sunny", "30 C"]);
        assert_eq!(CityWeather::HEADERS.len(), row.cells().len());
        assert_eq!(NewsArticle::HEADERS.len(), article("x", "y").cells().len());
    }
}
