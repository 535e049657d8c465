use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Splits a weather description into condition and temperature.
pub const DETAILS_SEPARATOR: &str = " and ";
/// Temperatures are shown as text, cut to this many characters.
pub const TEMPERATURE_DISPLAY_CHARS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Summary")]
    pub summary: String,
    /// Free text as printed by the site, e.g. "3 hours ago".
    #[serde(rename = "Published Time")]
    pub published_time: String,
    /// Always absolute.
    #[serde(rename = "Link")]
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityWeather {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Condition")]
    pub condition: String,
    #[serde(rename = "Temperature (C)")]
    pub temperature_c: String,
}

impl CityWeather {
    /// Builds a row from a city name and a details string such as
    /// `"Sunny and 30 C"`.
    ///
    /// Only the first separator counts. Without one, the whole string becomes
    /// the condition and the temperature is left empty.
    pub fn from_details(city: impl Into<String>, details: &str) -> Self {
        let (condition, temperature) = details
            .split_once(DETAILS_SEPARATOR)
            .unwrap_or((details, ""));

        Self {
            city: city.into(),
            condition: condition.trim().to_string(),
            temperature_c: temperature.chars().take(TEMPERATURE_DISPLAY_CHARS).collect(),
        }
    }
}

/// Rows from one fetch, stamped with when they were taken.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<T> {
    pub rows: Vec<T>,
    pub fetched_at: DateTime<Utc>,
}

impl<T> Snapshot<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows,
            fetched_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replaces the rows, keeping the timestamp.
    pub fn map_rows<F>(self, f: F) -> Self
    where
        F: FnOnce(Vec<T>) -> Vec<T>,
    {
        Self {
            rows: f(self.rows),
            fetched_at: self.fetched_at,
        }
    }
}
