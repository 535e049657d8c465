use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use pk_core::{Fetcher, NewsFilter, WeatherView};
use pk_scrapers::{Scraper, SourceKind};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::render::{self, Outcome};
use crate::AppState;

/// `?q=&time=` on the news routes. Unknown buckets fall back to `All`.
#[derive(Debug, Default, Deserialize)]
pub struct NewsParams {
    #[serde(default)]
    pub q: String,
    pub time: Option<String>,
}

impl NewsParams {
    pub fn filter(&self) -> NewsFilter {
        let time = self
            .time
            .as_deref()
            .and_then(|t| t.parse().ok())
            .unwrap_or_default();
        NewsFilter::new(self.q.clone(), time)
    }
}

/// `?q=&sort=` on the weather routes. Unknown keys fall back to `City`.
#[derive(Debug, Default, Deserialize)]
pub struct WeatherParams {
    #[serde(default)]
    pub q: String,
    pub sort: Option<String>,
}

impl WeatherParams {
    pub fn view(&self) -> WeatherView {
        let sort = self
            .sort
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        WeatherView::new(self.q.clone(), sort)
    }
}

/// Fetches and extracts, then narrows the rows with `view`. Fetch errors are
/// logged and turned into the scraper's user-facing message.
async fn load<S, F>(scraper: &S, fetcher: &Fetcher, view: F) -> Outcome<S::Record>
where
    S: Scraper,
    F: FnOnce(Vec<S::Record>) -> Vec<S::Record>,
{
    match scraper.scrape(fetcher).await {
        Ok(snapshot) => {
            let total = snapshot.len();
            Outcome::Loaded {
                snapshot: snapshot.map_rows(view),
                total,
            }
        }
        Err(e) => {
            let meta = scraper.source_metadata();
            error!("{} {} scrape failed: {}", meta.emoji, meta.name, e);
            Outcome::Failed(scraper.failure_message(&e))
        }
    }
}

pub async fn index() -> Html<String> {
    let sources: Vec<_> = SourceKind::ALL.iter().map(|kind| kind.metadata()).collect();
    Html(render::index_page(&sources))
}

pub async fn news_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewsParams>,
) -> Html<String> {
    let filter = params.filter();
    let outcome = load(&state.sources.news, &state.fetcher, |rows| filter.apply(rows)).await;
    Html(render::news_page(&filter, &outcome))
}

pub async fn weather_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WeatherParams>,
) -> Html<String> {
    let view = params.view();
    let scraper = &state.sources.weather;
    let outcome = load(scraper, &state.fetcher, |rows| view.apply(rows)).await;
    Html(render::weather_page(&view, scraper.page_url(), &outcome))
}

#[derive(Debug, Serialize)]
struct RowsBody<T> {
    rows: Vec<T>,
    total: usize,
    fetched_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn api_response<T: Serialize>(outcome: Outcome<T>) -> Response {
    match outcome {
        Outcome::Loaded { snapshot, total } => Json(RowsBody {
            rows: snapshot.rows,
            total,
            fetched_at: snapshot.fetched_at,
        })
        .into_response(),
        Outcome::Failed(error) => (StatusCode::BAD_GATEWAY, Json(ErrorBody { error })).into_response(),
    }
}

pub async fn news_api(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewsParams>,
) -> Response {
    let filter = params.filter();
    api_response(load(&state.sources.news, &state.fetcher, |rows| filter.apply(rows)).await)
}

pub async fn weather_api(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WeatherParams>,
) -> Response {
    let view = params.view();
    api_response(load(&state.sources.weather, &state.fetcher, |rows| view.apply(rows)).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pk_core::{SortKey, TimeBucket};

    #[test]
    fn test_news_params() {
        let params = NewsParams {
            q: "budget".to_string(),
            time: Some("Last 24 hours".to_string()),
        };
        assert_eq!(params.filter(), NewsFilter::new("budget", TimeBucket::Last24Hours));

        let params = NewsParams {
            q: String::new(),
            time: Some("someday".to_string()),
        };
        assert_eq!(params.filter().time, TimeBucket::All);
        assert_eq!(NewsParams::default().filter(), NewsFilter::default());
    }

    #[test]
    fn test_weather_params() {
        let params = WeatherParams {
            q: "la".to_string(),
            sort: Some("Temperature (C)".to_string()),
        };
        assert_eq!(params.view(), WeatherView::new("la", SortKey::Temperature));

        let params = WeatherParams {
            q: String::new(),
            sort: Some("humidity".to_string()),
        };
        assert_eq!(params.view().sort, SortKey::City);
    }
}
