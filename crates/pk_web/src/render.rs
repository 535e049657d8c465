//! HTML for the web pages.
//!
//! Plain `format!` templates; every piece of scraped or user-supplied text
//! goes through [`html_escape`].

use pk_core::view::{NO_ARTICLES, NO_CITIES};
use pk_core::{NewsFilter, Snapshot, SortKey, TableRow, TimeBucket, WeatherView};
use pk_scrapers::SourceMetadata;

/// Result of running one pipeline for a page.
#[derive(Debug)]
pub enum Outcome<T> {
    Loaded {
        snapshot: Snapshot<T>,
        /// Rows on the page before any filter was applied.
        total: usize,
    },
    Failed(String),
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub const CSS: &str = r#"
body {
    font-family: Arial, sans-serif;
    margin: 2rem auto;
    max-width: 1100px;
    padding: 0 1rem;
    color: #222;
}
form.controls {
    display: flex;
    gap: 1.5rem;
    align-items: flex-end;
    margin: 1rem 0;
}
form.controls label {
    display: flex;
    flex-direction: column;
    gap: 0.25rem;
    font-size: 0.9em;
}
.error, .success, .info {
    padding: 0.75rem 1rem;
    border-radius: 4px;
    margin: 1rem 0;
}
.error { background: #fde8e8; color: #8a1c1c; }
.success { background: #e6f6ee; color: #17603a; }
.info { background: #e8f0fd; color: #1c3f8a; }
.fetched { color: #666; font-size: 0.85em; }
.styled-table {
    border-collapse: collapse;
    margin: 25px 0;
    font-size: 1.2em;
    font-family: Arial, sans-serif;
    min-width: 400px;
    border-radius: 5px 5px 0 0;
    overflow: hidden;
    box-shadow: 0 0 20px rgba(0, 0, 0, 0.15);
}
.styled-table thead tr {
    background-color: #009879;
    color: #ffffff;
    text-align: left;
    font-weight: bold;
}
.styled-table th {
    text-align: center;
}
.styled-table th, .styled-table td {
    padding: 12px 15px;
}
.styled-table tbody tr {
    border-bottom: 1px solid #dddddd;
}
.styled-table tbody tr:nth-of-type(even) {
    background-color: #f3f3f3;
}
.styled-table tbody tr:last-of-type {
    border-bottom: 2px solid #009879;
}
.data-table { border-collapse: collapse; width: 100%; font-size: 0.95em; }
.data-table th, .data-table td { border: 1px solid #ddd; padding: 6px 8px; vertical-align: top; }
.data-table thead tr { background: #f5f5f5; text-align: left; }
"#;

pub fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <nav><a href="/">Home</a> · <a href="/news">News</a> · <a href="/weather">Weather</a></nav>
    <main>
{content}
    </main>
</body>
</html>"#,
        title = html_escape(title),
        css = CSS,
        content = content
    )
}

pub fn index_page(sources: &[SourceMetadata]) -> String {
    let items: String = sources
        .iter()
        .map(|meta| {
            format!(
                r#"        <li>{} <a href="/{}">{}</a> <span class="fetched">{}</span></li>
"#,
                meta.emoji,
                html_escape(meta.cli_name),
                html_escape(meta.name),
                html_escape(meta.url)
            )
        })
        .collect();

    layout(
        "Sources",
        &format!("    <h1>Sources</h1>\n    <ul>\n{}    </ul>", items),
    )
}

fn cell_html(cell: &str) -> String {
    if cell.starts_with("https://") || cell.starts_with("http://") {
        format!(r#"<a href="{0}" target="_blank" rel="noopener">{0}</a>"#, html_escape(cell))
    } else {
        html_escape(cell)
    }
}

/// `<table>` with a header row and one `<tr>` per record.
pub fn table<T: TableRow>(rows: &[T], class: &str) -> String {
    let head: String = T::HEADERS
        .iter()
        .map(|h| format!("<th>{}</th>", html_escape(h)))
        .collect();
    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .cells()
                .into_iter()
                .map(|cell| format!("<td>{}</td>", cell_html(cell)))
                .collect();
            format!("            <tr>{}</tr>\n", cells)
        })
        .collect();

    format!(
        r#"    <table class="{}">
        <thead><tr>{}</tr></thead>
        <tbody>
{}        </tbody>
    </table>"#,
        html_escape(class),
        head,
        body
    )
}

fn select<T: PartialEq>(name: &str, options: &[T], current: &T, label: fn(&T) -> &'static str) -> String {
    let options: String = options
        .iter()
        .map(|option| {
            let selected = if option == current { " selected" } else { "" };
            let label = html_escape(label(option));
            format!(r#"<option value="{0}"{1}>{0}</option>"#, label, selected)
        })
        .collect();
    format!(
        r#"<select name="{}" onchange="this.form.submit()">{}</select>"#,
        name, options
    )
}

fn search_input(query: &str, placeholder: &str) -> String {
    format!(
        r#"<input type="search" name="q" value="{}" placeholder="{}">"#,
        html_escape(query),
        html_escape(placeholder)
    )
}

fn error_block(message: &str) -> String {
    format!(r#"    <div class="error">{}</div>"#, html_escape(message))
}

fn info_block(message: &str) -> String {
    format!(r#"    <p class="info">{}</p>"#, html_escape(message))
}

fn fetched_line<T>(snapshot: &Snapshot<T>) -> String {
    format!(
        r#"    <p class="fetched">Fetched {}</p>"#,
        snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

pub fn news_page(filter: &NewsFilter, outcome: &Outcome<pk_core::NewsArticle>) -> String {
    let mut content = String::from(
        "    <h1>Dawn News - Latest Updates</h1>\n    <h2>Latest News from Dawn</h2>\n",
    );

    if let Outcome::Failed(message) = outcome {
        content.push_str(&error_block(message));
        content.push('\n');
    }

    content.push_str(&format!(
        r#"    <form class="controls" method="get" action="/news">
        <label>Search by title {}</label>
        <label>Filter by published time {}</label>
        <button type="submit">Apply</button>
    </form>
"#,
        search_input(&filter.query, "e.g. budget"),
        select("time", &TimeBucket::ALL, &filter.time, TimeBucket::label),
    ));

    match outcome {
        Outcome::Loaded { snapshot, .. } if !snapshot.is_empty() => {
            content.push_str(&table(&snapshot.rows, "data-table"));
            content.push('\n');
            content.push_str(&fetched_line(snapshot));
        }
        _ => content.push_str(&info_block(NO_ARTICLES)),
    }

    layout("Dawn News - Latest Updates", &content)
}

pub fn weather_page(view: &WeatherView, source_url: &str, outcome: &Outcome<pk_core::CityWeather>) -> String {
    let title = "Weather Forecast: Cities in Pakistan (Sortable, Searchable)";
    let mut content = format!(
        "    <h1>{}</h1>\n    <p>Fetching data from <a href=\"{}\">Weather Forecast</a>...</p>\n",
        html_escape(title),
        html_escape(source_url)
    );

    let (snapshot, total) = match outcome {
        Outcome::Failed(message) => {
            content.push_str(&error_block(message));
            return layout(title, &content);
        }
        Outcome::Loaded { snapshot, total } => (snapshot, *total),
    };

    content.push_str(&format!(
        r#"    <div class="success">Found {} cities!</div>
    <h3>Weather Details (Sortable, Searchable):</h3>
    <form class="controls" method="get" action="/weather">
        <label>Search for a city: {}</label>
        <label>Sort by: {}</label>
        <button type="submit">Apply</button>
    </form>
"#,
        total,
        search_input(&view.query, "e.g. Lahore"),
        select("sort", &SortKey::ALL, &view.sort, SortKey::label),
    ));

    if snapshot.is_empty() {
        content.push_str(&info_block(NO_CITIES));
    } else {
        content.push_str(&table(&snapshot.rows, "styled-table"));
        content.push('\n');
        content.push_str(&fetched_line(snapshot));
    }

    layout(title, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pk_core::{CityWeather, NewsArticle};

    fn article(title: &str) -> NewsArticle {
        NewsArticle {
            title: title.to_string(),
            summary: "Summary".to_string(),
            published_time: "3 hours ago".to_string(),
            link: "https://www.dawn.com/news/1".to_string(),
        }
    }

    fn loaded<T>(rows: Vec<T>) -> Outcome<T> {
        let total = rows.len();
        Outcome::Loaded {
            snapshot: Snapshot::new(rows),
            total,
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_table_rows_and_links() {
        let html = table(&[article("One"), article("Two <script>")], "data-table");
        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(html.contains("<th>Published Time</th>"));
        assert!(html.contains(r#"<a href="https://www.dawn.com/news/1""#));
        assert!(html.contains("Two &lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_select_marks_current_option() {
        let html = select("time", &TimeBucket::ALL, &TimeBucket::Last24Hours, TimeBucket::label);
        assert!(html.contains(r#"<option value="Last 24 hours" selected>"#));
        assert_eq!(html.matches(" selected").count(), 1);
        assert_eq!(html.matches("<option").count(), 4);
    }

    #[test]
    fn test_news_page_with_rows() {
        let filter = NewsFilter::new("dawn", TimeBucket::Today);
        let html = news_page(&filter, &loaded(vec![article("Dawn News Today")]));
        assert!(html.contains("<h1>Dawn News - Latest Updates</h1>"));
        assert!(html.contains(r#"value="dawn""#));
        assert!(html.contains("<td>Dawn News Today</td>"));
        assert!(!html.contains(NO_ARTICLES));
    }

    #[test]
    fn test_news_page_empty() {
        let html = news_page(&NewsFilter::default(), &loaded(vec![]));
        assert!(html.contains(NO_ARTICLES));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_news_page_failed() {
        let outcome = Outcome::Failed("Failed to retrieve news. Status code: 500".to_string());
        let html = news_page(&NewsFilter::default(), &outcome);
        assert!(html.contains(r#"<div class="error">Failed to retrieve news. Status code: 500</div>"#));
        assert_eq!(html.matches("<td>").count(), 0);
    }

    #[test]
    fn test_weather_page() {
        let rows = vec![CityWeather::from_details("Karachi", "Sunny and 30 C")];
        let outcome = Outcome::Loaded {
            snapshot: Snapshot::new(rows),
            total: 12,
        };
        let html = weather_page(&WeatherView::default(), "https://example.com/pk", &outcome);
        assert!(html.contains("Found 12 cities!"));
        assert!(html.contains(r#"<table class="styled-table">"#));
        assert!(html.contains("<td>30 C</td>"));
        assert!(html.contains(r#"<option value="City" selected>"#));
    }

    #[test]
    fn test_weather_page_failed_has_no_controls() {
        let outcome = Outcome::Failed("Error: Unable to fetch the webpage. Status code 404.".to_string());
        let html = weather_page(&WeatherView::default(), "https://example.com/pk", &outcome);
        assert!(html.contains("Status code 404."));
        assert!(!html.contains("<form"));
        assert_eq!(html.matches("<td>").count(), 0);
    }

    #[test]
    fn test_index_page() {
        let html = index_page(&[pk_scrapers::SourceKind::News.metadata()]);
        assert!(html.contains(r#"<a href="/news">Dawn</a>"#));
    }
}
