use std::io::Write;

use clap::{Args, Subcommand};
use pk_core::view::{NO_ARTICLES, NO_CITIES};
use pk_core::{Fetcher, NewsFilter, Result, Snapshot, SortKey, TableRow, TimeBucket, WeatherView};
use serde::Serialize;

use crate::scrapers::{Scraper, SourceKind, Sources};

/// Cells wider than this are cut in text tables.
const MAX_CELL_WIDTH: usize = 60;

#[derive(Args, Debug, Clone)]
pub struct ScraperArgs {
    #[command(subcommand)]
    pub command: ScraperCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ScraperCommands {
    /// Latest headlines from Dawn
    News {
        /// Only keep articles whose title contains this text (case-insensitive)
        #[arg(long, short, default_value = "")]
        search: String,
        /// Publish-time filter: all, today, last-24-hours, older
        #[arg(long, short, default_value = "All")]
        time: TimeBucket,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Current weather for cities in Pakistan
    Weather {
        /// Only keep cities whose name contains this text (case-insensitive)
        #[arg(long, short, default_value = "")]
        search: String,
        /// Column to sort by: city, condition, temperature
        #[arg(long, default_value = "City")]
        sort: SortKey,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List available sources
    List,
}

pub async fn handle_command(args: ScraperArgs, sources: &Sources, fetcher: &Fetcher) -> Result<()> {
    let mut out = Vec::new();
    let result = run(args.command, sources, fetcher, &mut out).await;
    std::io::stdout().write_all(&out)?;
    result
}

async fn run(
    command: ScraperCommands,
    sources: &Sources,
    fetcher: &Fetcher,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        ScraperCommands::News { search, time, json } => {
            let snapshot = load(&sources.news, fetcher).await?;
            let snapshot = snapshot.map_rows(|rows| NewsFilter::new(search, time).apply(rows));
            write_snapshot(out, &sources.news, &snapshot, json, NO_ARTICLES)?;
        }
        ScraperCommands::Weather { search, sort, json } => {
            let snapshot = load(&sources.weather, fetcher).await?;
            if !json {
                writeln!(out, "Found {} cities!", snapshot.len())?;
            }
            let snapshot = snapshot.map_rows(|rows| WeatherView::new(search, sort).apply(rows));
            write_snapshot(out, &sources.weather, &snapshot, json, NO_CITIES)?;
        }
        ScraperCommands::List => {
            writeln!(out, "Available sources:")?;
            for kind in SourceKind::ALL {
                let meta = kind.metadata();
                writeln!(out, "  {} {:<8} {} ({})", meta.emoji, meta.cli_name, meta.name, meta.url)?;
            }
        }
    }
    Ok(())
}

/// Runs the scraper, reporting a failure on stderr the way the web page
/// would show it.
async fn load<S: Scraper>(scraper: &S, fetcher: &Fetcher) -> Result<Snapshot<S::Record>> {
    scraper.scrape(fetcher).await.map_err(|e| {
        eprintln!("{}", scraper.failure_message(&e));
        e
    })
}

fn write_snapshot<S, T>(
    out: &mut impl Write,
    scraper: &S,
    snapshot: &Snapshot<T>,
    json: bool,
    empty_message: &str,
) -> Result<()>
where
    S: Scraper,
    T: TableRow + Serialize,
{
    if json {
        serde_json::to_writer_pretty(&mut *out, &snapshot.rows)?;
        writeln!(out)?;
        return Ok(());
    }

    let meta = scraper.source_metadata();
    writeln!(
        out,
        "{} {} · {} rows · fetched {}",
        meta.emoji,
        meta.name,
        snapshot.len(),
        snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    if snapshot.is_empty() {
        writeln!(out, "{}", empty_message)?;
    } else {
        out.write_all(render_table(&snapshot.rows).as_bytes())?;
    }
    Ok(())
}

fn table_line(cells: &[&str], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}

fn clip(cell: &str) -> String {
    if cell.chars().count() > MAX_CELL_WIDTH {
        let mut clipped: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
        clipped.push('…');
        clipped
    } else {
        cell.to_string()
    }
}

/// Fixed-width text table with a header row.
pub fn render_table<T: TableRow>(rows: &[T]) -> String {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.cells().into_iter().map(clip).collect())
        .collect();

    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut table = String::new();
    table.push_str(&table_line(T::HEADERS, &widths));
    table.push_str(&table_line(&rule.iter().map(String::as_str).collect::<Vec<_>>(), &widths));
    for row in &body {
        table.push_str(&table_line(&row.iter().map(String::as_str).collect::<Vec<_>>(), &widths));
    }
    table
}
