use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use pk_core::{FetchConfig, Fetcher, Result, ServerConfig};
use pk_scrapers::cli::{handle_command, ScraperArgs, ScraperCommands};
use pk_scrapers::{init_logging, Sources};
use pk_web::AppState;
use tracing::{error, info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Pakistan news and weather scraper", long_about = None)]
pub struct Cli {
    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,
    /// Send this User-Agent on every request instead of the per-source one
    #[arg(long, global = true)]
    user_agent: Option<String>,
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the web pages and JSON API
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: SocketAddr,
    },
    #[command(flatten)]
    Scrape(ScraperCommands),
}

impl Cli {
    fn fetch_config(&self) -> FetchConfig {
        let config = FetchConfig::new().with_timeout(Duration::from_secs(self.timeout));
        match &self.user_agent {
            Some(user_agent) => config.with_user_agent(user_agent.as_str()),
            None => config,
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.fetch_config();

    match cli.command {
        Commands::Serve { bind } => {
            let state = AppState::new(&config)?;
            pk_web::serve(&ServerConfig::default().with_bind(bind), state).await
        }
        Commands::Scrape(command) => {
            let fetcher = Fetcher::new(&config)?;
            handle_command(ScraperArgs { command }, &Sources::new(), &fetcher).await
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(if cli.verbose { Level::DEBUG } else { Level::INFO });
    info!("🦗 pk {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pk_core::{SortKey, TimeBucket};

    #[test]
    fn test_news_args() {
        let cli = Cli::try_parse_from(["pk", "news", "-s", "budget", "-t", "today"]).unwrap();
        match cli.command {
            Commands::Scrape(ScraperCommands::News { search, time, json }) => {
                assert_eq!(search, "budget");
                assert_eq!(time, TimeBucket::Today);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_weather_args() {
        let cli = Cli::try_parse_from(["pk", "weather", "--sort", "temp", "--json"]).unwrap();
        match cli.command {
            Commands::Scrape(ScraperCommands::Weather { search, sort, json }) => {
                assert_eq!(search, "");
                assert_eq!(sort, SortKey::Temperature);
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["pk", "list", "--timeout", "5", "--user-agent", "pk-test", "-v"])
            .unwrap();
        assert!(cli.verbose);
        let config = cli.fetch_config();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent.as_deref(), Some("pk-test"));
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["pk", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { bind } => assert_eq!(bind.to_string(), "127.0.0.1:8080"),
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(Cli::try_parse_from(["pk", "serve", "--bind", "nowhere"]).is_err());
    }

    #[test]
    fn test_unknown_bucket_is_rejected() {
        assert!(Cli::try_parse_from(["pk", "news", "--time", "someday"]).is_err());
    }
}
