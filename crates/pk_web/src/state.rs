use pk_core::{FetchConfig, Fetcher, Result};
use pk_scrapers::Sources;

/// Shared by every request. Nothing in here is mutated after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub fetcher: Fetcher,
    pub sources: Sources,
}

impl AppState {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
            sources: Sources::new(),
        })
    }

    pub fn with_sources(mut self, sources: Sources) -> Self {
        self.sources = sources;
        self
    }
}
