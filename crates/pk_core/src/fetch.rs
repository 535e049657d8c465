use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::config::FetchConfig;
use crate::{Error, Result};

/// Thin wrapper over a shared `reqwest::Client` that enforces the
/// "only 200 counts as success" rule.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    user_agent: Option<String>,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }

    /// GET `url` with the given extra headers and return the body text.
    ///
    /// Any status other than `200 OK` is reported as [`Error::Http`]; the body
    /// of such a response is discarded.
    pub async fn fetch(&self, url: &str, headers: &[(&str, &str)]) -> Result<String> {
        let headers = self.build_headers(headers)?;
        debug!("GET {}", url);

        let response = self.client.get(url).headers(headers).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            warn!("GET {} returned {}", url, status);
            return Err(Error::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        info!("📥 Fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }

    fn build_headers(&self, headers: &[(&str, &str)]) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::InvalidHeader(format!("{}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::InvalidHeader(format!("{}: {}", name, e)))?;
            map.insert(name, value);
        }
        if let Some(user_agent) = &self.user_agent {
            let value = HeaderValue::from_str(user_agent)
                .map_err(|e| Error::InvalidHeader(format!("user-agent: {}", e)))?;
            map.insert(USER_AGENT, value);
        }
        Ok(map)
    }
}
