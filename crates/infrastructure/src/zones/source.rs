use super::parser::parse_zone;
use async_trait::async_trait;
use dnsd_application::ports::ZoneSource;
use dnsd_domain::DomainError;
use hickory_proto::rr::Record;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("dnsd/", env!("CARGO_PKG_VERSION"), " (zone-fetch)");

/// Loads zone text from `http://`/`https://` URLs or local files.
///
/// Anything that is not an HTTP(S) URL is treated as a path; a `file://`
/// prefix is accepted and stripped.
pub struct ZoneSourceLoader {
    http_client: reqwest::Client,
}

impl ZoneSourceLoader {
    pub fn new(fetch_timeout: Duration) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(fetch_timeout)
            .build()
            .map_err(|e| DomainError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    async fn fetch_text(&self, source: &str) -> Result<String, String> {
        if is_http(source) {
            fetch_url(source, &self.http_client).await
        } else {
            let path = source.strip_prefix("file://").unwrap_or(source);
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| format!("read error for {}: {}", path, e))
        }
    }
}

#[async_trait]
impl ZoneSource for ZoneSourceLoader {
    async fn load(&self, source: &str) -> Result<Vec<Record>, DomainError> {
        let text = self
            .fetch_text(source)
            .await
            .map_err(|reason| DomainError::ZoneFetch {
                source_id: source.to_string(),
                reason,
            })?;

        debug!(source = %source, bytes = text.len(), "Zone text fetched");

        parse_zone(&text, source)
    }
}

fn is_http(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

async fn fetch_url(url: &str, client: &reqwest::Client) -> Result<String, String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("fetch error for {}: {}", url, e))?;

    if !response.status().is_success() {
        return Err(format!("HTTP {} for {}", response.status().as_u16(), url));
    }

    response
        .text()
        .await
        .map_err(|e| format!("read error for {}: {}", url, e))
}
