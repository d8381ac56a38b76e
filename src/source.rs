//! Record sources
//!
//! The remote collection is an opaque fetch-and-parse boundary. Front ends and
//! tests go through [`RecordSource`] so the controller never depends on HTTP.

use crate::error::{DirectoryError, Result};
use crate::record::Record;
use std::time::Duration;

/// Anything that can hand out the full record collection and single records
pub trait RecordSource: Send + Sync {
    /// `GET <endpoint>`: the whole collection, in source order
    fn fetch_all(&self) -> Result<Vec<Record>>;

    /// `GET <endpoint>/{id}`
    fn fetch_one(&self, id: u64) -> Result<Record>;
}

/// Blocking HTTP source for a JSON collection endpoint
pub struct HttpSource {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpSource {
    /// `timeout` of `None` means a hung request is never cut short
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = endpoint.trim().trim_end_matches('/').to_string();
        if endpoint.is_empty() {
            return Err(DirectoryError::Config("endpoint must not be empty".into()));
        }
        reqwest::Url::parse(&endpoint)
            .map_err(|e| DirectoryError::Config(format!("invalid endpoint '{}': {}", endpoint, e)))?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("userdir/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn detail_url(&self, id: u64) -> String {
        format!("{}/{}", self.endpoint, id)
    }

    fn get_text(&self, url: &str) -> Result<String> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::from_status(status.as_u16(), url));
        }
        Ok(response.text()?)
    }
}

impl RecordSource for HttpSource {
    fn fetch_all(&self) -> Result<Vec<Record>> {
        let body = self.get_text(&self.endpoint)?;
        let records: Vec<Record> = serde_json::from_str(&body)?;
        log::info!("fetched {} records from {}", records.len(), self.endpoint);
        Ok(records)
    }

    fn fetch_one(&self, id: u64) -> Result<Record> {
        let url = self.detail_url(id);
        let body = self.get_text(&url)?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let source = HttpSource::new("http://localhost:9/users/", None).unwrap();
        assert_eq!(source.endpoint(), "http://localhost:9/users");
        assert_eq!(source.detail_url(4), "http://localhost:9/users/4");
    }

    #[test]
    fn rejects_bad_endpoints() {
        assert!(matches!(
            HttpSource::new("   ", None),
            Err(DirectoryError::Config(_))
        ));
        assert!(matches!(
            HttpSource::new("not a url", None),
            Err(DirectoryError::Config(_))
        ));
    }
}
