use crate::config::APIFY_BASE_URL;
use crate::scraper::scraper::{parse_search_body, truncate, ListingSource};
use crate::scraper::ScraperError;
use reqwest::blocking::Client;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Listings already scraped into an Apify dataset.
pub struct ApifyDataset {
    client: Client,
    dataset_id: String,
    token: String,
}

impl ApifyDataset {
    pub fn new(dataset_id: String, token: String, timeout: Duration) -> Result<Self, ScraperError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            dataset_id,
            token,
        })
    }

    pub fn items_url(&self) -> Result<Url, ScraperError> {
        let mut url = Url::parse(&format!("{APIFY_BASE_URL}/datasets/{}/items", self.dataset_id))
            .map_err(|e| ScraperError::Config(format!("bad dataset id: {e}")))?;
        url.query_pairs_mut().append_pair("format", "json");
        Ok(url)
    }
}

impl ListingSource for ApifyDataset {
    fn name(&self) -> &str {
        "apify"
    }

    fn fetch_listings(&self) -> Result<Vec<Value>, ScraperError> {
        let url = self.items_url()?;
        let resp = self.client.get(url).bearer_auth(&self.token).send()?;

        let status = resp.status();
        let text = resp.text()?;
        if !status.is_success() {
            return Err(ScraperError::Api {
                status: status.as_u16(),
                body: truncate(&text).to_string(),
            });
        }

        let items = parse_listing_payload(&text)?;
        tracing::info!(dataset = %self.dataset_id, count = items.len(), "dataset items received");
        Ok(items)
    }
}

/// A saved response on disk, for replaying a run without the network.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ListingSource for JsonFileSource {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch_listings(&self) -> Result<Vec<Value>, ScraperError> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| ScraperError::IoError(format!("{}: {e}", self.path.display())))?;
        parse_listing_payload(&text)
    }
}

/// Accepts either a bare array of listings or a search response object.
pub fn parse_listing_payload(text: &str) -> Result<Vec<Value>, ScraperError> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str::<Vec<Value>>(text).map_err(|e| {
            tracing::error!(error = %e, raw = %truncate(text), "listing array is not valid JSON");
            ScraperError::JsonParse(e.to_string())
        });
    }
    parse_search_body(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_url_asks_for_json() {
        let source =
            ApifyDataset::new("abc123".into(), "t".into(), Duration::from_secs(5)).unwrap();
        let url = source.items_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.apify.com/v2/datasets/abc123/items?format=json"
        );
    }

    #[test]
    fn payload_accepts_bare_arrays() {
        let items = parse_listing_payload(r#"  [{"MlsNumber":"X1"}]"#).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn payload_accepts_search_objects() {
        let items = parse_listing_payload(r#"{"Results":[{},{}]}"#).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let source = JsonFileSource::new(PathBuf::from("definitely/not/here.json"));
        assert!(matches!(
            source.fetch_listings(),
            Err(ScraperError::IoError(_))
        ));
    }
}
