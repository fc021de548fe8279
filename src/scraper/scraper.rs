// scraper.rs
use crate::config::{SearchArea, SearchConfig, SearchQuery};
use crate::scraper::models::SearchResponse;
use crate::scraper::ScraperError;
use reqwest::blocking::Client;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, ORIGIN, REFERER,
};
use serde_json::Value;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/142.0.0.0 Safari/537.36";

/// Longest slice of an unparseable body that gets logged.
const RAW_LOG_LIMIT: usize = 2_000;

/// Anything that can hand back one batch of raw listing records.
pub trait ListingSource {
    fn name(&self) -> &str;
    fn fetch_listings(&self) -> Result<Vec<Value>, ScraperError>;
}

pub struct RealtorScraper {
    client: Client,
    search: SearchConfig,
}

impl RealtorScraper {
    pub fn new(search: SearchConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(Self::browser_headers(search.cookie.as_deref())?)
            .timeout(search.timeout)
            .build()?;

        if search.cookie.is_none() {
            tracing::warn!("REALTOR_COOKIE not set, the search endpoint may refuse the request");
        }

        Ok(Self { client, search })
    }

    fn browser_headers(cookie: Option<&str>) -> Result<HeaderMap, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
        );
        headers.insert(ORIGIN, HeaderValue::from_static("https://www.realtor.ca"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.realtor.ca/"));
        headers.insert(
            "sec-ch-ua",
            HeaderValue::from_static(
                r#""Chromium";v="142", "Google Chrome";v="142", "Not_A Brand";v="99""#,
            ),
        );
        headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
        headers.insert("sec-ch-ua-platform", HeaderValue::from_static(r#""Windows""#));
        headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
        headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
        headers.insert("sec-fetch-site", HeaderValue::from_static("same-site"));

        if let Some(cookie) = cookie {
            let value = HeaderValue::from_str(&format!("reese84={cookie}"))
                .map_err(|e| ScraperError::Config(format!("invalid cookie value: {e}")))?;
            headers.insert(COOKIE, value);
        }

        Ok(headers)
    }

    /// Form body for one area. Always page 1.
    pub fn search_form(query: &SearchQuery, area: &SearchArea) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("ZoomLevel", area.zoom_level.to_string()),
            ("LatitudeMax", area.latitude_max.to_string()),
            ("LongitudeMax", area.longitude_max.to_string()),
            ("LatitudeMin", area.latitude_min.to_string()),
            ("LongitudeMin", area.longitude_min.to_string()),
            ("Sort", "6-D".to_string()),
            ("PropertyTypeGroupID", "1".to_string()),
            ("TransactionTypeId", "2".to_string()),
            ("PropertySearchTypeId", query.property_search_type_id.to_string()),
            ("PriceMin", query.price_min.to_string()),
            ("PriceMax", query.price_max.to_string()),
        ];

        if let Some(range) = &query.bed_range {
            form.push(("BedRange", range.clone()));
        }
        if let Some(range) = &query.bath_range {
            form.push(("BathRange", range.clone()));
        }
        if let Some(range) = &query.unit_range {
            form.push(("UnitRange", range.clone()));
        }
        if let Some(id) = query.building_type_id {
            form.push(("BuildingTypeId", id.to_string()));
        }
        if let Some(id) = query.construction_style_id {
            form.push(("ConstructionStyleId", id.to_string()));
        }
        if let Some(keywords) = &query.keywords {
            form.push(("Keywords", keywords.clone()));
        }

        form.extend([
            ("Currency", "CAD".to_string()),
            ("IncludeHiddenListings", "false".to_string()),
            ("RecordsPerPage", query.records_per_page.to_string()),
            ("ApplicationId", "1".to_string()),
            ("CultureId", "1".to_string()),
            ("Version", "7.0".to_string()),
            ("CurrentPage", "1".to_string()),
        ]);

        form
    }

    fn fetch_area(&self, area: &SearchArea) -> Result<Vec<Value>, ScraperError> {
        let form = Self::search_form(&self.search.query, area);
        let start = std::time::Instant::now();

        let resp = self
            .client
            .post(&self.search.endpoint)
            .form(&form)
            .send()?;

        let status = resp.status();
        let text = resp.text()?;

        if !status.is_success() {
            tracing::error!(area = %area.name, %status, body = %truncate(&text), "search request rejected");
            return Err(ScraperError::Api {
                status: status.as_u16(),
                body: truncate(&text).to_string(),
            });
        }

        let results = parse_search_body(&text)?;
        tracing::info!(
            area = %area.name,
            count = results.len(),
            elapsed = ?start.elapsed(),
            "search page received"
        );
        Ok(results)
    }
}

impl ListingSource for RealtorScraper {
    fn name(&self) -> &str {
        "realtor.ca"
    }

    fn fetch_listings(&self) -> Result<Vec<Value>, ScraperError> {
        let mut all = Vec::new();
        for area in &self.search.areas {
            all.extend(self.fetch_area(area)?);
        }
        Ok(all)
    }
}

/// Decode a search response, logging the raw text when it is not the JSON we expect.
pub fn parse_search_body(text: &str) -> Result<Vec<Value>, ScraperError> {
    match serde_json::from_str::<SearchResponse>(text) {
        Ok(resp) => Ok(resp.results),
        Err(e) => {
            tracing::error!(error = %e, raw = %truncate(text), "response is not valid search JSON");
            Err(ScraperError::JsonParse(e.to_string()))
        }
    }
}

pub(crate) fn truncate(text: &str) -> &str {
    match text.char_indices().nth(RAW_LOG_LIMIT) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
