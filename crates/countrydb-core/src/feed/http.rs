// crates/countrydb-core/src/feed/http.rs
//! The REST Countries feed over HTTP.
use super::{decode_all, decode_one, CountryFeed};
use crate::config::FeedConfig;
use crate::error::{CountryDbError, Result};
use crate::model::CountryRecord;
use reqwest::Url;

/// A raw HTTP response: status code and body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP GET, so tests can swap in a canned client.
pub trait HttpClient: Send + Sync {
    /// Performs a GET request. Transport failures are errors; any status
    /// code, including 4xx/5xx, is a response.
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Real HTTP client using blocking reqwest.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("countrydb/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CountryDbError::feed(&config.base_url, e))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| CountryDbError::feed(url, format!("request failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| CountryDbError::feed(url, format!("failed to read response: {e}")))?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}

/// [`CountryFeed`] over the REST Countries API.
pub struct HttpFeed<C: HttpClient = ReqwestClient> {
    config: FeedConfig,
    client: C,
}

impl HttpFeed<ReqwestClient> {
    pub fn new(config: FeedConfig) -> Result<Self> {
        let client = ReqwestClient::new(&config)?;
        Ok(Self { config, client })
    }
}

impl<C: HttpClient> HttpFeed<C> {
    pub fn with_client(config: FeedConfig, client: C) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// `{base_url}/{segments..}`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let base = &self.config.base_url;
        let mut url = Url::parse(base).map_err(|e| CountryDbError::feed(base, e))?;
        url.path_segments_mut()
            .map_err(|_| CountryDbError::feed(base, "base URL cannot have a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url`; 404 maps to not-found for `key`, other non-2xx statuses
    /// to an unavailable feed.
    fn get_ok(&self, url: &str, key: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url)?;
        match response.status {
            _ if response.is_success() => Ok(response.body),
            404 => Err(CountryDbError::RecordNotFound(key.to_owned())),
            status => Err(CountryDbError::feed(url, format!("HTTP {status}"))),
        }
    }
}

impl<C: HttpClient> CountryFeed for HttpFeed<C> {
    fn source(&self) -> String {
        self.config.base_url.clone()
    }

    fn fetch_all(&self) -> Result<Vec<CountryRecord>> {
        let url = self.config.all_url();
        let body = self.get_ok(&url, "all").map_err(|e| match e {
            // A 404 on the bulk endpoint means the feed itself is missing.
            CountryDbError::RecordNotFound(_) => CountryDbError::feed(&url, "HTTP 404"),
            other => other,
        })?;
        decode_all(&url, &body)
    }

    fn fetch_by_code(&self, code: &str) -> Result<CountryRecord> {
        let url = self.endpoint(&["alpha", code.trim()])?;
        let body = self.get_ok(url.as_str(), code)?;
        decode_one(url.as_str(), code, &body)
    }

    fn fetch_by_name(&self, name: &str) -> Result<CountryRecord> {
        let mut url = self.endpoint(&["name", name.trim()])?;
        url.query_pairs_mut().append_pair("fullText", "true");
        let body = self.get_ok(url.as_str(), name)?;
        decode_one(url.as_str(), name, &body)
    }
}
