use std::env;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::debug;

use crate::model::SearchResult;
use crate::{Error, Result};

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://api.flysas.com";
/// Environment override for the API host.
pub const BASE_URL_ENV: &str = "STARFARE_API_URL";
/// Environment override for the per-request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "STARFARE_TIMEOUT_SECS";
/// Search mode covering the whole alliance.
pub const ALLIANCE_MODE: &str = "STAR";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const QUERY_DATE_FORMAT: &str = "%Y%m%d";

/// One round-trip availability query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Booking flow, e.g. [`ALLIANCE_MODE`].
    pub mode: String,
    /// Originating airport code.
    pub origin: String,
    /// Destination airport code.
    pub destination: String,
    /// Outbound travel date.
    pub out_date: NaiveDate,
    /// Inbound travel date.
    pub in_date: NaiveDate,
}

/// Source of search results (allows mocking in tests).
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Runs one query.
    async fn search(&self, query: &SearchQuery) -> Result<SearchResult>;
}

/// HTTP client for the fare search API.
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    client: Client,
    base_url: String,
}

impl HttpSearchClient {
    /// Creates a client for the default host, honoring environment overrides.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|secs| secs.trim().parse().ok())
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);
        Self::with_base_url(&base_url, timeout)
    }

    /// Creates a client for a specific host (primarily for tests).
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("starfare/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Host this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResult> {
        let url = format!("{}/offers/flights", self.base_url);
        let out_date = query.out_date.format(QUERY_DATE_FORMAT).to_string();
        let in_date = query.in_date.format(QUERY_DATE_FORMAT).to_string();
        let mode = query.mode.to_lowercase();

        debug!(
            "GET {} {} -> {} out {} in {}",
            url, query.origin, query.destination, out_date, in_date
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("from", query.origin.as_str()),
                ("to", query.destination.as_str()),
                ("outDate", out_date.as_str()),
                ("inDate", in_date.as_str()),
                ("adt", "1"),
                ("bookingFlow", mode.as_str()),
                ("pos", "se"),
                ("channel", "web"),
            ])
            .send()
            .await?;

        let status_error = response.error_for_status_ref().err();
        let body = response.text().await?;

        match status_error {
            None => Ok(serde_json::from_str(&body)?),
            // The API reports "no flights" and similar as JSON errors on 4xx.
            Some(err) => match serde_json::from_str::<SearchResult>(&body) {
                Ok(result) if result.first_error().is_some() => Ok(result),
                _ => Err(Error::Network(err)),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn query() -> SearchQuery {
        SearchQuery {
            mode: ALLIANCE_MODE.to_string(),
            origin: "CPH".to_string(),
            destination: "JFK".to_string(),
            out_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            in_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        }
    }

    fn client(server: &MockServer) -> HttpSearchClient {
        HttpSearchClient::with_base_url(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_search_sends_query_parameters() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/offers/flights"))
            .and(query_param("from", "CPH"))
            .and(query_param("to", "JFK"))
            .and(query_param("outDate", "20240601"))
            .and(query_param("inDate", "20240615"))
            .and(query_param("bookingFlow", "star"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "outboundFlights": [{
                    "stops": 0,
                    "startTimeInLocal": "2024-06-01T10:00:00",
                    "endTimeInLocal": "2024-06-01T12:30:00",
                    "cabins": { "business": {} },
                    "segments": []
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server).search(&query()).await?;
        let (outbound, inbound) = result.into_flights();
        assert_eq!(outbound.len(), 1);
        assert!(inbound.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_search_keeps_reported_errors_on_client_error() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": [{ "errorMessage": "No flights found" }]
            })))
            .mount(&server)
            .await;

        let result = client(&server).search(&query()).await?;
        assert_eq!(result.first_error(), Some("No flights found"));
        Ok(())
    }

    #[tokio::test]
    async fn test_search_500_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        match client(&server).search(&query()).await {
            Err(Error::Network(err)) => assert!(err.is_status()),
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_bad_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client(&server).search(&query()).await.unwrap_err();
        assert_eq!(err.category(), "decode");
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = HttpSearchClient::with_base_url(&server.uri(), Duration::from_millis(50)).unwrap();
        let err = client.search(&query()).await.unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client =
            HttpSearchClient::with_base_url("http://localhost:9/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9");
    }
}
