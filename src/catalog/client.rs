use anyhow::{anyhow, Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::warn;

use super::config::CatalogConfig;

fn truncate_for_log(mut s: String, max_len: usize) -> String {
    if s.len() > max_len {
        // Step back to a char boundary; a byte-index truncate panics when
        // max_len lands inside a multibyte character.
        let mut cut = max_len;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("…");
    }
    s
}

/// Client for the storefront's catalog backend.
///
/// Endpoints:
/// - GET /api/public/category/{slug} - breadcrumb data for a category
/// - GET /api/public/attribute/filter/{category} - attribute filters
/// - GET /api/public/product/filter/{slug} - related products
///
/// Every operation resolves to "value or absence": a 404 is a defined
/// absence, and any other failure (non-2xx status, transport error, JSON
/// parse error) also collapses to absence after emitting a diagnostic.
/// Callers get one uniform check; the failure kind survives only in the log.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    api_base_url: String,
    backend_base_url: String,
    http: Client,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        let backend_base_url = config.backend_base_url.trim_end_matches('/').to_string();
        url::Url::parse(&api_base_url).context("invalid API base URL")?;
        url::Url::parse(&backend_base_url).context("invalid backend base URL")?;

        let http = Client::builder()
            .user_agent("storefront-web/0.1")
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            api_base_url,
            backend_base_url,
            http,
        })
    }

    /// Breadcrumb data for a category. The raw JSON body is forwarded to the
    /// caller unchanged; `None` covers not-found and every failure mode.
    pub async fn fetch_breadcrumb(&self, category_slug: &str) -> Option<Value> {
        let url = format!(
            "{}/api/public/category/{}",
            self.backend_base_url, category_slug
        );
        self.get_json(&url).await
    }

    /// Attribute filters for a category: the `data` field of the envelope,
    /// or an empty array when the envelope carries none.
    pub async fn fetch_filter(&self, category: &str) -> Option<Value> {
        let url = format!(
            "{}/api/public/attribute/filter/{}",
            self.api_base_url, category
        );
        let body = self.get_json(&url).await?;
        Some(
            body.get("data")
                .cloned()
                .unwrap_or_else(|| Value::Array(Vec::new())),
        )
    }

    /// Products related to the given slug: the `data` field as a sequence,
    /// or `None` when the field is missing or the fetch failed.
    pub async fn fetch_related_products(&self, last_slug: &str) -> Option<Vec<Value>> {
        let url = format!(
            "{}/api/public/product/filter/{}",
            self.backend_base_url, last_slug
        );
        let body = self.get_json(&url).await?;
        match body.get("data") {
            Some(Value::Array(items)) => Some(items.clone()),
            _ => {
                warn!(
                    target: "catalog",
                    url,
                    "related products response missing 'data' array"
                );
                None
            }
        }
    }

    /// Shared absence predicate for all catalog fetches: 404 ⇒ absence
    /// without a diagnostic, any other non-2xx or transport/parse failure ⇒
    /// absence with one. Errors never escape this boundary.
    async fn get_json(&self, url: &str) -> Option<Value> {
        match self.try_get_json(url).await {
            Ok(body) => body,
            Err(err) => {
                warn!(target: "catalog", url, error = %err, "catalog fetch failed");
                None
            }
        }
    }

    async fn try_get_json(&self, url: &str) -> Result<Option<Value>> {
        let resp = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = truncate_for_log(resp.text().await.unwrap_or_default(), 2000);
            return Err(anyhow!("unexpected status: {status} url={url} body={body}"));
        }

        let body: Value = resp.json().await?;
        Ok(Some(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn client_for(server: &mockito::ServerGuard) -> CatalogClient {
        CatalogClient::new(CatalogConfig {
            api_base_url: server.url(),
            backend_base_url: server.url(),
            timeout: std::time::Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn breadcrumb_success_returns_body_unchanged() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/public/category/phones")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":1,"name":"Phones"}"#)
            .create_async()
            .await;

        let client = client_for(&server).await;
        let got = client.fetch_breadcrumb("phones").await;
        assert_eq!(got, Some(json!({"id": 1, "name": "Phones"})));
    }

    #[tokio::test]
    async fn breadcrumb_404_is_absence() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/public/category/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.fetch_breadcrumb("missing").await, None);
    }

    #[tokio::test]
    async fn breadcrumb_server_error_is_absence() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/public/category/phones")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.fetch_breadcrumb("phones").await, None);
    }

    #[tokio::test]
    async fn breadcrumb_parse_failure_is_absence() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/public/category/phones")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json at all")
            .create_async()
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.fetch_breadcrumb("phones").await, None);
    }

    #[tokio::test]
    async fn filter_returns_data_field() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/public/attribute/filter/phones")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":[1,2,3]}"#)
            .create_async()
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.fetch_filter("phones").await, Some(json!([1, 2, 3])));
    }

    #[tokio::test]
    async fn filter_without_data_defaults_to_empty_array() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/public/attribute/filter/phones")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.fetch_filter("phones").await, Some(json!([])));
    }

    #[tokio::test]
    async fn filter_404_is_absence() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/public/attribute/filter/ghost")
            .with_status(404)
            .create_async()
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.fetch_filter("ghost").await, None);
    }

    #[tokio::test]
    async fn filter_server_error_is_absence_not_parsed() {
        // Uniform absence predicate: a 500 must not be treated as a parseable
        // success even when its body happens to be valid JSON.
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/public/attribute/filter/phones")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":[9]}"#)
            .create_async()
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.fetch_filter("phones").await, None);
    }

    #[tokio::test]
    async fn related_products_returns_data_sequence() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/public/product/filter/iphone-15")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":[{"id":"x"}]}"#)
            .create_async()
            .await;

        let client = client_for(&server).await;
        assert_eq!(
            client.fetch_related_products("iphone-15").await,
            Some(vec![json!({"id": "x"})])
        );
    }

    #[tokio::test]
    async fn related_products_missing_data_is_absence() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/public/product/filter/iphone-15")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"total":0}"#)
            .create_async()
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.fetch_related_products("iphone-15").await, None);
    }

    #[tokio::test]
    async fn related_products_server_error_is_absence() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/public/product/filter/iphone-15")
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.fetch_related_products("iphone-15").await, None);
    }

    #[tokio::test]
    async fn multibyte_error_body_still_collapses_to_absence() {
        // Error bodies get truncated for the diagnostic log; a multibyte
        // character straddling the truncation point must not panic.
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/public/category/phones")
            .with_status(500)
            .with_body(format!("{}ế", "a".repeat(1999)))
            .create_async()
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.fetch_breadcrumb("phones").await, None);
    }

    #[test]
    fn truncation_lands_on_char_boundaries() {
        // Four 2-byte chars, limit mid-way through the third.
        assert_eq!(truncate_for_log("éééé".to_string(), 5), "éé…");
        assert_eq!(truncate_for_log("short".to_string(), 2000), "short");
    }

    #[tokio::test]
    async fn connection_failure_is_absence() {
        // Port 9 on localhost is expected to refuse connections.
        let client = CatalogClient::new(CatalogConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            backend_base_url: "http://127.0.0.1:9".to_string(),
            timeout: std::time::Duration::from_secs(1),
        })
        .unwrap();
        assert_eq!(client.fetch_breadcrumb("phones").await, None);
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = CatalogClient::new(CatalogConfig {
            api_base_url: "not a url".to_string(),
            backend_base_url: "http://localhost:8000".to_string(),
            timeout: std::time::Duration::from_secs(5),
        });
        assert!(result.is_err());
    }
}
