//! HTTP client shared by the service variants

use log::debug;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::http;
use crate::error::{Result, VcaError};

/// vCloud Air API client
pub struct VcaClient {
    client: Client,
    host: String,
    version: String,
}

impl VcaClient {
    /// Create a client for `host` speaking API `version`.
    ///
    /// `insecure` disables TLS certificate verification.
    pub fn new(host: &str, version: &str, insecure: bool) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(http::CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(http::REQUEST_TIMEOUT_SECS))
            .danger_accept_invalid_certs(insecure)
            .build()?;

        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            version: version.to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Absolute URL for an API path
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    /// Accept header for the service API
    fn service_accept(&self) -> String {
        format!("application/json;version={}", self.version)
    }

    /// Accept header for vCloud Director documents
    pub(crate) fn vcloud_accept(&self) -> String {
        format!("application/*+json;version={}", self.version)
    }

    /// GET request against the service API
    pub(crate) fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url).header(ACCEPT, self.service_accept())
    }

    /// POST request against the service API
    pub(crate) fn post(&self, url: &str) -> RequestBuilder {
        self.client.post(url).header(ACCEPT, self.service_accept())
    }

    /// GET request for a vCloud Director document
    pub(crate) fn vcloud_get(&self, url: &str) -> RequestBuilder {
        self.client.get(url).header(ACCEPT, self.vcloud_accept())
    }

    /// POST request for a vCloud Director session
    pub(crate) fn vcloud_post(&self, url: &str) -> RequestBuilder {
        self.client.post(url).header(ACCEPT, self.vcloud_accept())
    }

    /// Parse an API response, returning error for non-success status codes
    pub(crate) async fn parse_api_response<T>(
        &self,
        response: Response,
        error_context: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if !response.status().is_success() {
            return Err(VcaError::Api {
                status: response.status().as_u16(),
                message: format!("Failed to fetch {}", error_context),
            });
        }
        Ok(response.json().await?)
    }

    /// Fetch a raw JSON document, `None` for 404
    pub(crate) async fn fetch_raw(
        &self,
        request: RequestBuilder,
        resource_label: &str,
    ) -> Result<Option<serde_json::Value>> {
        let response = request.send().await?;
        match response.status().as_u16() {
            200 => Ok(Some(response.json().await?)),
            404 => {
                debug!("{} not found", resource_label);
                Ok(None)
            }
            status => Err(VcaError::Api {
                status,
                message: format!("Failed to fetch {}", resource_label),
            }),
        }
    }

    /// Read a response header as a string
    pub(crate) fn header_value(response: &Response, name: &str) -> Option<String> {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    }

    /// Check the status of a login response
    pub(crate) fn check_login_status(response: &Response, user: &str) -> Result<()> {
        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(VcaError::AuthenticationFailure(format!(
                "invalid credentials for user '{}'",
                user
            )));
        }
        if !status.is_success() {
            return Err(VcaError::Api {
                status: status.as_u16(),
                message: "Login request failed".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_url_trims_trailing_slash() {
        let client = VcaClient::new("https://vca.vmware.com/", "5.7", false).unwrap();
        assert_eq!(client.host(), "https://vca.vmware.com");
        assert_eq!(
            client.url("/api/iam/login"),
            "https://vca.vmware.com/api/iam/login"
        );
    }

    #[test]
    fn test_accept_headers_carry_version() {
        let client = VcaClient::new("https://h", "5.6", false).unwrap();
        assert_eq!(client.service_accept(), "application/json;version=5.6");
        assert_eq!(client.vcloud_accept(), "application/*+json;version=5.6");
    }

    #[tokio::test]
    async fn test_fetch_raw_found_and_missing() {
        let mock_server = MockServer::start().await;
        let client = VcaClient::new(&mock_server.uri(), "5.7", false).unwrap();

        Mock::given(method("GET"))
            .and(path("/found"))
            .and(header("Accept", "application/json;version=5.7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "x"})))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let found = client
            .fetch_raw(client.get(&client.url("/found")), "found")
            .await
            .unwrap();
        assert_eq!(found.unwrap()["id"], "x");

        let missing = client
            .fetch_raw(client.get(&client.url("/missing")), "missing")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_fetch_raw_server_error() {
        let mock_server = MockServer::start().await;
        let client = VcaClient::new(&mock_server.uri(), "5.7", false).unwrap();

        Mock::given(method("GET"))
            .and(path("/boom"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let result = client
            .fetch_raw(client.get(&client.url("/boom")), "boom")
            .await;
        match result {
            Err(VcaError::Api { status, .. }) => assert_eq!(status, 500),
            other => panic!("Expected Api error, got {:?}", other),
        }
    }
}
