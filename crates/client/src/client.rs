//! The HTTP shell shared by every service module.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::deadline;
use crate::error::{ApiError, ApiResult};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Client for the protocol-management REST API.
///
/// Holds the base URL and, once logged in, the session's bearer token. Every
/// request goes through [`ApiClient::send`], which attaches the token, applies
/// the deadline, and maps HTTP 401 to [`ApiError::Unauthorized`] so callers
/// can apply the forced-logout rule in one place.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: build_http_client(),
            base_url: normalize(base_url.into()),
            token: None,
        }
    }

    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: build_http_client(),
            base_url: normalize(base_url.into()),
            token: Some(token.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = deadline::with_deadline(async {
            request
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))
        })
        .await?;

        let status = response.status();
        if status.as_u16() == 401 {
            tracing::warn!("backend rejected the session token");
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "request failed");
            return Err(ApiError::Status(status.as_u16(), body));
        }

        Ok(response)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(self.http.get(self.url(path))).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(crate) async fn get_bytes(&self, path: &str) -> ApiResult<Vec<u8>> {
        let response = self.send(self.http.get(self.url(path))).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// POST returning a parsed body (login is the only caller that needs one).
    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// POST where the response body is irrelevant; mutations are followed by a
    /// full collection reload instead of patching local state.
    pub(crate) async fn post(&self, path: &str, body: &impl Serialize) -> ApiResult<()> {
        self.send(self.http.post(self.url(path)).json(body)).await?;
        Ok(())
    }

    pub(crate) async fn put(&self, path: &str, body: &impl Serialize) -> ApiResult<()> {
        self.send(self.http.put(self.url(path)).json(body)).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send(self.http.delete(self.url(path))).await?;
        Ok(())
    }
}

fn normalize(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(deadline::REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(target_arch = "wasm32")]
fn build_http_client() -> reqwest::Client {
    // The fetch backend has no client-level timeout; `deadline` covers it.
    reqwest::Client::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_against_a_normalized_base() {
        let client = ApiClient::new("http://localhost:8080/api/");
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(
            client.url("/protocolos/7"),
            "http://localhost:8080/api/protocolos/7"
        );
    }
}
