//! The transport seam of the library. Identity negotiation only ever needs an unauthenticated
//! read and a JSON post, everything below that (TLS, pooling, timeouts, retries) belongs to the
//! implementor of [`HttpClient`].

mod error;

#[cfg(feature = "http-client")]
mod reqwest_client;

#[cfg(test)]
pub(crate) mod stub;

pub use error::HttpError;

#[cfg(feature = "http-client")]
pub use reqwest_client::ReqwestHttpClient;

use async_trait::async_trait;
use url::Url;

/// Minimal HTTP capability required to negotiate with an identity service. Implementations are
/// expected to be cheap to share between concurrent negotiations, no per-call state is kept by
/// the library.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform an unauthenticated read of the provided URL.
    async fn get(&self, url: &Url) -> Result<HttpResponse, HttpError>;

    /// Send the JSON body to the provided URL along with any additional request headers.
    async fn post(
        &self,
        url: &Url,
        body: &serde_json::Value,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, HttpError>;
}

#[async_trait]
impl<H: HttpClient + ?Sized> HttpClient for std::sync::Arc<H> {
    async fn get(&self, url: &Url) -> Result<HttpResponse, HttpError> {
        (**self).get(url).await
    }

    async fn post(
        &self,
        url: &Url,
        body: &serde_json::Value,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, HttpError> {
        (**self).post(url, body, headers).await
    }
}

/// A fully read response. Header names are kept as received, lookups through
/// [`HttpResponse::header`] ignore case.
#[derive(Clone, Debug, Default)]
pub struct HttpResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl HttpResponse {
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn is_status(&self, accepted: &[u16]) -> bool {
        accepted.contains(&self.status)
    }

    pub fn new(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// A lossy rendering of the body suitable for error messages.
    pub(crate) fn body_excerpt(&self) -> String {
        const MAX_EXCERPT: usize = 256;

        let text = String::from_utf8_lossy(&self.body);
        let trimmed = text.trim();

        match trimmed.char_indices().nth(MAX_EXCERPT) {
            Some((idx, _)) => format!("{}...", &trimmed[..idx]),
            None => trimmed.to_string(),
        }
    }
}
