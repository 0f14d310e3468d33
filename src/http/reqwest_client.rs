use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use url::Url;

use crate::http::{HttpClient, HttpError, HttpResponse};

/// The default [`HttpClient`] backed by a shared [`reqwest::Client`]. Cloning is cheap and
/// clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Result<Self, HttpError> {
        let client = default_reqwest_client()?;
        Ok(Self { client })
    }

    /// Use a caller configured client, useful for custom timeouts, proxies or trust roots.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &Url) -> Result<HttpResponse, HttpError> {
        let response = self.client.get(url.clone()).send().await?;
        read_response(response).await
    }

    async fn post(
        &self,
        url: &Url,
        body: &serde_json::Value,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, HttpError> {
        let mut request = self.client.post(url.clone()).json(body);

        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        read_response(response).await
    }
}

async fn read_response(response: Response) -> Result<HttpResponse, HttpError> {
    let status = response.status().as_u16();

    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| match value.to_str() {
            Ok(value) => Some((name.as_str().to_string(), value.to_string())),
            Err(_) => {
                tracing::trace!(header = %name, "skipping non-ascii response header");
                None
            }
        })
        .collect();

    let body = response.bytes().await?.to_vec();

    Ok(HttpResponse::new(status, headers, body))
}

fn default_reqwest_client() -> Result<Client, HttpError> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let client = Client::builder()
        .default_headers(default_headers)
        .user_agent(crate::version::user_agent())
        .build()?;

    Ok(client)
}
