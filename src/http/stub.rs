use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use crate::http::{HttpClient, HttpError, HttpResponse};

#[derive(Clone, Debug)]
pub(crate) struct RecordedCall {
    pub(crate) method: &'static str,
    pub(crate) path: String,
    pub(crate) body: Option<serde_json::Value>,
}

/// Routes requests by method and path to canned responses, recording every call it receives.
/// Unrouted requests behave like an unreachable host.
#[derive(Default)]
pub(crate) struct StubHttpClient {
    routes: Vec<(&'static str, String, HttpResponse)>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubHttpClient {
    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn on_get(mut self, path: &str, status: u16, body: &str) -> Self {
        let response = HttpResponse::new(status, Vec::new(), body.as_bytes().to_vec());
        self.routes.push(("GET", path.to_string(), response));
        self
    }

    pub(crate) fn on_post(
        mut self,
        path: &str,
        status: u16,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Self {
        let headers = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let response = HttpResponse::new(status, headers, body.as_bytes().to_vec());
        self.routes.push(("POST", path.to_string(), response));
        self
    }

    fn respond(
        &self,
        method: &'static str,
        url: &Url,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, HttpError> {
        let path = url.path().to_string();

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                method,
                path: path.clone(),
                body,
            });
        }

        self.routes
            .iter()
            .find(|(m, p, _)| *m == method && *p == path)
            .map(|(_, _, response)| response.clone())
            .ok_or_else(|| HttpError::transport(url.as_str(), "connection refused"))
    }
}

#[async_trait]
impl HttpClient for StubHttpClient {
    async fn get(&self, url: &Url) -> Result<HttpResponse, HttpError> {
        self.respond("GET", url, None)
    }

    async fn post(
        &self,
        url: &Url,
        body: &serde_json::Value,
        _headers: &[(String, String)],
    ) -> Result<HttpResponse, HttpError> {
        self.respond("POST", url, Some(body.clone()))
    }
}

pub(crate) const IDENTITY_ENDPOINT: &str = "http://identity.test:5000/";

pub(crate) fn discovery_document(v3_status: &str, v2_status: &str) -> String {
    format!(
        r#"{{
            "versions": {{
                "values": [
                    {{
                        "status": "{v3_status}",
                        "id": "v3.0",
                        "links": [{{ "href": "{IDENTITY_ENDPOINT}v3/", "rel": "self" }}]
                    }},
                    {{
                        "status": "{v2_status}",
                        "id": "v2.0",
                        "links": [{{ "href": "{IDENTITY_ENDPOINT}v2.0/", "rel": "self" }}]
                    }}
                ]
            }}
        }}"#
    )
}

pub(crate) const V2_ACCESS_BODY: &str = r#"{
    "access": {
        "token": {
            "id": "01234567890"
        },
        "serviceCatalog": [
            {
                "name": "Cloud Servers",
                "type": "compute",
                "endpoints": [
                    {
                        "tenantId": "t1000",
                        "publicURL": "https://compute.north.host.com/v1/t1000",
                        "internalURL": "https://compute.north.internal/v1/t1000",
                        "region": "North",
                        "versionId": "1",
                        "versionInfo": "https://compute.north.host.com/v1/",
                        "versionList": "https://compute.north.host.com/"
                    },
                    {
                        "tenantId": "t1000",
                        "publicURL": "https://compute.north.host.com/v1.1/t1000",
                        "internalURL": "https://compute.north.internal/v1.1/t1000",
                        "region": "North",
                        "versionId": "1.1",
                        "versionInfo": "https://compute.north.host.com/v1.1/",
                        "versionList": "https://compute.north.host.com/"
                    }
                ],
                "endpoints_links": []
            },
            {
                "name": "Cloud Files",
                "type": "object-store",
                "endpoints": [
                    {
                        "tenantId": "t1000",
                        "publicURL": "https://storage.north.host.com/v1/t1000",
                        "internalURL": "https://storage.north.internal/v1/t1000",
                        "region": "North",
                        "versionId": "1",
                        "versionInfo": "https://storage.north.host.com/v1/",
                        "versionList": "https://storage.north.host.com/"
                    },
                    {
                        "tenantId": "t1000",
                        "publicURL": "https://storage.south.host.com/v1/t1000",
                        "internalURL": "https://storage.south.internal/v1/t1000",
                        "region": "South",
                        "versionId": "1",
                        "versionInfo": "https://storage.south.host.com/v1/",
                        "versionList": "https://storage.south.host.com/"
                    }
                ]
            }
        ]
    }
}"#;
