//! Tenant scoped password login against the legacy identity protocol. Both the token and the
//! service catalog are returned in the response body.

mod access_response;
mod token_request;

pub(crate) use access_response::AccessResponse;

use token_request::TokenRequest;
use url::Url;

use crate::error::IdentityError;
use crate::http::HttpClient;
use crate::identity::{AuthenticationError, Credentials, IdentityVersion, RawAuthResponse};

const SUCCESS_CODES: &[u16] = &[200, 201, 203];

#[derive(Clone, Debug)]
pub(crate) struct PasswordFlow {
    token_url: Url,
}

impl PasswordFlow {
    pub(crate) async fn authenticate<H>(
        &self,
        http: &H,
        credentials: &Credentials,
    ) -> Result<RawAuthResponse, IdentityError>
    where
        H: HttpClient + ?Sized,
    {
        let request = TokenRequest::new(credentials)?;
        let body = serde_json::to_value(&request)?;

        let response = http
            .post(&self.token_url, &body, &[])
            .await
            .map_err(|source| AuthenticationError::Transport {
                version: IdentityVersion::V2,
                source,
            })?;

        if !response.is_status(SUCCESS_CODES) {
            return Err(AuthenticationError::Rejected {
                version: IdentityVersion::V2,
                status_code: response.status(),
                message: response.body_excerpt(),
            }
            .into());
        }

        let access: AccessResponse = serde_json::from_slice(response.body()).map_err(|err| {
            IdentityError::MalformedResponse {
                version: IdentityVersion::V2,
                reason: err.to_string(),
            }
        })?;

        Ok(RawAuthResponse::V2(access))
    }

    pub(crate) fn new(token_url: Url) -> Self {
        Self { token_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::http::stub::{StubHttpClient, V2_ACCESS_BODY};

    fn flow() -> PasswordFlow {
        PasswordFlow::new(Url::parse("http://identity.test:5000/v2/auth/tokens").unwrap())
    }

    fn credentials() -> Credentials {
        Credentials::new("http://identity.test:5000/")
            .unwrap()
            .with_username("me")
            .with_password("secret")
            .with_tenant_id("t1000")
    }

    #[tokio::test]
    async fn test_posts_password_credentials() {
        let http =
            StubHttpClient::new().on_post("/v2/auth/tokens", 201, &[], V2_ACCESS_BODY);

        let raw = flow().authenticate(&http, &credentials()).await.unwrap();
        assert!(matches!(raw, RawAuthResponse::V2(_)));

        let calls = http.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "POST");
        assert_eq!(
            calls[0].body,
            Some(serde_json::json!({
                "auth": {
                    "passwordCredentials": { "username": "me", "password": "secret" },
                    "tenantId": "t1000"
                }
            }))
        );
    }

    #[tokio::test]
    async fn test_accepts_ok_as_well_as_created() {
        let http = StubHttpClient::new().on_post("/v2/auth/tokens", 200, &[], V2_ACCESS_BODY);
        assert!(flow().authenticate(&http, &credentials()).await.is_ok());
    }

    #[tokio::test]
    async fn test_rejected_login() {
        let http = StubHttpClient::new().on_post(
            "/v2/auth/tokens",
            401,
            &[],
            r#"{"error":{"message":"The request you have made requires authentication."}}"#,
        );

        let result = flow().authenticate(&http, &credentials()).await;
        assert!(matches!(
            result,
            Err(IdentityError::Authentication(AuthenticationError::Rejected {
                status_code: 401,
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_an_authentication_error() {
        let result = flow().authenticate(&StubHttpClient::new(), &credentials()).await;
        assert!(matches!(
            result,
            Err(IdentityError::Authentication(AuthenticationError::Transport { .. }))
        ));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let http = StubHttpClient::new().on_post(
            "/v2/auth/tokens",
            201,
            &[],
            r#"{"token":{"expires_at":"2013-02-02T18:30:59.000000Z"}}"#,
        );

        let result = flow().authenticate(&http, &credentials()).await;
        assert!(matches!(
            result,
            Err(IdentityError::MalformedResponse {
                version: IdentityVersion::V2,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_invalid_credentials_never_reach_the_network() {
        let http = StubHttpClient::new().on_post("/v2/auth/tokens", 201, &[], V2_ACCESS_BODY);
        let no_password = Credentials::new("http://identity.test:5000/")
            .unwrap()
            .with_username("me");

        let result = flow().authenticate(&http, &no_password).await;
        assert!(matches!(result, Err(IdentityError::InvalidCredentials(_))));
        assert!(http.calls().is_empty());
    }
}
