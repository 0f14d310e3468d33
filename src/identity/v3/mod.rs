//! Project scoped password login against the current identity protocol. The issued token is only
//! ever returned in the `X-Subject-Token` response header, the body describes the token.

mod token_request;
mod token_response;

pub(crate) use token_response::TokenResponse;

use token_request::TokenRequest;
use url::Url;

use crate::error::IdentityError;
use crate::http::HttpClient;
use crate::identity::{AuthenticationError, Credentials, IdentityVersion, RawAuthResponse};

pub(crate) const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";

const SUCCESS_CODES: &[u16] = &[201];

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
                version: IdentityVersion::V3,
                source,
            })?;

        if !response.is_status(SUCCESS_CODES) {
            return Err(AuthenticationError::Rejected {
                version: IdentityVersion::V3,
                status_code: response.status(),
                message: response.body_excerpt(),
            }
            .into());
        }

        let subject_token = response
            .header(SUBJECT_TOKEN_HEADER)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(IdentityError::MissingToken {
                version: IdentityVersion::V3,
            })?
            .to_string();

        let body: TokenResponse = serde_json::from_slice(response.body()).map_err(|err| {
            IdentityError::MalformedResponse {
                version: IdentityVersion::V3,
                reason: err.to_string(),
            }
        })?;

        Ok(RawAuthResponse::V3 {
            subject_token,
            body,
        })
    }

    pub(crate) fn new(token_url: Url) -> Self {
        Self { token_url }
    }
}
