use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) token: TokenDetails,
}

/// Only the token metadata consumed by sessions is decoded, everything else the identity service
/// reports about the token is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenDetails {
    #[serde(default)]
    pub(crate) expires_at: Option<String>,
}
