use crate::identity::{AuthenticationError, CredentialsError, DiscoveryError, IdentityVersion};

/// Every way a single negotiation can fail. A negotiation either produces a complete
/// [`ClientSession`](crate::session::ClientSession) or exactly one of these, partial sessions are
/// never returned.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity version discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("no stable v2 or v3 identity version is advertised (found: {})", .advertised.join(", "))]
    UnsupportedVersion { advertised: Vec<String> },

    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthenticationError),

    #[error("identity {version} token response could not be decoded: {reason}")]
    MalformedResponse {
        version: IdentityVersion,
        reason: String,
    },

    #[error("identity {version} reported a successful login but provided no token")]
    MissingToken { version: IdentityVersion },

    #[error("credentials can't be used for authentication: {0}")]
    InvalidCredentials(#[from] CredentialsError),

    #[error("failed to encode token request: {0}")]
    RequestEncoding(#[from] serde_json::Error),

    #[error("failed to start runtime for blocking authentication: {0}")]
    Runtime(#[from] std::io::Error),
}

pub type IdentityResult<T> = Result<T, IdentityError>;
