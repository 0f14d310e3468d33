use crate::http::HttpError;
use crate::identity::IdentityVersion;

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("identity endpoint could not be reached: {0}")]
    Unreachable(#[source] HttpError),

    #[error("identity endpoint answered discovery with status {status_code}: {message}")]
    UnexpectedStatus { status_code: u16, message: String },

    #[error("discovery document is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("version {id} does not advertise a self link")]
    MissingSelfLink { id: String },

    #[error("self link {href} for version {id} is not a usable URL")]
    InvalidSelfLink { id: String, href: String },
}

#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("identity {version} token request could not be sent: {source}")]
    Transport {
        version: IdentityVersion,
        #[source]
        source: HttpError,
    },

    #[error("identity {version} rejected the token request with status {status_code}: {message}")]
    Rejected {
        version: IdentityVersion,
        status_code: u16,
        message: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("environment variable {0} is required")]
    MissingEnv(&'static str),

    #[error("identity endpoint is not a valid absolute URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("identity endpoint must use http or https, got {0}")]
    UnsupportedScheme(String),

    #[error("either a user id or a username is required")]
    MissingUser,

    #[error("a password is required")]
    MissingPassword,

    #[error("{0} requires a domain id or domain name")]
    MissingDomain(&'static str),
}
