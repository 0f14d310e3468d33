//! The product of a successful negotiation and the pieces downstream service clients are built
//! from.

mod catalog;
mod service_client;

pub use catalog::{Availability, CatalogEntry, CatalogError, Endpoint, EndpointOpts, Link};
pub use service_client::ServiceClient;

use std::fmt::{self, Debug, Formatter};

use time::OffsetDateTime;
use url::Url;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::identity::IdentityVersion;

const NETWORK_SERVICE_TYPE: &str = "network";

/// An authenticated session. Once handed to the caller the library never touches it again, the
/// token is wiped from memory when the session is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ClientSession {
    token_id: String,

    #[zeroize(skip)]
    expires_at: Option<OffsetDateTime>,

    #[zeroize(skip)]
    service_catalog: Vec<CatalogEntry>,

    #[zeroize(skip)]
    identity_version: IdentityVersion,

    #[zeroize(skip)]
    identity_endpoint: Url,
}

impl ClientSession {
    /// Locate the single endpoint URL in the catalog matching the provided options.
    pub fn endpoint_url(&self, opts: &EndpointOpts) -> Result<&str, CatalogError> {
        catalog::locate(&self.service_catalog, opts)
    }

    /// Expiration reported by the identity service, when it reported one.
    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        self.expires_at
    }

    pub fn identity_endpoint(&self) -> &Url {
        &self.identity_endpoint
    }

    pub fn identity_version(&self) -> IdentityVersion {
        self.identity_version
    }

    /// Tokens without a reported expiration are never considered expired.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expiration) => expiration < OffsetDateTime::now_utc(),
            None => false,
        }
    }

    /// A [`ServiceClient`] for the v2 networking API.
    pub fn networking_v2(&self, opts: &EndpointOpts) -> Result<ServiceClient, CatalogError> {
        self.service_client(NETWORK_SERVICE_TYPE, opts)
    }

    pub(crate) fn new(
        token_id: String,
        expires_at: Option<OffsetDateTime>,
        service_catalog: Vec<CatalogEntry>,
        identity_version: IdentityVersion,
        identity_endpoint: Url,
    ) -> Self {
        Self {
            token_id,
            expires_at,
            service_catalog,
            identity_version,
            identity_endpoint,
        }
    }

    /// Entries in the order the identity service listed them.
    pub fn service_catalog(&self) -> &[CatalogEntry] {
        &self.service_catalog
    }

    /// Build a client rooted at the catalog endpoint of the provided service type. The endpoint
    /// always ends with a `/` so resource paths can be appended directly.
    pub fn service_client(
        &self,
        service_type: &str,
        opts: &EndpointOpts,
    ) -> Result<ServiceClient, CatalogError> {
        let opts = opts.clone().with_service_type(service_type);
        let endpoint = self.endpoint_url(&opts)?;

        Ok(ServiceClient::new(normalize_url(endpoint)))
    }

    pub fn token_id(&self) -> &str {
        &self.token_id
    }
}

impl Debug for ClientSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSession")
            .field("token_id", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("service_catalog", &self.service_catalog)
            .field("identity_version", &self.identity_version)
            .field("identity_endpoint", &self.identity_endpoint.as_str())
            .finish()
    }
}

fn normalize_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}
