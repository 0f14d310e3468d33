//! Identity version negotiation and password login.
//!
//! Given nothing more than the root URL of an identity service, [`authenticate_with`] performs
//! the whole chain in order:
//!
//! 1. [`discover`] reads the discovery document listing the advertised API versions.
//! 2. [`select`] picks the newest stable v2 or v3 version.
//! 3. The matching password login flow requests a token.
//! 4. The response is normalized into a [`ClientSession`].
//!
//! Each step fails fast, nothing is retried. Dropping the returned future cancels whichever
//! request is in flight.

pub mod blocking;

mod credentials;
mod discovery;
mod error;
mod extract;
mod flow;
mod selector;
mod v2;
mod v3;

pub use credentials::Credentials;
pub use discovery::{discover, IdentityVersion, VersionDescriptor, VersionStatus};
pub use error::{AuthenticationError, CredentialsError, DiscoveryError};
pub use selector::{select, Selection};

pub(crate) use flow::{AuthFlow, RawAuthResponse};

use crate::error::IdentityResult;
use crate::http::HttpClient;
use crate::session::ClientSession;

/// Negotiate a version with the identity service named in the credentials and log in with the
/// provided HTTP collaborator.
pub async fn authenticate_with<H>(http: &H, credentials: &Credentials) -> IdentityResult<ClientSession>
where
    H: HttpClient + ?Sized,
{
    let identity_endpoint = credentials.identity_endpoint();

    let descriptors = discover(http, identity_endpoint).await?;
    let selection = select(&descriptors)?;
    let flow = AuthFlow::for_selection(&selection)?;

    let raw_response = flow.authenticate(http, credentials).await?;
    let session = extract::extract(raw_response, identity_endpoint)?;

    tracing::info!(
        endpoint = %identity_endpoint,
        version = %flow.version(),
        catalog_entries = session.service_catalog().len(),
        "authenticated with identity service"
    );

    Ok(session)
}

/// [`authenticate_with`] using a default [`ReqwestHttpClient`](crate::http::ReqwestHttpClient).
#[cfg(feature = "http-client")]
pub async fn authenticated_client(credentials: &Credentials) -> IdentityResult<ClientSession> {
    let http = crate::http::ReqwestHttpClient::new().map_err(DiscoveryError::Unreachable)?;
    authenticate_with(&http, credentials).await
}
