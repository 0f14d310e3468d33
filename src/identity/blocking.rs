//! Synchronous wrappers for callers without an async runtime. Each call drives the negotiation
//! on its own current-thread runtime, so these must not be called from within an async context.

use crate::error::IdentityResult;
use crate::http::HttpClient;
use crate::identity::Credentials;
use crate::session::ClientSession;

pub fn authenticate_with<H>(http: &H, credentials: &Credentials) -> IdentityResult<ClientSession>
where
    H: HttpClient + ?Sized,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(super::authenticate_with(http, credentials))
}

#[cfg(feature = "http-client")]
pub fn authenticated_client(credentials: &Credentials) -> IdentityResult<ClientSession> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(super::authenticated_client(credentials))
}
