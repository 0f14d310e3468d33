//! Client side identity negotiation for OpenStack-style clouds.
//!
//! Starting from nothing but the root URL of an identity service the library discovers which
//! protocol generation the deployment speaks, logs in with the matching password flow and hands
//! back a [`ClientSession`](session::ClientSession) holding the token and service catalog.
//!
//! ```no_run
//! use cloudauth::prelude::*;
//!
//! # async fn run<H: HttpClient>(http: &H) -> IdentityResult<()> {
//! let credentials = Credentials::new("https://identity.example.com:5000/")?
//!     .with_username("admin")
//!     .with_domain_name("Default")
//!     .with_password("secret");
//!
//! let session = authenticate_with(http, &credentials).await?;
//! println!("authenticated with identity {}", session.identity_version());
//! # Ok(())
//! # }
//! ```
//!
//! With the default `http-client` feature, `authenticated_client` does the same over a bundled
//! reqwest client.

pub mod error;
pub mod http;
pub mod identity;
pub mod networking;
pub mod session;
pub mod version;

// Re-export some of our dependencies for QoL
pub use async_trait;
pub use url;

pub mod prelude {
    pub use crate::error::*;
    pub use crate::http::{HttpClient, HttpError, HttpResponse};
    pub use crate::identity::{authenticate_with, Credentials, IdentityVersion};
    pub use crate::session::{Availability, ClientSession, EndpointOpts, ServiceClient};

    #[cfg(feature = "http-client")]
    pub use crate::http::ReqwestHttpClient;

    #[cfg(feature = "http-client")]
    pub use crate::identity::authenticated_client;
}
