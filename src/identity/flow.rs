use url::Url;

use crate::error::IdentityError;
use crate::http::HttpClient;
use crate::identity::{v2, v3, Credentials, DiscoveryError, IdentityVersion, Selection};

/// The two login protocols. Decided once from the version selection, each variant owns its
/// request construction and response decoding.
#[derive(Clone, Debug)]
pub(crate) enum AuthFlow {
    V2(v2::PasswordFlow),
    V3(v3::PasswordFlow),
}

impl AuthFlow {
    pub(crate) async fn authenticate<H>(
        &self,
        http: &H,
        credentials: &Credentials,
    ) -> Result<RawAuthResponse, IdentityError>
    where
        H: HttpClient + ?Sized,
    {
        match self {
            Self::V2(flow) => flow.authenticate(http, credentials).await,
            Self::V3(flow) => flow.authenticate(http, credentials).await,
        }
    }

    pub(crate) fn for_selection(selection: &Selection<'_>) -> Result<Self, DiscoveryError> {
        let token_url = token_url(selection)?;

        tracing::debug!(version = %selection.version, %token_url, "using password login flow");

        let flow = match selection.version {
            IdentityVersion::V2 => Self::V2(v2::PasswordFlow::new(token_url)),
            IdentityVersion::V3 => Self::V3(v3::PasswordFlow::new(token_url)),
        };

        Ok(flow)
    }

    pub(crate) fn version(&self) -> IdentityVersion {
        match self {
            Self::V2(_) => IdentityVersion::V2,
            Self::V3(_) => IdentityVersion::V3,
        }
    }
}

/// What a login call produced before normalization. The v3 token travels in a response header
/// while the v2 token is part of the body, the variants keep that distinction intact.
#[derive(Debug)]
pub(crate) enum RawAuthResponse {
    V2(v2::AccessResponse),
    V3 {
        subject_token: String,
        body: v3::TokenResponse,
    },
}

/// Derive `<base>/<major>/auth/tokens` from the selected self link, replacing a trailing version
/// segment like `v2.0` or `v3` with the bare major version token.
pub(crate) fn token_url(selection: &Selection<'_>) -> Result<Url, DiscoveryError> {
    let self_link = selection.descriptor.self_link()?;

    let ends_with_version = self_link
        .path_segments()
        .and_then(|segments| segments.filter(|seg| !seg.is_empty()).last())
        .and_then(IdentityVersion::from_version_id)
        == Some(selection.version);

    let mut token_url = self_link.clone();
    token_url.set_query(None);
    token_url.set_fragment(None);

    {
        let mut segments =
            token_url
                .path_segments_mut()
                .map_err(|_| DiscoveryError::InvalidSelfLink {
                    id: selection.descriptor.id().to_string(),
                    href: self_link.to_string(),
                })?;

        segments.pop_if_empty();
        if ends_with_version {
            segments.pop();
        }

        segments
            .push(selection.version.major_token())
            .push("auth")
            .push("tokens");
    }

    Ok(token_url)
}
