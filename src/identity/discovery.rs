use std::fmt::{self, Display, Formatter};

use serde::Deserialize;
use url::Url;

use crate::http::HttpClient;
use crate::identity::DiscoveryError;

/// Identity roots answer discovery with either a plain listing or "multiple choices".
const DISCOVERY_SUCCESS_CODES: &[u16] = &[200, 300];

/// The identity protocol generations this library knows how to log in with. Ordered from oldest
/// to newest so comparisons express preference directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdentityVersion {
    V2,
    V3,
}

impl IdentityVersion {
    /// Recognizes the major version from an advertised version id such as `v3.0`, `v2.0` or
    /// `v3`.
    pub fn from_version_id(id: &str) -> Option<Self> {
        let major = id.trim().strip_prefix(|c| c == 'v' || c == 'V')?.split('.').next()?;

        match major.parse::<u32>().ok()? {
            2 => Some(Self::V2),
            3 => Some(Self::V3),
            _ => None,
        }
    }

    pub fn major_token(&self) -> &'static str {
        match self {
            Self::V2 => "v2",
            Self::V3 => "v3",
        }
    }
}

impl Display for IdentityVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.major_token())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VersionStatus {
    Stable,
    Experimental,
    Deprecated,
    Other(String),
}

impl From<&str> for VersionStatus {
    fn from(val: &str) -> Self {
        match val.trim().to_ascii_lowercase().as_str() {
            "stable" => Self::Stable,
            "experimental" => Self::Experimental,
            "deprecated" => Self::Deprecated,
            _ => Self::Other(val.to_string()),
        }
    }
}

impl Display for VersionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stable => f.write_str("stable"),
            Self::Experimental => f.write_str("experimental"),
            Self::Deprecated => f.write_str("deprecated"),
            Self::Other(status) => f.write_str(status),
        }
    }
}

/// One API version advertised by an identity service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionDescriptor {
    id: String,
    status: VersionStatus,
    self_link: SelfLink,
}

/// Link problems surface only when the descriptor is chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
enum SelfLink {
    Resolved(Url),
    Missing,
    Unusable(String),
}

impl VersionDescriptor {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn major_version(&self) -> Option<IdentityVersion> {
        IdentityVersion::from_version_id(&self.id)
    }

    pub fn new(id: impl Into<String>, status: VersionStatus, self_link: Url) -> Self {
        Self {
            id: id.into(),
            status,
            self_link: SelfLink::Resolved(self_link),
        }
    }

    /// The resolved self link, or the reason the document did not provide a usable one.
    pub fn self_link(&self) -> Result<&Url, DiscoveryError> {
        match &self.self_link {
            SelfLink::Resolved(url) => Ok(url),
            SelfLink::Missing => Err(DiscoveryError::MissingSelfLink {
                id: self.id.clone(),
            }),
            SelfLink::Unusable(href) => Err(DiscoveryError::InvalidSelfLink {
                id: self.id.clone(),
                href: href.clone(),
            }),
        }
    }

    pub fn status(&self) -> &VersionStatus {
        &self.status
    }
}

#[derive(Deserialize)]
struct DiscoveryDocument {
    versions: VersionListing,
}

#[derive(Deserialize)]
struct VersionListing {
    values: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct AdvertisedVersion {
    id: String,

    #[serde(default)]
    status: String,

    #[serde(default)]
    links: Vec<AdvertisedLink>,
}

#[derive(Deserialize)]
struct AdvertisedLink {
    #[serde(default)]
    href: String,

    #[serde(default)]
    rel: String,
}

/// Fetch and parse the discovery document served at the root of the identity service. Order of
/// the returned descriptors matches the document, which says nothing about preference.
pub async fn discover<H>(
    http: &H,
    identity_endpoint: &Url,
) -> Result<Vec<VersionDescriptor>, DiscoveryError>
where
    H: HttpClient + ?Sized,
{
    let response = http
        .get(identity_endpoint)
        .await
        .map_err(DiscoveryError::Unreachable)?;

    if !response.is_status(DISCOVERY_SUCCESS_CODES) {
        return Err(DiscoveryError::UnexpectedStatus {
            status_code: response.status(),
            message: response.body_excerpt(),
        });
    }

    let descriptors = parse_document(identity_endpoint, response.body())?;

    tracing::debug!(
        endpoint = %identity_endpoint,
        versions = ?descriptors.iter().map(|d| d.id()).collect::<Vec<_>>(),
        "discovered identity versions"
    );

    Ok(descriptors)
}

pub(crate) fn parse_document(
    identity_endpoint: &Url,
    body: &[u8],
) -> Result<Vec<VersionDescriptor>, DiscoveryError> {
    let document: DiscoveryDocument = serde_json::from_slice(body)?;

    let descriptors = document
        .versions
        .values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<AdvertisedVersion>(value) {
            Ok(version) => Some(describe(identity_endpoint, version)),
            Err(err) => {
                tracing::warn!("ignoring unreadable identity version entry: {err}");
                None
            }
        })
        .collect();

    Ok(descriptors)
}

fn describe(identity_endpoint: &Url, version: AdvertisedVersion) -> VersionDescriptor {
    let href = version
        .links
        .into_iter()
        .find(|link| link.rel.eq_ignore_ascii_case("self") && !link.href.trim().is_empty())
        .map(|link| link.href);

    // Relative links are resolved against the root that served the document
    let self_link = match href {
        None => SelfLink::Missing,
        Some(href) => match identity_endpoint.join(href.trim()) {
            Ok(url) if !url.cannot_be_a_base() => SelfLink::Resolved(url),
            _ => SelfLink::Unusable(href),
        },
    };

    VersionDescriptor {
        status: VersionStatus::from(version.status.as_str()),
        id: version.id,
        self_link,
    }
}
