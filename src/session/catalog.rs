use std::fmt::{self, Display, Formatter};

use serde::Deserialize;

/// One service listed in a service catalog.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    #[serde(default)]
    name: String,

    #[serde(rename = "type")]
    service_type: String,

    #[serde(default)]
    endpoints: Vec<Endpoint>,

    // Absent and empty are the same thing to us
    #[serde(default)]
    endpoints_links: Vec<Link>,
}

impl CatalogEntry {
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn endpoints_links(&self) -> &[Link] {
        &self.endpoints_links
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn service_type(&self) -> &str {
        &self.service_type
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Endpoint {
    #[serde(default)]
    region: Option<String>,

    #[serde(rename = "publicURL", default)]
    public_url: Option<String>,

    #[serde(rename = "internalURL", default)]
    internal_url: Option<String>,

    #[serde(rename = "tenantId", default)]
    tenant_id: Option<String>,

    #[serde(rename = "versionId", default)]
    version_id: Option<String>,

    #[serde(rename = "versionInfo", default)]
    version_info: Option<String>,

    #[serde(rename = "versionList", default)]
    version_list: Option<String>,
}

impl Endpoint {
    pub fn internal_url(&self) -> Option<&str> {
        self.internal_url.as_deref()
    }

    pub fn public_url(&self) -> Option<&str> {
        self.public_url.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    pub fn url(&self, availability: Availability) -> Option<&str> {
        match availability {
            Availability::Public => self.public_url(),
            Availability::Internal => self.internal_url(),
        }
    }

    pub fn version_id(&self) -> Option<&str> {
        self.version_id.as_deref()
    }

    pub fn version_info(&self) -> Option<&str> {
        self.version_info.as_deref()
    }

    pub fn version_list(&self) -> Option<&str> {
        self.version_list.as_deref()
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Link {
    href: String,

    #[serde(default)]
    rel: String,
}

impl Link {
    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn rel(&self) -> &str {
        &self.rel
    }
}

/// Which of an endpoint's URLs a client wants to talk to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Availability {
    #[default]
    Public,
    Internal,
}

impl Display for Availability {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str("public"),
            Self::Internal => f.write_str("internal"),
        }
    }
}

/// Filters used to pick a single endpoint out of a service catalog. Unset filters match
/// anything.
#[derive(Clone, Debug, Default)]
pub struct EndpointOpts {
    service_type: Option<String>,
    name: Option<String>,
    region: Option<String>,
    availability: Availability,
}

impl EndpointOpts {
    pub fn new(service_type: impl Into<String>) -> Self {
        Self::default().with_service_type(service_type)
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = Some(service_type.into());
        self
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("a service type is required to search the service catalog")]
    MissingServiceType,

    #[error("no endpoint for service type {service_type} matches the requested filters")]
    NoMatch { service_type: String },

    #[error("{count} endpoints for service type {service_type} match, narrow the filters")]
    Ambiguous { service_type: String, count: usize },

    #[error("endpoint for service type {service_type} has no {availability} URL")]
    Unavailable {
        service_type: String,
        availability: Availability,
    },
}

pub(crate) fn locate<'a>(
    catalog: &'a [CatalogEntry],
    opts: &EndpointOpts,
) -> Result<&'a str, CatalogError> {
    let service_type = opts
        .service_type
        .as_deref()
        .ok_or(CatalogError::MissingServiceType)?;

    let matching: Vec<&Endpoint> = catalog
        .iter()
        .filter(|entry| entry.service_type == service_type)
        .filter(|entry| opts.name.as_deref().map_or(true, |name| entry.name == name))
        .flat_map(|entry| entry.endpoints.iter())
        .filter(|endpoint| {
            opts.region
                .as_deref()
                .map_or(true, |region| endpoint.region() == Some(region))
        })
        .collect();

    let endpoint = match matching.as_slice() {
        [] => {
            return Err(CatalogError::NoMatch {
                service_type: service_type.to_string(),
            })
        }
        [endpoint] => *endpoint,
        _ => {
            return Err(CatalogError::Ambiguous {
                service_type: service_type.to_string(),
                count: matching.len(),
            })
        }
    };

    endpoint
        .url(opts.availability)
        .ok_or_else(|| CatalogError::Unavailable {
            service_type: service_type.to_string(),
            availability: opts.availability,
        })
}
