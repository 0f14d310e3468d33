use serde::Deserialize;

use crate::session::CatalogEntry;

#[derive(Debug, Deserialize)]
pub(crate) struct AccessResponse {
    pub(crate) access: Access,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Access {
    pub(crate) token: AccessToken,

    #[serde(rename = "serviceCatalog", default)]
    pub(crate) service_catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccessToken {
    pub(crate) id: String,

    #[serde(default)]
    pub(crate) expires: Option<String>,
}
