use std::fmt::{self, Debug, Formatter};

use url::Url;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::identity::CredentialsError;

/// Password credentials for a single identity service. Built once by the caller and only ever
/// borrowed by the library. The password is wiped from memory when the value is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    #[zeroize(skip)]
    identity_endpoint: Url,

    user_id: Option<String>,
    username: Option<String>,
    password: String,

    tenant_id: Option<String>,
    tenant_name: Option<String>,

    domain_id: Option<String>,
    domain_name: Option<String>,
}

impl Credentials {
    pub fn domain_id(&self) -> Option<&str> {
        self.domain_id.as_deref()
    }

    pub fn domain_name(&self) -> Option<&str> {
        self.domain_name.as_deref()
    }

    /// Load credentials from the conventional `OS_*` environment variables.
    pub fn from_env() -> Result<Self, CredentialsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, CredentialsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|val| !val.trim().is_empty());

        let auth_url = non_empty("OS_AUTH_URL").ok_or(CredentialsError::MissingEnv("OS_AUTH_URL"))?;
        let password = non_empty("OS_PASSWORD").ok_or(CredentialsError::MissingEnv("OS_PASSWORD"))?;

        let user_id = non_empty("OS_USERID");
        let username = non_empty("OS_USERNAME");

        if user_id.is_none() && username.is_none() {
            return Err(CredentialsError::MissingEnv("OS_USERID or OS_USERNAME"));
        }

        let mut credentials = Self::new(&auth_url)?.with_password(password);

        credentials.user_id = user_id;
        credentials.username = username;
        credentials.tenant_id = non_empty("OS_TENANT_ID");
        credentials.tenant_name = non_empty("OS_TENANT_NAME");
        credentials.domain_id = non_empty("OS_DOMAIN_ID");
        credentials.domain_name = non_empty("OS_DOMAIN_NAME");

        Ok(credentials)
    }

    /// The normalized identity endpoint, always ending with a `/`.
    pub fn identity_endpoint(&self) -> &Url {
        &self.identity_endpoint
    }

    /// Start a new set of credentials for the identity service rooted at the provided URL.
    pub fn new(identity_endpoint: &str) -> Result<Self, CredentialsError> {
        let identity_endpoint = normalize_endpoint(identity_endpoint)?;

        Ok(Self {
            identity_endpoint,

            user_id: None,
            username: None,
            password: String::new(),

            tenant_id: None,
            tenant_name: None,

            domain_id: None,
            domain_name: None,
        })
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    pub fn tenant_name(&self) -> Option<&str> {
        self.tenant_name.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn with_domain_id(mut self, domain_id: impl Into<String>) -> Self {
        self.domain_id = Some(domain_id.into());
        self
    }

    pub fn with_domain_name(mut self, domain_name: impl Into<String>) -> Self {
        self.domain_name = Some(domain_name.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password.zeroize();
        self.password = password.into();
        self
    }

    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn with_tenant_name(mut self, tenant_name: impl Into<String>) -> Self {
        self.tenant_name = Some(tenant_name.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Checks shared by every login flow.
    pub(crate) fn require_password(&self) -> Result<&str, CredentialsError> {
        if self.password.is_empty() {
            return Err(CredentialsError::MissingPassword);
        }

        Ok(&self.password)
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identity_endpoint", &self.identity_endpoint.as_str())
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("tenant_id", &self.tenant_id)
            .field("tenant_name", &self.tenant_name)
            .field("domain_id", &self.domain_id)
            .field("domain_name", &self.domain_name)
            .finish()
    }
}

fn normalize_endpoint(raw: &str) -> Result<Url, CredentialsError> {
    let mut endpoint = Url::parse(raw.trim())?;

    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(CredentialsError::UnsupportedScheme(endpoint.scheme().to_string()));
    }

    if !endpoint.path().ends_with('/') {
        let path = format!("{}/", endpoint.path());
        endpoint.set_path(&path);
    }

    Ok(endpoint)
}
