use serde::Serialize;

use crate::identity::{Credentials, CredentialsError};

#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest<'a> {
    auth: Auth<'a>,
}

#[derive(Debug, Serialize)]
struct Auth<'a> {
    #[serde(rename = "passwordCredentials")]
    password_credentials: PasswordCredentials<'a>,

    #[serde(rename = "tenantId", skip_serializing_if = "Option::is_none")]
    tenant_id: Option<&'a str>,

    #[serde(rename = "tenantName", skip_serializing_if = "Option::is_none")]
    tenant_name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct PasswordCredentials<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,

    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,

    password: &'a str,
}

impl<'a> TokenRequest<'a> {
    /// Usernames are the native identifier for this protocol, a user id is only sent when no
    /// username is available. Tenant ids take precedence over tenant names.
    pub(crate) fn new(credentials: &'a Credentials) -> Result<Self, CredentialsError> {
        let password = credentials.require_password()?;

        let (username, user_id) = match (credentials.username(), credentials.user_id()) {
            (Some(username), _) => (Some(username), None),
            (None, Some(user_id)) => (None, Some(user_id)),
            (None, None) => return Err(CredentialsError::MissingUser),
        };

        let tenant_id = credentials.tenant_id();
        let tenant_name = match tenant_id {
            Some(_) => None,
            None => credentials.tenant_name(),
        };

        Ok(Self {
            auth: Auth {
                password_credentials: PasswordCredentials {
                    username,
                    user_id,
                    password,
                },
                tenant_id,
                tenant_name,
            },
        })
    }
}
