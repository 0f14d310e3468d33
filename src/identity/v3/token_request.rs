use serde::Serialize;

use crate::identity::{Credentials, CredentialsError};

const PASSWORD_METHOD: &str = "password";

#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest<'a> {
    auth: Auth<'a>,
}

#[derive(Debug, Serialize)]
struct Auth<'a> {
    identity: Identity<'a>,

    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<Scope<'a>>,
}

#[derive(Debug, Serialize)]
struct Identity<'a> {
    methods: [&'static str; 1],
    password: PasswordMethod<'a>,
}

#[derive(Debug, Serialize)]
struct PasswordMethod<'a> {
    user: User<'a>,
}

#[derive(Debug, Serialize)]
struct User<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<Domain<'a>>,

    password: &'a str,
}

#[derive(Debug, Serialize)]
struct Domain<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl<'a> Domain<'a> {
    /// A domain id is preferred when both identifiers are configured.
    fn from_credentials(credentials: &'a Credentials) -> Option<Self> {
        match (credentials.domain_id(), credentials.domain_name()) {
            (Some(id), _) => Some(Self {
                id: Some(id),
                name: None,
            }),
            (None, Some(name)) => Some(Self {
                id: None,
                name: Some(name),
            }),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct Scope<'a> {
    project: Project<'a>,
}

#[derive(Debug, Serialize)]
struct Project<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<Domain<'a>>,
}

impl<'a> TokenRequest<'a> {
    pub(crate) fn new(credentials: &'a Credentials) -> Result<Self, CredentialsError> {
        let password = credentials.require_password()?;

        let user = match (credentials.user_id(), credentials.username()) {
            (Some(id), _) => User {
                id: Some(id),
                name: None,
                domain: None,
                password,
            },
            (None, Some(name)) => User {
                id: None,
                name: Some(name),
                domain: Some(
                    Domain::from_credentials(credentials)
                        .ok_or(CredentialsError::MissingDomain("authenticating by username"))?,
                ),
                password,
            },
            (None, None) => return Err(CredentialsError::MissingUser),
        };

        let scope = match (credentials.tenant_id(), credentials.tenant_name()) {
            (Some(id), _) => Some(Scope {
                project: Project {
                    id: Some(id),
                    name: None,
                    domain: None,
                },
            }),
            (None, Some(name)) => Some(Scope {
                project: Project {
                    id: None,
                    name: Some(name),
                    domain: Some(
                        Domain::from_credentials(credentials)
                            .ok_or(CredentialsError::MissingDomain("scoping by project name"))?,
                    ),
                },
            }),
            (None, None) => None,
        };

        Ok(Self {
            auth: Auth {
                identity: Identity {
                    methods: [PASSWORD_METHOD],
                    password: PasswordMethod { user },
                },
                scope,
            },
        })
    }
}
