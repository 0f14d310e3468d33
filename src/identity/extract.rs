use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime};
use url::Url;

use crate::error::IdentityError;
use crate::identity::{IdentityVersion, RawAuthResponse};
use crate::session::ClientSession;

/// Normalize either login response into a [`ClientSession`]. The v3 token was already lifted out
/// of the response headers by the flow, the v2 token still lives in the body.
pub(crate) fn extract(
    raw: RawAuthResponse,
    identity_endpoint: &Url,
) -> Result<ClientSession, IdentityError> {
    match raw {
        RawAuthResponse::V3 {
            subject_token,
            body,
        } => {
            let expires_at = body
                .token
                .expires_at
                .as_deref()
                .map(|ts| parse_timestamp(IdentityVersion::V3, ts))
                .transpose()?;

            // The catalog is a separate request for this protocol
            Ok(ClientSession::new(
                subject_token,
                expires_at,
                Vec::new(),
                IdentityVersion::V3,
                identity_endpoint.clone(),
            ))
        }
        RawAuthResponse::V2(response) => {
            let access = response.access;

            let token_id = access.token.id.trim();
            if token_id.is_empty() {
                return Err(IdentityError::MissingToken {
                    version: IdentityVersion::V2,
                });
            }

            let expires_at = access.token.expires.as_deref().and_then(parse_legacy_timestamp);

            Ok(ClientSession::new(
                token_id.to_string(),
                expires_at,
                access.service_catalog,
                IdentityVersion::V2,
                identity_endpoint.clone(),
            ))
        }
    }
}

fn parse_timestamp(version: IdentityVersion, raw: &str) -> Result<OffsetDateTime, IdentityError> {
    OffsetDateTime::parse(raw.trim(), &Rfc3339).map_err(|err| IdentityError::MalformedResponse {
        version,
        reason: format!("invalid token expiration {raw:?}: {err}"),
    })
}

/// Legacy deployments may omit the offset, those values are taken as UTC. Anything else is
/// dropped since the expiration is optional for this protocol.
fn parse_legacy_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let trimmed = raw.trim();

    if let Ok(expires_at) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Some(expires_at);
    }

    match PrimitiveDateTime::parse(trimmed, &Iso8601::DEFAULT) {
        Ok(expires_at) => Some(expires_at.assume_utc()),
        Err(err) => {
            tracing::warn!("ignoring unreadable v2 token expiration {raw:?}: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::http::stub::V2_ACCESS_BODY;
    use crate::identity::{v2, v3};

    fn endpoint() -> Url {
        Url::parse("http://identity.test:5000/").unwrap()
    }

    fn v3_raw(token: &str, body: &str) -> RawAuthResponse {
        RawAuthResponse::V3 {
            subject_token: token.to_string(),
            body: serde_json::from_str::<v3::TokenResponse>(body).unwrap(),
        }
    }

    #[test]
    fn test_v3_session_has_header_token_and_expiry() {
        let raw = v3_raw(
            "0123456789",
            r#"{ "token": { "expires_at": "2013-02-02T18:30:59.000000Z" } }"#,
        );
        let session = extract(raw, &endpoint()).unwrap();

        assert_eq!(session.token_id(), "0123456789");
        assert_eq!(session.identity_version(), IdentityVersion::V3);
        assert!(session.service_catalog().is_empty());

        let expires_at = session.expires_at().unwrap();
        assert_eq!(expires_at.unix_timestamp(), 1_359_829_859);
        assert!(session.is_expired());
    }

    #[test]
    fn test_v3_bad_expiry_is_malformed() {
        let raw = v3_raw("0123456789", r#"{ "token": { "expires_at": "tomorrow" } }"#);
        assert!(matches!(
            extract(raw, &endpoint()),
            Err(IdentityError::MalformedResponse {
                version: IdentityVersion::V3,
                ..
            })
        ));
    }

    #[test]
    fn test_v2_session_keeps_catalog_order() {
        let access: v2::AccessResponse = serde_json::from_str(V2_ACCESS_BODY).unwrap();
        let session = extract(RawAuthResponse::V2(access), &endpoint()).unwrap();

        assert_eq!(session.token_id(), "01234567890");
        assert_eq!(session.identity_version(), IdentityVersion::V2);
        assert!(session.expires_at().is_none());
        assert!(!session.is_expired());

        let types: Vec<&str> = session
            .service_catalog()
            .iter()
            .map(|entry| entry.service_type())
            .collect();
        assert_eq!(types, vec!["compute", "object-store"]);
        assert_eq!(session.service_catalog()[0].endpoints().len(), 2);
    }

    #[test]
    fn test_v2_empty_token_is_missing() {
        let access: v2::AccessResponse =
            serde_json::from_str(r#"{"access":{"token":{"id":""},"serviceCatalog":[]}}"#).unwrap();

        assert!(matches!(
            extract(RawAuthResponse::V2(access), &endpoint()),
            Err(IdentityError::MissingToken {
                version: IdentityVersion::V2
            })
        ));
    }

    #[test]
    fn test_v2_expiry_is_parsed_when_present() {
        let access: v2::AccessResponse = serde_json::from_str(
            r#"{"access":{"token":{"id":"abc","expires":"2099-01-01T00:00:00Z"}}}"#,
        )
        .unwrap();

        let session = extract(RawAuthResponse::V2(access), &endpoint()).unwrap();
        assert!(session.expires_at().is_some());
        assert!(!session.is_expired());
        assert!(session.service_catalog().is_empty());
    }

    #[test]
    fn test_v2_expiry_without_offset_is_utc() {
        let access: v2::AccessResponse = serde_json::from_str(
            r#"{"access":{"token":{"id":"01234567890","expires":"2012-02-05T00:00:00"}}}"#,
        )
        .unwrap();

        let session = extract(RawAuthResponse::V2(access), &endpoint()).unwrap();
        assert_eq!(session.token_id(), "01234567890");
        assert_eq!(session.expires_at().unwrap().unix_timestamp(), 1_328_400_000);
    }

    #[test]
    fn test_v2_unreadable_expiry_is_dropped() {
        let access: v2::AccessResponse = serde_json::from_str(
            r#"{"access":{"token":{"id":"01234567890","expires":"next tuesday"}}}"#,
        )
        .unwrap();

        let session = extract(RawAuthResponse::V2(access), &endpoint()).unwrap();
        assert_eq!(session.token_id(), "01234567890");
        assert!(session.expires_at().is_none());
        assert!(!session.is_expired());
    }
}
