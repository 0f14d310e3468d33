//! Build identification for the library, used in diagnostics and as the user agent of the bundled
//! HTTP collaborator.

/// Everything recorded about the build: profile, timestamp, enabled features and the source
/// revision, as space separated `key=value` pairs.
pub fn full_version() -> String {
    format!(
        "build-profile={} build-timestamp={} features={} repo-version={}",
        env!("BUILD_PROFILE"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_FEATURES"),
        env!("REPO_VERSION"),
    )
}

/// Only the source revision, for places where the full build description is too noisy.
pub fn minimal_version() -> String {
    format!("repo-version={}", env!("REPO_VERSION"))
}

/// Sent with every request made by [`ReqwestHttpClient`](crate::http::ReqwestHttpClient), so
/// identity service operators can attribute traffic in their access logs.
pub fn user_agent() -> String {
    format!("cloudauth/{}", minimal_version())
}
