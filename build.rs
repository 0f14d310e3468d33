use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

fn report_build_profile() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=BUILD_PROFILE={profile}");
}

fn report_enabled_features() {
    let mut enabled_features: Vec<&str> = Vec::new();

    if std::env::var_os("CARGO_FEATURE_DEFAULT").is_some() {
        enabled_features.push("default");
    }

    if std::env::var_os("CARGO_FEATURE_HTTP_CLIENT").is_some() {
        enabled_features.push("http-client");
    }

    if enabled_features.is_empty() {
        enabled_features.push("none");
    }

    println!(
        "cargo:rustc-env=BUILD_FEATURES={}",
        enabled_features.join(",")
    );
}

fn report_repository_version() {
    // Source tarballs have no git metadata, the package version is the best we can report
    let git_version = std::process::Command::new("git")
        .args(["describe", "--always", "--dirty", "--long", "--tags"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|version| version.trim().to_string())
        .filter(|version| !version.is_empty());

    let long_version = git_version.unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=REPO_VERSION={long_version}");

    let build_timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=BUILD_TIMESTAMP={build_timestamp}");
}

fn main() {
    report_repository_version();
    report_build_profile();
    report_enabled_features();
}
