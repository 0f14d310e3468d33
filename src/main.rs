use cloudauth::prelude::*;
use cloudauth::version::full_version;

use time::format_description::well_known::Rfc3339;

#[tokio::main]
async fn main() -> IdentityResult<()> {
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, Layer};

    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::DEBUG.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(non_blocking_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();
    tracing::debug!("running cloudauth {}", full_version());

    let credentials = Credentials::from_env()?;
    let session = authenticated_client(&credentials).await?;

    println!("identity version: {}", session.identity_version());
    println!("token: {}", session.token_id());

    if let Some(expires_at) = session.expires_at() {
        match expires_at.format(&Rfc3339) {
            Ok(formatted) => println!("expires: {formatted}"),
            Err(err) => tracing::warn!("failed to format token expiration: {err}"),
        }
    }

    for entry in session.service_catalog() {
        println!("service {} ({})", entry.service_type(), entry.name());

        for endpoint in entry.endpoints() {
            println!(
                "  region={} public={} internal={}",
                endpoint.region().unwrap_or("-"),
                endpoint.public_url().unwrap_or("-"),
                endpoint.internal_url().unwrap_or("-"),
            );
        }
    }

    Ok(())
}
