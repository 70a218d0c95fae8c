use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use simplifier_core::config::{
    max_upload_bytes_from_env_value, resolve_canned_output, simulated_delay_from_env_value,
};
use simplifier_core::constants::DEFAULT_REST_ADDR;
use simplifier_core::{CoreConfig, MockSimplifier};

/// Main entry point for the report simplifier service
///
/// Resolves configuration from the environment once, then serves the REST API.
///
/// # Environment Variables
/// - `SIMPLIFIER_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `API_KEY`: API key required in the `x-api-key` header (required)
/// - `SIMPLIFIER_DELAY_MS`: mock simplifier delay in milliseconds (default: 2000)
/// - `SIMPLIFIER_MAX_UPLOAD_BYTES`: advisory upload limit (default: 10 MiB)
/// - `SIMPLIFIER_CANNED_OUTPUT`: file whose contents the mock simplifier returns
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("simplifier_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("simplifier_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("SIMPLIFIER_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());

    let api_key = match std::env::var("API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => anyhow::bail!("API_KEY must be set"),
    };

    let cfg = Arc::new(CoreConfig::new(
        simulated_delay_from_env_value(std::env::var("SIMPLIFIER_DELAY_MS").ok())?,
        max_upload_bytes_from_env_value(std::env::var("SIMPLIFIER_MAX_UPLOAD_BYTES").ok())?,
        resolve_canned_output(std::env::var("SIMPLIFIER_CANNED_OUTPUT").ok().map(PathBuf::from))?,
    )?);

    tracing::info!(
        delay_ms = u64::try_from(cfg.simulated_delay().as_millis()).unwrap_or(u64::MAX),
        max_upload_bytes = cfg.max_upload_bytes(),
        "++ Starting report simplifier REST on {}",
        rest_addr
    );

    let simplifier = Arc::new(MockSimplifier::from_config(&cfg));
    let state = AppState::new(cfg, simplifier, api_key);

    api_rest::serve(&rest_addr, state).await
}

