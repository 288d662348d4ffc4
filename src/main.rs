use ai_llm_service::telemetry;
use tracing::Level;
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file.
    // A missing .env is fine: the process may be configured by the environment alone.
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("no .env loaded ({e}); using process environment");
    }

    let filter = telemetry::env_filter_with_level("info,justification_engine=info", Level::INFO);

    // The LLM client renders its own events through `telemetry::layer()`.
    let app_layer = fmt::layer().with_target(false).with_filter(filter::filter_fn(|meta| {
        !meta.target().starts_with(telemetry::TARGET_PREFIX)
    }));

    tracing_subscriber::registry()
        .with(filter)
        .with(app_layer)
        .with(telemetry::layer())
        .try_init()?;

    api::start().await?;

    Ok(())
}
